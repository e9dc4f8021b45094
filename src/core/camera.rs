//! Camera descriptors handed to a [`MapSurface`](crate::surface::MapSurface).

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Where the map is looking: center, zoom, compass bearing and tilt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    pub target: LatLng,
    pub zoom: f32,
    /// Degrees clockwise from north
    pub bearing: f32,
    /// Degrees away from looking straight down
    pub tilt: f32,
}

impl CameraPosition {
    pub fn builder() -> CameraPositionBuilder {
        CameraPositionBuilder::default()
    }
}

impl Default for CameraPosition {
    fn default() -> Self {
        Self {
            target: LatLng::default(),
            zoom: 0.0,
            bearing: 0.0,
            tilt: 0.0,
        }
    }
}

/// Builder for [`CameraPosition`]; unset fields stay at their defaults
#[derive(Debug, Clone, Default)]
pub struct CameraPositionBuilder {
    position: CameraPosition,
}

impl CameraPositionBuilder {
    pub fn target(mut self, target: LatLng) -> Self {
        self.position.target = target;
        self
    }

    pub fn zoom(mut self, zoom: f32) -> Self {
        self.position.zoom = zoom;
        self
    }

    pub fn bearing(mut self, bearing: f32) -> Self {
        self.position.bearing = bearing;
        self
    }

    pub fn tilt(mut self, tilt: f32) -> Self {
        self.position.tilt = tilt;
        self
    }

    pub fn build(self) -> CameraPosition {
        self.position
    }
}

/// A change to apply to the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraUpdate {
    /// Replace the whole camera position
    NewPosition(CameraPosition),
    /// Change only the zoom, keeping target, bearing and tilt
    ZoomTo(f32),
}

impl CameraUpdate {
    /// Resolves the update against the current camera
    pub fn apply_to(&self, current: &CameraPosition) -> CameraPosition {
        match *self {
            CameraUpdate::NewPosition(position) => position,
            CameraUpdate::ZoomTo(zoom) => CameraPosition { zoom, ..*current },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let camera = CameraPosition::builder().zoom(15.0).build();
        assert_eq!(camera.target, LatLng::new(0.0, 0.0));
        assert_eq!(camera.zoom, 15.0);
        assert_eq!(camera.bearing, 0.0);
        assert_eq!(camera.tilt, 0.0);
    }

    #[test]
    fn test_zoom_to_keeps_everything_else() {
        let current = CameraPosition::builder()
            .target(LatLng::new(10.0, 20.0))
            .zoom(15.0)
            .bearing(90.0)
            .tilt(30.0)
            .build();

        let next = CameraUpdate::ZoomTo(16.0).apply_to(&current);
        assert_eq!(next.target, current.target);
        assert_eq!(next.bearing, 90.0);
        assert_eq!(next.tilt, 30.0);
        assert_eq!(next.zoom, 16.0);
    }
}
