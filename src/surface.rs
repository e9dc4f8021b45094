//! What the session needs from a map and from the host's notice area.

use crate::{
    core::{camera::CameraUpdate, geo::LatLng},
    layers::marker::{MarkerId, MarkerOptions},
};

/// A live, initialized map the session can draw on
pub trait MapSurface {
    fn add_marker(&mut self, options: MarkerOptions) -> MarkerId;

    /// Moves an existing marker; unknown ids are ignored
    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng);

    /// Jumps the camera without animation
    fn move_camera(&mut self, update: CameraUpdate);

    fn animate_camera(&mut self, update: CameraUpdate);

    fn min_zoom(&self) -> f32;

    fn max_zoom(&self) -> f32;

    /// Toggles the surface's own "you are here" layer
    fn set_my_location_enabled(&mut self, enabled: bool);
}

/// Short, non-blocking user notices
pub trait Notifier {
    fn show(&mut self, message: &str);
}
