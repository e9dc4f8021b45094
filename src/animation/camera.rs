use crate::animation::EasingType;
use crate::core::camera::CameraPosition;
use crate::core::geo::{normalize_bearing, LatLng};
use std::time::{Duration, Instant};

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Signed smallest rotation from `from` to `to`, in degrees within (-180, 180]
fn bearing_delta(from: f32, to: f32) -> f32 {
    let delta = normalize_bearing(to) - normalize_bearing(from);
    if delta > 180.0 {
        delta - 360.0
    } else if delta <= -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

/// Signed smallest longitude change from `from` to `to`, across the antimeridian if shorter
fn lng_delta(from: f64, to: f64) -> f64 {
    LatLng::wrap_lng(to - from)
}

/// Glide from one camera position to another
///
/// Latitude, zoom and tilt are interpolated linearly under the easing curve.
/// Bearing and longitude go the shorter way round: a heading change from
/// 350° to 10° sweeps 20°, and a hop from 179°E to 179°W crosses the
/// antimeridian instead of the whole world.
#[derive(Debug, Clone)]
pub struct CameraAnimation {
    start_time: Instant,
    duration: Duration,
    easing: EasingType,
    from: CameraPosition,
    to: CameraPosition,
    active: bool,
}

impl CameraAnimation {
    pub fn new(from: CameraPosition, to: CameraPosition, duration: Duration, easing: EasingType) -> Self {
        Self::starting_at(from, to, Instant::now(), duration, easing)
    }

    pub fn starting_at(
        from: CameraPosition,
        to: CameraPosition,
        start_time: Instant,
        duration: Duration,
        easing: EasingType,
    ) -> Self {
        Self {
            start_time,
            duration,
            easing,
            from,
            to,
            active: true,
        }
    }

    /// Samples the camera at `now`; returns `None` once the animation has ended
    pub fn update_at(&mut self, now: Instant) -> Option<CameraPosition> {
        if !self.active {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        if elapsed >= self.duration {
            self.active = false;
            return Some(self.to);
        }

        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        Some(self.sample(self.easing.apply(progress)))
    }

    fn sample(&self, t: f64) -> CameraPosition {
        let (from, to) = (self.from.target, self.to.target);
        let target = LatLng::new(
            lerp(from.lat, to.lat, t),
            LatLng::wrap_lng(from.lng + lng_delta(from.lng, to.lng) * t),
        );
        let turn = bearing_delta(self.from.bearing, self.to.bearing);

        CameraPosition {
            target,
            zoom: lerp(self.from.zoom as f64, self.to.zoom as f64, t) as f32,
            bearing: normalize_bearing(self.from.bearing + turn * t as f32),
            tilt: lerp(self.from.tilt as f64, self.to.tilt as f64, t) as f32,
        }
    }

    /// Final camera position of this animation
    pub fn target(&self) -> CameraPosition {
        self.to
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(lat: f64, lng: f64, zoom: f32, bearing: f32) -> CameraPosition {
        CameraPosition::builder()
            .target(LatLng::new(lat, lng))
            .zoom(zoom)
            .bearing(bearing)
            .build()
    }

    #[test]
    fn test_halfway_linear() {
        let start = Instant::now();
        let mut animation = CameraAnimation::starting_at(
            camera(0.0, 0.0, 10.0, 0.0),
            camera(10.0, 20.0, 12.0, 90.0),
            start,
            Duration::from_millis(400),
            EasingType::Linear,
        );

        let mid = animation.update_at(start + Duration::from_millis(200)).unwrap();
        assert!((mid.target.lat - 5.0).abs() < 1e-9);
        assert!((mid.target.lng - 10.0).abs() < 1e-9);
        assert!((mid.zoom - 11.0).abs() < 1e-5);
        assert!((mid.bearing - 45.0).abs() < 1e-4);
        assert!(animation.is_active());
    }

    #[test]
    fn test_finishes_exactly_on_target() {
        let start = Instant::now();
        let to = camera(10.0, 20.0, 15.0, 90.0);
        let mut animation = CameraAnimation::starting_at(
            camera(0.0, 0.0, 15.0, 0.0),
            to,
            start,
            Duration::from_millis(100),
            EasingType::EaseOut,
        );

        assert_eq!(animation.update_at(start + Duration::from_millis(150)), Some(to));
        assert!(!animation.is_active());
        assert_eq!(animation.update_at(start + Duration::from_millis(200)), None);
    }

    #[test]
    fn test_bearing_takes_short_arc() {
        let start = Instant::now();
        let mut animation = CameraAnimation::starting_at(
            camera(0.0, 0.0, 15.0, 350.0),
            camera(0.0, 0.0, 15.0, 10.0),
            start,
            Duration::from_millis(100),
            EasingType::Linear,
        );

        let mid = animation.update_at(start + Duration::from_millis(50)).unwrap();
        assert!(mid.bearing < 0.001 || mid.bearing > 359.999, "bearing {}", mid.bearing);
    }

    #[test]
    fn test_longitude_crosses_antimeridian() {
        let start = Instant::now();
        let mut animation = CameraAnimation::starting_at(
            camera(0.0, 179.0, 15.0, 0.0),
            camera(0.0, -179.0, 15.0, 0.0),
            start,
            Duration::from_millis(100),
            EasingType::Linear,
        );

        let quarter = animation.update_at(start + Duration::from_millis(25)).unwrap();
        assert!((quarter.target.lng - 179.5).abs() < 1e-9, "lng {}", quarter.target.lng);

        let three_quarters = animation.update_at(start + Duration::from_millis(75)).unwrap();
        let lng = three_quarters.target.lng;
        assert!((lng + 179.5).abs() < 1e-9, "lng {}", lng);
    }

    #[test]
    fn test_lng_delta() {
        assert_eq!(lng_delta(179.0, -179.0), 2.0);
        assert_eq!(lng_delta(-179.0, 179.0), -2.0);
        assert_eq!(lng_delta(0.0, 20.0), 20.0);
    }

    #[test]
    fn test_bearing_delta() {
        assert_eq!(bearing_delta(350.0, 10.0), 20.0);
        assert_eq!(bearing_delta(10.0, 350.0), -20.0);
        assert_eq!(bearing_delta(0.0, 180.0), 180.0);
    }
}
