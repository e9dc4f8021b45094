//! Configuration presets for the tracking session
//!
//! A [`TrackingProfile`] resolves into a full set of [`TrackingOptions`], so
//! hosts can pick a preset or hand in a custom configuration.

use crate::animation::EasingType;
use crate::core::constants::{
    DEFAULT_ZOOM, FOLLOW_TILT, LOCATION_FASTEST_INTERVAL_MS, LOCATION_INTERVAL_MS, ZOOM_STEP,
    USER_MARKER_TITLE,
};
use crate::location::{LocationRequest, Priority};
use crate::TrackError;
use serde::{Deserialize, Serialize};

/// Every preset requests the same fixes and follows with the same tilt and
/// zoom step; presets differ only in how the camera glides between fixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrackingProfile {
    /// The regular follow mode
    Standard,
    /// Short linear glides, the camera keeps up with every fix
    Snappy,
    /// Longer, smoother camera glides
    Smooth,
    /// Hand-built options; nothing is held fixed
    Custom(TrackingOptions),
}

impl TrackingProfile {
    pub fn resolve(&self) -> TrackingOptions {
        match self {
            Self::Standard => follow_options(400, EasingType::EaseOut),
            Self::Snappy => follow_options(150, EasingType::Linear),
            Self::Smooth => follow_options(700, EasingType::Smooth),
            Self::Custom(options) => options.clone(),
        }
    }
}

/// One-second high accuracy fixes, tilt and zoom step fixed
fn follow_options(animation_duration_ms: u64, easing: EasingType) -> TrackingOptions {
    TrackingOptions {
        location: LocationRequest {
            interval_ms: LOCATION_INTERVAL_MS,
            fastest_interval_ms: LOCATION_FASTEST_INTERVAL_MS,
            priority: Priority::HighAccuracy,
        },
        camera: CameraOptions {
            follow_tilt: FOLLOW_TILT,
            zoom_step: ZOOM_STEP,
            default_zoom: DEFAULT_ZOOM,
            animation_duration_ms,
            easing,
        },
        marker_title: USER_MARKER_TITLE.to_string(),
    }
}

impl Default for TrackingProfile {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::str::FromStr for TrackingProfile {
    type Err = TrackError;

    /// Parses a preset name; custom profiles are built in code
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "snappy" => Ok(Self::Snappy),
            "smooth" => Ok(Self::Smooth),
            other => Err(TrackError::Config(format!("unknown tracking profile '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingOptions {
    pub location: LocationRequest,
    pub camera: CameraOptions,
    pub marker_title: String,
}

impl Default for TrackingOptions {
    fn default() -> Self {
        TrackingProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Tilt applied while following the user
    pub follow_tilt: f32,
    /// Amount a single zoom control press changes the zoom by
    pub zoom_step: f32,
    /// Zoom used when nothing has been persisted yet
    pub default_zoom: f32,
    pub animation_duration_ms: u64,
    pub easing: EasingType,
}

impl CameraOptions {
    pub fn animation_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.animation_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_profile_matches_follow_defaults() {
        let options = TrackingOptions::default();
        assert_eq!(options.location.interval_ms, 1000);
        assert_eq!(options.location.fastest_interval_ms, 500);
        assert_eq!(options.location.priority, Priority::HighAccuracy);
        assert_eq!(options.camera.follow_tilt, 30.0);
        assert_eq!(options.camera.zoom_step, 1.0);
        assert_eq!(options.camera.default_zoom, 15.0);
        assert_eq!(options.marker_title, "You");
    }

    #[test]
    fn test_presets_only_change_the_glide() {
        let standard = TrackingProfile::Standard.resolve();
        for preset in [TrackingProfile::Snappy, TrackingProfile::Smooth] {
            let options = preset.resolve();
            assert_eq!(options.location, standard.location);
            assert_eq!(options.camera.follow_tilt, 30.0);
            assert_eq!(options.camera.zoom_step, 1.0);
            assert_eq!(options.camera.default_zoom, 15.0);
            assert_eq!(options.marker_title, standard.marker_title);
            assert_ne!(options.camera.animation_duration_ms, standard.camera.animation_duration_ms);
        }
    }

    #[test]
    fn test_custom_profile_resolves_to_itself() {
        let mut options = TrackingProfile::Smooth.resolve();
        options.marker_title = "Me".to_string();

        let resolved = TrackingProfile::Custom(options.clone()).resolve();
        assert_eq!(resolved, options);
    }

    #[test]
    fn test_profile_names() {
        assert_eq!("standard".parse::<TrackingProfile>().unwrap(), TrackingProfile::Standard);
        assert_eq!(" Smooth ".parse::<TrackingProfile>().unwrap(), TrackingProfile::Smooth);
        assert_eq!("SNAPPY".parse::<TrackingProfile>().unwrap(), TrackingProfile::Snappy);
        assert!("turbo".parse::<TrackingProfile>().is_err());
    }

    #[test]
    fn test_profiles_serialize() {
        let options = TrackingProfile::Snappy.resolve();
        let json = serde_json::to_string(&options).unwrap();
        let back: TrackingOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }
}
