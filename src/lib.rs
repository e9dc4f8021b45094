//! # followmap
//!
//! A small, Rust-native live-location map.
//!
//! The heart of the crate is [`MapSession`], which glues a map surface, a
//! location feed, a permission gate and a preference store together: it
//! follows the device with a single marker, animates the camera behind it,
//! and remembers the user's zoom level between sessions. The collaborators
//! are traits so the session can be driven by any host; the `egui` feature
//! ships a desktop host.

pub mod animation;
pub mod core;
pub mod layers;
pub mod location;
pub mod navigation;
pub mod permissions;
pub mod prefs;
pub mod prelude;
pub mod session;
pub mod surface;
#[cfg(feature = "egui")]
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    camera::{CameraPosition, CameraUpdate},
    config::{TrackingOptions, TrackingProfile},
    geo::{LatLng, Point},
};

pub use layers::marker::{Marker, MarkerId, MarkerOptions};

pub use location::{Location, LocationProvider, LocationRequest, LocationResult, Priority};

pub use navigation::{Navigator, Screen};

pub use permissions::{Permission, PermissionGate, PermissionStatus};

pub use prefs::{file::FilePreferences, memory::MemoryPreferences, PreferenceStore};

pub use session::{MapSession, SessionEvent, SessionState, ZoomDirection};

pub use surface::{MapSurface, Notifier};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TrackError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Location error: {0}")]
    Location(String),

    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = TrackError;
