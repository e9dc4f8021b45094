//! Prelude module for common followmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use followmap::prelude::*;`

pub use crate::core::{
    camera::{CameraPosition, CameraPositionBuilder, CameraUpdate},
    config::{CameraOptions, TrackingOptions, TrackingProfile},
    geo::{LatLng, Point},
};

pub use crate::animation::{CameraAnimation, EasingType};

pub use crate::layers::marker::{Marker, MarkerId, MarkerOptions};

pub use crate::location::{
    Location, LocationFeed, LocationProvider, LocationRequest, LocationResult, Priority,
    SimulatedLocationProvider, SimulatedRoute, SubscriptionId,
};

pub use crate::permissions::{Permission, PermissionGate, PermissionStatus, SharedPermissions};

pub use crate::prefs::{file::FilePreferences, memory::MemoryPreferences, PreferenceStore};

pub use crate::session::{MapSession, SessionEvent, SessionState, ZoomDirection};

pub use crate::surface::{MapSurface, Notifier};

pub use crate::navigation::{Navigator, Screen};

#[cfg(feature = "egui")]
pub use crate::ui::{launcher::Launcher, map_view::MapView, notices::Notices, prompt::PermissionPrompt};

pub use crate::{Error as TrackError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
