//! Core constants for the tracking session.
//! Keeping them in a single place makes it easier to tweak app-wide magic numbers.

/// Name of the preference store that holds the map settings.
pub const PREFS_NAME: &str = "MapPrefs";

/// Preference key under which the zoom level is persisted.
pub const ZOOM_LEVEL_KEY: &str = "zoom_level";

/// Zoom used when no preference has been stored yet.
pub const DEFAULT_ZOOM: f32 = 15.0;

/// Step applied by the zoom in/out controls.
pub const ZOOM_STEP: f32 = 1.0;

/// Request code attached to the fine-location permission request.
pub const LOCATION_PERMISSION_REQUEST_CODE: i32 = 1;

/// Target interval between location updates.
pub const LOCATION_INTERVAL_MS: u64 = 1000;

/// Fastest interval the feed is allowed to deliver updates at.
pub const LOCATION_FASTEST_INTERVAL_MS: u64 = 500;

/// Camera tilt used while following the user, in degrees.
pub const FOLLOW_TILT: f32 = 30.0;

/// Title shown on the user's marker.
pub const USER_MARKER_TITLE: &str = "You";

/// Notice shown when the user refuses the location permission.
pub const PERMISSION_DENIED_NOTICE: &str = "Location permission denied";

/// Notice shown when updates are started without a permission grant.
pub const PERMISSION_NOT_GRANTED_NOTICE: &str = "Location permission not granted";

/// Zoom range reported by the desktop map view.
pub const MIN_ZOOM: f32 = 2.0;
pub const MAX_ZOOM: f32 = 21.0;
