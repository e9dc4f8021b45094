//! egui host for the tracking session
//!
//! [`map_view::MapView`] is the map surface, [`notices::Notices`] the toast
//! area, [`prompt::PermissionPrompt`] the permission dialog and
//! [`launcher::Launcher`] the first screen.

pub mod launcher;
pub mod map_view;
pub mod notices;
pub mod prompt;

pub use launcher::Launcher;
pub use map_view::{MapView, MapViewResponse};
pub use notices::Notices;
pub use prompt::PermissionPrompt;
