use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Handle to a marker that lives on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// What to place when adding a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerOptions {
    pub position: LatLng,
    pub title: Option<String>,
}

impl MarkerOptions {
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            title: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A marker as held by a surface: identity never changes, position does
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    position: LatLng,
    title: Option<String>,
}

impl Marker {
    pub fn new(id: MarkerId, options: MarkerOptions) -> Self {
        Self {
            id,
            position: options.position,
            title: options.title,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
