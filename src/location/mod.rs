//! Device location feed abstractions
//!
//! A [`LocationProvider`] is push-style: once subscribed, the host delivers
//! every [`LocationResult`] to the session as it arrives. Nothing polls.

pub mod simulated;

use crate::{core::geo::LatLng, Result};
use serde::{Deserialize, Serialize};

pub use simulated::{LocationFeed, SimulatedLocationProvider, SimulatedRoute};

/// A single position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Direction of travel, degrees clockwise from north
    pub bearing: f32,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, bearing: f32) -> Self {
        Self {
            latitude,
            longitude,
            bearing,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// A batch of fixes delivered by one feed tick, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationResult {
    pub locations: Vec<Location>,
}

impl LocationResult {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    pub fn single(location: Location) -> Self {
        Self::new(vec![location])
    }

    /// The freshest fix in the batch
    pub fn last_location(&self) -> Option<&Location> {
        self.locations.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
    NoPower,
}

/// How often, and how precisely, the feed should deliver fixes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRequest {
    pub interval_ms: u64,
    /// Upper bound on delivery rate when fixes are available sooner
    pub fastest_interval_ms: u64,
    pub priority: Priority,
}

impl LocationRequest {
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.interval_ms)
    }

    pub fn fastest_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.fastest_interval_ms)
    }
}

impl Default for LocationRequest {
    fn default() -> Self {
        crate::core::config::TrackingOptions::default().location
    }
}

/// Identifies one active subscription on a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Source of periodic device positions
pub trait LocationProvider {
    /// Starts pushing fixes according to `request`
    fn request_location_updates(&mut self, request: &LocationRequest) -> Result<SubscriptionId>;

    /// Stops a subscription; unknown ids are ignored
    fn remove_location_updates(&mut self, subscription: SubscriptionId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_location_wins() {
        let result = LocationResult::new(vec![
            Location::new(1.0, 2.0, 0.0),
            Location::new(3.0, 4.0, 45.0),
        ]);
        assert_eq!(result.last_location(), Some(&Location::new(3.0, 4.0, 45.0)));
        assert_eq!(LocationResult::default().last_location(), None);
    }

    #[test]
    fn test_default_request() {
        let request = LocationRequest::default();
        assert_eq!(request.interval(), std::time::Duration::from_millis(1000));
        assert_eq!(request.fastest_interval(), std::time::Duration::from_millis(500));
        assert_eq!(request.priority, Priority::HighAccuracy);
    }
}
