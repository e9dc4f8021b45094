//! A location provider that walks a synthetic route on a worker thread
//!
//! The worker plays the role of the platform's location service: it ticks on
//! its own thread and pushes fixes into a channel. The host drains the
//! [`LocationFeed`] from its UI loop and hands each result to the session, so
//! the session itself only ever runs on the UI thread.

use crate::{
    core::geo::{normalize_bearing, LatLng},
    location::{Location, LocationProvider, LocationRequest, LocationResult, SubscriptionId},
    Result, TrackError,
};
use crossbeam_channel::{Receiver, Sender};
use fxhash::FxHashMap;
use geo::HaversineDestination;
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use std::time::Duration;

/// Shape of the synthetic walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedRoute {
    pub start: LatLng,
    /// Initial heading in degrees
    pub heading: f32,
    /// Ground speed in metres per second
    pub speed_mps: f64,
    /// Heading change applied on every tick, in degrees
    pub turn_per_tick: f32,
}

impl SimulatedRoute {
    pub fn walker(&self) -> RouteWalker {
        RouteWalker {
            position: self.start.into(),
            heading: normalize_bearing(self.heading),
            speed_mps: self.speed_mps,
            turn_per_tick: self.turn_per_tick,
        }
    }
}

impl Default for SimulatedRoute {
    fn default() -> Self {
        // A slow loop around Lisbon's Praça do Comércio
        Self {
            start: LatLng::new(38.7076, -9.1365),
            heading: 0.0,
            speed_mps: 6.0,
            turn_per_tick: 4.0,
        }
    }
}

/// Stateful cursor along a [`SimulatedRoute`]
#[derive(Debug, Clone)]
pub struct RouteWalker {
    position: geo::Point<f64>,
    heading: f32,
    speed_mps: f64,
    turn_per_tick: f32,
}

impl RouteWalker {
    /// Moves forward by `elapsed` at the current heading, then turns
    pub fn step(&mut self, elapsed: Duration) -> Location {
        let distance = self.speed_mps * elapsed.as_secs_f64();
        self.position = self
            .position
            .haversine_destination(self.heading as f64, distance);

        let fix = LatLng::from(self.position);
        let location = Location::new(fix.lat, LatLng::wrap_lng(fix.lng), self.heading);
        self.heading = normalize_bearing(self.heading + self.turn_per_tick);
        location
    }
}

struct Worker {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// Receiving side of a [`SimulatedLocationProvider`]
#[derive(Clone)]
pub struct LocationFeed {
    receiver: Receiver<LocationResult>,
}

impl LocationFeed {
    /// Everything delivered since the last drain, in arrival order
    pub fn drain(&self) -> Vec<LocationResult> {
        self.receiver.try_iter().collect()
    }

    pub fn receiver(&self) -> &Receiver<LocationResult> {
        &self.receiver
    }
}

pub struct SimulatedLocationProvider {
    route: SimulatedRoute,
    results_tx: Sender<LocationResult>,
    results_rx: Receiver<LocationResult>,
    workers: FxHashMap<SubscriptionId, Worker>,
    next_id: u64,
}

impl SimulatedLocationProvider {
    pub fn new(route: SimulatedRoute) -> Self {
        let (results_tx, results_rx) = crossbeam_channel::unbounded();
        Self {
            route,
            results_tx,
            results_rx,
            workers: FxHashMap::default(),
            next_id: 1,
        }
    }

    pub fn feed(&self) -> LocationFeed {
        LocationFeed {
            receiver: self.results_rx.clone(),
        }
    }

    pub fn active_subscriptions(&self) -> usize {
        self.workers.len()
    }
}

impl Default for SimulatedLocationProvider {
    fn default() -> Self {
        Self::new(SimulatedRoute::default())
    }
}

impl LocationProvider for SimulatedLocationProvider {
    fn request_location_updates(&mut self, request: &LocationRequest) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let interval = request.interval().max(request.fastest_interval());
        if interval.is_zero() {
            return Err(TrackError::Location("update interval must be positive".into()));
        }

        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let results = self.results_tx.clone();
        let mut walker = self.route.walker();

        let handle = std::thread::Builder::new()
            .name(format!("location-feed-{}", id.0))
            .spawn(move || {
                let ticker = crossbeam_channel::tick(interval);
                loop {
                    crossbeam_channel::select! {
                        recv(stop_rx) -> _ => break,
                        recv(ticker) -> _ => {
                            let fix = LocationResult::single(walker.step(interval));
                            if results.send(fix).is_err() {
                                break;
                            }
                        }
                    }
                }
                log::debug!("location feed worker exiting");
            })?;

        log::info!(
            "Simulated location updates started ({:?} every {:?})",
            request.priority,
            interval
        );
        self.workers.insert(id, Worker { stop: stop_tx, handle });
        Ok(id)
    }

    fn remove_location_updates(&mut self, subscription: SubscriptionId) {
        let Some(worker) = self.workers.remove(&subscription) else {
            return;
        };

        let _ = worker.stop.send(());
        if worker.handle.join().is_err() {
            log::warn!("Location feed worker {:?} panicked", subscription);
        }
        log::info!("Simulated location updates stopped");
    }
}

impl Drop for SimulatedLocationProvider {
    fn drop(&mut self) {
        let ids: Vec<_> = self.workers.keys().copied().collect();
        for id in ids {
            self.remove_location_updates(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::HaversineDistance;

    #[test]
    fn test_walker_moves_at_speed() {
        let route = SimulatedRoute {
            start: LatLng::new(0.0, 0.0),
            heading: 90.0,
            speed_mps: 10.0,
            turn_per_tick: 0.0,
        };
        let mut walker = route.walker();

        let fix = walker.step(Duration::from_secs(1));
        let start: geo::Point<f64> = route.start.into();
        let end: geo::Point<f64> = fix.lat_lng().into();

        assert!((start.haversine_distance(&end) - 10.0).abs() < 0.01);
        assert!(fix.longitude > 0.0);
        assert!(fix.latitude.abs() < 1e-6);
        assert_eq!(fix.bearing, 90.0);
    }

    #[test]
    fn test_walker_turns_each_tick() {
        let route = SimulatedRoute {
            heading: 350.0,
            turn_per_tick: 15.0,
            ..SimulatedRoute::default()
        };
        let mut walker = route.walker();

        assert_eq!(walker.step(Duration::from_millis(500)).bearing, 350.0);
        assert_eq!(walker.step(Duration::from_millis(500)).bearing, 5.0);
    }

    #[test]
    fn test_subscription_delivers_and_stops() {
        let mut provider = SimulatedLocationProvider::default();
        let feed = provider.feed();
        let request = LocationRequest {
            interval_ms: 10,
            fastest_interval_ms: 5,
            priority: crate::location::Priority::HighAccuracy,
        };

        let id = provider.request_location_updates(&request).unwrap();
        assert_eq!(provider.active_subscriptions(), 1);

        let first = feed
            .receiver()
            .recv_timeout(Duration::from_secs(2))
            .expect("feed should tick");
        assert!(first.last_location().is_some());

        provider.remove_location_updates(id);
        assert_eq!(provider.active_subscriptions(), 0);

        // Drain whatever was in flight, then nothing new should arrive
        feed.drain();
        std::thread::sleep(Duration::from_millis(50));
        assert!(feed.drain().is_empty());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut provider = SimulatedLocationProvider::default();
        let request = LocationRequest {
            interval_ms: 0,
            fastest_interval_ms: 0,
            priority: crate::location::Priority::LowPower,
        };
        assert!(provider.request_location_updates(&request).is_err());
        assert_eq!(provider.active_subscriptions(), 0);
    }
}
