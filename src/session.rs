//! The map screen's orchestrator
//!
//! A [`MapSession`] lives exactly as long as one map screen. The host feeds
//! it callbacks in arrival order from a single UI thread: the map becoming
//! ready, the permission answer, location ticks, zoom presses and finally
//! teardown. The session never blocks and never spawns; every handler just
//! mutates the marker, the camera or the zoom preference and returns.
//!
//! ```text
//! AwaitingMapReady ─▶ AwaitingPermission ─┬─▶ Tracking
//!                                         └─▶ PermissionDenied
//! (any) ─ on_destroy ─▶ Closed
//! ```

use crate::{
    core::{
        camera::{CameraPosition, CameraUpdate},
        config::TrackingOptions,
        constants::{
            LOCATION_PERMISSION_REQUEST_CODE, PERMISSION_DENIED_NOTICE,
            PERMISSION_NOT_GRANTED_NOTICE,
        },
        geo::LatLng,
    },
    layers::marker::{MarkerId, MarkerOptions},
    location::{LocationProvider, LocationResult, SubscriptionId},
    permissions::{Permission, PermissionGate, PermissionStatus},
    prefs::{self, PreferenceStore},
    surface::{MapSurface, Notifier},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMapReady,
    AwaitingPermission,
    /// Terminal: the user said no and nothing is retried
    PermissionDenied,
    Tracking,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Everything the host can deliver to a session
#[derive(Debug)]
pub enum SessionEvent<S> {
    MapReady(S),
    PermissionResult {
        request_code: i32,
        grants: Vec<PermissionStatus>,
    },
    LocationResult(LocationResult),
    Zoom(ZoomDirection),
    Destroy,
}

pub struct MapSession<S: MapSurface> {
    options: TrackingOptions,
    preferences: Box<dyn PreferenceStore>,
    location: Box<dyn LocationProvider>,
    permissions: Box<dyn PermissionGate>,
    notifier: Box<dyn Notifier>,
    surface: Option<S>,
    user_marker: Option<MarkerId>,
    subscription: Option<SubscriptionId>,
    zoom: f32,
    state: SessionState,
}

impl<S: MapSurface> MapSession<S> {
    /// Activates a session with the standard tracking options
    pub fn new(
        preferences: impl PreferenceStore + 'static,
        location: impl LocationProvider + 'static,
        permissions: impl PermissionGate + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        Self::with_options(
            TrackingOptions::default(),
            preferences,
            location,
            permissions,
            notifier,
        )
    }

    /// Activates a session; the persisted zoom is loaded right away
    pub fn with_options(
        options: TrackingOptions,
        preferences: impl PreferenceStore + 'static,
        location: impl LocationProvider + 'static,
        permissions: impl PermissionGate + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        let mut session = Self {
            zoom: options.camera.default_zoom,
            options,
            preferences: Box::new(preferences),
            location: Box::new(location),
            permissions: Box::new(permissions),
            notifier: Box::new(notifier),
            surface: None,
            user_marker: None,
            subscription: None,
            state: SessionState::AwaitingMapReady,
        };
        session.load_zoom_preference();
        session
    }

    /// Re-reads the persisted zoom into the session and returns it
    pub fn load_zoom_preference(&mut self) -> f32 {
        self.zoom = prefs::load_zoom(&*self.preferences, self.options.camera.default_zoom);
        log::debug!("Loaded zoom preference {}", self.zoom);
        self.zoom
    }

    pub fn save_zoom_preference(&mut self, zoom: f32) {
        prefs::save_zoom(&mut *self.preferences, zoom);
    }

    pub fn handle_event(&mut self, event: SessionEvent<S>) {
        match event {
            SessionEvent::MapReady(surface) => self.on_map_ready(surface),
            SessionEvent::PermissionResult {
                request_code,
                grants,
            } => self.on_request_permissions_result(request_code, &grants),
            SessionEvent::LocationResult(result) => self.on_location_result(&result),
            SessionEvent::Zoom(direction) => self.adjust_zoom(direction),
            SessionEvent::Destroy => self.on_destroy(),
        }
    }

    /// One-time handoff of the initialized map
    pub fn on_map_ready(&mut self, surface: S) {
        if self.state != SessionState::AwaitingMapReady {
            log::debug!("Ignoring map-ready in state {:?}", self.state);
            return;
        }

        let surface = self.surface.insert(surface);
        self.state = SessionState::AwaitingPermission;

        if self.permissions.check(Permission::FineLocation).is_granted() {
            surface.set_my_location_enabled(true);
            self.start_location_updates();
        } else {
            self.permissions.request(
                &[Permission::FineLocation],
                LOCATION_PERMISSION_REQUEST_CODE,
            );
        }

        // No fix yet: park the camera on (0, 0) at the remembered zoom
        if let Some(surface) = self.surface.as_mut() {
            let placeholder = CameraPosition::builder()
                .target(LatLng::new(0.0, 0.0))
                .zoom(self.zoom)
                .build();
            surface.move_camera(CameraUpdate::NewPosition(placeholder));
        }
    }

    /// Answer to the request issued from [`MapSession::on_map_ready`]
    pub fn on_request_permissions_result(&mut self, request_code: i32, grants: &[PermissionStatus]) {
        if request_code != LOCATION_PERMISSION_REQUEST_CODE {
            return;
        }
        // Only the request issued from map-ready is answered; before it there
        // is no surface to follow with, after it the outcome is settled
        if self.state != SessionState::AwaitingPermission {
            log::debug!("Ignoring permission result in state {:?}", self.state);
            return;
        }

        if grants.first().copied() == Some(PermissionStatus::Granted) {
            if self.permissions.check(Permission::FineLocation).is_granted() {
                if let Some(surface) = self.surface.as_mut() {
                    surface.set_my_location_enabled(true);
                }
                self.start_location_updates();
            }
        } else {
            log::info!("Location permission denied; tracking disabled");
            self.notifier.show(PERMISSION_DENIED_NOTICE);
            self.state = SessionState::PermissionDenied;
        }
    }

    fn start_location_updates(&mut self) {
        if self.subscription.is_some() {
            return;
        }

        if !self.permissions.check(Permission::FineLocation).is_granted() {
            self.notifier.show(PERMISSION_NOT_GRANTED_NOTICE);
            return;
        }

        match self.location.request_location_updates(&self.options.location) {
            Ok(subscription) => {
                log::info!(
                    "Location updates started (every {} ms, fastest {} ms)",
                    self.options.location.interval_ms,
                    self.options.location.fastest_interval_ms
                );
                self.subscription = Some(subscription);
                self.state = SessionState::Tracking;
            }
            Err(e) => log::error!("Failed to start location updates: {}", e),
        }
    }

    /// Moves the user marker and points the camera at the newest fix
    pub fn on_location_result(&mut self, result: &LocationResult) {
        if self.state == SessionState::Closed {
            return;
        }
        let Some(location) = result.last_location() else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let position = location.lat_lng();
        match self.user_marker {
            Some(marker) => surface.set_marker_position(marker, position),
            None => {
                let options = MarkerOptions::new(position).title(self.options.marker_title.clone());
                self.user_marker = Some(surface.add_marker(options));
            }
        }

        let camera = CameraPosition::builder()
            .target(position)
            .zoom(self.zoom)
            .bearing(location.bearing)
            .tilt(self.options.camera.follow_tilt)
            .build();
        surface.animate_camera(CameraUpdate::NewPosition(camera));
    }

    /// One press of the zoom in/out control
    pub fn adjust_zoom(&mut self, direction: ZoomDirection) {
        if self.state == SessionState::Closed {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let step = self.options.camera.zoom_step;
        self.zoom = match direction {
            ZoomDirection::In => (self.zoom + step).min(surface.max_zoom()),
            ZoomDirection::Out => (self.zoom - step).max(surface.min_zoom()),
        };

        prefs::save_zoom(&mut *self.preferences, self.zoom);
        surface.animate_camera(CameraUpdate::ZoomTo(self.zoom));
    }

    /// Ends the screen: stops the feed and turns every later callback into a no-op
    pub fn on_destroy(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.location.remove_location_updates(subscription);
            log::info!("Location updates removed");
        }
        self.state = SessionState::Closed;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_tracking(&self) -> bool {
        self.state == SessionState::Tracking
    }

    pub fn user_marker(&self) -> Option<MarkerId> {
        self.user_marker
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn options(&self) -> &TrackingOptions {
        &self.options
    }
}

impl<S: MapSurface> Drop for MapSession<S> {
    fn drop(&mut self) {
        if self.subscription.is_some() {
            self.on_destroy();
        }
    }
}
