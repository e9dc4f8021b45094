//! Runtime permission checks
//!
//! Requests are asynchronous: [`PermissionGate::request`] only asks, and the
//! answer comes back later through
//! [`MapSession::on_request_permissions_result`](crate::session::MapSession::on_request_permissions_result).

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Precise device location
    FineLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        self == PermissionStatus::Granted
    }
}

pub trait PermissionGate {
    fn check(&self, permission: Permission) -> PermissionStatus;

    /// Asks the user; must not block
    fn request(&mut self, permissions: &[Permission], request_code: i32);
}

/// A permission request waiting for an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub permissions: Vec<Permission>,
    pub request_code: i32,
}

#[derive(Debug, Default)]
struct GrantState {
    granted: Vec<Permission>,
    pending: Option<PendingRequest>,
}

/// In-process permission registry shared between a session and its host
///
/// Clones share state, so a host can keep one handle to answer requests
/// while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct SharedPermissions {
    state: Rc<RefCell<GrantState>>,
}

impl SharedPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out with `permission` already granted
    pub fn granted(permission: Permission) -> Self {
        let shared = Self::new();
        shared.grant(permission);
        shared
    }

    pub fn grant(&self, permission: Permission) {
        let mut state = self.state.borrow_mut();
        if !state.granted.contains(&permission) {
            state.granted.push(permission);
        }
    }

    pub fn revoke(&self, permission: Permission) {
        self.state.borrow_mut().granted.retain(|p| *p != permission);
    }

    /// Takes the outstanding request, if any, so the host can prompt for it
    pub fn take_pending(&self) -> Option<PendingRequest> {
        self.state.borrow_mut().pending.take()
    }

    pub fn pending(&self) -> Option<PendingRequest> {
        self.state.borrow().pending.clone()
    }
}

impl PermissionGate for SharedPermissions {
    fn check(&self, permission: Permission) -> PermissionStatus {
        if self.state.borrow().granted.contains(&permission) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    fn request(&mut self, permissions: &[Permission], request_code: i32) {
        log::debug!("Permission request {} for {:?}", request_code, permissions);
        self.state.borrow_mut().pending = Some(PendingRequest {
            permissions: permissions.to_vec(),
            request_code,
        });
    }
}
