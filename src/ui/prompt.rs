use crate::permissions::{
    PendingRequest, Permission, PermissionGate, PermissionStatus, SharedPermissions,
};
use egui::{Align2, Context};

/// The user's answer to a permission dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAnswer {
    pub request_code: i32,
    pub grants: Vec<PermissionStatus>,
}

/// Permission gate that asks the user through a modal egui window
///
/// `request` only records the question; [`PermissionPrompt::show`] draws
/// the dialog on later frames and hands back the answer once clicked.
#[derive(Debug, Clone, Default)]
pub struct PermissionPrompt {
    permissions: SharedPermissions,
    open: Option<PendingRequest>,
}

impl PermissionPrompt {
    pub fn new(permissions: SharedPermissions) -> Self {
        Self {
            permissions,
            open: None,
        }
    }

    fn describe(permission: Permission) -> &'static str {
        match permission {
            Permission::FineLocation => "your precise location",
        }
    }

    /// Resolves the open request as if the user had clicked
    pub fn answer(&mut self, allow: bool) -> Option<PromptAnswer> {
        let request = self.open.take().or_else(|| self.permissions.take_pending())?;
        let status = if allow {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };

        if allow {
            for permission in &request.permissions {
                self.permissions.grant(*permission);
            }
        }

        Some(PromptAnswer {
            request_code: request.request_code,
            grants: vec![status; request.permissions.len()],
        })
    }

    pub fn show(&mut self, ctx: &Context) -> Option<PromptAnswer> {
        if self.open.is_none() {
            self.open = self.permissions.take_pending();
        }
        let request = self.open.clone()?;

        let mut choice = None;
        egui::Window::new("Permission required")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                for permission in &request.permissions {
                    ui.label(format!("Allow this app to access {}?", Self::describe(*permission)));
                }
                ui.horizontal(|ui| {
                    if ui.button("Allow").clicked() {
                        choice = Some(true);
                    }
                    if ui.button("Deny").clicked() {
                        choice = Some(false);
                    }
                });
            });

        choice.and_then(|allow| self.answer(allow))
    }
}

impl PermissionGate for PermissionPrompt {
    fn check(&self, permission: Permission) -> PermissionStatus {
        self.permissions.check(permission)
    }

    fn request(&mut self, permissions: &[Permission], request_code: i32) {
        self.permissions.request(permissions, request_code);
    }
}
