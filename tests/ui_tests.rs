//! Headless egui frames through the desktop host pieces.
#![cfg(feature = "egui")]

use egui::{Context, RawInput};
use followmap::prelude::*;
use followmap::ui::MapViewResponse;

/// Runs one frame with a central panel and returns what `body` produced
fn run_frame<T: Default>(ctx: &Context, mut body: impl FnMut(&mut egui::Ui) -> T) -> T {
    let mut out = T::default();
    let _ = ctx.run(RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            out = body(ui);
        });
    });
    out
}

#[test]
fn test_map_view_renders_without_input() {
    let ctx = Context::default();
    let mut view = MapView::new();
    let marker = view.add_marker(MarkerOptions::new(LatLng::new(10.0, 20.0)).title("You"));
    view.animate_camera(CameraUpdate::NewPosition(
        CameraPosition::builder()
            .target(LatLng::new(10.0, 20.0))
            .zoom(15.0)
            .bearing(90.0)
            .tilt(30.0)
            .build(),
    ));

    let clicks = run_frame(&ctx, |ui| view.show(ui));

    assert_eq!(clicks, MapViewResponse::default());
    assert!(view.marker(marker).is_some());
}

#[test]
fn test_launcher_not_clicked_without_input() {
    let ctx = Context::default();
    let launcher = Launcher::default();

    assert!(!run_frame(&ctx, |ui| launcher.show(ui)));
}

#[test]
fn test_prompt_waits_for_the_user() {
    let ctx = Context::default();
    let shared = SharedPermissions::new();
    let mut host = PermissionPrompt::new(shared.clone());
    let mut session_side = PermissionPrompt::new(shared);

    session_side.request(&[Permission::FineLocation], 1);

    let mut answer = None;
    let _ = ctx.run(RawInput::default(), |ctx| {
        answer = host.show(ctx);
    });

    assert!(answer.is_none());
    assert!(!session_side.check(Permission::FineLocation).is_granted());
}

#[test]
fn test_notices_render() {
    let ctx = Context::default();
    let mut notices = Notices::new();
    notices.show("Location permission denied");

    let _ = ctx.run(RawInput::default(), |ctx| notices.show_ui(ctx));

    assert_eq!(notices.active_at(std::time::Instant::now()).len(), 1);
}
