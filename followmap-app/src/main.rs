use followmap::{
    constants::PREFS_NAME,
    location::{LocationFeed, SimulatedLocationProvider, SimulatedRoute},
    permissions::SharedPermissions,
    ui::{Launcher, MapView, MapViewResponse, Notices, PermissionPrompt},
    FilePreferences, MapSession, Navigator, Screen, TrackingProfile, ZoomDirection,
};
use std::path::PathBuf;

/// Standalone launcher + live-location map
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let data_dir = std::env::var_os("FOLLOWMAP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".followmap"));
    let profile = match std::env::var("FOLLOWMAP_PROFILE") {
        Ok(name) => name.parse::<TrackingProfile>()?,
        Err(_) => TrackingProfile::default(),
    };
    log::info!("Using {:?} profile, data in {}", profile, data_dir.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 760.0])
            .with_title("followmap"),
        ..Default::default()
    };

    eframe::run_native(
        "followmap-app",
        options,
        Box::new(move |_cc| Box::new(FollowMapApp::new(data_dir, profile))),
    )?;

    Ok(())
}

/// Everything that lives exactly as long as the map screen
struct MapScreen {
    session: MapSession<MapView>,
    feed: LocationFeed,
    prompt: PermissionPrompt,
    notices: Notices,
}

impl MapScreen {
    fn open(data_dir: &std::path::Path, profile: &TrackingProfile) -> Self {
        let provider = SimulatedLocationProvider::new(SimulatedRoute::default());
        let feed = provider.feed();
        let prompt = PermissionPrompt::new(SharedPermissions::new());
        let notices = Notices::new();

        let session = MapSession::with_options(
            profile.resolve(),
            FilePreferences::open_named(data_dir, PREFS_NAME),
            provider,
            prompt.clone(),
            notices.clone(),
        );

        Self {
            session,
            feed,
            prompt,
            notices,
        }
    }

    fn update(&mut self, ctx: &egui::Context) {
        // The window is up, so the surface is ready
        if self.session.surface().is_none() {
            let view = MapView::new().with_camera_options(&self.session.options().camera);
            self.session.on_map_ready(view);
        }

        if let Some(answer) = self.prompt.show(ctx) {
            self.session
                .on_request_permissions_result(answer.request_code, &answer.grants);
        }

        for result in self.feed.drain() {
            self.session.on_location_result(&result);
        }

        let mut clicks = MapViewResponse::default();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if let Some(view) = self.session.surface_mut() {
                    clicks = view.show(ui);
                }
            });

        if clicks.zoom_in {
            self.session.adjust_zoom(ZoomDirection::In);
        }
        if clicks.zoom_out {
            self.session.adjust_zoom(ZoomDirection::Out);
        }

        self.notices.show_ui(ctx);

        // Location ticks arrive off-frame; poll for them at the feed's fastest rate
        if self.session.is_tracking() {
            ctx.request_repaint_after(self.session.options().location.fastest_interval());
        }
    }
}

impl Drop for MapScreen {
    fn drop(&mut self) {
        self.session.on_destroy();
    }
}

/// The main application struct
struct FollowMapApp {
    navigator: Navigator,
    launcher: Launcher,
    data_dir: PathBuf,
    profile: TrackingProfile,
    map_screen: Option<MapScreen>,
}

impl FollowMapApp {
    fn new(data_dir: PathBuf, profile: TrackingProfile) -> Self {
        Self {
            navigator: Navigator::new(),
            launcher: Launcher::default(),
            data_dir,
            profile,
            map_screen: None,
        }
    }
}

impl eframe::App for FollowMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.navigator.current() {
            Screen::Launcher => {
                let mut open = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    open = self.launcher.show(ui);
                });
                if open && self.navigator.open_map() {
                    self.map_screen = Some(MapScreen::open(&self.data_dir, &self.profile));
                    ctx.request_repaint();
                }
            }
            Screen::Map => {
                if let Some(screen) = self.map_screen.as_mut() {
                    screen.update(ctx);
                }
            }
        }
    }
}
