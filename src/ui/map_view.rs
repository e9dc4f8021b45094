use crate::{
    animation::{CameraAnimation, EasingType},
    core::{
        camera::{CameraPosition, CameraUpdate},
        config::CameraOptions,
        constants::{MAX_ZOOM, MIN_ZOOM},
        geo::{LatLng, Point},
    },
    layers::marker::{Marker, MarkerId, MarkerOptions},
    surface::MapSurface,
};
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use fxhash::FxHashMap;
use std::time::{Duration, Instant};

/// Clicks on the view's own controls during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapViewResponse {
    pub zoom_in: bool,
    pub zoom_out: bool,
}

/// A vector map surface drawn with egui
///
/// The camera is rendered heading-up: the bearing points to the top of the
/// view and tilt squashes the vertical axis.
pub struct MapView {
    camera: CameraPosition,
    animation: Option<CameraAnimation>,
    markers: FxHashMap<MarkerId, Marker>,
    next_marker: u64,
    min_zoom: f32,
    max_zoom: f32,
    my_location_enabled: bool,
    animation_duration: Duration,
    easing: EasingType,
    background_color: Color32,
}

impl MapView {
    pub fn new() -> Self {
        Self {
            camera: CameraPosition::default(),
            animation: None,
            markers: FxHashMap::default(),
            next_marker: 1,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            my_location_enabled: false,
            animation_duration: Duration::from_millis(400),
            easing: EasingType::EaseOut,
            background_color: Color32::from_rgb(230, 230, 230),
        }
    }

    /// Uses the animation timing from the session's camera options
    pub fn with_camera_options(mut self, options: &CameraOptions) -> Self {
        self.animation_duration = options.animation_duration();
        self.easing = options.easing;
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: f32, max_zoom: f32) -> Self {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self
    }

    pub fn camera(&self) -> CameraPosition {
        self.camera
    }

    /// Where the camera will rest once the running animation ends
    pub fn destination(&self) -> CameraPosition {
        self.animation
            .as_ref()
            .map_or(self.camera, CameraAnimation::target)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.as_ref().is_some_and(CameraAnimation::is_active)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn my_location_enabled(&self) -> bool {
        self.my_location_enabled
    }

    fn clamp(&self, mut camera: CameraPosition) -> CameraPosition {
        camera.zoom = camera.zoom.clamp(self.min_zoom, self.max_zoom);
        camera.tilt = camera.tilt.clamp(0.0, 60.0);
        camera
    }

    /// Advances the camera animation to `now`; true while still moving
    pub fn update_at(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };

        match animation.update_at(now) {
            Some(camera) => {
                self.camera = camera;
                animation.is_active()
            }
            None => {
                self.animation = None;
                false
            }
        }
    }

    /// Offset of `position` from the view center, in screen pixels
    pub fn screen_offset(&self, position: LatLng) -> Point {
        let zoom = self.camera.zoom as f64;
        let center = self.camera.target.project(zoom);
        let world = position.project(zoom);

        let rotated = world
            .subtract(&center)
            .rotate(-(self.camera.bearing as f64));
        Point::new(rotated.x, rotated.y * (self.camera.tilt as f64).to_radians().cos())
    }

    fn to_screen(&self, rect: Rect, position: LatLng) -> Pos2 {
        let offset = self.screen_offset(position);
        rect.center() + Vec2::new(offset.x as f32, offset.y as f32)
    }

    /// Draws the view and its zoom controls into the available space
    pub fn show(&mut self, ui: &mut Ui) -> MapViewResponse {
        let still_moving = self.update_at(Instant::now());

        let (rect, _response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.background_color);

        self.paint_grid(&painter, rect);
        self.paint_markers(&painter, rect);
        self.paint_status(&painter, rect);
        let clicks = self.zoom_controls(ui, rect);

        if still_moving {
            ui.ctx().request_repaint();
        }
        clicks
    }

    fn paint_grid(&self, painter: &egui::Painter, rect: Rect) {
        let zoom = self.camera.zoom as f64;
        // Tile boundaries of the current integer zoom level
        let step = 256.0 * 2_f64.powf(zoom - zoom.floor());
        let center = self.camera.target.project(zoom);
        let reach = rect.size().length() as f64
            / (self.camera.tilt as f64).to_radians().cos().max(0.2);

        let stroke = Stroke::new(1.0, Color32::from_gray(205));
        let first_x = ((center.x - reach) / step).floor() as i64;
        let last_x = ((center.x + reach) / step).ceil() as i64;
        let first_y = ((center.y - reach) / step).floor() as i64;
        let last_y = ((center.y + reach) / step).ceil() as i64;

        for i in first_x..=last_x {
            let x = i as f64 * step;
            let a = LatLng::unproject(&Point::new(x, center.y - reach), zoom);
            let b = LatLng::unproject(&Point::new(x, center.y + reach), zoom);
            painter.line_segment([self.to_screen(rect, a), self.to_screen(rect, b)], stroke);
        }
        for j in first_y..=last_y {
            let y = j as f64 * step;
            let a = LatLng::unproject(&Point::new(center.x - reach, y), zoom);
            let b = LatLng::unproject(&Point::new(center.x + reach, y), zoom);
            painter.line_segment([self.to_screen(rect, a), self.to_screen(rect, b)], stroke);
        }
    }

    fn paint_markers(&self, painter: &egui::Painter, rect: Rect) {
        let mut markers: Vec<_> = self.markers.values().collect();
        markers.sort_by_key(|m| m.id());

        for marker in markers {
            let pos = self.to_screen(rect, marker.position());
            if !rect.expand(40.0).contains(pos) {
                continue;
            }

            if self.my_location_enabled {
                painter.circle_filled(pos, 22.0, Color32::from_rgba_unmultiplied(66, 133, 244, 45));
            }

            // Pin: a teardrop pointing at the position
            let head = pos - Vec2::new(0.0, 18.0);
            painter.add(Shape::convex_polygon(
                vec![pos, head + Vec2::new(-7.0, 4.0), head + Vec2::new(7.0, 4.0)],
                Color32::from_rgb(219, 68, 55),
                Stroke::NONE,
            ));
            painter.circle(
                head,
                8.0,
                Color32::from_rgb(219, 68, 55),
                Stroke::new(1.5, Color32::WHITE),
            );

            if let Some(title) = marker.title() {
                painter.text(
                    head - Vec2::new(0.0, 12.0),
                    Align2::CENTER_BOTTOM,
                    title,
                    FontId::proportional(13.0),
                    Color32::BLACK,
                );
            }
        }
    }

    fn paint_status(&self, painter: &egui::Painter, rect: Rect) {
        let camera = self.camera;
        painter.text(
            rect.left_bottom() + Vec2::new(6.0, -6.0),
            Align2::LEFT_BOTTOM,
            format!(
                "{:.5}, {:.5} | zoom {:.1} | bearing {:.0}° | tilt {:.0}°",
                camera.target.lat, camera.target.lng, camera.zoom, camera.bearing, camera.tilt
            ),
            FontId::proportional(11.0),
            Color32::from_gray(90),
        );

        // North arrow, rotated against the camera bearing
        let compass = rect.left_top() + Vec2::new(26.0, 26.0);
        let north = Point::new(0.0, -14.0).rotate(-(camera.bearing as f64));
        painter.circle_stroke(compass, 16.0, Stroke::new(1.0, Color32::from_gray(120)));
        painter.arrow(
            compass,
            Vec2::new(north.x as f32, north.y as f32),
            Stroke::new(2.0, Color32::from_rgb(219, 68, 55)),
        );
    }

    fn zoom_controls(&self, ui: &mut Ui, rect: Rect) -> MapViewResponse {
        let control_size = 30.0;
        let zoom_in_rect = Rect::from_min_size(
            rect.right_top() + Vec2::new(-40.0, 10.0),
            Vec2::splat(control_size),
        );
        let zoom_out_rect = Rect::from_min_size(
            rect.right_top() + Vec2::new(-40.0, 45.0),
            Vec2::splat(control_size),
        );

        let zoom_in = ui.allocate_rect(zoom_in_rect, Sense::click());
        let zoom_out = ui.allocate_rect(zoom_out_rect, Sense::click());

        for (button, label) in [(zoom_in_rect, "+"), (zoom_out_rect, "−")] {
            ui.painter().rect_filled(
                button,
                3.0,
                Color32::from_rgba_unmultiplied(255, 255, 255, 220),
            );
            ui.painter()
                .rect_stroke(button, 3.0, Stroke::new(1.0, Color32::from_gray(100)));
            ui.painter().text(
                button.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(16.0),
                Color32::BLACK,
            );
        }

        MapViewResponse {
            zoom_in: zoom_in.clicked(),
            zoom_out: zoom_out.clicked(),
        }
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for MapView {
    fn add_marker(&mut self, options: MarkerOptions) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(id, Marker::new(id, options));
        id
    }

    fn set_marker_position(&mut self, marker: MarkerId, position: LatLng) {
        if let Some(marker) = self.markers.get_mut(&marker) {
            marker.set_position(position);
        }
    }

    fn move_camera(&mut self, update: CameraUpdate) {
        self.animation = None;
        self.camera = self.clamp(update.apply_to(&self.camera));
    }

    fn animate_camera(&mut self, update: CameraUpdate) {
        // A zoom-only change keeps heading for wherever the camera was going
        let to = self.clamp(update.apply_to(&self.destination()));
        self.animation = Some(CameraAnimation::new(
            self.camera,
            to,
            self.animation_duration,
            self.easing,
        ));
    }

    fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    fn set_my_location_enabled(&mut self, enabled: bool) {
        self.my_location_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow(lat: f64, lng: f64, zoom: f32, bearing: f32) -> CameraUpdate {
        CameraUpdate::NewPosition(
            CameraPosition::builder()
                .target(LatLng::new(lat, lng))
                .zoom(zoom)
                .bearing(bearing)
                .tilt(30.0)
                .build(),
        )
    }

    #[test]
    fn test_markers_keep_identity() {
        let mut view = MapView::new();
        let id = view.add_marker(MarkerOptions::new(LatLng::new(1.0, 2.0)).title("You"));
        view.set_marker_position(id, LatLng::new(3.0, 4.0));

        assert_eq!(view.markers().count(), 1);
        assert_eq!(view.marker(id).unwrap().position(), LatLng::new(3.0, 4.0));

        // Unknown ids are ignored
        view.set_marker_position(MarkerId(99), LatLng::new(0.0, 0.0));
        assert_eq!(view.markers().count(), 1);
    }

    #[test]
    fn test_move_camera_is_immediate_and_clamped() {
        let mut view = MapView::new().with_zoom_range(3.0, 18.0);
        view.move_camera(follow(10.0, 20.0, 25.0, 90.0));

        assert!(!view.is_animating());
        assert_eq!(view.camera().target, LatLng::new(10.0, 20.0));
        assert_eq!(view.camera().zoom, 18.0);
    }

    #[test]
    fn test_zoom_only_animation_keeps_destination() {
        let mut view = MapView::new();
        view.animate_camera(follow(10.0, 20.0, 15.0, 90.0));
        view.animate_camera(CameraUpdate::ZoomTo(16.0));

        let destination = view.destination();
        assert_eq!(destination.target, LatLng::new(10.0, 20.0));
        assert_eq!(destination.bearing, 90.0);
        assert_eq!(destination.tilt, 30.0);
        assert_eq!(destination.zoom, 16.0);
    }

    #[test]
    fn test_animation_settles() {
        let mut view = MapView::new();
        view.animate_camera(follow(10.0, 20.0, 15.0, 90.0));
        assert!(view.is_animating());

        let later = Instant::now() + Duration::from_secs(5);
        assert!(!view.update_at(later));
        assert_eq!(view.camera(), view.destination());
        assert_eq!(view.camera().target, LatLng::new(10.0, 20.0));
        assert!(!view.update_at(later));
    }

    #[test]
    fn test_heading_is_up() {
        let mut view = MapView::new();
        view.move_camera(CameraUpdate::NewPosition(
            CameraPosition::builder()
                .target(LatLng::new(0.0, 0.0))
                .zoom(10.0)
                .bearing(90.0)
                .build(),
        ));

        assert_eq!(view.screen_offset(LatLng::new(0.0, 0.0)), Point::new(0.0, 0.0));

        // Facing east, a point to the east is drawn above the center
        let east = view.screen_offset(LatLng::new(0.0, 0.01));
        assert!(east.x.abs() < 1e-6);
        assert!(east.y < 0.0);
    }

    #[test]
    fn test_my_location_toggle() {
        let mut view = MapView::new();
        assert!(!view.my_location_enabled());
        view.set_my_location_enabled(true);
        assert!(view.my_location_enabled());
    }
}
