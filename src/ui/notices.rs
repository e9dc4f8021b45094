use crate::surface::Notifier;
use egui::{Align2, Context, Id};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// How long a notice stays up
const NOTICE_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
struct Notice {
    message: String,
    shown_at: Instant,
}

/// Toast-style notices along the bottom of the window
///
/// Clones share the same queue: the session gets one as its [`Notifier`]
/// and the host keeps another to draw them.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: Rc<RefCell<Vec<Notice>>>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages still on screen at `now`
    pub fn active_at(&self, now: Instant) -> Vec<String> {
        self.queue
            .borrow()
            .iter()
            .filter(|n| now.saturating_duration_since(n.shown_at) < NOTICE_DURATION)
            .map(|n| n.message.clone())
            .collect()
    }

    pub fn show_ui(&self, ctx: &Context) {
        let now = Instant::now();
        self.queue
            .borrow_mut()
            .retain(|n| now.saturating_duration_since(n.shown_at) < NOTICE_DURATION);

        let messages = self.active_at(now);
        if messages.is_empty() {
            return;
        }

        egui::Area::new(Id::new("followmap_notices"))
            .anchor(Align2::CENTER_BOTTOM, [0.0, -40.0])
            .interactable(false)
            .show(ctx, |ui| {
                for message in &messages {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(message);
                    });
                }
            });

        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl Notifier for Notices {
    fn show(&mut self, message: &str) {
        log::info!("Notice: {}", message);
        self.queue.borrow_mut().push(Notice {
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }
}
