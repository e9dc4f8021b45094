use egui::{RichText, Ui};

/// The first screen: a title and one button that opens the map
#[derive(Debug, Clone)]
pub struct Launcher {
    title: String,
    button_label: String,
}

impl Launcher {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            button_label: "Location and map".to_string(),
        }
    }

    /// Returns true on the frame the button is clicked
    pub fn show(&self, ui: &mut Ui) -> bool {
        let mut clicked = false;
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.heading(RichText::new(&self.title).size(28.0));
            ui.add_space(24.0);
            clicked = ui
                .button(RichText::new(&self.button_label).size(18.0))
                .clicked();
        });
        clicked
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new("followmap")
    }
}
