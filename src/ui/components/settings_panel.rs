//! Settings panel component
//!
//! Language, text size and the two toggles. Changes apply immediately and
//! are never saved.

use crate::settings::{Language, Settings};
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Settings panel component
pub struct SettingsPanel<'a> {
    settings: &'a mut Settings,
    theme: &'a Theme,
}

impl<'a> SettingsPanel<'a> {
    pub fn new(settings: &'a mut Settings, theme: &'a Theme) -> Self {
        Self { settings, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let Self { settings, theme } = self;

        section(ui, theme, |ui| {
            egui::ComboBox::from_label("Language")
                .selected_text(settings.language.label())
                .show_ui(ui, |ui| {
                    for language in Language::ALL {
                        ui.selectable_value(&mut settings.language, language, language.label());
                    }
                });
        });

        section(ui, theme, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Aa").size(12.0));
                let mut size = settings.text_size;
                let slider = egui::Slider::new(&mut size, 0..=Settings::MAX_TEXT_SIZE)
                    .show_value(false)
                    .text("Text size");
                if ui.add(slider).changed() {
                    settings.set_text_size(size);
                }
                ui.label(RichText::new("Aa").size(18.0));
            });
        });

        toggle(
            ui,
            theme,
            &mut settings.reduce_motion,
            "Reduce motion",
            "Reduces animations and visual effects",
        );

        toggle(
            ui,
            theme,
            &mut settings.sound_effects,
            "Sound effects",
            "Enable audio feedback and notification sounds",
        );
    }
}

fn section(ui: &mut egui::Ui, theme: &Theme, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(theme.bg_secondary)
        .rounding(theme.card_rounding)
        .inner_margin(theme.spacing_sm + 4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
    ui.add_space(theme.spacing_sm);
}

fn toggle(ui: &mut egui::Ui, theme: &Theme, value: &mut bool, label: &str, description: &str) {
    section(ui, theme, |ui| {
        ui.checkbox(value, label);
        ui.label(
            RichText::new(description)
                .size(12.0)
                .color(theme.text_muted),
        );
    });
}
