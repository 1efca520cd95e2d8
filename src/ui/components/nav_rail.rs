//! Navigation rail component
//!
//! Vertical strip of icon buttons: sleep, chat and settings. Only shown
//! while the avatar is awake.

use crate::navigation::{NavRequest, SelectedView};
use crate::scheduler::Scheduler;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// Navigation rail component
pub struct NavRail<'a, S: Scheduler> {
    state: &'a mut AppState<S>,
    theme: &'a Theme,
}

impl<'a, S: Scheduler> NavRail<'a, S> {
    pub fn new(state: &'a mut AppState<S>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let view = self.state.view();
        let buttons = [
            ("🌙", "Sleep", NavRequest::Sleep, false),
            ("💬", "Open chat", NavRequest::OpenChat, view == SelectedView::Chat),
            ("⚙", "Open settings", NavRequest::OpenSettings, view == SelectedView::Settings),
        ];

        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing);
            for (icon, label, request, selected) in buttons {
                let color = if selected {
                    self.theme.bg_primary
                } else {
                    self.theme.text_secondary
                };
                let button = egui::Button::new(RichText::new(icon).size(20.0).color(color))
                    .min_size(Vec2::splat(40.0))
                    .rounding(self.theme.button_rounding)
                    .selected(selected);

                let response = ui.add(button);
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, true, label)
                });

                if response.clicked() {
                    self.state.navigate(request);
                }
                response.on_hover_text(label);
                ui.add_space(self.theme.spacing_sm);
            }
        });
    }
}
