//! Chat panel component
//!
//! Message history as speech bubbles, a "..." bubble while the avatar is
//! thinking, and the input row with the send button.

use crate::avatar::EngagementState;
use crate::messages::Message;
use crate::scheduler::Scheduler;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align, Key, Layout, RichText, Vec2};

/// Chat panel component
pub struct ChatPanel<'a, S: Scheduler> {
    state: &'a mut AppState<S>,
    theme: &'a Theme,
}

impl<'a, S: Scheduler> ChatPanel<'a, S> {
    pub fn new(state: &'a mut AppState<S>, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        self.show_history(ui);
        ui.add_space(self.theme.spacing_sm);
        self.show_input_row(ui);
    }

    fn show_history(&self, ui: &mut egui::Ui) {
        let messages = self.state.messages.get_all();
        let font_size = self.state.settings.font_size();
        let thinking = self.state.engagement() == EngagementState::Thinking;

        egui::ScrollArea::vertical()
            .id_salt("chat_history")
            .max_height(256.0)
            .auto_shrink([false, true])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in &messages {
                    self.show_message(ui, message, font_size);
                }

                if thinking {
                    self.show_thinking(ui, font_size);
                }
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message, font_size: f32) {
        let (layout, fill, label) = if message.is_user() {
            (
                Layout::right_to_left(Align::TOP),
                self.theme.user_bubble,
                format!("User message: {}", message.text),
            )
        } else {
            (
                Layout::left_to_right(Align::TOP),
                self.theme.avatar_bubble,
                format!("Avatar message: {}", message.text),
            )
        };

        ui.with_layout(layout, |ui| {
            egui::Frame::none()
                .fill(fill)
                .rounding(self.theme.card_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(280.0);
                    let response = ui.label(
                        RichText::new(&message.text)
                            .size(font_size)
                            .color(self.theme.text_primary),
                    );
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label)
                    });
                });
        });
    }

    fn show_thinking(&self, ui: &mut egui::Ui, font_size: f32) {
        ui.with_layout(Layout::left_to_right(Align::TOP), |ui| {
            egui::Frame::none()
                .fill(self.theme.avatar_bubble)
                .rounding(self.theme.card_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    let response = ui.label(
                        RichText::new("...")
                            .size(font_size)
                            .color(self.theme.text_muted),
                    );
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(
                            egui::WidgetType::Label,
                            true,
                            "Avatar is thinking",
                        )
                    });
                });
        });
    }

    fn show_input_row(&mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let available_width = ui.available_width() - 56.0; // Reserve space for send button

                    let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
                        .hint_text("Say something...")
                        .desired_width(available_width)
                        .margin(egui::Margin::symmetric(8.0, 6.0))
                        .id(egui::Id::new("message_input"));

                    let response = ui.add(text_edit);
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Message input")
                    });

                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                    if submitted {
                        self.state.send_message();
                    }

                    self.show_send_button(ui);
                });
            });
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let can_send = self.state.can_send();
        let busy = self.state.engagement().is_busy();

        let fill = if busy {
            self.theme.secondary
        } else if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new("🔍").size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(40.0))
            .rounding(self.theme.button_rounding)
            .fill(fill);

        let response = ui.add_enabled(can_send, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, can_send, "Send message")
        });

        if response.clicked() {
            self.state.send_message();
        }

        response.on_hover_text("Send message (Enter)");
    }
}
