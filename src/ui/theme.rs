//! Theme and styling for the widget
//!
//! Colors, fonts and spacing, plus the per-state palette the avatar face
//! draws with.

use crate::avatar::EngagementState;
use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Accent for selected navigation and the send button (orange)
    pub primary: Color32,
    /// Accent for thinking and speaking (purple)
    pub secondary: Color32,
    /// Glow around the sleeping avatar (blue)
    pub sleep: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Chat bubble fills
    pub user_bubble: Color32,
    pub avatar_bubble: Color32,

    /// Avatar face parts
    pub face_fill: Color32,
    pub eye: Color32,
    pub mouth_outline: Color32,
    pub mouth_idle: Color32,
    pub mouth_listening: Color32,
    pub mouth_active: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(251, 146, 60),   // Orange 400
            secondary: Color32::from_rgb(168, 85, 247), // Purple 500
            sleep: Color32::from_rgb(96, 165, 250),     // Blue 400

            bg_primary: Color32::from_rgb(28, 25, 23),   // Stone 900
            bg_secondary: Color32::from_rgb(41, 37, 36), // Stone 800
            bg_tertiary: Color32::from_rgb(68, 64, 60),  // Stone 700

            text_primary: Color32::from_rgb(250, 250, 249),
            text_secondary: Color32::from_rgb(231, 229, 228),
            text_muted: Color32::from_rgb(168, 162, 158),

            user_bubble: Color32::from_rgba_unmultiplied(168, 85, 247, 204),
            avatar_bubble: Color32::from_rgba_unmultiplied(0, 0, 0, 178),

            face_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 76),
            eye: Color32::from_rgb(28, 25, 23),
            mouth_outline: Color32::BLACK,
            mouth_idle: Color32::from_rgb(147, 197, 253),      // Blue 300
            mouth_listening: Color32::from_rgb(251, 146, 60),  // Orange 400
            mouth_active: Color32::from_rgb(244, 114, 182),    // Pink 400

            button_rounding: Rounding::same(8.0),
            card_rounding: Rounding::same(12.0),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Glow drawn around the avatar card, if the state has one
    pub fn glow(&self, state: EngagementState) -> Option<Color32> {
        match state {
            EngagementState::Idle => Some(self.sleep),
            EngagementState::Listening => None,
            EngagementState::Thinking | EngagementState::Speaking => Some(self.secondary),
        }
    }

    /// Mouth fill for a state
    pub fn mouth(&self, state: EngagementState) -> Color32 {
        match state {
            EngagementState::Idle => self.mouth_idle,
            EngagementState::Listening => self.mouth_listening,
            EngagementState::Thinking | EngagementState::Speaking => self.mouth_active,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        // Panel backgrounds
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = self.bg_tertiary;

        // Widget colors
        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        // Selected navigation buttons
        visuals.selection.bg_fill = self.primary.gamma_multiply(0.6);
        visuals.selection.stroke = Stroke::new(1.0, self.primary);

        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.bg_tertiary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing);
        style.spacing.button_padding = Vec2::new(self.spacing_sm, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(18.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }
}
