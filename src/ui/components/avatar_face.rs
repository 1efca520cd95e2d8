//! Avatar face component
//!
//! Draws the avatar card: two eyes and a mouth whose shape, color and motion
//! follow the engagement state.

use crate::avatar::EngagementState;
use crate::ui::theme::Theme;
use egui::{self, Color32, Pos2, Rect, Sense, Stroke, Vec2};

/// Geometry of the face for one state, before animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceStyle {
    /// Eye width and height
    pub eye: Vec2,
    /// Mouth width and height
    pub mouth: Vec2,
    /// Only the bottom half of the mouth is drawn (a smile)
    pub smile: bool,
    /// Card glow
    pub glow: Option<Color32>,
    pub mouth_fill: Color32,
    /// Whole face bobs up and down
    pub floats: bool,
    /// Eyes bounce sideways
    pub eyes_bounce: bool,
    /// Mouth opens and closes
    pub talks: bool,
}

impl FaceStyle {
    pub fn for_state(state: EngagementState, theme: &Theme) -> Self {
        let base = Self {
            eye: Vec2::splat(16.0),
            mouth: Vec2::new(24.0, 12.0),
            smile: false,
            glow: theme.glow(state),
            mouth_fill: theme.mouth(state),
            floats: false,
            eyes_bounce: false,
            talks: false,
        };

        match state {
            EngagementState::Idle => Self {
                // Sleepy, half-closed eyes
                eye: Vec2::new(20.0, 8.0),
                mouth: Vec2::new(48.0, 8.0),
                floats: true,
                ..base
            },
            EngagementState::Listening => Self {
                mouth: Vec2::new(32.0, 16.0),
                smile: true,
                floats: true,
                ..base
            },
            EngagementState::Thinking => Self {
                mouth: Vec2::new(32.0, 20.0),
                smile: true,
                eyes_bounce: true,
                ..base
            },
            EngagementState::Speaking => Self {
                talks: true,
                ..base
            },
        }
    }

    /// Drop every animation flag
    pub fn still(self) -> Self {
        Self {
            floats: false,
            eyes_bounce: false,
            talks: false,
            ..self
        }
    }

    pub fn is_animated(&self) -> bool {
        self.floats || self.eyes_bounce || self.talks
    }
}

/// Clickable avatar card
pub struct AvatarFace<'a> {
    state: EngagementState,
    theme: &'a Theme,
    reduce_motion: bool,
    size: Vec2,
}

impl<'a> AvatarFace<'a> {
    pub fn new(state: EngagementState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            reduce_motion: false,
            size: Vec2::new(224.0, 140.0),
        }
    }

    /// Freeze all face animation
    pub fn reduce_motion(mut self, reduce: bool) -> Self {
        self.reduce_motion = reduce;
        self
    }

    pub fn size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let mut style = FaceStyle::for_state(self.state, self.theme);
        if self.reduce_motion {
            style = style.still();
        }

        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Wake avatar")
        });

        if !ui.is_rect_visible(rect) {
            return response;
        }

        let t = ui.ctx().input(|i| i.time) as f32;
        let painter = ui.painter();

        if let Some(glow) = style.glow {
            let pulse = if style.is_animated() {
                (t * 2.0).sin() * 0.5 + 0.5
            } else {
                0.5
            };
            painter.rect_stroke(
                rect.expand(3.0),
                self.theme.card_rounding,
                Stroke::new(2.0 + 4.0 * pulse, glow.gamma_multiply(0.4 + 0.4 * pulse)),
            );
        }
        painter.rect_filled(rect, self.theme.card_rounding, self.theme.face_fill);

        let lift = if style.floats { (t * 1.5).sin() * 4.0 } else { 0.0 };
        let center = rect.center() + Vec2::new(0.0, lift - 10.0);

        // Eyes
        let bounce = if style.eyes_bounce { (t * 6.0).sin() * 4.0 } else { 0.0 };
        for (side, sway) in [(-1.0, -bounce), (1.0, bounce)] {
            let eye_center = center + Vec2::new(side * 40.0 + sway, 0.0);
            painter.rect_filled(
                Rect::from_center_size(eye_center, style.eye),
                style.eye.y / 2.0,
                self.theme.eye,
            );
        }

        // Mouth
        let mut mouth = style.mouth;
        if style.talks {
            mouth.y *= 0.4 + 0.6 * ((t * 10.0).sin() * 0.5 + 0.5);
        }
        let mouth_center = center + Vec2::new(0.0, 32.0);
        self.paint_mouth(painter, mouth_center, mouth, &style);

        if style.is_animated() {
            ui.ctx().request_repaint();
        }

        response
    }

    fn paint_mouth(&self, painter: &egui::Painter, center: Pos2, size: Vec2, style: &FaceStyle) {
        let stroke = Stroke::new(2.0, self.theme.mouth_outline);
        if style.smile {
            // Bottom half of a pill, flat side up
            let rect = Rect::from_min_size(center - Vec2::new(size.x / 2.0, 0.0), size);
            let rounding = egui::Rounding {
                nw: 0.0,
                ne: 0.0,
                sw: size.y,
                se: size.y,
            };
            painter.rect_filled(rect, rounding, style.mouth_fill);
            painter.rect_stroke(rect, rounding, stroke);
        } else {
            let rect = Rect::from_center_size(center, size);
            painter.rect_filled(rect, size.y / 2.0, style.mouth_fill);
            painter.rect_stroke(rect, size.y / 2.0, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_eyes_are_flat() {
        let style = FaceStyle::for_state(EngagementState::Idle, &Theme::dark());
        assert!(style.eye.y < style.eye.x);
        assert!(style.floats);
    }

    #[test]
    fn test_only_speaking_talks() {
        let theme = Theme::dark();
        for state in EngagementState::ALL {
            let style = FaceStyle::for_state(state, &theme);
            assert_eq!(style.talks, state == EngagementState::Speaking);
        }
    }

    #[test]
    fn test_still_removes_animation() {
        let theme = Theme::dark();
        for state in EngagementState::ALL {
            assert!(!FaceStyle::for_state(state, &theme).still().is_animated());
        }
    }
}
