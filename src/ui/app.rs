//! Main application struct and eframe integration
//!
//! This module contains the BuddyApp that implements eframe::App, and the
//! frame function it renders with.

use crate::integration::BuddyConfig;
use crate::navigation::{is_shortcut_chord, NavRequest, SelectedView};
use crate::scheduler::Scheduler;
use crate::ui::components::{AvatarFace, ChatPanel, NavRail, SettingsPanel};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel};
use tracing::{debug, info};

/// Run one frame of the widget: shortcuts, due timers, then every panel.
///
/// Kept separate from [`BuddyApp`] so tests can drive it on a manual clock.
pub fn show_widget<S: Scheduler>(ctx: &egui::Context, state: &mut AppState<S>, theme: &Theme) {
    handle_shortcuts(ctx, state);

    if let Some(wait) = state.tick() {
        ctx.request_repaint_after(wait);
    }

    if !state.view().is_idle() {
        SidePanel::left("nav_rail")
            .resizable(false)
            .exact_width(64.0)
            .frame(egui::Frame::none().fill(theme.bg_secondary))
            .show(ctx, |ui| {
                NavRail::new(state, theme).show(ui);
            });
    }

    CentralPanel::default()
        .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new("Lil' Buddy").color(theme.text_primary));
                ui.add_space(theme.spacing_sm);

                let engagement = state.engagement();
                let face = AvatarFace::new(engagement, theme)
                    .reduce_motion(state.settings.reduce_motion)
                    .show(ui);
                if face.clicked() {
                    state.navigate(NavRequest::Wake);
                }

                let status = format!("Avatar state: {}", engagement);
                let response = ui.label(
                    RichText::new(engagement.to_string())
                        .size(12.0)
                        .color(theme.text_muted),
                );
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &status)
                });
            });

            ui.add_space(theme.spacing);

            match state.view() {
                SelectedView::Chat => ChatPanel::new(state, theme).show(ui),
                SelectedView::Settings => SettingsPanel::new(&mut state.settings, theme).show(ui),
                SelectedView::Idle | SelectedView::Awake => {}
            }
        });
}

fn handle_shortcuts<S: Scheduler>(ctx: &egui::Context, state: &mut AppState<S>) {
    let typing = ctx.wants_keyboard_input();
    let keys: Vec<egui::Key> = ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } if is_shortcut_chord(*modifiers) => Some(*key),
                _ => None,
            })
            .collect()
    });

    for key in keys {
        if state.handle_key(key, typing) {
            debug!("Shortcut {:?} -> {}", key, state.view());
        }
    }
}

/// Main Buddy application
pub struct BuddyApp {
    /// Application state
    state: AppState,
    /// Visual theme
    theme: Theme,
    /// Whether the app has been initialized
    initialized: bool,
}

impl BuddyApp {
    /// Create a new Buddy application
    pub fn new(cc: &eframe::CreationContext<'_>, config: &BuddyConfig) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self {
            state: AppState::new(config),
            theme,
            initialized: false,
        }
    }

    /// Initialize on first frame
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        info!(
            "Buddy UI initialized ({} messages, view {})",
            self.state.messages.len(),
            self.state.view()
        );
        self.initialized = true;
    }
}

impl eframe::App for BuddyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();
        show_widget(ctx, &mut self.state, &self.theme);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.lifecycle.shutdown();
        info!("Buddy shutting down");
    }
}
