//! UI components and application module
//!
//! This module provides the egui/eframe-based user interface.

mod app;
pub mod components;
mod state;
mod theme;

pub use app::{show_widget, BuddyApp};
pub use components::{AvatarFace, ChatPanel, FaceStyle, NavRail, SettingsPanel};
pub use state::AppState;
pub use theme::Theme;
