//! UI components
//!
//! Each component borrows the state it renders and draws itself with
//! `show(ui)`.

pub mod avatar_face;
pub mod chat_panel;
pub mod nav_rail;
pub mod settings_panel;

pub use avatar_face::{AvatarFace, FaceStyle};
pub use chat_panel::ChatPanel;
pub use nav_rail::NavRail;
pub use settings_panel::SettingsPanel;
