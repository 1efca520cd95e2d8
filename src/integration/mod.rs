//! Widget-level wiring
//!
//! Holds the configuration that ties the lifecycle, chat panel and settings
//! together.

mod config;

pub use config::{BuddyConfig, ChatConfig};
