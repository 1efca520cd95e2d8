//! Avatar engagement lifecycle
//!
//! [`AvatarLifecycle`] owns the avatar's [`EngagementState`] and moves it
//! through idle, listening, thinking and speaking. While speaking it drives a
//! [`ResponseRevealer`] that types the scripted reply into the chat log one
//! word at a time.

mod lifecycle;
mod revealer;
mod state;

pub use lifecycle::{AvatarLifecycle, LifecycleConfig, Subscription, DEFAULT_REPLY};
pub use revealer::{reveal_duration, split_words, ResponseRevealer, RevealSink, RevealStatus};
pub use state::{EngagementState, Trigger};
