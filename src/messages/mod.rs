pub mod storage;
pub mod types;

pub use storage::MessageStorage;
pub use types::{mock_history, Message, Sender};
