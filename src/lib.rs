pub mod avatar;
pub mod integration;
pub mod messages;
pub mod navigation;
pub mod scheduler;
pub mod settings;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum BuddyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for BuddyError {
    fn from(e: std::io::Error) -> Self {
        BuddyError::IOError(e.to_string())
    }
}

impl BuddyError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A bad config file needs fixing before the widget can start
            BuddyError::ConfigError(_) => false,
            BuddyError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            BuddyError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            BuddyError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuddyError>;
