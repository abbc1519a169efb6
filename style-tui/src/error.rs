//! Error types for style-tui
//!
//! Wraps service layer errors and terminal I/O errors for unified handling.

use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    /// Service layer error
    #[error("Service error: {0}")]
    Service(#[from] libstylecast::StylecastError),

    /// Terminal/IO error
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Application setup error
    #[error("Application error: {0}")]
    Application(String),
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
