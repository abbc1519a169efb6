//! Error types for Stylecast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StylecastError>;

#[derive(Error, Debug)]
pub enum StylecastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl StylecastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            StylecastError::InvalidInput(_) => 3,
            StylecastError::Config(_) => 1,
            StylecastError::Store(_) => 1,
            StylecastError::Service(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors raised by the state container.
///
/// The reducer is total apart from advancing through an empty outfit deck.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Cannot advance to the next outfit: no outfit photos are loaded")]
    EmptyOutfitDeck,
}

/// Errors raised by the simulated collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Image rejected: {0}")]
    ImageValidation(String),

    #[error("Try-on failed: {0}")]
    TryOn(String),

    #[error("Checkout failed: {0}")]
    Checkout(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = StylecastError::InvalidInput("Bad action line".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_store_error() {
        let error = StylecastError::Store(StoreError::EmptyOutfitDeck);
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_service_errors() {
        let try_on = StylecastError::Service(ServiceError::TryOn("timeout".to_string()));
        let checkout = StylecastError::Service(ServiceError::Checkout("declined".to_string()));
        let image = StylecastError::Service(ServiceError::ImageValidation("too big".to_string()));

        assert_eq!(try_on.exit_code(), 1);
        assert_eq!(checkout.exit_code(), 1);
        assert_eq!(image.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_config_error() {
        let error = StylecastError::Config(ConfigError::MissingField("config directory".to_string()));
        assert_eq!(error.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_store() {
        let error = StylecastError::Store(StoreError::EmptyOutfitDeck);
        let message = format!("{}", error);
        assert!(message.starts_with("Store error: "));
        assert!(message.contains("no outfit photos"));
    }

    #[test]
    fn test_error_message_formatting_service() {
        let error = StylecastError::Service(ServiceError::Checkout(
            "Payment declined".to_string(),
        ));
        assert_eq!(
            format!("{}", error),
            "Service error: Checkout failed: Payment declined"
        );
    }

    #[test]
    fn test_error_message_formatting_config() {
        let error = StylecastError::Config(ConfigError::MissingField("try_on.model_name".to_string()));
        assert_eq!(
            format!("{}", error),
            "Configuration error: Missing required field: try_on.model_name"
        );
    }

    #[test]
    fn test_error_conversion_from_store_error() {
        let error: StylecastError = StoreError::EmptyOutfitDeck.into();
        assert!(matches!(error, StylecastError::Store(StoreError::EmptyOutfitDeck)));
    }

    #[test]
    fn test_error_conversion_from_service_error() {
        let error: StylecastError = ServiceError::TryOn("boom".to_string()).into();
        match error {
            StylecastError::Service(ServiceError::TryOn(msg)) => assert_eq!(msg, "boom"),
            _ => panic!("Expected StylecastError::Service"),
        }
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        assert!(format!("{}", config_error).contains("Failed to read config file"));
    }

    #[test]
    fn test_service_error_clone() {
        let original = ServiceError::TryOn("Model overloaded".to_string());
        let cloned = original.clone();
        assert_eq!(original, cloned);
    }
}
