//! Configuration management for Stylecast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::ImageMimeType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub try_on: TryOnConfig,
    pub checkout: CheckoutConfig,
}

/// How `AddToCart` decides whether an add lands on an existing cart line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartMergePolicy {
    /// One line per product id; the variant of the first add wins
    #[default]
    ByProduct,
    /// One line per (product id, variant id)
    ByVariant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub cart_merge: CartMergePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TryOnConfig {
    pub model_name: String,
    /// Largest accepted user photo, in bytes
    pub max_image_bytes: u64,
    /// Accepted MIME types for user photos
    pub supported_formats: Vec<String>,
    /// Simulated inference latency
    pub delay_ms: u64,
    /// Image returned by the simulated inference
    pub result_image_url: String,
    /// Probability in [0, 1] that a simulated attempt fails
    pub failure_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Simulated payment latency
    pub delay_ms: u64,
    /// Sales tax in basis points (800 = 8%)
    pub tax_rate_bps: u32,
    /// Probability in [0, 1] that a simulated checkout fails
    pub failure_rate: f64,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            model_name: "tryon-v1.6".to_string(),
            max_image_bytes: 5 * 1024 * 1024,
            supported_formats: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            delay_ms: 3000,
            result_image_url:
                "https://images.unsplash.com/photo-1594633312681-425c7b97ccd1?w=400&h=600&fit=crop"
                    .to_string(),
            failure_rate: 0.0,
        }
    }
}

impl TryOnConfig {
    /// Supported formats parsed into MIME types; unknown strings are skipped
    pub fn supported_mime_types(&self) -> Vec<ImageMimeType> {
        self.supported_formats
            .iter()
            .filter_map(|s| ImageMimeType::from_mime_str(s))
            .collect()
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            tax_rate_bps: 800,
            failure_rate: 0.0,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file yields the default configuration; an unreadable or
    /// malformed file is an error.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(config)
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("STYLECAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("stylecast").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_service_settings() {
        let config = Config::default();
        assert_eq!(config.store.cart_merge, CartMergePolicy::ByProduct);
        assert_eq!(config.try_on.model_name, "tryon-v1.6");
        assert_eq!(config.try_on.max_image_bytes, 5_242_880);
        assert_eq!(config.try_on.delay_ms, 3000);
        assert_eq!(config.checkout.delay_ms, 2000);
        assert_eq!(config.checkout.tax_rate_bps, 800);
        assert_eq!(
            config.try_on.supported_mime_types(),
            vec![ImageMimeType::Jpeg, ImageMimeType::Png, ImageMimeType::WebP]
        );
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[store]
cart_merge = "by_variant"

[checkout]
delay_ms = 10
"#
        )
        .unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.store.cart_merge, CartMergePolicy::ByVariant);
        assert_eq!(config.checkout.delay_ms, 10);
        assert_eq!(config.checkout.tax_rate_bps, 800);
        assert_eq!(config.try_on, TryOnConfig::default());
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store\ncart_merge = ").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::StylecastError::Config(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_missing_path_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/stylecast.toml")).unwrap_err();
        assert!(matches!(
            err,
            crate::StylecastError::Config(ConfigError::ReadError(_))
        ));
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        std::env::set_var("STYLECAST_CONFIG", "/tmp/stylecast-test.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("STYLECAST_CONFIG");

        assert_eq!(path, PathBuf::from("/tmp/stylecast-test.toml"));
    }

    #[test]
    #[serial]
    fn test_load_without_file_uses_defaults() {
        std::env::set_var("STYLECAST_CONFIG", "/nonexistent/dir/config.toml");
        let config = Config::load();
        std::env::remove_var("STYLECAST_CONFIG");

        assert_eq!(config.unwrap(), Config::default());
    }
}
