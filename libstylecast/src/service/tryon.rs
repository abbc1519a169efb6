//! Virtual try-on service
//!
//! Validates the user's photo, hands it to a [`TryOnProvider`] and reports
//! progress on the event bus. The only provider shipped is
//! [`SimulatedTryOn`], which waits out a fixed latency and returns a canned
//! result image.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{info, warn};

use super::events::{Event, EventBus};
use crate::config::TryOnConfig;
use crate::error::{Result, ServiceError};
use crate::types::ImageMimeType;

/// A user photo that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub mime: ImageMimeType,
    pub size_bytes: u64,
}

impl ImageUpload {
    /// URL under which the photo is referenced in try-on records
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Check a user photo against the try-on limits
///
/// # Errors
///
/// `ServiceError::ImageValidation` if the file is missing, empty, not an
/// accepted image type, or larger than `config.max_image_bytes`.
pub fn validate_user_image(path: &Path, config: &TryOnConfig) -> Result<ImageUpload> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        ServiceError::ImageValidation(format!("Cannot read {}: {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(
            ServiceError::ImageValidation(format!("{} is not a file", path.display())).into(),
        );
    }

    let mime = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageMimeType::from_extension)
        .filter(|mime| config.supported_mime_types().contains(mime))
        .ok_or_else(|| {
            ServiceError::ImageValidation(format!(
                "Unsupported image type. Accepted: {}",
                config.supported_formats.join(", ")
            ))
        })?;

    let size_bytes = metadata.len();
    if size_bytes == 0 {
        return Err(ServiceError::ImageValidation("Image file is empty".to_string()).into());
    }
    if size_bytes > config.max_image_bytes {
        return Err(ServiceError::ImageValidation(format!(
            "Image is {} bytes, limit is {} bytes",
            size_bytes, config.max_image_bytes
        ))
        .into());
    }

    Ok(ImageUpload {
        path: path.to_path_buf(),
        mime,
        size_bytes,
    })
}

/// One try-on attempt
#[derive(Debug, Clone)]
pub struct TryOnRequest {
    pub request_id: String,
    pub product_id: String,
    pub image: ImageUpload,
}

impl TryOnRequest {
    pub fn new(product_id: impl Into<String>, image: ImageUpload) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            image,
        }
    }
}

/// Result of a successful try-on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnOutcome {
    pub request_id: String,
    pub product_id: String,
    pub original_image_url: String,
    pub result_image_url: String,
}

/// Try-on inference backend
#[async_trait]
pub trait TryOnProvider: Send + Sync {
    /// Render the product onto the user's photo
    ///
    /// # Errors
    ///
    /// `ServiceError::TryOn` if the backend cannot produce a result.
    async fn attempt_try_on(&self, request: &TryOnRequest) -> Result<TryOnOutcome>;

    fn name(&self) -> &str;
}

/// Timer-backed stand-in for a try-on backend
#[derive(Debug, Clone)]
pub struct SimulatedTryOn {
    model_name: String,
    delay: Duration,
    result_image_url: String,
    failure_rate: f64,
}

impl SimulatedTryOn {
    pub fn from_config(config: &TryOnConfig) -> Self {
        Self {
            model_name: config.model_name.clone(),
            delay: Duration::from_millis(config.delay_ms),
            result_image_url: config.result_image_url.clone(),
            failure_rate: config.failure_rate,
        }
    }
}

#[async_trait]
impl TryOnProvider for SimulatedTryOn {
    async fn attempt_try_on(&self, request: &TryOnRequest) -> Result<TryOnOutcome> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if super::roll_failure(self.failure_rate) {
            return Err(ServiceError::TryOn(format!(
                "{} could not process the photo",
                self.model_name
            ))
            .into());
        }

        Ok(TryOnOutcome {
            request_id: request.request_id.clone(),
            product_id: request.product_id.clone(),
            original_image_url: request.image.url(),
            result_image_url: self.result_image_url.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// Try-on service
///
/// Wraps a provider with photo validation and progress events.
#[derive(Clone)]
pub struct TryOnService {
    provider: Arc<dyn TryOnProvider>,
    config: Arc<TryOnConfig>,
    event_bus: EventBus,
}

impl TryOnService {
    pub fn new(provider: Arc<dyn TryOnProvider>, config: Arc<TryOnConfig>, event_bus: EventBus) -> Self {
        Self {
            provider,
            config,
            event_bus,
        }
    }

    /// Validate a user photo against this service's limits
    pub fn validate(&self, path: &Path) -> Result<ImageUpload> {
        validate_user_image(path, &self.config)
    }

    /// Run one try-on attempt to completion
    ///
    /// Emits `TryOnStarted`, then `TryOnCompleted` or `TryOnFailed`.
    pub async fn try_on(&self, request: TryOnRequest) -> Result<TryOnOutcome> {
        self.event_bus.emit(Event::TryOnStarted {
            request_id: request.request_id.clone(),
            product_id: request.product_id.clone(),
        });

        match self.provider.attempt_try_on(&request).await {
            Ok(outcome) => {
                info!(
                    request_id = %outcome.request_id,
                    product_id = %outcome.product_id,
                    provider = self.provider.name(),
                    "Try-on completed"
                );
                self.event_bus.emit(Event::TryOnCompleted {
                    request_id: outcome.request_id.clone(),
                    product_id: outcome.product_id.clone(),
                    result_image_url: outcome.result_image_url.clone(),
                });
                Ok(outcome)
            }
            Err(e) => {
                warn!(
                    request_id = %request.request_id,
                    product_id = %request.product_id,
                    error = %e,
                    "Try-on failed"
                );
                self.event_bus.emit(Event::TryOnFailed {
                    request_id: request.request_id,
                    product_id: request.product_id,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StylecastError;
    use std::io::Write;

    fn fast_config() -> TryOnConfig {
        TryOnConfig {
            delay_ms: 0,
            ..Default::default()
        }
    }

    fn image_file(ext: &str, bytes: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{}", ext))
            .tempfile()
            .unwrap();
        file.write_all(&vec![0u8; bytes]).unwrap();
        file
    }

    fn validation_message(err: StylecastError) -> String {
        match err {
            StylecastError::Service(ServiceError::ImageValidation(msg)) => msg,
            other => panic!("Expected image validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_supported_image() {
        let file = image_file("jpg", 1024);
        let upload = validate_user_image(file.path(), &fast_config()).unwrap();
        assert_eq!(upload.mime, ImageMimeType::Jpeg);
        assert_eq!(upload.size_bytes, 1024);
        assert!(upload.url().starts_with("file://"));
    }

    #[test]
    fn test_rejects_unsupported_type() {
        // GIF is a known image type but not an accepted upload format
        let file = image_file("gif", 1024);
        let msg = validation_message(validate_user_image(file.path(), &fast_config()).unwrap_err());
        assert!(msg.contains("Unsupported image type"));

        let file = image_file("txt", 10);
        assert!(validate_user_image(file.path(), &fast_config()).is_err());
    }

    #[test]
    fn test_rejects_oversized_image() {
        let config = TryOnConfig {
            max_image_bytes: 100,
            ..fast_config()
        };
        let file = image_file("png", 101);
        let msg = validation_message(validate_user_image(file.path(), &config).unwrap_err());
        assert!(msg.contains("limit is 100 bytes"));
    }

    #[test]
    fn test_rejects_empty_and_missing_files() {
        let file = image_file("webp", 0);
        assert!(validate_user_image(file.path(), &fast_config()).is_err());

        let missing = Path::new("/nonexistent/me.jpg");
        let msg = validation_message(validate_user_image(missing, &fast_config()).unwrap_err());
        assert!(msg.contains("Cannot read"));
    }

    #[tokio::test]
    async fn test_simulated_try_on_success_emits_events() {
        let config = Arc::new(fast_config());
        let bus = EventBus::new(10);
        let mut events = bus.subscribe();
        let service = TryOnService::new(
            Arc::new(SimulatedTryOn::from_config(&config)),
            Arc::clone(&config),
            bus,
        );

        let file = image_file("png", 64);
        let image = service.validate(file.path()).unwrap();
        let request = TryOnRequest::new("prod_1", image);
        let request_id = request.request_id.clone();

        let outcome = service.try_on(request).await.unwrap();
        assert_eq!(outcome.request_id, request_id);
        assert_eq!(outcome.result_image_url, config.result_image_url);

        assert!(matches!(events.recv().await.unwrap(), Event::TryOnStarted { .. }));
        assert!(matches!(events.recv().await.unwrap(), Event::TryOnCompleted { .. }));
    }

    #[tokio::test]
    async fn test_simulated_try_on_failure() {
        let config = Arc::new(TryOnConfig {
            failure_rate: 1.0,
            ..fast_config()
        });
        let bus = EventBus::new(10);
        let mut events = bus.subscribe();
        let service = TryOnService::new(
            Arc::new(SimulatedTryOn::from_config(&config)),
            Arc::clone(&config),
            bus,
        );

        let file = image_file("jpeg", 64);
        let image = service.validate(file.path()).unwrap();
        let err = service.try_on(TryOnRequest::new("prod_2", image)).await.unwrap_err();
        assert!(matches!(err, StylecastError::Service(ServiceError::TryOn(_))));

        assert!(matches!(events.recv().await.unwrap(), Event::TryOnStarted { .. }));
        match events.recv().await.unwrap() {
            Event::TryOnFailed { product_id, .. } => assert_eq!(product_id, "prod_2"),
            other => panic!("Expected TryOnFailed, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_try_on_waits_configured_delay() {
        let config = TryOnConfig::default();
        let provider = SimulatedTryOn::from_config(&config);
        let request = TryOnRequest::new(
            "prod_1",
            ImageUpload {
                path: PathBuf::from("/tmp/me.jpg"),
                mime: ImageMimeType::Jpeg,
                size_bytes: 10,
            },
        );

        let start = tokio::time::Instant::now();
        provider.attempt_try_on(&request).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(3000));
    }
}
