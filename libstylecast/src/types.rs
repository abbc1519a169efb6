//! Core types for Stylecast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five mutually exclusive screens the navigation cursor can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    Home,
    Discovery,
    Recommendations,
    TryOn,
    Cart,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Home,
        Screen::Discovery,
        Screen::Recommendations,
        Screen::TryOn,
        Screen::Cart,
    ];

    /// Human-readable screen title
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Stylecast",
            Screen::Discovery => "Style Discovery",
            Screen::Recommendations => "Your Fit",
            Screen::TryOn => "Virtual Try-On",
            Screen::Cart => "Cart",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Screen::Home => "home",
            Screen::Discovery => "discovery",
            Screen::Recommendations => "recommendations",
            Screen::TryOn => "tryOn",
            Screen::Cart => "cart",
        };
        write!(f, "{}", name)
    }
}

/// An outfit card shown on the discovery screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitPhoto {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

/// An outfit the user swiped right on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikedOutfit {
    pub id: String,
    pub outfit_photo: OutfitPhoto,
    pub liked_at: DateTime<Utc>,
}

impl LikedOutfit {
    /// Record a like for `outfit` with a fresh id
    pub fn new(outfit: OutfitPhoto) -> Self {
        Self {
            id: format!("liked_{}", uuid::Uuid::new_v4()),
            outfit_photo: outfit,
            liked_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// A fresh cart line with quantity 1
    pub fn new(product_id: String, variant_id: Option<String>) -> Self {
        Self {
            product_id,
            variant_id,
            quantity: 1,
            added_at: Utc::now(),
        }
    }
}

/// Lifecycle of a virtual fitting request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TryOnStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TryOnStatus {
    /// Whether `next` follows `self` in `pending -> processing -> {completed, failed}`
    pub fn can_transition_to(&self, next: TryOnStatus) -> bool {
        matches!(
            (self, next),
            (TryOnStatus::Pending, TryOnStatus::Processing)
                | (TryOnStatus::Processing, TryOnStatus::Completed)
                | (TryOnStatus::Processing, TryOnStatus::Failed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TryOnStatus::Completed | TryOnStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnSession {
    pub id: String,
    pub product_id: String,
    pub user_image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image_url: Option<String>,
    pub status: TryOnStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial update merged into an existing [`TryOnSession`]
///
/// `None` fields leave the session untouched. The session id is the lookup
/// key and cannot be rewritten through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TryOnSessionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TryOnStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryOnSession {
    /// Merge a partial update, returning the updated session
    pub fn merged(self, update: TryOnSessionUpdate) -> Self {
        Self {
            id: self.id,
            product_id: update.product_id.unwrap_or(self.product_id),
            user_image_url: update.user_image_url.unwrap_or(self.user_image_url),
            result_image_url: update.result_image_url.or(self.result_image_url),
            status: update.status.unwrap_or(self.status),
            created_at: update.created_at.unwrap_or(self.created_at),
        }
    }
}

/// Price in integer cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl std::ops::Mul<u32> for Price {
    type Output = Price;

    fn mul(self, rhs: u32) -> Price {
        Price(self.0 * u64::from(rhs))
    }
}

/// A purchasable product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: Price,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Outfit style this product pairs with, used for ranking recommendations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

// ============================================================================
// Image Types
// ============================================================================

/// Image MIME types a user photo may arrive in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ImageMimeType {
    /// Parse MIME type from a MIME string (e.g., "image/jpeg")
    pub fn from_mime_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detect MIME type from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Get the MIME type string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }
}

impl std::fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_serializes_in_camel_case() {
        let names: Vec<String> = Screen::ALL
            .iter()
            .map(|s| serde_json::to_string(s).unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "\"home\"",
                "\"discovery\"",
                "\"recommendations\"",
                "\"tryOn\"",
                "\"cart\""
            ]
        );
    }

    #[test]
    fn test_screen_display_matches_serde() {
        for screen in Screen::ALL {
            let json = serde_json::to_string(&screen).unwrap();
            assert_eq!(json.trim_matches('"'), screen.to_string());
        }
    }

    #[test]
    fn test_liked_outfit_ids_are_unique() {
        let outfit = OutfitPhoto {
            id: "1".to_string(),
            image_url: "https://example.com/1.jpg".to_string(),
            tags: vec!["casual".to_string()],
            style: "Urban Casual".to_string(),
            season: None,
        };
        let a = LikedOutfit::new(outfit.clone());
        let b = LikedOutfit::new(outfit);
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("liked_"));
    }

    #[test]
    fn test_try_on_status_lifecycle() {
        use TryOnStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Processing));
        assert!(!Failed.can_transition_to(Pending));
        assert!(Completed.is_terminal());
        assert!(!Processing.is_terminal());
    }

    #[test]
    fn test_session_merge_only_touches_given_fields() {
        let session = TryOnSession {
            id: "s1".to_string(),
            product_id: "prod_1".to_string(),
            user_image_url: "file:///me.jpg".to_string(),
            result_image_url: None,
            status: TryOnStatus::Processing,
            created_at: Utc::now(),
        };
        let created_at = session.created_at;

        let merged = session.merged(TryOnSessionUpdate {
            status: Some(TryOnStatus::Completed),
            result_image_url: Some("https://example.com/result.jpg".to_string()),
            ..Default::default()
        });

        assert_eq!(merged.id, "s1");
        assert_eq!(merged.product_id, "prod_1");
        assert_eq!(merged.status, TryOnStatus::Completed);
        assert_eq!(merged.result_image_url.as_deref(), Some("https://example.com/result.jpg"));
        assert_eq!(merged.created_at, created_at);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(8999).to_string(), "$89.99");
        assert_eq!(Price::from_cents(5).to_string(), "$0.05");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
        assert_eq!((Price::from_cents(7999) * 2).to_string(), "$159.98");
    }

    #[test]
    fn test_image_mime_type_from_extension() {
        assert_eq!(ImageMimeType::from_extension("JPG"), Some(ImageMimeType::Jpeg));
        assert_eq!(ImageMimeType::from_extension("webp"), Some(ImageMimeType::WebP));
        assert_eq!(ImageMimeType::from_extension("bmp"), None);
        assert_eq!(ImageMimeType::from_mime_str("image/png"), Some(ImageMimeType::Png));
    }
}
