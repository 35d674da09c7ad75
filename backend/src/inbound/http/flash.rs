//! One-shot notices carried in the session between a redirect and the next
//! rendered page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Presentation hint for a flash message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    /// Uncategorised notice.
    #[default]
    Message,
    Success,
    Info,
    Error,
    Danger,
}

/// A queued notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub category: FlashCategory,
    #[schema(example = "Login successful!")]
    pub message: String,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    /// Uncategorised notice.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Message, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Error, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(FlashCategory::Danger, message)
    }
}
