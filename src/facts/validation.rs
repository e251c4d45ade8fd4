//! Input validation for new facts

use super::category::Category;
use super::{NewFact, MAX_TEXT_CHARS};
use std::fmt;
use url::Url;

/// True iff `s` parses as a URL whose scheme is exactly `http` or `https`
pub fn is_valid_http_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => url.scheme() == "http" || url.scheme() == "https",
        Err(_) => false,
    }
}

/// Why a fact submission was rejected before reaching the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyText,
    TextTooLong { chars: usize },
    InvalidSource,
    MissingCategory,
    UnknownCategory(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyText => write!(f, "fact text is empty"),
            ValidationError::TextTooLong { chars } => write!(
                f,
                "fact text is {} characters (max {})",
                chars, MAX_TEXT_CHARS
            ),
            ValidationError::InvalidSource => {
                write!(f, "source must be an http:// or https:// URL")
            }
            ValidationError::MissingCategory => write!(f, "no category chosen"),
            ValidationError::UnknownCategory(name) => write!(f, "unknown category '{}'", name),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check the three submission fields and build the record to insert.
///
/// The category is matched case-insensitively and stored lower-case.
pub fn validate_new_fact(
    text: &str,
    source: &str,
    category: &str,
) -> Result<NewFact, ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong { chars });
    }
    if !is_valid_http_url(source) {
        return Err(ValidationError::InvalidSource);
    }
    if category.is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    let category = Category::from_name(category)
        .ok_or_else(|| ValidationError::UnknownCategory(category.to_string()))?;

    Ok(NewFact {
        text: text.to_string(),
        source: source.to_string(),
        category,
    })
}
