//! Resource input validation and well-known type names.

use crate::error::CoreError;

pub const TYPE_VIDEO: &str = "video";
pub const TYPE_ARTICLE: &str = "article";
pub const TYPE_PDF: &str = "pdf";
pub const TYPE_LINK: &str = "link";

/// Well-known resource types. The field is an open string; these are the
/// values the rest of the system recognizes by name.
pub const KNOWN_TYPES: &[&str] = &[TYPE_VIDEO, TYPE_ARTICLE, TYPE_PDF, TYPE_LINK];

/// Maximum allowed length for a resource description.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Validate a resource URL: absolute http(s) with a non-empty host.
pub fn validate_url(url: &str) -> Result<(), CoreError> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    let valid = match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or("");
            !host.is_empty()
        }
        None => false,
    };
    if !valid {
        return Err(CoreError::Validation(format!(
            "Invalid resource URL: {url}"
        )));
    }
    Ok(())
}

/// Validate an optional description against [`MAX_DESCRIPTION_LENGTH`].
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a resource type: must be non-empty.
pub fn validate_type(kind: &str) -> Result<(), CoreError> {
    if kind.is_empty() {
        return Err(CoreError::Validation(
            "Resource type must not be empty".to_string(),
        ));
    }
    Ok(())
}
