//! User email normalization and validation.
//!
//! Emails are the case-insensitive unique key for users; every lookup and
//! every stored record goes through [`normalize_email`] first.

use crate::error::CoreError;

/// Lowercase an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate the basic shape of an email: one `@` with a non-empty local
/// part and a dotted, non-empty domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let valid = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace);
    if !valid {
        return Err(CoreError::Validation(format!("Invalid email: {email}")));
    }
    Ok(())
}

/// Validate a user display name: must be non-empty.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "User name must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn test_normalize_email_lowercases_and_trims() {
        assert_eq!(normalize_email(" Admin@Example.COM "), "admin@example.com");
    }

    #[test]
    fn test_validate_email_accepts_normal_addresses() {
        assert!(validate_email("admin@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.example.org").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_malformed_addresses() {
        for bad in ["", "admin", "@example.com", "admin@", "admin@host", "a b@example.com"] {
            assert_matches!(validate_email(bad), Err(CoreError::Validation(_)), "{bad}");
        }
    }
}
