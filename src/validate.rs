//! Link validation against the configured platform.
//!
//! Validation is a pure pre-flight check: no network access, no side effects.
//! The error display strings are the exact messages shown to the user.

use thiserror::Error;

use crate::platform::Platform;

/// Why a submitted link was rejected before any request was made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No link was provided (empty or whitespace-only input).
    #[error("URL required.")]
    Empty,

    /// The link does not contain the platform's domain.
    #[error("URL does not look like a valid {platform} link.")]
    WrongPlatform {
        /// The platform the page/invocation is configured for.
        platform: Platform,
    },
}

/// Checks that `url` is non-empty and looks like a link for `platform`.
///
/// # Errors
///
/// Returns [`ValidationError::Empty`] for empty or whitespace-only input, and
/// [`ValidationError::WrongPlatform`] when the platform's domain pattern does
/// not match.
pub fn validate_platform_url(url: &str, platform: Platform) -> Result<(), ValidationError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !platform.matches_url(trimmed) {
        return Err(ValidationError::WrongPlatform { platform });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_url() {
        let err = validate_platform_url("", Platform::Tiktok).unwrap_err();
        assert_eq!(err, ValidationError::Empty);
        assert_eq!(err.to_string(), "URL required.");
    }

    #[test]
    fn test_validate_rejects_whitespace_only_url() {
        let err = validate_platform_url("   \t ", Platform::Youtube).unwrap_err();
        assert_eq!(err, ValidationError::Empty);
    }

    #[test]
    fn test_validate_rejects_wrong_platform_with_named_reason() {
        let err =
            validate_platform_url("https://www.youtube.com/watch?v=abc", Platform::Instagram)
                .unwrap_err();
        assert_eq!(
            err.to_string(),
            "URL does not look like a valid instagram link."
        );
    }

    #[test]
    fn test_validate_accepts_matching_links() {
        assert!(
            validate_platform_url("https://www.tiktok.com/@user/video/1", Platform::Tiktok).is_ok()
        );
        assert!(
            validate_platform_url("https://www.instagram.com/reel/x/", Platform::Instagram)
                .is_ok()
        );
        assert!(validate_platform_url("https://youtu.be/abc", Platform::Youtube).is_ok());
    }

    #[test]
    fn test_validate_trims_before_matching() {
        assert!(validate_platform_url("  https://youtu.be/abc  ", Platform::Youtube).is_ok());
    }

    #[test]
    fn test_validate_invalid_iff_empty_or_missing_substring() {
        // The validator has exactly two rejection causes; anything containing
        // the platform domain passes, however odd the rest of the link is.
        assert!(validate_platform_url("tiktok.com", Platform::Tiktok).is_ok());
        assert!(validate_platform_url("not a url", Platform::Tiktok).is_err());
    }
}
