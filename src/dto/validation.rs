//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest display name accepted, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 64;

/// Validates that a display name has visible content and a reasonable length.
///
/// # Examples
///
/// ```ignore
/// validate_display_name("Alice") // Ok
/// validate_display_name("   ")   // Err - blank
/// ```
pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        let mut err = ValidationError::new("display_name_blank");
        err.message = Some("Display name must not be empty".into());
        return Err(err);
    }

    let count = trimmed.chars().count();
    if count > MAX_DISPLAY_NAME_CHARS {
        let mut err = ValidationError::new("display_name_length");
        err.message = Some(
            format!("Display name must be at most {MAX_DISPLAY_NAME_CHARS} characters (got {count})")
                .into(),
        );
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_display_name_valid() {
        assert!(validate_display_name("Alice").is_ok());
        assert!(validate_display_name("  Zoé ").is_ok());
        assert!(validate_display_name(&"a".repeat(MAX_DISPLAY_NAME_CHARS)).is_ok());
    }

    #[test]
    fn test_validate_display_name_blank() {
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name(" \t ").is_err());
    }

    #[test]
    fn test_validate_display_name_too_long() {
        assert!(validate_display_name(&"a".repeat(MAX_DISPLAY_NAME_CHARS + 1)).is_err());
    }
}
