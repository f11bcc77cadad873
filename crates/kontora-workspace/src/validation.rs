//! Workspace name rules.
//!
//! Names are trimmed before checking, and length is counted in characters,
//! not bytes, so Cyrillic names get the same budget as Latin ones.

use thiserror::Error;

/// Shortest accepted name, in characters after trimming.
pub const MIN_NAME_CHARS: usize = 2;

/// Longest accepted name, in characters after trimming.
pub const MAX_NAME_CHARS: usize = 100;

/// Why a workspace name was rejected.
///
/// The display text is shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    /// Fewer than [`MIN_NAME_CHARS`] characters.
    #[error("Назва воркспейсу повинна містити мінімум {} символи", MIN_NAME_CHARS)]
    TooShort,

    /// More than [`MAX_NAME_CHARS`] characters.
    #[error("Назва воркспейсу не може перевищувати {} символів", MAX_NAME_CHARS)]
    TooLong,
}

/// Validate a requested workspace name, returning the trimmed name.
pub fn validate_workspace_name(requested: &str) -> Result<String, NameError> {
    let name = requested.trim();
    let chars = name.chars().count();

    if chars < MIN_NAME_CHARS {
        return Err(NameError::TooShort);
    }
    if chars > MAX_NAME_CHARS {
        return Err(NameError::TooLong);
    }

    Ok(name.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_char_is_too_short() {
        let err = validate_workspace_name("a").unwrap_err();
        assert_eq!(err, NameError::TooShort);
        assert!(err.to_string().contains("мінімум 2"));
    }

    #[test]
    fn test_two_chars_pass() {
        assert_eq!(validate_workspace_name("ab").unwrap(), "ab");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            validate_workspace_name("  Acme Legal \n").unwrap(),
            "Acme Legal"
        );
        assert_eq!(
            validate_workspace_name("   a   ").unwrap_err(),
            NameError::TooShort
        );
        assert_eq!(validate_workspace_name("").unwrap_err(), NameError::TooShort);
    }

    #[test]
    fn test_upper_bound() {
        let exact = "x".repeat(MAX_NAME_CHARS);
        assert!(validate_workspace_name(&exact).is_ok());

        let over = "x".repeat(MAX_NAME_CHARS + 1);
        let err = validate_workspace_name(&over).unwrap_err();
        assert_eq!(err, NameError::TooLong);
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_length_counts_characters() {
        // 100 Cyrillic characters are 200 bytes.
        let cyrillic = "ж".repeat(MAX_NAME_CHARS);
        assert!(validate_workspace_name(&cyrillic).is_ok());
        assert!(validate_workspace_name("Юр").is_ok());
    }

    proptest! {
        #[test]
        fn prop_accepts_iff_trimmed_length_in_range(raw in "\\PC{0,120}") {
            let trimmed_len = raw.trim().chars().count();
            let result = validate_workspace_name(&raw);
            let in_range = (MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&trimmed_len);
            prop_assert_eq!(result.is_ok(), in_range);
            if let Ok(name) = result {
                prop_assert_eq!(name, raw.trim());
            }
        }
    }
}
