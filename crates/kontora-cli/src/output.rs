//! Command results and their rendering.

use kontora_core::{Error, Result};
use serde::Serialize;

/// What a command printed and whether it succeeded.
///
/// Soft failures (document not found, no signed-in user, quota denied)
/// are an `Outcome` with `success == false`, not an [`Error`]; the binary
/// maps them to a non-zero exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text for stdout.
    pub output: String,
    /// Whether the command achieved what was asked.
    pub success: bool,
}

impl Outcome {
    /// A successful result.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }

    /// A soft failure.
    pub fn failed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: false,
        }
    }

    /// Build from a flag, e.g. an action envelope's error bit.
    pub fn with_status(output: impl Into<String>, success: bool) -> Self {
        Self {
            output: output.into(),
            success,
        }
    }
}

/// Pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(Outcome::ok("x").success);
        assert!(!Outcome::failed("x").success);
        assert_eq!(Outcome::with_status("y", false), Outcome::failed("y"));
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&vec!["a", "b"]).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"a\""));
    }
}
