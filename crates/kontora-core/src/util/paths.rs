//! Path resolution utilities.

use std::path::{Component, Path, PathBuf};

/// Expands `~` to the user's home directory.
///
/// If the path starts with `~`, replaces it with the user's home directory.
/// Otherwise returns the path unchanged.
///
/// # Example
///
/// ```
/// use kontora_core::util::paths::expand_tilde;
///
/// let expanded = expand_tilde("~/docs");
/// assert!(!expanded.starts_with("~"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// Returns true if `name` is exactly one normal path component.
///
/// Rejects empty strings, `.`/`..`, absolute paths, and anything containing
/// a separator, so `base.join(name)` always stays directly under `base`.
pub fn is_single_component(name: &str) -> bool {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde_with_tilde() {
        let path = expand_tilde("~/site/docs");
        assert!(!path.starts_with("~"), "Tilde should be expanded");
        if let Some(home) = dirs::home_dir() {
            assert!(path.starts_with(&home), "Path should start with home dir");
            assert!(path.ends_with("site/docs"), "Path should preserve suffix");
        }
    }

    #[test]
    fn test_expand_tilde_without_tilde() {
        let original = PathBuf::from("/srv/docs");
        assert_eq!(expand_tilde(&original), original);
    }

    #[test]
    fn test_expand_tilde_relative_without_tilde() {
        let original = PathBuf::from("content/docs");
        assert_eq!(expand_tilde(&original), original);
    }

    #[test]
    fn test_is_single_component_accepts_plain_names() {
        assert!(is_single_component("getting-started"));
        assert!(is_single_component("api_v2"));
        assert!(is_single_component("імпорт"));
    }

    #[test]
    fn test_is_single_component_rejects_traversal() {
        assert!(!is_single_component(""));
        assert!(!is_single_component("."));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("../secrets"));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component("/etc"));
        assert!(!is_single_component("a\\b"));
    }
}
