//! Configuration for the `kontora` binary.
//!
//! Provides the [`KontoraConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `KONTORA_CONFIG` environment variable
//! 3. XDG default: `~/.config/kontora/config.toml`
//! 4. Built-in defaults
//!
//! Environment overrides use the `KONTORA_<SECTION>_<KEY>` form, e.g.
//! `KONTORA_DATABASE_URL` or `KONTORA_DOCS_PATH`.

use std::path::PathBuf;

use confyg::{Confygery, env};
use kontora_core::traits::ConfigProvider;
use kontora_core::util::paths::expand_tilde;
use kontora_core::{Error, Result};
use kontora_docs::DEFAULT_CONTENT_FILE;
use kontora_workspace::Tier;
use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "KONTORA_CONFIG";

const ENV_PREFIX: &str = "KONTORA";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the Kontora CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KontoraConfig {
    /// Project name, used for env var prefixes and default paths.
    pub project_name: String,

    /// Base path for project data. Defaults to the working directory.
    pub base_path: Option<String>,

    /// Documentation library settings.
    pub docs: DocsConfig,

    /// Workspace database settings.
    pub database: DatabaseConfig,

    /// Quota seeding for new workspaces.
    pub quota: QuotaConfig,
}

/// Documentation library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Documents root. Defaults to `<base_path>/docs`.
    pub path: Option<String>,

    /// Markdown file inside each document directory.
    pub content_file: String,
}

/// Workspace database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Postgres connection URL.
    pub url: Option<String>,

    /// Pool size.
    pub max_connections: u32,
}

/// Quota configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// Tier whose limits seed the quota row of a new workspace.
    pub default_tier: Tier,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for KontoraConfig {
    fn default() -> Self {
        Self {
            project_name: "kontora".to_string(),
            base_path: None,
            docs: DocsConfig::default(),
            database: DatabaseConfig::default(),
            quota: QuotaConfig::default(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            path: None,
            content_file: DEFAULT_CONTENT_FILE.to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl KontoraConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                log::debug!("Loading config from {}", path.display());
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level(ENV_PREFIX);
        env_opts.add_section("docs");
        env_opts.add_section("database");
        env_opts.add_section("quota");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("kontora").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::serialization(e.to_string()))
    }

    /// Flatten this config into `KONTORA_`-prefixed environment variables.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value =
            toml::Value::try_from(self).map_err(|e| Error::serialization(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, ENV_PREFIX, &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for KontoraConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn base_path(&self) -> Result<PathBuf> {
        match &self.base_path {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine base path: {e}"))),
        }
    }

    fn docs_path(&self) -> Result<PathBuf> {
        match &self.docs.path {
            Some(p) => Ok(expand_tilde(p)),
            None => Ok(self.base_path()?.join("docs")),
        }
    }

    fn docs_content_file(&self) -> &str {
        &self.docs.content_file
    }

    fn database_url(&self) -> Option<&str> {
        self.database.url.as_deref().filter(|url| !url.is_empty())
    }
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    /// Serializes tests that touch process-wide environment variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// RAII guard for env var manipulation in tests.
    pub(crate) struct EnvGuard {
        key: String,
        prev: Option<String>,
    }

    impl EnvGuard {
        pub(crate) fn new(key: &str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: env-mutating tests hold `env_lock`.
            unsafe { std::env::set_var(key, value) };
            Self {
                key: key.to_string(),
                prev,
            }
        }

        pub(crate) fn remove(key: &str) -> Self {
            let prev = std::env::var(key).ok();
            // SAFETY: env-mutating tests hold `env_lock`.
            unsafe { std::env::remove_var(key) };
            Self {
                key: key.to_string(),
                prev,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: env-mutating tests hold `env_lock`.
            unsafe {
                match &self.prev {
                    Some(val) => std::env::set_var(&self.key, val),
                    None => std::env::remove_var(&self.key),
                }
            }
        }
    }

    #[test]
    fn test_kontora_config_default() {
        let config = KontoraConfig::default();
        assert_eq!(config.project_name, "kontora");
        assert!(config.base_path.is_none());
        assert!(config.docs.path.is_none());
        assert_eq!(config.docs.content_file, "index.md");
        assert!(config.database.url.is_none());
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.quota.default_tier, Tier::Free);
    }

    #[test]
    fn test_kontora_config_from_toml() {
        let toml_str = r#"
            project_name = "crm"
            base_path = "/srv/crm"

            [docs]
            path = "/srv/crm/handbook"
            content_file = "README.md"

            [database]
            url = "postgres://localhost/crm"
            max_connections = 12

            [quota]
            default_tier = "starter"
        "#;

        let config: KontoraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.project_name, "crm");
        assert_eq!(config.docs.path.as_deref(), Some("/srv/crm/handbook"));
        assert_eq!(config.docs.content_file, "README.md");
        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/crm"));
        assert_eq!(config.database.max_connections, 12);
        assert_eq!(config.quota.default_tier, Tier::Starter);
    }

    #[test]
    fn test_kontora_config_partial_toml_keeps_defaults() {
        let config: KontoraConfig = toml::from_str("[database]\nurl = \"postgres://x\"\n").unwrap();
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.docs.content_file, "index.md");
    }

    #[test]
    fn test_kontora_config_to_toml() {
        let config = KontoraConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("project_name = \"kontora\""));
        assert!(toml_str.contains("[docs]"));
        assert!(toml_str.contains("default_tier = \"free\""));

        let parsed: KontoraConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.docs.content_file, config.docs.content_file);
    }

    #[test]
    fn test_kontora_config_load_from_file() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
                project_name = "loaded"
                [database]
                max_connections = 9
            "#,
        )
        .unwrap();

        let config = KontoraConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.project_name, "loaded");
        assert_eq!(config.database.max_connections, 9);
    }

    #[test]
    fn test_kontora_config_load_defaults() {
        let _lock = env_lock();
        let config = KontoraConfig::load(Some("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.project_name, "kontora");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_kontora_config_load_env_overlay() {
        let _lock = env_lock();
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[docs]\npath = \"/from/file\"\n").unwrap();

        // confyg passes env values as strings, so only string fields are
        // overlaid here.
        let _guard = EnvGuard::new("KONTORA_DOCS_PATH", "/from/env");
        let config = KontoraConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.docs.path.as_deref(), Some("/from/env"));
    }

    #[test]
    fn test_kontora_config_resolve_config_path_explicit() {
        let path = KontoraConfig::resolve_config_path(Some("/explicit/config.toml"));
        assert_eq!(path, Some(PathBuf::from("/explicit/config.toml")));
    }

    #[test]
    fn test_kontora_config_resolve_config_path_env() {
        let _lock = env_lock();
        let _guard = EnvGuard::new(CONFIG_ENV_VAR, "/env/config.toml");
        let path = KontoraConfig::resolve_config_path(None);
        assert_eq!(path, Some(PathBuf::from("/env/config.toml")));
    }

    #[test]
    fn test_kontora_config_resolve_config_path_default() {
        let _lock = env_lock();
        let _guard = EnvGuard::remove(CONFIG_ENV_VAR);
        let path = KontoraConfig::resolve_config_path(None).unwrap();
        let s = path.to_str().unwrap();
        assert!(s.contains("kontora"));
        assert!(s.ends_with("config.toml"));
    }

    #[test]
    fn test_kontora_config_provider_docs_path_default() {
        let config = KontoraConfig {
            base_path: Some("/project".into()),
            ..Default::default()
        };
        assert_eq!(config.docs_path().unwrap(), PathBuf::from("/project/docs"));
    }

    #[test]
    fn test_kontora_config_provider_docs_path_explicit() {
        let config = KontoraConfig {
            docs: DocsConfig {
                path: Some("/custom/docs".into()),
                content_file: "page.md".into(),
            },
            ..Default::default()
        };
        assert_eq!(config.docs_path().unwrap(), PathBuf::from("/custom/docs"));
        assert_eq!(config.docs_content_file(), "page.md");
    }

    #[test]
    fn test_kontora_config_provider_base_path_default() {
        let config = KontoraConfig::default();
        assert_eq!(config.base_path().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_kontora_config_provider_database_url() {
        let mut config = KontoraConfig::default();
        assert!(config.database_url().is_none());

        config.database.url = Some(String::new());
        assert!(config.database_url().is_none());

        config.database.url = Some("postgres://db/crm".into());
        assert_eq!(config.database_url(), Some("postgres://db/crm"));
    }

    #[test]
    fn test_kontora_config_to_env_vars() {
        let config = KontoraConfig::default();
        let map: HashMap<_, _> = config.to_env_vars().unwrap().into_iter().collect();
        assert_eq!(map.get("KONTORA_PROJECT_NAME").unwrap(), "kontora");
        assert_eq!(map.get("KONTORA_DOCS_CONTENT_FILE").unwrap(), "index.md");
        assert_eq!(map.get("KONTORA_DATABASE_MAX_CONNECTIONS").unwrap(), "5");
        assert_eq!(map.get("KONTORA_QUOTA_DEFAULT_TIER").unwrap(), "free");
        assert!(!map.contains_key("KONTORA_DATABASE_URL"));
    }

    #[test]
    fn test_kontora_config_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KontoraConfig>();
    }
}
