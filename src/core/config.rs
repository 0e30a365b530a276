//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.dialectic/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Resolution produces a [`ResolvedConfig`] holding one optional credential
//! per provider. That value is handed to the analyzer at construction time;
//! nothing past this module reads the environment.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::inference::providers::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::inference::providers::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};
use crate::inference::providers::openrouter::{
    DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL, DEFAULT_OPENROUTER_TITLE,
};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DialecticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub openai: ProviderConfig,
    #[serde(default)]
    pub gemini: ProviderConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_addr: Option<String>,
}

/// Settings for a fixed-model provider.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenRouterConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub referer: Option<String>,
    pub title: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

// ============================================================================
// Resolved Config (concrete values, credentials stay optional)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bind_addr: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub openrouter_default_model: String,
    pub openrouter_referer: Option<String>,
    pub openrouter_title: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.dialectic/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".dialectic").join("config.toml"))
}

/// Load config from `~/.dialectic/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DialecticConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<DialecticConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(DialecticConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<DialecticConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(DialecticConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: DialecticConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    // Not the whole struct: it holds API keys.
    debug!(
        "Config: bind_addr={:?}, openai_model={:?}, gemini_model={:?}, openrouter_default_model={:?}",
        config.server.bind_addr,
        config.openai.model,
        config.gemini.model,
        config.openrouter.default_model
    );
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Dialectic Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# bind_addr = "127.0.0.1:8080"       # Or set DIALECTIC_BIND_ADDR env var

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"
# model = "gpt-4o-mini"

# [gemini]
# api_key = "AIza..."                # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# model = "gemini-1.5-flash"

# [openrouter]
# api_key = "sk-or-..."              # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"
# default_model = "openai/gpt-4o-mini"
# referer = "https://example.org"    # Sent as HTTP-Referer
# title = "Dialectic"                # Sent as X-Title
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_bind` is from the `--bind` flag (None = not specified).
pub fn resolve(config: &DialecticConfig, cli_bind: Option<&str>) -> ResolvedConfig {
    resolve_with(config, cli_bind, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment values through `env`.
pub fn resolve_with<F>(config: &DialecticConfig, cli_bind: Option<&str>, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Env wins over file, file wins over default
    let pick = |key: &str, file: &Option<String>, default: &str| -> String {
        env(key)
            .or_else(|| file.clone())
            .unwrap_or_else(|| default.to_string())
    };
    let pick_key = |key: &str, file: &Option<String>| -> Option<String> {
        env(key)
            .or_else(|| file.clone())
            .filter(|k| !k.trim().is_empty())
    };

    // Bind address: CLI → env → config → default
    let bind_addr = cli_bind
        .map(|s| s.to_string())
        .unwrap_or_else(|| pick("DIALECTIC_BIND_ADDR", &config.server.bind_addr, DEFAULT_BIND_ADDR));

    ResolvedConfig {
        bind_addr,
        openai_api_key: pick_key("OPENAI_API_KEY", &config.openai.api_key),
        openai_base_url: pick("OPENAI_BASE_URL", &config.openai.base_url, DEFAULT_OPENAI_BASE_URL),
        openai_model: config
            .openai
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        gemini_api_key: pick_key("GEMINI_API_KEY", &config.gemini.api_key),
        gemini_base_url: pick("GEMINI_BASE_URL", &config.gemini.base_url, DEFAULT_GEMINI_BASE_URL),
        gemini_model: config
            .gemini
            .model
            .clone()
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        openrouter_api_key: pick_key("OPENROUTER_API_KEY", &config.openrouter.api_key),
        openrouter_base_url: pick(
            "OPENROUTER_BASE_URL",
            &config.openrouter.base_url,
            DEFAULT_OPENROUTER_BASE_URL,
        ),
        openrouter_default_model: config
            .openrouter
            .default_model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENROUTER_MODEL.to_string()),
        openrouter_referer: config.openrouter.referer.clone(),
        openrouter_title: config
            .openrouter
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENROUTER_TITLE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = DialecticConfig::default();
        assert!(config.server.bind_addr.is_none());
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with(&DialecticConfig::default(), None, no_env);
        assert_eq!(resolved.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(resolved.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(resolved.openai_model, "gpt-4o-mini");
        assert_eq!(resolved.gemini_model, "gemini-1.5-flash");
        assert_eq!(resolved.openrouter_default_model, DEFAULT_OPENROUTER_MODEL);
        assert_eq!(resolved.openrouter_title, "Dialectic");
        assert!(resolved.openai_api_key.is_none());
        assert!(resolved.gemini_api_key.is_none());
        assert!(resolved.openrouter_api_key.is_none());
    }

    #[test]
    fn test_env_overrides_config_file() {
        let config = DialecticConfig {
            openai: ProviderConfig {
                api_key: Some("from-file".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, None, |key| match key {
            "OPENAI_API_KEY" => Some("from-env".to_string()),
            "GEMINI_BASE_URL" => Some("http://localhost:9000".to_string()),
            _ => None,
        });
        assert_eq!(resolved.openai_api_key.as_deref(), Some("from-env"));
        assert_eq!(resolved.gemini_base_url, "http://localhost:9000");
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let resolved = resolve_with(&DialecticConfig::default(), None, |key| {
            (key == "GEMINI_API_KEY").then(|| "  ".to_string())
        });
        assert!(resolved.gemini_api_key.is_none());
    }

    #[test]
    fn test_resolve_cli_bind_wins() {
        let config = DialecticConfig {
            server: ServerConfig {
                bind_addr: Some("0.0.0.0:3000".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with(&config, Some("127.0.0.1:9999"), |key| {
            (key == "DIALECTIC_BIND_ADDR").then(|| "127.0.0.1:7000".to_string())
        });
        assert_eq!(resolved.bind_addr, "127.0.0.1:9999");

        let resolved = resolve_with(&config, None, no_env);
        assert_eq!(resolved.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[server]
bind_addr = "0.0.0.0:8080"

[openai]
api_key = "sk-test-123"
model = "gpt-4o"

[gemini]
api_key = "AIza-test"

[openrouter]
api_key = "sk-or-test"
default_model = "mistralai/mistral-7b-instruct"
referer = "https://example.org"
"#;
        let config: DialecticConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_addr.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(config.openai.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("AIza-test"));
        assert_eq!(
            config.openrouter.default_model.as_deref(),
            Some("mistralai/mistral-7b-instruct")
        );

        let resolved = resolve_with(&config, None, no_env);
        assert_eq!(resolved.openai_model, "gpt-4o");
        assert_eq!(resolved.openrouter_referer.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only one override, everything else stays default
        let toml_str = r#"
[gemini]
model = "gemini-1.5-pro"
"#;
        let config: DialecticConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.model.as_deref(), Some("gemini-1.5-pro"));
        assert!(config.gemini.api_key.is_none());
        assert!(config.server.bind_addr.is_none());
        assert!(config.openrouter.default_model.is_none());
    }

    #[test]
    fn test_load_generates_default_when_missing() {
        let dir = std::env::temp_dir().join(format!("dialectic-config-{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.openai.api_key.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it loads back as defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.server.bind_addr.is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_load_malformed_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("dialectic-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[openai\napi_key = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(dir);
    }
}
