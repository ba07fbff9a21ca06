//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lingoflash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::Provider;
use crate::core::session::DEFAULT_DECK_SIZE;
use crate::core::topic::{Difficulty, Topic};
use crate::inference::providers::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::inference::providers::lmstudio::DEFAULT_LMSTUDIO_BASE_URL;
use crate::inference::providers::openrouter::DEFAULT_OPENROUTER_BASE_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LingoConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
    #[serde(default)]
    pub lmstudio: LmStudioConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<Provider>,
    pub default_model: Option<String>,
    pub default_topic: Option<Topic>,
    pub default_difficulty: Option<Difficulty>,
    pub deck_size: Option<usize>,
    pub feedback_delay_ms: Option<u64>,
    pub generation_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenRouterConfig {
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LmStudioConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub topic: Option<Topic>,
    pub difficulty: Option<Difficulty>,
    pub deck_size: Option<usize>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const MAX_DECK_SIZE: usize = 50;
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1200;
pub const MAX_FEEDBACK_DELAY_MS: u64 = 10_000;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_LMSTUDIO_MODEL: &str = "local-model";

fn default_model(provider: Provider) -> &'static str {
    match provider {
        Provider::Gemini => DEFAULT_GEMINI_MODEL,
        Provider::OpenRouter => DEFAULT_OPENROUTER_MODEL,
        Provider::LmStudio => DEFAULT_LMSTUDIO_MODEL,
    }
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub deck_size: usize,
    pub feedback_delay: Duration,
    pub generation_timeout: Duration,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub lmstudio_base_url: String,
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

/// Returns the path to `~/.lingoflash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lingoflash").join("config.toml"))
}

/// Load config from `~/.lingoflash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `LingoConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LingoConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LingoConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LingoConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<LingoConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# LingoFlash Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "gemini"           # "gemini", "openrouter" or "lmstudio"
# default_model = "..."                 # Used by every provider without its own `model`
# default_topic = "daily-conversation"  # travel-adventure, food-dining, hobbies-fun,
#                                       # feelings-emotions, business-professional, idioms-slang
# default_difficulty = "beginner"       # intermediate, advanced, expert
# deck_size = 10                        # 1..=50
# feedback_delay_ms = 1200              # pause after marking a card
# generation_timeout_secs = 60

# [gemini]
# model = "gemini-2.5-flash"
# api_key = "..."                       # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"

# [openrouter]
# model = "google/gemini-2.5-flash"
# api_key = "sk-or-..."                 # Or set OPENROUTER_API_KEY env var
# base_url = "https://openrouter.ai/api/v1"

# [lmstudio]
# model = "local-model"
# base_url = "http://localhost:1234/v1"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &LingoConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading environment variables through `env`.
pub fn resolve_with_env(
    config: &LingoConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .or_else(|| {
            env("LINGOFLASH_PROVIDER").and_then(|s| {
                let parsed = <Provider as clap::ValueEnum>::from_str(&s, true).ok();
                if parsed.is_none() {
                    warn!("Ignoring unknown LINGOFLASH_PROVIDER value: {}", s);
                }
                parsed
            })
        })
        .or(config.general.default_provider)
        .unwrap_or_default();

    // Model: CLI → env → [provider].model → general.default_model → built-in
    let provider_model = match provider {
        Provider::Gemini => &config.gemini.model,
        Provider::OpenRouter => &config.openrouter.model,
        Provider::LmStudio => &config.lmstudio.model,
    };
    let model_name = cli
        .model
        .clone()
        .or_else(|| env("LINGOFLASH_MODEL"))
        .or_else(|| provider_model.clone())
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| default_model(provider).to_string());

    let topic = cli
        .topic
        .or(config.general.default_topic)
        .unwrap_or_default();
    let difficulty = cli
        .difficulty
        .or(config.general.default_difficulty)
        .unwrap_or_default();

    let deck_size = clamp_deck_size(cli.deck_size.or(config.general.deck_size));
    let feedback_delay = clamp_feedback_delay(config.general.feedback_delay_ms);
    let generation_timeout = clamp_timeout(config.general.generation_timeout_secs);

    // Gemini API key: GEMINI_API_KEY → API_KEY → config
    let gemini_api_key = env("GEMINI_API_KEY")
        .or_else(|| env("API_KEY"))
        .or_else(|| config.gemini.api_key.clone());
    let gemini_base_url = config
        .gemini
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    // OpenRouter API key: env → config
    let openrouter_api_key =
        env("OPENROUTER_API_KEY").or_else(|| config.openrouter.api_key.clone());

    // OpenRouter base URL: env → config → default
    let openrouter_base_url = env("OPENROUTER_BASE_URL")
        .or_else(|| config.openrouter.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENROUTER_BASE_URL.to_string());

    // LM Studio base URL: env → config → default
    let lmstudio_base_url = env("LM_STUDIO_BASE_URL")
        .or_else(|| config.lmstudio.base_url.clone())
        .unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string());

    ResolvedConfig {
        provider,
        model_name,
        topic,
        difficulty,
        deck_size,
        feedback_delay,
        generation_timeout,
        gemini_api_key,
        gemini_base_url,
        openrouter_api_key,
        openrouter_base_url,
        lmstudio_base_url,
    }
}

fn clamp_deck_size(requested: Option<usize>) -> usize {
    match requested {
        None => DEFAULT_DECK_SIZE,
        Some(0) => {
            warn!("deck_size must be at least 1, using 1");
            1
        }
        Some(n) if n > MAX_DECK_SIZE => {
            warn!("deck_size {} exceeds {}, clamping", n, MAX_DECK_SIZE);
            MAX_DECK_SIZE
        }
        Some(n) => n,
    }
}

fn clamp_feedback_delay(requested: Option<u64>) -> Duration {
    let ms = requested.unwrap_or(DEFAULT_FEEDBACK_DELAY_MS);
    if ms > MAX_FEEDBACK_DELAY_MS {
        warn!("feedback_delay_ms {} exceeds {}, clamping", ms, MAX_FEEDBACK_DELAY_MS);
        return Duration::from_millis(MAX_FEEDBACK_DELAY_MS);
    }
    Duration::from_millis(ms)
}

fn clamp_timeout(requested: Option<u64>) -> Duration {
    match requested {
        None => Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        Some(0) => {
            warn!("generation_timeout_secs must be at least 1, using 1");
            Duration::from_secs(1)
        }
        Some(secs) => Duration::from_secs(secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = LingoConfig::default();
        assert!(config.general.default_provider.is_none());
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&LingoConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.provider, Provider::Gemini);
        assert_eq!(resolved.model_name, DEFAULT_GEMINI_MODEL);
        assert_eq!(resolved.topic, Topic::DailyConversation);
        assert_eq!(resolved.difficulty, Difficulty::Beginner);
        assert_eq!(resolved.deck_size, DEFAULT_DECK_SIZE);
        assert_eq!(resolved.feedback_delay, Duration::from_millis(1200));
        assert_eq!(resolved.generation_timeout, Duration::from_secs(60));
        assert!(resolved.gemini_api_key.is_none());
        assert_eq!(resolved.lmstudio_base_url, DEFAULT_LMSTUDIO_BASE_URL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = LingoConfig {
            general: GeneralConfig {
                default_provider: Some(Provider::LmStudio),
                default_model: Some("my-model".to_string()),
                default_topic: Some(Topic::FoodDining),
                default_difficulty: Some(Difficulty::Advanced),
                deck_size: Some(5),
                feedback_delay_ms: Some(300),
                generation_timeout_secs: Some(15),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.provider, Provider::LmStudio);
        assert_eq!(resolved.model_name, "my-model");
        assert_eq!(resolved.topic, Topic::FoodDining);
        assert_eq!(resolved.difficulty, Difficulty::Advanced);
        assert_eq!(resolved.deck_size, 5);
        assert_eq!(resolved.feedback_delay, Duration::from_millis(300));
        assert_eq!(resolved.generation_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = LingoConfig {
            general: GeneralConfig {
                default_provider: Some(Provider::LmStudio),
                default_topic: Some(Topic::FoodDining),
                deck_size: Some(5),
                ..Default::default()
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            provider: Some(Provider::OpenRouter),
            topic: Some(Topic::IdiomsSlang),
            deck_size: Some(3),
            ..Default::default()
        };
        let env = |key: &str| (key == "LINGOFLASH_PROVIDER").then(|| "gemini".to_string());
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.provider, Provider::OpenRouter);
        assert_eq!(resolved.model_name, DEFAULT_OPENROUTER_MODEL);
        assert_eq!(resolved.topic, Topic::IdiomsSlang);
        assert_eq!(resolved.deck_size, 3);
    }

    #[test]
    fn test_provider_model_follows_selected_provider() {
        let config = parse_config(
            r#"
[general]
default_provider = "gemini"

[gemini]
model = "gemini-2.5-pro"

[lmstudio]
model = "qwen3-8b"
"#,
        )
        .unwrap();

        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.model_name, "gemini-2.5-pro");

        let cli = CliOverrides {
            provider: Some(Provider::LmStudio),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, no_env);
        assert_eq!(resolved.model_name, "qwen3-8b");

        // No [openrouter] model: its built-in default, not Gemini's
        let cli = CliOverrides {
            provider: Some(Provider::OpenRouter),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, no_env);
        assert_eq!(resolved.model_name, DEFAULT_OPENROUTER_MODEL);
    }

    #[test]
    fn test_provider_model_beats_general_default() {
        let config = LingoConfig {
            general: GeneralConfig {
                default_model: Some("shared".to_string()),
                ..Default::default()
            },
            gemini: GeminiConfig {
                model: Some("gemini-only".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.model_name, "gemini-only");

        let cli = CliOverrides {
            provider: Some(Provider::LmStudio),
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &cli, no_env);
        assert_eq!(resolved.model_name, "shared");

        let resolved = resolve_with_env(&config, &cli, |k| {
            (k == "LINGOFLASH_MODEL").then(|| "from-env".to_string())
        });
        assert_eq!(resolved.model_name, "from-env");
    }

    #[test]
    fn test_resolve_env_overrides_config() {
        let config = LingoConfig {
            general: GeneralConfig {
                default_provider: Some(Provider::Gemini),
                ..Default::default()
            },
            openrouter: OpenRouterConfig {
                api_key: Some("from-config".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let vars: HashMap<&str, &str> = HashMap::from([
            ("LINGOFLASH_PROVIDER", "OpenRouter"),
            ("OPENROUTER_API_KEY", "from-env"),
            ("API_KEY", "legacy-key"),
        ]);
        let resolved = resolve_with_env(&config, &CliOverrides::default(), |k| {
            vars.get(k).map(|v| v.to_string())
        });
        assert_eq!(resolved.provider, Provider::OpenRouter);
        assert_eq!(resolved.openrouter_api_key.as_deref(), Some("from-env"));
        assert_eq!(resolved.gemini_api_key.as_deref(), Some("legacy-key"));
    }

    #[test]
    fn test_unknown_env_provider_falls_through() {
        let resolved = resolve_with_env(&LingoConfig::default(), &CliOverrides::default(), |k| {
            (k == "LINGOFLASH_PROVIDER").then(|| "carrier-pigeon".to_string())
        });
        assert_eq!(resolved.provider, Provider::Gemini);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let config = LingoConfig {
            general: GeneralConfig {
                deck_size: Some(0),
                feedback_delay_ms: Some(60_000),
                generation_timeout_secs: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.deck_size, 1);
        assert_eq!(resolved.feedback_delay, Duration::from_millis(MAX_FEEDBACK_DELAY_MS));
        assert_eq!(resolved.generation_timeout, Duration::from_secs(1));

        assert_eq!(clamp_deck_size(Some(500)), MAX_DECK_SIZE);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_provider = "openrouter"
default_model = "google/gemini-2.5-flash"
default_topic = "business-professional"
default_difficulty = "expert"
deck_size = 12

[gemini]
api_key = "gm-test"

[openrouter]
api_key = "sk-test-123"

[lmstudio]
base_url = "http://192.168.1.100:1234/v1"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.default_provider, Some(Provider::OpenRouter));
        assert_eq!(
            config.general.default_topic,
            Some(Topic::BusinessProfessional)
        );
        assert_eq!(config.general.default_difficulty, Some(Difficulty::Expert));
        assert_eq!(config.general.deck_size, Some(12));
        assert_eq!(config.gemini.api_key.as_deref(), Some("gm-test"));
        assert_eq!(config.openrouter.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(
            config.lmstudio.base_url.as_deref(),
            Some("http://192.168.1.100:1234/v1")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[general]
default_model = "my-model"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.default_model.as_deref(), Some("my-model"));
        assert!(config.general.default_provider.is_none());
        assert!(config.general.deck_size.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = parse_config("[general\ndeck_size = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let bad_topic = parse_config("[general]\ndefault_topic = \"astrophysics\"\n");
        assert!(matches!(bad_topic, Err(ConfigError::Parse(_))));
    }
}
