use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_MAX_LENGTH: usize = 2500;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Environment variable '{0}' is not set")]
    MissingEnvVar(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub directories: DirectoriesConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(alias = "xai")]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoriesConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Which wire protocol the summarization endpoint speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// xAI Grok through its OpenAI-compatible chat completions API
    #[default]
    Xai,
    OpenAi,
    Anthropic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Only sent to providers that require an explicit output budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("app.log"))
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a YAML file, resolving `${VAR}` placeholders
    /// against the environment (after trying the usual `.env` locations).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::try_load_dotenv();

        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        let resolved = resolve_env_placeholders(raw)?;
        let config: Config = serde_yaml::from_value(resolved)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.summary.max_length == 0 {
            return Err(ConfigError::Invalid(
                "summary.max_length must be greater than zero".into(),
            ));
        }
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.api_key is empty".into()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model is empty".into()));
        }
        Ok(())
    }

    fn try_load_dotenv() {
        // Try locations in order of preference:

        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/summarize-html/.env (standard config location)
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("summarize-html").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env (home directory)
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }

        // If none found, that's okay - environment variables might be set system-wide
    }
}

/// Replace every string value of the exact form `${NAME}` with the value of
/// the environment variable `NAME`.
fn resolve_env_placeholders(value: serde_yaml::Value) -> Result<serde_yaml::Value, ConfigError> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            let mut resolved = serde_yaml::Mapping::with_capacity(map.len());
            for (key, value) in map {
                resolved.insert(key, resolve_env_placeholders(value)?);
            }
            Ok(Value::Mapping(resolved))
        }
        Value::Sequence(items) => items
            .into_iter()
            .map(resolve_env_placeholders)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::String(s) => match placeholder_name(&s) {
            Some(name) => match env::var(name) {
                Ok(value) if !value.is_empty() => Ok(Value::String(value)),
                _ => Err(ConfigError::MissingEnvVar(name.to_string())),
            },
            None => Ok(Value::String(s)),
        },
        other => Ok(other),
    }
}

fn placeholder_name(s: &str) -> Option<&str> {
    s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}'))
}
