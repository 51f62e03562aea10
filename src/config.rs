use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the API credential. Absence is a soft skip,
/// never an error.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

const DEFAULT_SYSTEM_PROMPT: &str = "\
You are to act as the author of a git commit message. The user message \
contains the list of staged files and the staged diff. Reply with a single \
commit message for those changes: a concise imperative title line, followed \
by a short body only when the change genuinely needs one.

Recent commit messages by the same author, for style reference:

$RECENT_COMMITS

Use present tense. Output only the raw commit message, nothing else.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}
fn default_max_tokens() -> u32 {
    120
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_diff_chars() -> usize {
    24_000
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_url: default_api_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_diff_chars: default_max_diff_chars(),
            request_timeout_secs: default_request_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// CDRAFT_ env var suffixes recognized as config overrides
const ENV_SUFFIXES: &[&str] = &[
    "MODEL",
    "API_URL",
    "MAX_TOKENS",
    "TEMPERATURE",
    "MAX_DIFF_CHARS",
    "REQUEST_TIMEOUT_SECS",
    "SYSTEM_PROMPT",
];

impl AppConfig {
    /// Load config with layered resolution: defaults → global TOML →
    /// repo-root .env → CDRAFT_ environment variables
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();

        // Layer 1: Global TOML
        if let Some(path) = global_config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let file_cfg: AppConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                cfg.merge_from(&file_cfg);
            }
        }

        // Layer 2: Local .env (in git repo root). dotenvy never clobbers
        // variables already present in the real environment, so layer 3
        // still wins.
        if let Ok(root) = crate::git::find_repo_root() {
            let env_path = PathBuf::from(&root).join(".env");
            if env_path.exists() {
                if let Err(err) = dotenvy::from_path(&env_path) {
                    eprintln!(
                        "{} failed to load {}: {err}",
                        "warning:".yellow().bold(),
                        env_path.display()
                    );
                }
            }
        }

        // Layer 3: Actual environment variables
        for suffix in ENV_SUFFIXES {
            let key = format!("CDRAFT_{suffix}");
            if let Ok(val) = std::env::var(&key) {
                cfg.set_field(suffix, &val);
            }
        }

        Ok(cfg)
    }

    fn merge_from(&mut self, other: &AppConfig) {
        if !other.model.is_empty() {
            self.model = other.model.clone();
        }
        if !other.api_url.is_empty() {
            self.api_url = other.api_url.clone();
        }
        if !other.system_prompt.is_empty() {
            self.system_prompt = other.system_prompt.clone();
        }
        self.max_tokens = other.max_tokens;
        self.temperature = other.temperature;
        self.max_diff_chars = other.max_diff_chars;
        self.request_timeout_secs = other.request_timeout_secs;
    }

    /// Set a field by its env suffix; unparsable numeric values keep the
    /// previous setting
    pub fn set_field(&mut self, suffix: &str, value: &str) {
        match suffix {
            "MODEL" => self.model = value.into(),
            "API_URL" => self.api_url = value.into(),
            "MAX_TOKENS" => {
                if let Ok(v) = value.trim().parse() {
                    self.max_tokens = v;
                }
            }
            "TEMPERATURE" => {
                if let Ok(v) = value.trim().parse() {
                    self.temperature = v;
                }
            }
            "MAX_DIFF_CHARS" => {
                if let Ok(v) = value.trim().parse() {
                    self.max_diff_chars = v;
                }
            }
            "REQUEST_TIMEOUT_SECS" => {
                if let Ok(v) = value.trim().parse() {
                    self.request_timeout_secs = v;
                }
            }
            "SYSTEM_PROMPT" => self.system_prompt = value.into(),
            _ => {}
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

/// Global config file path
pub fn global_config_path() -> Option<PathBuf> {
    if let Some(override_dir) = std::env::var_os("CDRAFT_CONFIG_HOME") {
        let override_path = PathBuf::from(override_dir);
        if !override_path.as_os_str().is_empty() {
            return Some(override_path.join("cdraft").join("config.toml"));
        }
    }
    dirs::config_dir().map(|d| d.join("cdraft").join("config.toml"))
}
