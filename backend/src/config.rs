use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Completion API settings (OpenAI-compatible `chat/completions`)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL without the `/chat/completions` suffix
    pub api_base: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given TOML file, or the first default location found
    /// 2. Load `.env` into the process environment (if present)
    /// 3. Override with environment variables
    /// 4. Validate the final configuration
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = match explicit_path {
            Some(path) => Self::from_toml(path)?,
            None => match Self::find_config_file() {
                Some(path) => Self::from_toml(Path::new(&path))?,
                None => {
                    tracing::warn!("Configuration file not found, using defaults");
                    Config::default()
                },
            },
        };

        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!("Loaded environment from {}", path.display());
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT / PORT: Server port (default: 3000, PORT wins)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,replypilot=debug")
    /// - APP_LOG_FILE: Log file path
    /// - OPENAI_API_KEY / APP_LLM_API_KEY: Completion API credential
    /// - APP_LLM_API_BASE: Completion API base URL
    /// - APP_LLM_MODEL: Model identifier
    /// - APP_LLM_TEMPERATURE: Sampling temperature
    /// - APP_LLM_MAX_TOKENS: Max output tokens
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        for key in ["APP_SERVER_PORT", "PORT"] {
            match lookup(key).map(|v| v.trim().parse::<u16>()) {
                Some(Ok(port)) => {
                    self.server.port = port;
                    tracing::info!("Override server.port from {}: {}", key, self.server.port);
                },
                Some(Err(e)) => {
                    tracing::warn!("Invalid {}: {} (keep {})", key, e, self.server.port)
                },
                None => {},
            }
        }

        if let Some(level) = lookup("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Some(file) = lookup("APP_LOG_FILE") {
            self.logging.file = if file.trim().is_empty() { None } else { Some(file) };
            tracing::info!("Override logging.file from env: {:?}", self.logging.file);
        }

        for key in ["APP_LLM_API_KEY", "OPENAI_API_KEY"] {
            if let Some(key_value) = lookup(key) {
                self.llm.api_key = key_value;
                tracing::info!("Override llm.api_key from {}", key);
            }
        }

        if let Some(base) = lookup("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Some(model) = lookup("APP_LLM_MODEL") {
            self.llm.model = model;
            tracing::info!("Override llm.model from env: {}", self.llm.model);
        }

        if let Some(temperature) = lookup("APP_LLM_TEMPERATURE") {
            match temperature.trim().parse() {
                Ok(val) => {
                    self.llm.temperature = val;
                    tracing::info!("Override llm.temperature from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_TEMPERATURE '{}': {} (keep {})",
                    temperature,
                    e,
                    self.llm.temperature
                ),
            }
        }

        if let Some(max_tokens) = lookup("APP_LLM_MAX_TOKENS") {
            match max_tokens.trim().parse() {
                Ok(val) => {
                    self.llm.max_tokens = val;
                    tracing::info!("Override llm.max_tokens from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_MAX_TOKENS '{}': {} (keep {})",
                    max_tokens,
                    e,
                    self.llm.max_tokens
                ),
            }
        }
    }

    /// Non-fatal problems to report once logging is up
    pub fn startup_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.llm.api_key.trim().is_empty() {
            warnings.push("⚠️  WARNING: No completion API key configured!");
            warnings.push("⚠️  Please set OPENAI_API_KEY or llm.api_key in config.toml");
            warnings.push("⚠️  Reply generation will fail until a key is provided.");
        }
        warnings
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.llm.api_base.trim().is_empty() {
            anyhow::bail!("llm.api_base cannot be empty");
        }
        if self.llm.model.trim().is_empty() {
            anyhow::bail!("llm.model cannot be empty");
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            anyhow::bail!("llm.temperature must be within 0.0..=2.0");
        }
        if self.llm.max_tokens == 0 {
            anyhow::bail!("llm.max_tokens must be > 0");
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths = ["conf/config.toml", "config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &Path) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn from_toml_str(content: &str) -> Result<Self, anyhow::Error> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,replypilot=debug".to_string(),
            file: Some("logs/replypilot.log".to_string()),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}
