//! Server Configuration
//!
//! Layered configuration for the HireWire server: an optional config file,
//! `config/default` and `config/local`, then `HIREWIRE__*` environment
//! variables. CLI arguments are applied on top in `main`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use hirewire_agents::{AggregatorConfig, CoordinatorConfig, GenerationConfig};
use hirewire_types::TokenAmount;

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Text-generation configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Specialist directory and billing
    #[serde(default)]
    pub marketplace: MarketplaceSettings,
}

/// Server binding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// How long in-flight requests may drain after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout(),
        }
    }
}

impl ServerSettings {
    /// Get the shutdown timeout duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable request tracing
    #[serde(default = "default_true")]
    pub enable_tracing: bool,

    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: default_cors_origins(),
            enable_tracing: true,
            max_body_size: default_max_body_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Text-generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider name; unset defers to `HIREWIRE_LLM_PROVIDER`
    #[serde(default)]
    pub provider: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl LlmSettings {
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Marketplace settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceSettings {
    /// Base URL the seeded specialist endpoints hang off
    #[serde(default = "default_specialist_base_url")]
    pub specialist_base_url: String,

    /// Currency specialists are priced in
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Invoice amount when no specialist reports a positive one
    #[serde(default = "default_fallback_amount")]
    pub fallback_amount: String,

    /// Report `failed` when no hired specialist delivers
    #[serde(default = "default_true")]
    pub fail_when_no_output: bool,

    /// Timeout for calls to specialist endpoints
    #[serde(default = "default_network_timeout")]
    pub network_timeout_secs: u64,
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            specialist_base_url: default_specialist_base_url(),
            currency: default_currency(),
            fallback_amount: default_fallback_amount(),
            fail_when_no_output: true,
            network_timeout_secs: default_network_timeout(),
        }
    }
}

impl MarketplaceSettings {
    /// Coordinator configuration; the fallback amount must be a positive decimal
    pub fn coordinator(&self) -> anyhow::Result<CoordinatorConfig> {
        let fallback_amount: TokenAmount = self.fallback_amount.parse().map_err(|e| {
            anyhow::anyhow!("invalid marketplace.fallback_amount '{}': {}", self.fallback_amount, e)
        })?;
        anyhow::ensure!(
            fallback_amount.is_positive(),
            "marketplace.fallback_amount must be positive, got '{}'",
            self.fallback_amount
        );

        Ok(CoordinatorConfig {
            aggregator: AggregatorConfig {
                currency: self.currency.clone(),
                fallback_amount,
                fail_when_no_output: self.fail_when_no_output,
            },
            network_timeout: Duration::from_secs(self.network_timeout_secs),
        })
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    8000
}

fn default_specialist_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_currency() -> String {
    "ETH".to_string()
}

fn default_fallback_amount() -> String {
    "0.001".to_string()
}

fn default_network_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl ServerConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // Environment variables with HIREWIRE__ prefix
        builder = builder.add_source(
            config::Environment::with_prefix("HIREWIRE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let server_config: ServerConfig = config.try_deserialize()?;

        Ok(server_config)
    }
}
