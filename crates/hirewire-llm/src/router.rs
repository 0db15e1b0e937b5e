//! LLM Router - Selects and manages LLM providers

use std::sync::Arc;

use crate::providers::*;
use crate::types::*;

/// The LLM Router selects and manages providers based on configuration
#[derive(Clone)]
pub struct LLMRouter {
    provider: Arc<dyn LLMProvider>,
    kind: ProviderKind,
}

impl LLMRouter {
    /// Create a router with a specific provider
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        let kind = provider.kind();
        Self { provider, kind }
    }

    /// Create a router from environment variables
    ///
    /// Reads `HIREWIRE_LLM_PROVIDER` to select the provider:
    /// - `gemini` (default): Google Gemini API
    /// - `ollama`: Local Ollama instance
    /// - `openai_compat`: OpenAI-compatible local server
    /// - `openai`: OpenAI API
    /// - `anthropic`: Anthropic Claude API
    /// - `deterministic`: No LLM, deterministic fallback
    pub fn from_env() -> Self {
        // Try to load .env file (ignore errors)
        let _ = dotenvy::dotenv();

        let provider_name =
            std::env::var("HIREWIRE_LLM_PROVIDER").unwrap_or_else(|_| "gemini".to_string());

        Self::from_name(&provider_name)
    }

    /// Create a router from a provider name, unknown names fall back to Gemini
    pub fn from_name(name: &str) -> Self {
        let kind = ProviderKind::from_str(name).unwrap_or_else(|| {
            tracing::warn!(provider = %name, "Unknown LLM provider, using gemini");
            ProviderKind::Gemini
        });

        Self::from_kind(kind)
    }

    /// Create a router for a specific provider kind
    ///
    /// Cloud providers without an API key degrade to the deterministic provider.
    pub fn from_kind(kind: ProviderKind) -> Self {
        let provider: Arc<dyn LLMProvider> = match kind {
            ProviderKind::Ollama => Arc::new(OllamaProvider::from_env()),
            ProviderKind::OpenAICompat => Arc::new(OpenAICompatProvider::from_env()),
            ProviderKind::OpenAI => match OpenAIProvider::from_env() {
                Some(p) => Arc::new(p),
                None => {
                    tracing::warn!("OpenAI API key not found, using deterministic fallback");
                    Arc::new(DeterministicProvider::new())
                }
            },
            ProviderKind::Anthropic => match AnthropicProvider::from_env() {
                Some(p) => Arc::new(p),
                None => {
                    tracing::warn!("Anthropic API key not found, using deterministic fallback");
                    Arc::new(DeterministicProvider::new())
                }
            },
            ProviderKind::Gemini => match GeminiProvider::from_env() {
                Some(p) => Arc::new(p),
                None => {
                    tracing::warn!("Gemini API key not found, using deterministic fallback");
                    Arc::new(DeterministicProvider::new())
                }
            },
            ProviderKind::Deterministic => Arc::new(DeterministicProvider::new()),
        };

        let kind = provider.kind();
        Self { provider, kind }
    }

    /// A router that never leaves the process
    pub fn deterministic() -> Self {
        Self::new(Arc::new(DeterministicProvider::new()))
    }

    /// Get the current provider
    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Get the provider kind
    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Check if the provider is available
    pub async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }

    /// Complete a request using the current provider
    pub async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.provider.complete(request).await
    }
}

impl Default for LLMRouter {
    fn default() -> Self {
        Self::from_env()
    }
}

impl std::fmt::Debug for LLMRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LLMRouter")
            .field("provider", &self.provider.name())
            .field("kind", &self.kind)
            .finish()
    }
}
