//! LLM Provider implementations

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Trait for LLM providers
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &'static str;

    /// Get the provider kind
    fn kind(&self) -> ProviderKind;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Complete a conversation
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}

fn network_error(e: reqwest::Error) -> LLMError {
    LLMError::NetworkError {
        message: e.to_string(),
    }
}

fn invalid_response(e: reqwest::Error) -> LLMError {
    LLMError::InvalidResponse {
        message: e.to_string(),
    }
}

async fn request_failed(response: reqwest::Response) -> LLMError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    LLMError::RequestFailed {
        message: format!("HTTP {}: {}", status, body),
    }
}

// ============================================================================
// Ollama Provider (Local)
// ============================================================================

/// Configuration for Ollama provider
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("HIREWIRE_OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: std::env::var("HIREWIRE_OLLAMA_MODEL")
                .unwrap_or_else(|_| "llama3.1:8b".to_string()),
        }
    }
}

/// Ollama local LLM provider
pub struct OllamaProvider {
    config: OllamaConfig,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(OllamaConfig::default())
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl LLMProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);
        self.client.get(&url).send().await.is_ok()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        // Ollama's generate endpoint takes a single prompt
        let prompt = request
            .messages
            .iter()
            .map(|m| match m.role {
                MessageRole::User => format!("User: {}", m.content),
                MessageRole::Assistant => format!("Assistant: {}", m.content),
                MessageRole::System => format!("System: {}", m.content),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n\nAssistant:";

        let ollama_request = OllamaRequest {
            model: request.model.unwrap_or_else(|| self.config.model.clone()),
            prompt,
            stream: false,
            system: request.system,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        let url = format!("{}/api/generate", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .json(&ollama_request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }

        let ollama_response: OllamaResponse = response.json().await.map_err(invalid_response)?;

        Ok(CompletionResponse {
            content: ollama_response.response.trim().to_string(),
            usage: TokenUsage::default(),
            model: Some(self.config.model.clone()),
        })
    }
}

// ============================================================================
// OpenAI Chat Completions wire format (shared by OpenAI and compatibles)
// ============================================================================

#[derive(Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct OpenAIChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Deserialize)]
struct OpenAIChatChoice {
    message: OpenAIChatMessage,
}

#[derive(Deserialize, Default)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

fn openai_chat_request(request: CompletionRequest, default_model: &str) -> OpenAIChatRequest {
    let mut messages: Vec<OpenAIChatMessage> = vec![];

    if let Some(system) = request.system {
        messages.push(OpenAIChatMessage {
            role: "system".to_string(),
            content: system,
        });
    }

    for msg in request.messages {
        messages.push(OpenAIChatMessage {
            role: match msg.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            }
            .to_string(),
            content: msg.content,
        });
    }

    OpenAIChatRequest {
        model: request.model.unwrap_or_else(|| default_model.to_string()),
        messages,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
        stream: false,
    }
}

async fn openai_chat_response(
    response: reqwest::Response,
    model: &str,
) -> Result<CompletionResponse> {
    if !response.status().is_success() {
        return Err(request_failed(response).await);
    }

    let chat_response: OpenAIChatResponse = response.json().await.map_err(invalid_response)?;

    let content = chat_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .unwrap_or_default();

    let usage = chat_response.usage.unwrap_or_default();

    Ok(CompletionResponse {
        content,
        usage: TokenUsage {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        },
        model: Some(model.to_string()),
    })
}

// ============================================================================
// OpenAI-Compatible Provider
// ============================================================================

/// Configuration for OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAICompatConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for OpenAICompatConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("HIREWIRE_OPENAI_COMPAT_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/v1".to_string()),
            api_key: std::env::var("HIREWIRE_OPENAI_COMPAT_API_KEY").ok(),
            model: std::env::var("HIREWIRE_OPENAI_COMPAT_MODEL")
                .unwrap_or_else(|_| "default".to_string()),
        }
    }
}

/// OpenAI-compatible API provider (vLLM, llama.cpp, etc.)
pub struct OpenAICompatProvider {
    config: OpenAICompatConfig,
    client: reqwest::Client,
}

impl OpenAICompatProvider {
    pub fn new(config: OpenAICompatConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(OpenAICompatConfig::default())
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatProvider {
    fn name(&self) -> &'static str {
        "OpenAI-Compatible"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAICompat
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.config.base_url);
        let mut req = self.client.get(&url);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }
        req.send().await.is_ok()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = openai_chat_request(request, &self.config.model);

        let url = format!("{}/chat/completions", self.config.base_url);
        let mut req = self.client.post(&url).json(&chat_request);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(network_error)?;
        openai_chat_response(response, &chat_request.model).await
    }
}

// ============================================================================
// OpenAI Provider
// ============================================================================

/// Configuration for OpenAI provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
}

impl OpenAIConfig {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: std::env::var("OPENAI_API_KEY").ok()?,
            model: std::env::var("HIREWIRE_OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        })
    }
}

/// OpenAI API provider
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(config: OpenAIConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Option<Self> {
        Some(Self::new(OpenAIConfig::from_env()?))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    async fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let chat_request = openai_chat_request(request, &self.config.model);

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.config.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(network_error)?;

        openai_chat_response(response, &chat_request.model).await
    }
}

// ============================================================================
// Anthropic Provider
// ============================================================================

/// Configuration for Anthropic provider
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: String,
}

impl AnthropicConfig {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").ok()?,
            model: std::env::var("HIREWIRE_ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-3-5-sonnet-20241022".to_string()),
        })
    }
}

/// Anthropic Claude API provider
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Option<Self> {
        Some(Self::new(AnthropicConfig::from_env()?))
    }
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    usage: AnthropicUsage,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "Anthropic"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    async fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let messages = request
            .messages
            .into_iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                    // System prompt travels in its own field
                    MessageRole::System => return None,
                };
                Some(AnthropicMessage {
                    role: role.to_string(),
                    content: msg.content,
                })
            })
            .collect();

        let anthropic_request = AnthropicRequest {
            model: request.model.unwrap_or_else(|| self.config.model.clone()),
            max_tokens: request.max_tokens.unwrap_or(4096),
            system: request.system,
            temperature: request.temperature,
            messages,
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }

        let anthropic_response: AnthropicResponse =
            response.json().await.map_err(invalid_response)?;

        let content = anthropic_response
            .content
            .into_iter()
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse {
            content,
            usage: TokenUsage {
                prompt_tokens: anthropic_response.usage.input_tokens,
                completion_tokens: anthropic_response.usage.output_tokens,
                total_tokens: anthropic_response.usage.input_tokens
                    + anthropic_response.usage.output_tokens,
            },
            model: Some(anthropic_request.model),
        })
    }
}

// ============================================================================
// Gemini Provider
// ============================================================================

/// Configuration for Google Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GOOGLE_GENERATIVE_AI_API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())?;

        Some(Self {
            api_key,
            model: std::env::var("HIREWIRE_GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        })
    }
}

/// Google Gemini `generateContent` provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Option<Self> {
        Some(Self::new(GeminiConfig::from_env()?))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let contents = request
            .messages
            .into_iter()
            .map(|msg| GeminiContent {
                role: Some(
                    match msg.role {
                        MessageRole::Assistant => "model",
                        MessageRole::User | MessageRole::System => "user",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart { text: msg.content }],
            })
            .collect();

        let gemini_request = GeminiRequest {
            system_instruction: request.system.map(|text| GeminiContent {
                role: None,
                parts: vec![GeminiPart { text }],
            }),
            contents,
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        let model = request.model.unwrap_or_else(|| self.config.model.clone());
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&gemini_request)
            .send()
            .await
            .map_err(network_error)?;

        if !response.status().is_success() {
            return Err(request_failed(response).await);
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(invalid_response)?;

        let content = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| LLMError::EmptyResponse {
                provider: self.name().to_string(),
            })?;

        let usage = gemini_response.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            content,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
            model: Some(model),
        })
    }
}

// ============================================================================
// Deterministic Provider (Fallback)
// ============================================================================

/// Deterministic fallback when no LLM is available
///
/// Produces a templated draft that quotes the request, so every caller gets
/// non-empty text without a network round trip.
pub struct DeterministicProvider;

impl DeterministicProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeterministicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMProvider for DeterministicProvider {
    fn name(&self) -> &'static str {
        "Deterministic"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Deterministic
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let subject = request
            .last_user_message()
            .and_then(|m| m.lines().rev().map(str::trim).find(|l| !l.is_empty()))
            .unwrap_or("the request");

        Ok(CompletionResponse {
            content: format!(
                "[deterministic draft] No language model is configured. Outline for: {}",
                subject
            ),
            usage: TokenUsage::default(),
            model: Some("deterministic".to_string()),
        })
    }
}
