//! Agent Brain - prompt assembly over the LLM router
//!
//! Every agent talks to the generation service through an `AgentBrain`.
//! When no model is configured the brain runs on the deterministic
//! provider, and callers that have a templated answer use it instead.

use hirewire_llm::{
    CompletionRequest, LLMError, LLMRouter, Message, ProviderKind, Result as LLMResult,
};

/// Brain mode - determines whether generated text comes from a real model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrainMode {
    /// No model configured; templated text is preferred
    #[default]
    Deterministic,
    /// A model is configured
    LLM,
}

/// Generation parameters shared by every prompt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 8000,
        }
    }
}

/// The agent's brain - turns prompts into text
#[derive(Debug, Clone)]
pub struct AgentBrain {
    llm: LLMRouter,
    config: GenerationConfig,
    mode: BrainMode,
}

impl AgentBrain {
    /// Create a deterministic brain (no LLM)
    pub fn deterministic() -> Self {
        Self::with_llm(LLMRouter::deterministic())
    }

    /// Create a brain over a router
    pub fn with_llm(llm: LLMRouter) -> Self {
        let mode = match llm.kind() {
            ProviderKind::Deterministic => BrainMode::Deterministic,
            _ => BrainMode::LLM,
        };
        Self {
            llm,
            config: GenerationConfig::default(),
            mode,
        }
    }

    /// Create from environment
    pub fn from_env() -> Self {
        Self::with_llm(LLMRouter::from_env())
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the current mode
    pub fn mode(&self) -> BrainMode {
        self.mode
    }

    pub fn config(&self) -> GenerationConfig {
        self.config
    }

    /// Get which provider is being used
    pub fn provider_kind(&self) -> ProviderKind {
        self.llm.kind()
    }

    /// Generate text for `user`, with optional extra context placed ahead of it
    ///
    /// Blank output is an error: callers rely on getting real text back.
    pub async fn generate(
        &self,
        system: &str,
        context: Option<&str>,
        user: &str,
    ) -> LLMResult<String> {
        let prompt = match context {
            Some(context) => format!(
                "Additional Context:\n{}\n\nUser Request:\n{}",
                context, user
            ),
            None => user.to_string(),
        };

        let request = CompletionRequest::new(vec![Message::user(prompt)])
            .with_system(system)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        let response = self.llm.complete(request).await?;
        let content = response.content.trim();

        if content.is_empty() {
            return Err(LLMError::EmptyResponse {
                provider: self.llm.provider().name().to_string(),
            });
        }

        Ok(content.to_string())
    }
}

impl Default for AgentBrain {
    fn default() -> Self {
        Self::deterministic()
    }
}
