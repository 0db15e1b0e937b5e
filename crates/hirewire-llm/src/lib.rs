//! HireWire LLM - Unified text-generation provider abstraction
//!
//! The coordinating agent and the specialists consume text generation
//! through one prompt/response contract, whatever the backend:
//!
//! ## Local Providers (no API keys required)
//! - Ollama: `http://localhost:11434`
//! - OpenAI-compatible: vLLM, llama.cpp, etc.
//!
//! ## Cloud Providers
//! - Google (Gemini) - the default for the marketplace demo
//! - OpenAI (GPT)
//! - Anthropic (Claude)
//!
//! ## Deterministic Provider
//!
//! When no backend is configured the router degrades to a deterministic
//! provider that echoes a templated draft, so the marketplace stays usable
//! offline. Provider failures are returned as [`LLMError`]; callers decide
//! how to degrade.

pub mod providers;
pub mod router;
pub mod types;

pub use providers::*;
pub use router::*;
pub use types::*;
