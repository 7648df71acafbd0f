//! # cadence-llm
//!
//! LLM adapters for the Cadence content pipeline.
//!
//! Supports multiple providers:
//! - `OpenAI` (GPT-4o, GPT-4o mini)
//! - Ollama (local models)
//! - Anthropic (Claude Sonnet, Opus)
//! - Google Gemini
//!
//! Every agent in the pipeline talks to a model through [`LLMAdapter`] and
//! [`generate_object`], which constrains the reply to a declared JSON Schema
//! and deserializes it into a typed record.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cadence_llm::{generate_object, ModelRegistry};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Headline {
//!     title: String,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = ModelRegistry::from_env().select(None)?;
//!     let headline: Headline = generate_object(
//!         adapter.as_ref(),
//!         "You are a copywriter.",
//!         "Write a headline about Rust.",
//!     )
//!     .await?;
//!     println!("{}", headline.title);
//!     Ok(())
//! }
//! ```

mod error;
mod registry;
mod structured;
mod traits;

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "ollama")]
mod ollama;

#[cfg(feature = "anthropic")]
mod anthropic;

#[cfg(feature = "gemini")]
mod gemini;

pub use error::LLMError;
pub use registry::{ModelRegistry, Provider, ProviderConfig};
pub use structured::{extract_json, generate_object};
pub use traits::{FinishReason, LLMAdapter, LLMMessage, LLMResponse, Role, TokenUsage};

#[cfg(feature = "openai")]
pub use openai::OpenAIAdapter;

#[cfg(feature = "ollama")]
pub use ollama::OllamaAdapter;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicAdapter;

#[cfg(feature = "gemini")]
pub use gemini::GeminiAdapter;
