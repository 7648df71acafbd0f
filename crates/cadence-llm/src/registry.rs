//! Environment-driven model selection.
//!
//! A provider is *operational* when its credentials are present in the
//! environment. The registry lists operational providers in preference order
//! and resolves a requested model (or a default) to a concrete adapter.
//!
//! Recognized variables:
//! - `OPENAI_API_KEY` (plus optional `OPENAI_API_BASE`)
//! - `OLLAMA_BASE_URL` and `OLLAMA_MODEL`
//! - `GEMINI_API_KEY`
//! - `ANTHROPIC_API_KEY`

use tracing::{debug, info};

use crate::{error::LLMError, traits::LLMAdapter};

/// Supported model providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Ollama,
    Gemini,
    Anthropic,
}

impl Provider {
    /// Provider name as used in model specifiers (e.g., `"openai:gpt-4o"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::Gemini => "gemini",
            Self::Anthropic => "anthropic",
        }
    }
}

/// An operational provider and the models it serves, in preference order.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// The provider.
    pub provider: Provider,
    /// Known models, first is the provider default.
    pub models: Vec<String>,
}

/// Registry of operational providers.
pub struct ModelRegistry {
    operational: Vec<ProviderConfig>,
}

impl ModelRegistry {
    /// Build the registry from the process environment.
    ///
    /// Credentials are read once here; adapters constructed later reuse the
    /// same variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut operational = Vec::new();

        if env_set("OPENAI_API_KEY") {
            operational.push(ProviderConfig {
                provider: Provider::OpenAi,
                models: vec!["gpt-4o-mini".into(), "gpt-4o".into()],
            });
        }

        if env_set("OLLAMA_BASE_URL") {
            if let Ok(model) = std::env::var("OLLAMA_MODEL") {
                if !model.is_empty() {
                    operational.push(ProviderConfig {
                        provider: Provider::Ollama,
                        models: vec![model],
                    });
                }
            }
        }

        if env_set("GEMINI_API_KEY") {
            operational.push(ProviderConfig {
                provider: Provider::Gemini,
                models: vec!["gemini-1.5-pro-latest".into()],
            });
        }

        if env_set("ANTHROPIC_API_KEY") {
            operational.push(ProviderConfig {
                provider: Provider::Anthropic,
                models: vec![
                    "claude-3-sonnet-20240229".into(),
                    "claude-3-opus-20240229".into(),
                ],
            });
        }

        debug!(
            providers = operational.len(),
            "Built model registry from environment"
        );

        Self { operational }
    }

    /// Build a registry from an explicit provider list (used in tests).
    #[must_use]
    pub fn with_providers(operational: Vec<ProviderConfig>) -> Self {
        Self { operational }
    }

    /// Operational providers in preference order.
    #[must_use]
    pub fn operational(&self) -> &[ProviderConfig] {
        &self.operational
    }

    /// Resolve a requested model specifier to a provider and model name.
    ///
    /// `requested` may be a bare model (`"gpt-4o"`), a provider
    /// (`"anthropic"`), or a qualified specifier (`"ollama:mistral:v0.3"`).
    /// `None` prefers OpenAI `gpt-4o-mini`, falling back to the first
    /// operational provider's default model.
    ///
    /// # Errors
    ///
    /// Returns [`LLMError::NoOperationalProvider`] when no credentials are
    /// configured.
    pub fn resolve(&self, requested: Option<&str>) -> Result<(Provider, String), LLMError> {
        let first = self
            .operational
            .first()
            .ok_or(LLMError::NoOperationalProvider)?;

        let Some(spec) = requested else {
            // Default to OpenAI's gpt-4o-mini if available.
            let config = self
                .operational
                .iter()
                .find(|c| c.provider == Provider::OpenAi && c.models.iter().any(|m| m == "gpt-4o-mini"))
                .unwrap_or(first);
            let model = if config.provider == Provider::OpenAi {
                "gpt-4o-mini".to_string()
            } else {
                config.models[0].clone()
            };
            return Ok((config.provider, model));
        };

        let (prefix, rest) = match spec.split_once(':') {
            Some((p, r)) => (p, Some(r)),
            None => (spec, None),
        };

        // Qualified specifier or bare provider name.
        if let Some(config) = self.operational.iter().find(|c| c.provider.as_str() == prefix) {
            let model = rest.map_or_else(|| config.models[0].clone(), ToString::to_string);
            return Ok((config.provider, model));
        }

        // Bare model name known to an operational provider.
        if let Some(config) = self
            .operational
            .iter()
            .find(|c| c.models.iter().any(|m| m == spec))
        {
            return Ok((config.provider, spec.to_string()));
        }

        // Unknown specifier: fall back to the first operational provider,
        // passing the name through as the model.
        Ok((first.provider, spec.to_string()))
    }

    /// Resolve and construct an adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is operational or the resolved
    /// provider's support is compiled out.
    pub fn select(&self, requested: Option<&str>) -> Result<Box<dyn LLMAdapter>, LLMError> {
        let (provider, model) = self.resolve(requested)?;
        info!(provider = provider.as_str(), model = %model, "Selected model");
        build_adapter(provider, &model)
    }
}

fn env_set(name: &str) -> bool {
    std::env::var(name).map(|v| !v.is_empty()).unwrap_or(false)
}

fn env_required(name: &str) -> Result<String, LLMError> {
    std::env::var(name)
        .map_err(|_| LLMError::ConfigError(format!("{name} is not set")))
        .and_then(|v| {
            if v.is_empty() {
                Err(LLMError::ConfigError(format!("{name} is empty")))
            } else {
                Ok(v)
            }
        })
}

fn build_adapter(provider: Provider, model: &str) -> Result<Box<dyn LLMAdapter>, LLMError> {
    match provider {
        #[cfg(feature = "openai")]
        Provider::OpenAi => {
            let api_key = env_required("OPENAI_API_KEY")?;
            let adapter = match std::env::var("OPENAI_API_BASE") {
                Ok(base) if !base.is_empty() => {
                    crate::openai::OpenAIAdapter::with_api_base(api_key, base, model)
                }
                _ => crate::openai::OpenAIAdapter::new(api_key, model),
            };
            Ok(Box::new(adapter.with_json_response()))
        }
        #[cfg(feature = "ollama")]
        Provider::Ollama => {
            let base_url = env_required("OLLAMA_BASE_URL")?;
            Ok(Box::new(
                crate::ollama::OllamaAdapter::new(model).with_base_url(base_url),
            ))
        }
        #[cfg(feature = "gemini")]
        Provider::Gemini => {
            let api_key = env_required("GEMINI_API_KEY")?;
            Ok(Box::new(crate::gemini::GeminiAdapter::new(api_key, model)))
        }
        #[cfg(feature = "anthropic")]
        Provider::Anthropic => {
            let api_key = env_required("ANTHROPIC_API_KEY")?;
            Ok(Box::new(crate::anthropic::AnthropicAdapter::new(
                api_key, model,
            )))
        }
        #[allow(unreachable_patterns)]
        other => Err(LLMError::ConfigError(format!(
            "support for provider {} is not compiled in",
            other.as_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(providers: &[(Provider, &[&str])]) -> ModelRegistry {
        ModelRegistry::with_providers(
            providers
                .iter()
                .map(|(p, models)| ProviderConfig {
                    provider: *p,
                    models: models.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_registry_is_an_error() {
        let registry = ModelRegistry::with_providers(vec![]);
        assert!(matches!(
            registry.resolve(None),
            Err(LLMError::NoOperationalProvider)
        ));
    }

    #[test]
    fn test_default_prefers_gpt_4o_mini() {
        let registry = registry(&[
            (Provider::Anthropic, &["claude-3-sonnet-20240229"]),
            (Provider::OpenAi, &["gpt-4o-mini", "gpt-4o"]),
        ]);

        let (provider, model) = registry.resolve(None).unwrap();
        assert_eq!(provider, Provider::OpenAi);
        assert_eq!(model, "gpt-4o-mini");
    }

    #[test]
    fn test_default_falls_back_to_first_provider() {
        let registry = registry(&[(Provider::Gemini, &["gemini-1.5-pro-latest"])]);

        let (provider, model) = registry.resolve(None).unwrap();
        assert_eq!(provider, Provider::Gemini);
        assert_eq!(model, "gemini-1.5-pro-latest");
    }

    #[test]
    fn test_resolve_bare_model() {
        let registry = registry(&[
            (Provider::OpenAi, &["gpt-4o-mini", "gpt-4o"]),
            (Provider::Anthropic, &["claude-3-opus-20240229"]),
        ]);

        let (provider, model) = registry.resolve(Some("claude-3-opus-20240229")).unwrap();
        assert_eq!(provider, Provider::Anthropic);
        assert_eq!(model, "claude-3-opus-20240229");
    }

    #[test]
    fn test_resolve_qualified_specifier() {
        let registry = registry(&[(Provider::Ollama, &["mistral:v0.3"])]);

        let (provider, model) = registry.resolve(Some("ollama:mistral:v0.3")).unwrap();
        assert_eq!(provider, Provider::Ollama);
        assert_eq!(model, "mistral:v0.3");
    }

    #[test]
    fn test_resolve_bare_provider_uses_default_model() {
        let registry = registry(&[
            (Provider::OpenAi, &["gpt-4o-mini"]),
            (Provider::Anthropic, &["claude-3-sonnet-20240229"]),
        ]);

        let (provider, model) = registry.resolve(Some("anthropic")).unwrap();
        assert_eq!(provider, Provider::Anthropic);
        assert_eq!(model, "claude-3-sonnet-20240229");
    }
}
