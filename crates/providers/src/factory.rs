//! Build a provider from application configuration.

use std::sync::Arc;

use tracing::info;

use tickerchat_config::AppConfig;
use tickerchat_core::error::ProviderError;
use tickerchat_core::Provider;

use crate::openai_compat::OpenAiCompatProvider;

/// Default base URL for a known provider name.
fn default_base_url(provider: &str) -> Option<&'static str> {
    match provider {
        "ollama" => Some("http://localhost:11434/v1"),
        "openai" => Some("https://api.openai.com/v1"),
        "openrouter" => Some("https://openrouter.ai/api/v1"),
        _ => None,
    }
}

/// Build the configured provider.
///
/// Any OpenAI-compatible backend works; the provider name selects a default
/// base URL, and `[providers.<name>]` in the config file can override it.
/// Ollama (the default) needs no API key.
pub fn build_from_config(config: &AppConfig) -> Result<Arc<dyn Provider>, ProviderError> {
    let name = config.default_provider.as_str();

    let base_url = config
        .provider_api_url(name)
        .or_else(|| default_base_url(name).map(String::from))
        .ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "Unknown provider '{name}': set [providers.{name}] api_url in the config file"
            ))
        })?;

    let api_key = config
        .provider_api_key(name)
        .unwrap_or_else(|| "ollama".into());

    if name != "ollama" && !config.has_api_key() && config.provider_api_key(name).is_none() {
        return Err(ProviderError::NotConfigured(format!(
            "Provider '{name}' requires an API key: set TICKERCHAT_API_KEY or api_key in the config file"
        )));
    }

    info!(provider = name, base_url = %base_url, "Building LLM provider");
    let provider = OpenAiCompatProvider::new(name, base_url, api_key)?;
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_ollama() {
        let config = AppConfig::default();
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn known_provider_urls() {
        assert_eq!(
            default_base_url("ollama"),
            Some("http://localhost:11434/v1")
        );
        assert!(default_base_url("openai").unwrap().contains("openai.com"));
        assert!(default_base_url("nonsense").is_none());
    }

    #[test]
    fn unknown_provider_without_url_fails() {
        let config = AppConfig {
            default_provider: "vllm".into(),
            api_key: Some("key".into()),
            ..AppConfig::default()
        };
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }

    #[test]
    fn custom_api_url_allows_any_provider() {
        let mut config = AppConfig {
            default_provider: "vllm".into(),
            api_key: Some("key".into()),
            ..AppConfig::default()
        };
        config.providers.insert(
            "vllm".into(),
            tickerchat_config::ProviderConfig {
                api_key: None,
                api_url: Some("http://localhost:8000/v1".into()),
                default_model: None,
            },
        );
        let provider = build_from_config(&config).unwrap();
        assert_eq!(provider.name(), "vllm");
    }

    #[test]
    fn non_ollama_provider_requires_api_key() {
        let config = AppConfig {
            default_provider: "openrouter".into(),
            api_key: None,
            ..AppConfig::default()
        };
        let err = build_from_config(&config).err().unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
