//! Advisor configuration loaded from the environment.
//!
//! The advisor is optional. When `ADVISOR_BACKEND` is unset the engine
//! falls back to the stub advisor; when it is set, the URL, key and model
//! must be set too.

use std::path::PathBuf;

use crate::error::AdvisorError;

/// Language used when `ADVISOR_LANGUAGE` is unset.
pub const DEFAULT_LANGUAGE: &str = "English";

/// Complete advisor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    /// LLM backend to call.
    pub backend: LlmBackendConfig,
    /// Directory with `system.j2` and `advice.j2` overriding the built-in
    /// templates.
    pub templates_dir: Option<PathBuf>,
    /// Language the willow answers in.
    pub language: String,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmBackendConfig {
    /// The backend type.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible API (works with `OpenAI`, `DeepSeek`, Ollama).
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl BackendType {
    /// Parse a backend name as written in `ADVISOR_BACKEND`.
    pub fn parse(name: &str) -> Result<Self, AdvisorError> {
        match name.trim().to_lowercase().as_str() {
            "openai" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(AdvisorError::Config {
                message: format!("unknown backend type: {other}"),
            }),
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ADVISOR_BACKEND` -- `openai`, `deepseek`, `ollama`, `anthropic`;
    ///   unset means no advisor
    /// - `ADVISOR_API_URL` -- API base URL
    /// - `ADVISOR_API_KEY` -- API key
    /// - `ADVISOR_MODEL` -- model name
    /// - `ADVISOR_TEMPLATES_DIR` -- optional template override directory
    /// - `ADVISOR_LANGUAGE` -- answer language (default `English`)
    pub fn from_env() -> Result<Option<Self>, AdvisorError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, AdvisorError> {
        let Some(backend) = lookup("ADVISOR_BACKEND").filter(|b| !b.trim().is_empty()) else {
            return Ok(None);
        };
        let required = |name: &str| {
            lookup(name).ok_or_else(|| AdvisorError::Config {
                message: format!("missing required env var {name}"),
            })
        };
        let backend = LlmBackendConfig {
            backend_type: BackendType::parse(&backend)?,
            api_url: required("ADVISOR_API_URL")?
                .trim_end_matches('/')
                .to_owned(),
            api_key: required("ADVISOR_API_KEY")?,
            model: required("ADVISOR_MODEL")?,
        };
        Ok(Some(Self {
            backend,
            templates_dir: lookup("ADVISOR_TEMPLATES_DIR").map(PathBuf::from),
            language: lookup("ADVISOR_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned()),
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn unset_backend_means_no_advisor() {
        assert_eq!(AdvisorConfig::from_lookup(lookup(&[])).unwrap(), None);
        assert_eq!(
            AdvisorConfig::from_lookup(lookup(&[("ADVISOR_BACKEND", " ")])).unwrap(),
            None
        );
    }

    #[test]
    fn full_config_loads() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("ADVISOR_BACKEND", "Claude"),
            ("ADVISOR_API_URL", "https://api.anthropic.com/v1/"),
            ("ADVISOR_API_KEY", "key"),
            ("ADVISOR_MODEL", "haiku"),
            ("ADVISOR_LANGUAGE", "Deutsch"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.backend.backend_type, BackendType::Anthropic);
        assert_eq!(config.backend.api_url, "https://api.anthropic.com/v1");
        assert_eq!(config.language, "Deutsch");
        assert_eq!(config.templates_dir, None);
    }

    #[test]
    fn partial_config_is_an_error() {
        let result = AdvisorConfig::from_lookup(lookup(&[
            ("ADVISOR_BACKEND", "openai"),
            ("ADVISOR_API_URL", "http://localhost:11434/v1"),
        ]));
        assert!(matches!(result, Err(AdvisorError::Config { .. })));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(BackendType::parse("carrier-pigeon").is_err());
        assert_eq!(BackendType::parse("ollama").unwrap(), BackendType::OpenAi);
    }
}
