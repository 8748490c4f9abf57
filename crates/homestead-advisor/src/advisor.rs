//! The willow: an [`AdvisorySource`] backed by an LLM.

use std::sync::Arc;

use futures::future::BoxFuture;
use homestead_core::{AdvisoryContext, AdvisoryError, AdvisorySource, StubAdvisor};
use tracing::{debug, info};

use crate::config::AdvisorConfig;
use crate::error::AdvisorError;
use crate::llm::LlmBackend;
use crate::prompt::PromptEngine;

/// Advice rendered from a prompt template and answered by an LLM.
#[derive(Debug, Clone)]
pub struct LlmAdvisor {
    backend: Arc<LlmBackend>,
    prompts: Arc<PromptEngine>,
}

impl LlmAdvisor {
    /// Build the advisor from configuration.
    pub fn new(config: &AdvisorConfig) -> Result<Self, AdvisorError> {
        let prompts = match &config.templates_dir {
            Some(dir) => PromptEngine::from_dir(dir, &config.language)?,
            None => PromptEngine::builtin(&config.language)?,
        };
        Ok(Self::with_parts(LlmBackend::new(&config.backend), prompts))
    }

    /// Assemble from an existing backend and prompt engine.
    pub fn with_parts(backend: LlmBackend, prompts: PromptEngine) -> Self {
        Self {
            backend: Arc::new(backend),
            prompts: Arc::new(prompts),
        }
    }

    async fn ask(
        backend: Arc<LlmBackend>,
        prompts: Arc<PromptEngine>,
        context: AdvisoryContext,
    ) -> Result<String, AdvisorError> {
        let prompt = prompts.render(&context)?;
        debug!(backend = backend.name(), "Asking the willow");
        let text = backend.complete(&prompt).await?;
        Ok(text.trim().to_owned())
    }
}

impl AdvisorySource for LlmAdvisor {
    fn advise(&self, context: AdvisoryContext) -> BoxFuture<'static, Result<String, AdvisoryError>> {
        let backend = Arc::clone(&self.backend);
        let prompts = Arc::clone(&self.prompts);
        Box::pin(async move {
            let text = Self::ask(backend, prompts, context)
                .await
                .map_err(|e| AdvisoryError::Backend {
                    message: e.to_string(),
                })?;
            if text.is_empty() {
                return Err(AdvisoryError::Backend {
                    message: "empty advice".to_owned(),
                });
            }
            Ok(text)
        })
    }
}

/// Pick the advisory source for this run.
///
/// A configured backend yields an [`LlmAdvisor`]; no configuration yields
/// the [`StubAdvisor`].
pub fn build_advisor(
    config: Option<&AdvisorConfig>,
) -> Result<Arc<dyn AdvisorySource>, AdvisorError> {
    match config {
        Some(config) => {
            let advisor = LlmAdvisor::new(config)?;
            info!(
                backend = advisor.backend.name(),
                model = %config.backend.model,
                "LLM advisor configured"
            );
            Ok(Arc::new(advisor))
        }
        None => {
            info!("No advisor backend configured, using the stub advisor");
            Ok(Arc::new(StubAdvisor::new()))
        }
    }
}
