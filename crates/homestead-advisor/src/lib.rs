//! LLM-backed willow advisor for the Homestead farm simulation.
//!
//! Implements [`homestead_core::AdvisorySource`] over an OpenAI-compatible
//! or Anthropic API. The farm summary is rendered into a prompt with
//! `minijinja`; the model's reply becomes the day's advice.
//!
//! # Modules
//!
//! - [`advisor`] -- [`LlmAdvisor`] and advisor selection.
//! - [`config`] -- Environment configuration.
//! - [`error`] -- Error types.
//! - [`llm`] -- HTTP backends.
//! - [`prompt`] -- Template loading and rendering.

pub mod advisor;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;

pub use advisor::{LlmAdvisor, build_advisor};
pub use config::AdvisorConfig;
pub use error::AdvisorError;
