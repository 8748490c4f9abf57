//! Prompt template loading and rendering via `minijinja`.
//!
//! The built-in `system.j2` and `advice.j2` templates are compiled into the
//! binary. Operators can tune the willow's voice without recompiling by
//! pointing `ADVISOR_TEMPLATES_DIR` at a directory with their own copies.

use std::path::Path;

use homestead_core::AdvisoryContext;
use minijinja::Environment;
use serde::Serialize;

use crate::error::AdvisorError;

const SYSTEM_TEMPLATE: &str = "system.j2";
const ADVICE_TEMPLATE: &str = "advice.j2";

/// Manages prompt template loading and rendering.
#[derive(Debug)]
pub struct PromptEngine {
    env: Environment<'static>,
    language: String,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// System message establishing the willow's voice.
    pub system: String,
    /// User message describing today's farm.
    pub user: String,
}

#[derive(Serialize)]
struct PromptData<'a> {
    #[serde(flatten)]
    context: &'a AdvisoryContext,
    language: &'a str,
}

impl PromptEngine {
    /// Create an engine using the built-in templates.
    pub fn builtin(language: &str) -> Result<Self, AdvisorError> {
        let mut env = Environment::new();
        env.add_template(SYSTEM_TEMPLATE, include_str!("../templates/system.j2"))?;
        env.add_template(ADVICE_TEMPLATE, include_str!("../templates/advice.j2"))?;
        Ok(Self {
            env,
            language: language.to_owned(),
        })
    }

    /// Create an engine loading templates from `dir`.
    ///
    /// Both templates are compiled up front so a missing or broken file is
    /// reported at startup rather than on the first request.
    pub fn from_dir(dir: &Path, language: &str) -> Result<Self, AdvisorError> {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir));
        env.get_template(SYSTEM_TEMPLATE)?;
        env.get_template(ADVICE_TEMPLATE)?;
        Ok(Self {
            env,
            language: language.to_owned(),
        })
    }

    /// Render the prompt for one advisory request.
    pub fn render(&self, context: &AdvisoryContext) -> Result<RenderedPrompt, AdvisorError> {
        let data = PromptData {
            context,
            language: &self.language,
        };
        let system = self.env.get_template(SYSTEM_TEMPLATE)?.render(&data)?;
        let user = self.env.get_template(ADVICE_TEMPLATE)?.render(&data)?;
        Ok(RenderedPrompt {
            system: system.trim().to_owned(),
            user: user.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use homestead_types::{CropType, Order, OrderId, Requester, Season, Weather};

    use super::*;

    fn context() -> AdvisoryContext {
        AdvisoryContext {
            season: Season::Autumn,
            day_of_month: 12,
            money: 340,
            weather: Weather::Rainy,
            market_prices: BTreeMap::from([(CropType::Corn, 1.8), (CropType::Carrot, 0.6)]),
            best_crop: Some(CropType::Corn),
            worst_crop: Some(CropType::Carrot),
            seeds: BTreeMap::from([(CropType::Carrot, 3)]),
            active_order: None,
        }
    }

    #[test]
    fn builtin_templates_render_the_farm() {
        let engine = PromptEngine::builtin("English").unwrap();
        let prompt = engine.render(&context()).unwrap();
        assert!(prompt.system.contains("willow"));
        assert!(prompt.system.contains("Answer in English."));
        assert!(prompt.user.contains("day 12 of autumn"));
        assert!(prompt.user.contains("340 coins"));
        assert!(prompt.user.contains("best for corn"));
        assert!(prompt.user.contains("- carrot: 3"));
        assert!(!prompt.user.contains("An order asks"));
    }

    #[test]
    fn active_order_and_empty_seeds_are_described() {
        let mut ctx = context();
        ctx.seeds.clear();
        ctx.active_order = Some(Order {
            id: OrderId::new(),
            crop: CropType::Corn,
            quantity: 8,
            progress: 2,
            money_reward: 500,
            xp_reward: 60,
            requester: Requester::ALL[0],
        });
        let prompt = PromptEngine::builtin("English").unwrap().render(&ctx).unwrap();
        assert!(prompt.user.contains("seed sacks are empty"));
        assert!(prompt.user.contains("asks for 8 corn, 2 delivered"));
        assert!(prompt.user.contains("paying 500 coins"));
    }

    #[test]
    fn templates_load_from_directory() {
        let dir = std::env::temp_dir().join(format!(
            "homestead_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("system.j2"), "Speak {{ language }}.").unwrap();
        std::fs::write(dir.join("advice.j2"), "Money: {{ money }}").unwrap();

        let engine = PromptEngine::from_dir(&dir, "French").unwrap();
        let prompt = engine.render(&context()).unwrap();
        assert_eq!(prompt.system, "Speak French.");
        assert_eq!(prompt.user, "Money: 340");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_directory_fails_early() {
        let dir = std::env::temp_dir().join("homestead_templates_that_do_not_exist");
        assert!(matches!(
            PromptEngine::from_dir(&dir, "English"),
            Err(AdvisorError::Template { .. })
        ));
    }
}
