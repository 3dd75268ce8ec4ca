//! Question selection: pluggable, trait-based strategies behind one selector.
//!
//! `GenerativeStrategy` asks the LLM; `StaticFallbackStrategy` samples the taxonomy.
//! The selector tries the generative strategy when one is configured and falls
//! back to the static bank on any failure, so callers always get a plan.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::LlmError;
use crate::questions::plan::{InterviewPlan, QuestionSource};
use crate::questions::static_bank::StaticFallbackStrategy;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("generated analysis contained no questions")]
    NoQuestions,
}

/// Implement this to add a question source without touching the handler.
#[async_trait]
pub trait QuestionStrategy: Send + Sync {
    fn source(&self) -> QuestionSource;

    async fn plan(
        &self,
        resume_text: &str,
        skills: &[String],
    ) -> Result<InterviewPlan, StrategyError>;
}

pub struct QuestionSelector {
    generative: Option<Arc<dyn QuestionStrategy>>,
    fallback: StaticFallbackStrategy,
}

impl QuestionSelector {
    pub fn new(
        generative: Option<Arc<dyn QuestionStrategy>>,
        fallback: StaticFallbackStrategy,
    ) -> Self {
        Self {
            generative,
            fallback,
        }
    }

    /// Never fails: generative errors are logged and the static bank answers.
    pub async fn select(&self, resume_text: &str, skills: &[String]) -> InterviewPlan {
        if let Some(strategy) = &self.generative {
            match strategy.plan(resume_text, skills).await {
                Ok(plan) => {
                    info!(
                        "Generated {} questions via {:?} strategy",
                        plan.questions.len(),
                        strategy.source()
                    );
                    return plan;
                }
                Err(e) => {
                    warn!("Question generation unavailable, using static question bank: {e}");
                }
            }
        }

        let plan = self.fallback.sample(skills);
        info!("Returning {} questions (static bank)", plan.questions.len());
        plan
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::questions::plan::{CategorizedQuestions, INTRO_QUESTION};
    use crate::skills::Taxonomy;

    struct FailingStrategy;

    #[async_trait]
    impl QuestionStrategy for FailingStrategy {
        fn source(&self) -> QuestionSource {
            QuestionSource::Generative
        }

        async fn plan(&self, _: &str, _: &[String]) -> Result<InterviewPlan, StrategyError> {
            Err(StrategyError::Llm(LlmError::EmptyContent))
        }
    }

    struct CannedStrategy;

    #[async_trait]
    impl QuestionStrategy for CannedStrategy {
        fn source(&self) -> QuestionSource {
            QuestionSource::Generative
        }

        async fn plan(
            &self,
            _: &str,
            skills: &[String],
        ) -> Result<InterviewPlan, StrategyError> {
            Ok(InterviewPlan::from_categorized(
                skills.to_vec(),
                vec!["Led a team".to_string()],
                CategorizedQuestions {
                    technical: vec!["Explain ownership.".to_string()],
                    hr: vec!["Why us?".to_string()],
                },
                QuestionSource::Generative,
            ))
        }
    }

    fn fallback() -> StaticFallbackStrategy {
        let mut pools = BTreeMap::new();
        pools.insert(
            "generic".to_string(),
            (0..6).map(|i| format!("generic {i}")).collect(),
        );
        StaticFallbackStrategy::with_seed(Arc::new(Taxonomy::from_pools(pools).unwrap()), 0)
    }

    #[tokio::test]
    async fn test_without_generative_uses_static_bank() {
        let selector = QuestionSelector::new(None, fallback());
        let plan = selector.select("resume", &[]).await;
        assert_eq!(plan.source, QuestionSource::Static);
        assert_eq!(plan.questions[0], INTRO_QUESTION);
    }

    #[tokio::test]
    async fn test_generative_failure_falls_back() {
        let selector = QuestionSelector::new(Some(Arc::new(FailingStrategy)), fallback());
        let plan = selector.select("resume", &["rust".to_string()]).await;
        assert_eq!(plan.source, QuestionSource::Static);
        assert_eq!(plan.experience, vec!["Experience in rust"]);
    }

    #[tokio::test]
    async fn test_generative_success_is_returned() {
        let selector = QuestionSelector::new(Some(Arc::new(CannedStrategy)), fallback());
        let plan = selector.select("resume", &["rust".to_string()]).await;
        assert_eq!(plan.source, QuestionSource::Generative);
        assert_eq!(
            plan.questions,
            vec![INTRO_QUESTION, "Explain ownership.", "Why us?"]
        );
    }
}
