use std::sync::Arc;

use crate::config::Config;
use crate::questions::selector::QuestionSelector;
use crate::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once from the taxonomy and alias table; read-only afterwards.
    pub extractor: Arc<SkillExtractor>,
    /// Generative strategy when `GEMINI_API_KEY` is set, static bank otherwise.
    pub selector: Arc<QuestionSelector>,
}
