//! Static question bank: deterministic-shape sampling from the taxonomy.
//!
//! Used whenever the generative strategy is not configured or fails.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::questions::plan::{CategorizedQuestions, InterviewPlan, QuestionSource};
use crate::questions::selector::{QuestionStrategy, StrategyError};
use crate::skills::Taxonomy;

/// Questions sampled from each matched skill's pool.
const PER_SKILL: usize = 2;
/// Generic questions top the sample up to this many.
const MIN_SAMPLED: usize = 5;
/// Sampled questions kept after shuffling (the intro comes on top).
const MAX_SAMPLED: usize = 7;

pub struct StaticFallbackStrategy {
    taxonomy: Arc<Taxonomy>,
    rng: Mutex<StdRng>,
}

impl StaticFallbackStrategy {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self {
            taxonomy,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    #[cfg(test)]
    pub fn with_seed(taxonomy: Arc<Taxonomy>, seed: u64) -> Self {
        Self {
            taxonomy,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Builds a plan from the taxonomy. Infallible.
    pub fn sample(&self, skills: &[String]) -> InterviewPlan {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sample_plan(&self.taxonomy, skills, &mut *rng)
    }
}

#[async_trait]
impl QuestionStrategy for StaticFallbackStrategy {
    fn source(&self) -> QuestionSource {
        QuestionSource::Static
    }

    async fn plan(
        &self,
        _resume_text: &str,
        skills: &[String],
    ) -> Result<InterviewPlan, StrategyError> {
        Ok(self.sample(skills))
    }
}

/// Samples up to two questions per skill, tops up from the generic pool to
/// five, shuffles, and keeps seven. With the intro prepended, the first half
/// (rounded down) after the intro is technical and the rest is hr.
pub fn sample_plan<R: Rng + ?Sized>(
    taxonomy: &Taxonomy,
    skills: &[String],
    rng: &mut R,
) -> InterviewPlan {
    let mut sampled: Vec<String> = Vec::new();

    for skill in skills {
        let pool = taxonomy.questions(skill);
        sampled.extend(pool.choose_multiple(rng, PER_SKILL.min(pool.len())).cloned());
    }

    if sampled.len() < MIN_SAMPLED {
        let generic = taxonomy.generic();
        let count = generic.len().min(MIN_SAMPLED - sampled.len());
        sampled.extend(generic.choose_multiple(rng, count).cloned());
    }

    sampled.shuffle(rng);
    sampled.truncate(MAX_SAMPLED);

    // Split as if the intro were element 0 of the final list.
    let tech_count = (sampled.len() + 1) / 2;
    let hr = sampled.split_off(tech_count);
    let categorized = CategorizedQuestions {
        technical: sampled,
        hr,
    };

    let experience = vec![skills
        .first()
        .map(|skill| format!("Experience in {skill}"))
        .unwrap_or_else(|| "General experience".to_string())];

    InterviewPlan::from_categorized(
        skills.to_vec(),
        experience,
        categorized,
        QuestionSource::Static,
    )
}
