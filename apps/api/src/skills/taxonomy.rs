//! Taxonomy: canonical skills and the interview question pool for each.
//!
//! Loaded once at startup and shared read-only. Keys are lowercase and used
//! verbatim by the extractor, so loading rejects anything else.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

/// Catch-all pool used to top up sparse question sets.
pub const GENERIC_POOL: &str = "generic";
/// Reserved pool that is never matched or sampled.
pub const COMMUNICATION_POOL: &str = "communication";

const RESERVED_POOLS: [&str; 2] = [GENERIC_POOL, COMMUNICATION_POOL];

/// Question bank compiled into the binary. Overridable via `TAXONOMY_PATH`.
const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("failed to read taxonomy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("taxonomy key {0:?} must be a non-empty, trimmed, lowercase string")]
    InvalidKey(String),

    #[error("taxonomy is missing the 'generic' question pool")]
    MissingGenericPool,
}

#[derive(Debug, Clone)]
pub struct Taxonomy {
    pools: BTreeMap<String, Vec<String>>,
}

impl Taxonomy {
    pub fn bundled() -> Result<Self, TaxonomyError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let pools: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_pools(pools)
    }

    pub fn from_pools(pools: BTreeMap<String, Vec<String>>) -> Result<Self, TaxonomyError> {
        if let Some(bad) = pools.keys().find(|key| !is_canonical(key)) {
            return Err(TaxonomyError::InvalidKey(bad.clone()));
        }
        if !pools.contains_key(GENERIC_POOL) {
            return Err(TaxonomyError::MissingGenericPool);
        }
        Ok(Self { pools })
    }

    /// True for any key, reserved pools included.
    pub fn contains(&self, skill: &str) -> bool {
        self.pools.contains_key(skill)
    }

    pub fn questions(&self, skill: &str) -> &[String] {
        self.pools.get(skill).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn generic(&self) -> &[String] {
        self.questions(GENERIC_POOL)
    }

    /// Matchable skills: every key except the reserved pools.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.pools
            .keys()
            .map(String::as_str)
            .filter(|key| !RESERVED_POOLS.contains(key))
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }
}

fn is_canonical(key: &str) -> bool {
    !key.is_empty() && key.trim() == key && key.to_lowercase() == key
}
