//! Skill Extractor: maps free-form resume text onto canonical taxonomy skills.
//!
//! Two passes over the lowercased text, unioned into one set:
//!
//! 1. Direct pass: every non-reserved taxonomy key is tested with a `\b...\b`
//!    regex and, failing that, as a raw substring. The fallback catches
//!    multi-word and punctuated keys (`c++`, `power bi`) whose edges defeat `\b`.
//!    It also lets short keys match inside longer words (`go` in "google");
//!    that loss of precision is accepted.
//! 2. Alias pass: aliases of at most 3 characters need a `\b...\b` match,
//!    longer aliases a plain substring match. A hit contributes its target
//!    skill only when that skill is a taxonomy key.
//!
//! Patterns are compiled once in [`SkillExtractor::new`]; extraction itself is
//! pure and safe to call concurrently.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::{debug, info};

use crate::skills::aliases::AliasTable;
use crate::skills::taxonomy::Taxonomy;

/// Aliases up to this many characters must match on word boundaries.
const SHORT_ALIAS_MAX_CHARS: usize = 3;

struct DirectPattern {
    skill: String,
    boundary: Regex,
}

enum AliasMatcher {
    Boundary(Regex),
    Substring,
}

struct AliasPattern {
    alias: String,
    target: String,
    matcher: AliasMatcher,
}

impl AliasPattern {
    fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            AliasMatcher::Boundary(re) => re.is_match(text),
            AliasMatcher::Substring => text.contains(self.alias.as_str()),
        }
    }
}

pub struct SkillExtractor {
    direct: Vec<DirectPattern>,
    aliases: Vec<AliasPattern>,
}

impl SkillExtractor {
    pub fn new(taxonomy: &Taxonomy, aliases: &AliasTable) -> Result<Self, regex::Error> {
        let direct = taxonomy
            .skills()
            .map(|skill| -> Result<DirectPattern, regex::Error> {
                Ok(DirectPattern {
                    skill: skill.to_string(),
                    boundary: word_boundary(skill)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut compiled = Vec::new();
        let mut unresolved = 0usize;
        for (alias, target) in aliases.iter() {
            // An alias whose target has no question pool can never contribute.
            if !taxonomy.contains(target) {
                unresolved += 1;
                continue;
            }
            let matcher = if alias.chars().count() <= SHORT_ALIAS_MAX_CHARS {
                AliasMatcher::Boundary(word_boundary(alias)?)
            } else {
                AliasMatcher::Substring
            };
            compiled.push(AliasPattern {
                alias: alias.to_string(),
                target: target.to_string(),
                matcher,
            });
        }

        if unresolved > 0 {
            debug!("{unresolved} aliases target skills outside the taxonomy and will be ignored");
        }
        debug!(
            "Skill extractor ready: {} direct patterns, {} alias patterns",
            direct.len(),
            compiled.len()
        );

        Ok(Self {
            direct,
            aliases: compiled,
        })
    }

    /// Returns the canonical skills found in `text`. Never fails; text with no
    /// recognizable terms yields an empty set.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let text = text.to_lowercase();
        let mut found = BTreeSet::new();

        for pattern in &self.direct {
            if pattern.boundary.is_match(&text) {
                found.insert(pattern.skill.clone());
            } else if text.contains(pattern.skill.as_str()) {
                debug!(skill = %pattern.skill, "Direct match via substring fallback");
                found.insert(pattern.skill.clone());
            }
        }

        for pattern in &self.aliases {
            if pattern.is_match(&text) {
                found.insert(pattern.target.clone());
            }
        }

        info!("Matched skills: {:?}", found);
        found
    }
}

fn word_boundary(term: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(term)))
}
