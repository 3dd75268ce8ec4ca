// Interview question selection.
// A generative strategy (via llm_client) with a static question-bank fallback.

pub mod generative;
pub mod plan;
pub mod prompts;
pub mod selector;
pub mod static_bank;
