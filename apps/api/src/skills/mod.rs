// Skill extraction core: taxonomy, alias table, and the extractor that joins them.
// Pure and synchronous; no I/O beyond loading an optional taxonomy file at startup.

pub mod aliases;
pub mod extractor;
pub mod taxonomy;

pub use aliases::AliasTable;
pub use extractor::SkillExtractor;
pub use taxonomy::Taxonomy;
