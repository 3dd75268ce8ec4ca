//! Alias table: surface variants (abbreviations, product names, job titles)
//! resolved to canonical skills. Many-to-one.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("alias {alias:?} maps to both {existing:?} and {conflicting:?}")]
    Conflict {
        alias: String,
        existing: String,
        conflicting: String,
    },

    #[error("alias {0:?} must be a non-empty, trimmed, lowercase string")]
    InvalidAlias(String),
}

/// Immutable alias → skill mapping.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn bundled() -> Result<Self, AliasError> {
        Self::from_pairs(BUNDLED_ALIASES.iter().copied())
    }

    /// Builds the table, failing on an alias given two different targets.
    /// Repeating an identical pair is accepted.
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, AliasError> {
        let mut entries = BTreeMap::new();
        for (alias, skill) in pairs {
            if alias.is_empty() || alias.trim() != alias || alias.to_lowercase() != alias {
                return Err(AliasError::InvalidAlias(alias.to_string()));
            }
            match entries.entry(alias.to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(skill.to_string());
                }
                Entry::Occupied(slot) if slot.get() == skill => {}
                Entry::Occupied(slot) => {
                    return Err(AliasError::Conflict {
                        alias: alias.to_string(),
                        existing: slot.get().clone(),
                        conflicting: skill.to_string(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, skill)| (alias.as_str(), skill.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Aliases compiled into the binary.
///
/// Where a surface form could plausibly mean two skills ("md", "product owner",
/// "procurement", "sourcing") a single target is chosen here; the table
/// constructor refuses ambiguous input.
pub const BUNDLED_ALIASES: &[(&str, &str)] = &[
    // Programming Languages
    ("py", "python"),
    ("python3", "python"),
    ("python2", "python"),
    ("js", "javascript"),
    ("es6", "javascript"),
    ("ecmascript", "javascript"),
    ("ts", "typescript"),
    ("c#", "c#"),
    ("csharp", "c#"),
    ("c sharp", "c#"),
    ("c++", "c++"),
    ("cpp", "c++"),
    ("cplusplus", "c++"),
    ("golang", "go"),
    ("go lang", "go"),
    ("rb", "ruby"),
    ("rails", "ruby"),

    // Frameworks
    ("reactjs", "react"),
    ("react.js", "react"),
    ("react js", "react"),
    ("angularjs", "angular"),
    ("angular.js", "angular"),
    ("angular js", "angular"),
    ("vuejs", "vue"),
    ("vue.js", "vue"),
    ("vue js", "vue"),
    ("nodejs", "node"),
    ("node.js", "node"),
    ("node js", "node"),
    ("express", "node"),
    ("expressjs", "node"),
    ("spring boot", "spring"),
    ("springboot", "spring"),
    (".net", "dotnet"),
    ("asp.net", "dotnet"),
    ("asp net", "dotnet"),
    (".net core", "dotnet"),

    // Databases
    ("postgres", "postgresql"),
    ("psql", "postgresql"),
    ("mongo", "mongodb"),
    ("mongo db", "mongodb"),
    ("mssql", "sql"),
    ("sql server", "sql"),
    ("t-sql", "sql"),
    ("tsql", "sql"),
    ("oracle db", "sql"),
    ("plsql", "sql"),
    ("pl/sql", "sql"),

    // Cloud & DevOps
    ("amazon web services", "aws"),
    ("amazon", "aws"),
    ("microsoft azure", "azure"),
    ("ms azure", "azure"),
    ("google cloud", "gcp"),
    ("google cloud platform", "gcp"),
    ("k8s", "kubernetes"),
    ("kube", "kubernetes"),
    ("ci/cd", "devops"),
    ("cicd", "devops"),
    ("jenkins", "devops"),
    ("github actions", "devops"),
    ("terraform", "devops"),
    ("ansible", "devops"),
    ("chef", "devops"),
    ("puppet", "devops"),
    ("version control", "git"),
    ("github", "git"),
    ("gitlab", "git"),
    ("bitbucket", "git"),

    // Data & Analytics
    ("ml", "machine learning"),
    ("machine-learning", "machine learning"),
    ("ai", "artificial intelligence"),
    ("artificial-intelligence", "artificial intelligence"),
    ("dl", "deep learning"),
    ("deep-learning", "deep learning"),
    ("neural network", "deep learning"),
    ("tensorflow", "deep learning"),
    ("pytorch", "deep learning"),
    ("keras", "deep learning"),
    ("nlp", "artificial intelligence"),
    ("natural language processing", "artificial intelligence"),
    ("computer vision", "deep learning"),
    ("cv", "deep learning"),
    ("data analyst", "data analysis"),
    ("analytics", "data analysis"),
    ("data scientist", "data science"),
    ("ds", "data science"),
    ("bi", "power bi"),
    ("business intelligence", "power bi"),
    ("ms excel", "excel"),
    ("microsoft excel", "excel"),
    ("spreadsheet", "excel"),
    ("pandas", "data science"),
    ("numpy", "data science"),
    ("scikit-learn", "machine learning"),
    ("sklearn", "machine learning"),

    // Business & Finance
    ("cpa", "accounting"),
    ("bookkeeping", "accounting"),
    ("accounts", "accounting"),
    ("financial accounting", "accounting"),
    ("financial analysis", "finance"),
    ("financial analyst", "finance"),
    ("fp&a", "finance"),
    ("investment banking", "investment"),
    ("stock market", "investment"),
    ("equity", "investment"),
    ("trading", "investment"),
    ("bank", "banking"),
    ("banker", "banking"),
    ("loan", "banking"),
    ("credit", "banking"),
    ("audit", "auditing"),
    ("internal audit", "auditing"),
    ("external audit", "auditing"),

    // Marketing
    ("digital marketer", "digital marketing"),
    ("online marketing", "digital marketing"),
    ("search engine optimization", "seo"),
    ("search engine", "seo"),
    ("social media marketing", "social media"),
    ("smm", "social media"),
    ("facebook", "social media"),
    ("instagram", "social media"),
    ("linkedin", "social media"),
    ("twitter", "social media"),
    ("content marketing", "content"),
    ("content writer", "content"),
    ("copywriting", "content"),
    ("copywriter", "content"),
    ("email marketing", "digital marketing"),
    ("ppc", "digital marketing"),
    ("google ads", "digital marketing"),
    ("brand", "marketing"),
    ("branding", "marketing"),
    ("market research", "marketing"),

    // Sales & Business
    ("salesperson", "sales"),
    ("sales executive", "sales"),
    ("sales manager", "sales"),
    ("sales rep", "sales"),
    ("biz dev", "business development"),
    ("bd", "business development"),
    ("partnerships", "business development"),
    ("client management", "account management"),
    ("client relations", "account management"),
    ("crm", "account management"),

    // HR & Admin
    ("hr", "human resources"),
    ("hrbp", "human resources"),
    ("people operations", "human resources"),
    ("recruiter", "recruitment"),
    ("talent acquisition", "recruitment"),
    ("hiring", "recruitment"),
    ("staffing", "recruitment"),
    ("learning and development", "training"),
    ("l&d", "training"),
    ("trainer", "training"),

    // Project & Product
    ("pm", "project management"),
    ("pmp", "project management"),
    ("prince2", "project management"),
    ("scrum master", "scrum"),
    ("agile methodology", "agile"),
    ("kanban", "agile"),
    ("lean", "agile"),
    ("product manager", "product management"),
    ("product owner", "product management"),

    // Design
    ("ui", "ui design"),
    ("user interface", "ui design"),
    ("figma", "ui design"),
    ("sketch", "ui design"),
    ("adobe xd", "ui design"),
    ("ux", "ux design"),
    ("user experience", "ux design"),
    ("usability", "ux design"),
    ("user research", "ux design"),
    ("photoshop", "graphic design"),
    ("illustrator", "graphic design"),
    ("indesign", "graphic design"),
    ("adobe", "graphic design"),

    // Healthcare
    ("doctor", "medical"),
    ("physician", "medical"),
    ("healthcare", "medical"),
    ("hospital", "medical"),
    ("nurse", "nursing"),
    ("rn", "nursing"),
    ("registered nurse", "nursing"),
    ("lpn", "nursing"),
    ("patient care", "nursing"),
    ("pharmacist", "pharmacy"),
    ("pharmaceutical", "pharmacy"),
    ("drug", "pharmacy"),
    ("clinical trial", "clinical research"),
    ("clinical study", "clinical research"),
    ("cra", "clinical research"),

    // Legal
    ("lawyer", "legal"),
    ("attorney", "legal"),
    ("law", "legal"),
    ("litigation", "legal"),
    ("contract", "legal"),
    ("regulatory", "compliance"),
    ("regulation", "compliance"),
    ("gdpr", "compliance"),
    ("hipaa", "compliance"),
    ("sox", "compliance"),

    // Engineering
    ("cad", "mechanical engineering"),
    ("solidworks", "mechanical engineering"),
    ("autocad", "mechanical engineering"),
    ("mechanical engineer", "mechanical engineering"),
    ("structural", "civil engineering"),
    ("construction", "civil engineering"),
    ("civil engineer", "civil engineering"),
    ("architect", "civil engineering"),
    ("circuit", "electrical engineering"),
    ("electronics", "electrical engineering"),
    ("pcb", "electrical engineering"),
    ("electrical engineer", "electrical engineering"),
    ("embedded", "electrical engineering"),
    ("process engineer", "chemical engineering"),
    ("chemical engineer", "chemical engineering"),

    // Education
    ("teacher", "teaching"),
    ("professor", "teaching"),
    ("instructor", "teaching"),
    ("tutor", "teaching"),
    ("educator", "education"),
    ("curriculum", "education"),
    ("e-learning", "education"),
    ("lms", "education"),

    // Customer Service & Support
    ("customer support", "customer service"),
    ("customer care", "customer service"),
    ("call center", "customer service"),
    ("technical support", "support"),
    ("help desk", "support"),
    ("it support", "support"),
    ("desktop support", "support"),

    // Operations & Supply Chain
    ("scm", "supply chain"),
    ("supply chain management", "supply chain"),
    ("warehouse", "logistics"),
    ("transportation", "logistics"),
    ("shipping", "logistics"),
    ("freight", "logistics"),
    ("distribution", "logistics"),
    ("inventory", "operations"),
    ("process improvement", "operations"),
    ("six sigma", "operations"),
    ("lean manufacturing", "operations"),

    // QA & Testing
    ("qa", "quality assurance"),
    ("quality analyst", "quality assurance"),
    ("tester", "quality assurance"),
    ("testing", "quality assurance"),
    ("selenium", "automation testing"),
    ("cypress", "automation testing"),
    ("test automation", "automation testing"),
    ("automated testing", "automation testing"),

    // Security & Networking
    ("security", "cybersecurity"),
    ("infosec", "cybersecurity"),
    ("information security", "cybersecurity"),
    ("penetration testing", "cybersecurity"),
    ("ethical hacking", "cybersecurity"),
    ("networking", "network"),
    ("cisco", "network"),
    ("ccna", "network"),
    ("ccnp", "network"),
    ("routing", "network"),
    ("switching", "network"),
    ("sysadmin", "system administration"),
    ("linux", "system administration"),
    ("windows server", "system administration"),
    ("unix", "system administration"),
    ("active directory", "system administration"),

    // Leadership & Strategy
    ("director", "leadership"),
    ("vp", "executive"),
    ("vice president", "executive"),
    ("svp", "executive"),
    ("senior vice president", "executive"),
    ("md", "executive"),
    ("managing director", "executive"),
    ("country manager", "executive"),
    ("regional head", "executive"),
    ("head of", "leadership"),
    ("principal consultant", "consulting"),
    ("strategy lead", "strategy"),
    ("strategy manager", "strategy"),
    ("chief executive officer", "executive"),
    ("ceo", "executive"),
    ("coo", "executive"),
    ("cfo", "executive"),
    ("cto", "executive"),
    ("cmo", "executive"),
    ("chro", "executive"),
    ("general counsel", "executive"),

    // Finance & Corporate Attributes
    ("tax manager", "accounting"),
    ("treasury", "finance"),
    ("m&a", "strategy"),
    ("mergers", "strategy"),
    ("corporate development", "strategy"),
    ("financial controller", "finance"),
    ("risk", "risk_management"),
    ("risk manager", "risk_management"),

    // Advanced Tech & Architecture
    ("engineering manager", "leadership"),
    ("software architect", "software_architecture"),
    ("principal engineer", "software_architecture"),
    ("ciso", "cybersecurity"),
    ("information security officer", "cybersecurity"),
    ("platform engineering", "devops"),
    ("solution architect", "software_architecture"),
    ("cloud architect", "software_architecture"),
    ("data engineer", "data_engineering"),
    ("data engineering", "data_engineering"),
    ("etl", "data_engineering"),

    // Specialized Product & Design
    ("cpo", "executive"),
    ("chief product officer", "executive"),
    ("group product manager", "product_management"),

    // Procurement
    ("procurement", "procurement"),
    ("purchasing", "procurement"),
    ("buyer", "procurement"),
    ("sourcing", "procurement"),

    // Consulting & Advisory
    ("engagement manager", "consulting"),
    ("transformation", "consulting"),
    ("change management", "consulting"),
    ("advisory", "consulting"),

    // Entry Level Indicators
    ("graduate trainee", "entry_level"),
    ("management trainee", "entry_level"),
    ("associate", "entry_level"),
    ("junior", "entry_level"),
    ("intern", "entry_level"),
    ("trainee", "entry_level"),
    ("entry level", "entry_level"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::taxonomy::Taxonomy;

    #[test]
    fn test_bundled_table_has_no_conflicts() {
        let table = AliasTable::bundled().unwrap();
        assert_eq!(table.len(), BUNDLED_ALIASES.len());
    }

    #[test]
    fn test_bundled_targets_exist_in_bundled_taxonomy() {
        let table = AliasTable::bundled().unwrap();
        let taxonomy = Taxonomy::bundled().unwrap();
        for (alias, skill) in table.iter() {
            assert!(
                taxonomy.contains(skill),
                "alias {alias:?} targets unknown skill {skill:?}"
            );
        }
    }

    #[test]
    fn test_conflicting_duplicate_is_rejected() {
        let err = AliasTable::from_pairs([("md", "medical"), ("md", "executive")]).unwrap_err();
        match err {
            AliasError::Conflict {
                alias,
                existing,
                conflicting,
            } => {
                assert_eq!(alias, "md");
                assert_eq!(existing, "medical");
                assert_eq!(conflicting, "executive");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_identical_duplicate_is_accepted() {
        let table = AliasTable::from_pairs([("k8s", "kubernetes"), ("k8s", "kubernetes")]).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_uppercase_alias_is_rejected() {
        let err = AliasTable::from_pairs([("K8s", "kubernetes")]).unwrap_err();
        assert!(matches!(err, AliasError::InvalidAlias(a) if a == "K8s"));
    }

    #[test]
    fn test_ambiguous_forms_resolve_to_single_target() {
        let table = AliasTable::bundled().unwrap();
        let lookup = |alias: &str| {
            table
                .iter()
                .find(|(a, _)| *a == alias)
                .map(|(_, skill)| skill.to_string())
        };
        assert_eq!(lookup("md").as_deref(), Some("executive"));
        assert_eq!(lookup("product owner").as_deref(), Some("product management"));
        assert_eq!(lookup("procurement").as_deref(), Some("procurement"));
        assert_eq!(lookup("sourcing").as_deref(), Some("procurement"));
    }
}
