use serde::{Deserialize, Serialize};

/// Always asked first, whichever strategy produced the rest.
pub const INTRO_QUESTION: &str = "Tell me about yourself and walk me through your background.";
/// Cap on skills returned to clients.
pub const MAX_SKILLS: usize = 15;
/// Cap on experience snippets returned to clients.
pub const MAX_EXPERIENCE: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorizedQuestions {
    pub technical: Vec<String>,
    pub hr: Vec<String>,
}

/// Which strategy produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Generative,
    Static,
}

/// Final interview question set for one resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewPlan {
    pub questions: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub questions_categorized: CategorizedQuestions,
    pub source: QuestionSource,
}

impl InterviewPlan {
    /// Assembles a plan from categorized questions: intro, then technical, then hr.
    /// Applies the skill and experience caps.
    pub fn from_categorized(
        mut skills: Vec<String>,
        mut experience: Vec<String>,
        categorized: CategorizedQuestions,
        source: QuestionSource,
    ) -> Self {
        skills.truncate(MAX_SKILLS);
        experience.truncate(MAX_EXPERIENCE);

        let mut questions =
            Vec::with_capacity(1 + categorized.technical.len() + categorized.hr.len());
        questions.push(INTRO_QUESTION.to_string());
        questions.extend(categorized.technical.iter().cloned());
        questions.extend(categorized.hr.iter().cloned());

        Self {
            questions,
            skills,
            experience,
            questions_categorized: categorized,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn test_from_categorized_orders_intro_technical_hr() {
        let plan = InterviewPlan::from_categorized(
            vec!["rust".to_string()],
            vec![],
            CategorizedQuestions {
                technical: vec!["t1".to_string(), "t2".to_string()],
                hr: vec!["h1".to_string()],
            },
            QuestionSource::Generative,
        );
        assert_eq!(plan.questions, vec![INTRO_QUESTION, "t1", "t2", "h1"]);
    }

    #[test]
    fn test_from_categorized_applies_caps() {
        let plan = InterviewPlan::from_categorized(
            strings("skill", 20),
            strings("exp", 9),
            CategorizedQuestions::default(),
            QuestionSource::Static,
        );
        assert_eq!(plan.skills.len(), MAX_SKILLS);
        assert_eq!(plan.experience.len(), MAX_EXPERIENCE);
        assert_eq!(plan.skills[0], "skill0");
    }

    #[test]
    fn test_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&QuestionSource::Generative).unwrap(),
            r#""generative""#
        );
        assert_eq!(
            serde_json::to_string(&QuestionSource::Static).unwrap(),
            r#""static""#
        );
    }
}
