//! Generative strategy: asks the LLM for a structured resume analysis.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::questions::plan::{CategorizedQuestions, InterviewPlan, QuestionSource};
use crate::questions::prompts::build_interview_prompt;
use crate::questions::selector::{QuestionStrategy, StrategyError};

pub struct GenerativeStrategy {
    llm: LlmClient,
}

impl GenerativeStrategy {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QuestionStrategy for GenerativeStrategy {
    fn source(&self) -> QuestionSource {
        QuestionSource::Generative
    }

    async fn plan(
        &self,
        resume_text: &str,
        skills: &[String],
    ) -> Result<InterviewPlan, StrategyError> {
        let prompt = build_interview_prompt(resume_text);
        info!("Sending interview analysis request to LLM");
        let analysis: GeneratedAnalysis = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        analysis.into_plan(skills)
    }
}

/// Model output. Items are accepted loosely: models mix strings and objects.
#[derive(Debug, Deserialize)]
pub struct GeneratedAnalysis {
    #[serde(default)]
    skills: Option<Vec<LooseText>>,
    #[serde(default)]
    experience: Vec<LooseText>,
    questions: GeneratedQuestions,
}

#[derive(Debug, Default, Deserialize)]
struct GeneratedQuestions {
    #[serde(default)]
    technical: Vec<QuestionItem>,
    #[serde(default)]
    hr: Vec<QuestionItem>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionItem {
    Detailed { question: String },
    Plain(String),
    Other(Value),
}

impl QuestionItem {
    fn into_text(self) -> String {
        match self {
            QuestionItem::Detailed { question } => question,
            QuestionItem::Plain(text) => text,
            QuestionItem::Other(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LooseText {
    Plain(String),
    Other(Value),
}

impl LooseText {
    fn into_text(self) -> String {
        match self {
            LooseText::Plain(text) => text,
            LooseText::Other(value) => value.to_string(),
        }
    }
}

impl GeneratedAnalysis {
    /// Converts the analysis into a plan. Falls back to `extracted_skills`
    /// when the model omitted skills; an analysis without questions is an error.
    pub fn into_plan(self, extracted_skills: &[String]) -> Result<InterviewPlan, StrategyError> {
        let technical: Vec<String> = self
            .questions
            .technical
            .into_iter()
            .map(QuestionItem::into_text)
            .collect();
        let hr: Vec<String> = self
            .questions
            .hr
            .into_iter()
            .map(QuestionItem::into_text)
            .collect();

        if technical.is_empty() && hr.is_empty() {
            return Err(StrategyError::NoQuestions);
        }
        info!(
            "Extracted {} technical, {} HR questions",
            technical.len(),
            hr.len()
        );

        let skills = match self.skills {
            Some(skills) => skills.into_iter().map(LooseText::into_text).collect(),
            None => extracted_skills.to_vec(),
        };
        let experience = self
            .experience
            .into_iter()
            .map(LooseText::into_text)
            .collect();

        Ok(InterviewPlan::from_categorized(
            skills,
            experience,
            CategorizedQuestions { technical, hr },
            QuestionSource::Generative,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_text;
    use crate::questions::plan::{INTRO_QUESTION, MAX_EXPERIENCE};

    fn parse(text: &str) -> GeneratedAnalysis {
        parse_json_text(text).unwrap()
    }

    #[test]
    fn test_structured_response_becomes_plan() {
        let analysis = parse(
            r#"```json
            {
              "skills": ["Rust", "Kubernetes"],
              "experience": ["5 years backend"],
              "questions": {
                "technical": [
                  {"level": "beginner", "question": "What is borrowing?"},
                  {"level": "advanced", "question": "Explain Pin."}
                ],
                "hr": ["Why do you want to join?"]
              }
            }
            ```"#,
        );
        let plan = analysis.into_plan(&[]).unwrap();
        assert_eq!(plan.source, QuestionSource::Generative);
        assert_eq!(plan.skills, vec!["Rust", "Kubernetes"]);
        assert_eq!(
            plan.questions,
            vec![
                INTRO_QUESTION,
                "What is borrowing?",
                "Explain Pin.",
                "Why do you want to join?"
            ]
        );
        assert_eq!(plan.questions_categorized.technical.len(), 2);
        assert_eq!(plan.questions_categorized.hr.len(), 1);
    }

    #[test]
    fn test_plain_string_and_odd_items_are_accepted() {
        let analysis = parse(
            r#"{
              "questions": {
                "technical": ["What is a trait?", {"level": "hard"}],
                "hr": [{"question": "Tell me about a conflict."}]
              }
            }"#,
        );
        let plan = analysis.into_plan(&[]).unwrap();
        assert_eq!(plan.questions_categorized.technical[0], "What is a trait?");
        assert_eq!(
            plan.questions_categorized.technical[1],
            r#"{"level":"hard"}"#
        );
        assert_eq!(plan.questions_categorized.hr[0], "Tell me about a conflict.");
    }

    #[test]
    fn test_missing_skills_default_to_extracted() {
        let analysis = parse(r#"{"questions": {"hr": ["Why us?"]}}"#);
        let extracted = vec!["python".to_string()];
        let plan = analysis.into_plan(&extracted).unwrap();
        assert_eq!(plan.skills, extracted);
        assert!(plan.experience.is_empty());
    }

    #[test]
    fn test_experience_is_capped() {
        let analysis = parse(
            r#"{
              "experience": ["a", "b", "c", "d", "e", "f", {"role": "g"}],
              "questions": {"technical": ["q"]}
            }"#,
        );
        let plan = analysis.into_plan(&[]).unwrap();
        assert_eq!(plan.experience.len(), MAX_EXPERIENCE);
    }

    #[test]
    fn test_empty_question_buckets_are_unavailable() {
        let analysis = parse(r#"{"skills": ["x"], "questions": {"technical": [], "hr": []}}"#);
        assert!(matches!(
            analysis.into_plan(&[]),
            Err(StrategyError::NoQuestions)
        ));
    }

    #[test]
    fn test_missing_questions_key_fails_to_parse() {
        let result = parse_json_text::<GeneratedAnalysis>(r#"{"skills": []}"#);
        assert!(result.is_err());
    }

    mod over_http {
        use std::sync::Arc;

        use wiremock::matchers::{body_string_contains, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        use super::*;
        use crate::llm_client::MODEL;
        use crate::questions::selector::QuestionSelector;
        use crate::questions::static_bank::StaticFallbackStrategy;
        use crate::skills::Taxonomy;

        const ANALYSIS: &str = r#"{
            "skills": ["Rust", "PostgreSQL"],
            "experience": ["Backend engineer at Acme"],
            "questions": {
                "technical": [{"level": "intermediate", "question": "How does Rust prevent data races?"}],
                "hr": [{"question": "Describe a tough deadline."}]
            }
        }"#;

        fn strategy(server: &MockServer) -> GenerativeStrategy {
            let llm = LlmClient::with_base_url("test-key".to_string(), &server.uri()).unwrap();
            GenerativeStrategy::new(llm)
        }

        #[tokio::test]
        async fn test_plan_from_live_response() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path(format!("/{MODEL}:generateContent")))
                .and(body_string_contains("Backend engineer shipping Rust services"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "candidates": [{"content": {"parts": [{"text": ANALYSIS}], "role": "model"}}]
                })))
                .expect(1)
                .mount(&server)
                .await;

            let plan = strategy(&server)
                .plan(
                    "Backend engineer shipping Rust services",
                    &["rust".to_string()],
                )
                .await
                .unwrap();
            assert_eq!(plan.source, QuestionSource::Generative);
            assert_eq!(plan.skills, vec!["Rust", "PostgreSQL"]);
            assert_eq!(plan.experience, vec!["Backend engineer at Acme"]);
            assert_eq!(
                plan.questions,
                vec![
                    INTRO_QUESTION,
                    "How does Rust prevent data races?",
                    "Describe a tough deadline."
                ]
            );
        }

        #[tokio::test]
        async fn test_rejected_call_falls_back_to_static_bank() {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                    "error": {"code": 403, "message": "permission denied"}
                })))
                .expect(1)
                .mount(&server)
                .await;

            let taxonomy = Arc::new(Taxonomy::bundled().unwrap());
            let generative: Arc<dyn QuestionStrategy> = Arc::new(strategy(&server));
            let selector = QuestionSelector::new(
                Some(generative),
                StaticFallbackStrategy::with_seed(taxonomy, 3),
            );
            let plan = selector
                .select("Python developer", &["python".to_string()])
                .await;
            assert_eq!(plan.source, QuestionSource::Static);
            assert_eq!(plan.questions[0], INTRO_QUESTION);
        }
    }
}
