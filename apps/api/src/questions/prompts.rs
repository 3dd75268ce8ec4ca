/// Characters of resume text sent to the model.
pub const RESUME_EXCERPT_CHARS: usize = 3000;

pub const INTERVIEW_ANALYSIS_PROMPT: &str = r#"You are an interview preparation assistant.
Analyze the following resume text and return ONLY valid JSON. Do not add explanations or markdown.

Resume Text:
{resume_text}

Return JSON in this exact structure:
{
  "skills": [],
  "experience": [],
  "questions": {
    "technical": [
      {
        "level": "beginner",
        "question": "example question"
      }
    ],
    "hr": ["example HR question"]
  }
}"#;

pub fn build_interview_prompt(resume_text: &str) -> String {
    let excerpt: String = resume_text.chars().take(RESUME_EXCERPT_CHARS).collect();
    INTERVIEW_ANALYSIS_PROMPT.replace("{resume_text}", &excerpt)
}
