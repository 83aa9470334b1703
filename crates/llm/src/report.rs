//! Cross-interview report generation.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;
use surveyplus_core::{Finding, Interview, ReportBody, Study, Theme, strip_markdown_json};

use crate::ai_types::ReportJson;
use crate::client::truncate;
use crate::error::LlmError;
use crate::generator::{CompletionRequest, TextGenerator, Turn};

/// Token budget for a study report.
pub const REPORT_MAX_TOKENS: u32 = 4000;

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time known")]
static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*(\{[\s\S]*\})\s*```").unwrap());

fn report_prompt(study: &Study, count: usize) -> String {
    let questions = study
        .research_questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. {q}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"You are an expert qualitative research analyst. You've been given {count} interview transcripts from a user research study.

RESEARCH GOAL:
{goal}

RESEARCH QUESTIONS WE'RE TRYING TO ANSWER:
{questions}

YOUR TASK:
Analyze all {count} interviews and generate a comprehensive research report.

ANALYSIS APPROACH:
1. Read through all transcripts carefully
2. Identify patterns, themes, and insights across participants
3. Look for both expected findings and surprises
4. Ground your analysis in specific quotes from participants
5. Count how many participants mentioned each theme
6. Be honest about what the data shows - don't overstate or understate

OUTPUT FORMAT:
Respond with a valid JSON object (no markdown formatting, just raw JSON) with this exact structure:
{{
  "executiveSummary": "A 2-3 sentence high-level summary of key findings",
  "findings": [
    {{
      "researchQuestion": "The original research question",
      "answer": "2-3 sentence answer based on the data",
      "themes": [
        {{
          "theme": "Brief theme name (e.g., 'Frustration with manual data entry')",
          "count": 3,
          "total": {count},
          "quotes": ["Exact quote from participant", "Another quote"]
        }}
      ]
    }}
  ],
  "unexpectedInsights": ["An insight you didn't expect to find"],
  "furtherResearch": ["A question or area to explore in future research"]
}}

IMPORTANT:
- Include 2-4 themes per research question
- Each theme should have 1-3 representative quotes
- Only include themes mentioned by at least 2 participants (or 1 if total < 3)
- Quotes should be exact, verbatim excerpts from transcripts
- Be specific and actionable in your insights
- Return ONLY valid JSON, no other text or markdown formatting"#,
        goal = study.research_goal,
    )
}

fn transcripts(interviews: &[Interview]) -> String {
    let separator = format!("\n\n{}\n\n", "=".repeat(80));
    let mut out = String::new();
    for (idx, interview) in interviews.iter().enumerate() {
        if idx > 0 {
            out.push_str(&separator);
        }
        let secs = interview.duration_secs;
        let _ = write!(
            out,
            "=== INTERVIEW {} ===\nDuration: {}m {}s\n\n{}",
            idx + 1,
            secs / 60,
            secs % 60,
            interview.transcript_text()
        );
    }
    out
}

/// Parses the backend's report JSON, tolerating a markdown fence or prose
/// around a fenced object.
///
/// # Errors
/// `JsonParse` when no report object can be read.
pub fn parse_report(text: &str) -> Result<ReportBody, LlmError> {
    let stripped = strip_markdown_json(text);
    let parsed = serde_json::from_str::<ReportJson>(stripped).or_else(|first| {
        FENCED_JSON
            .captures(text)
            .and_then(|c| c.get(1))
            .map_or(Err(first), |m| serde_json::from_str::<ReportJson>(m.as_str()))
    });
    let json = parsed.map_err(|e| LlmError::JsonParse {
        context: format!("report (content: {})", truncate(stripped, 300)),
        source: e,
    })?;
    Ok(ReportBody {
        executive_summary: json.executive_summary,
        findings: json
            .findings
            .into_iter()
            .map(|f| Finding {
                research_question: f.research_question,
                answer: f.answer,
                themes: f
                    .themes
                    .into_iter()
                    .map(|t| Theme { theme: t.theme, count: t.count, total: t.total, quotes: t.quotes })
                    .collect(),
            })
            .collect(),
        unexpected_insights: json.unexpected_insights,
        further_research: json.further_research,
    })
}

/// Asks the backend to analyse `interviews` and parses its report.
///
/// # Errors
/// Any backend error, or `JsonParse` when the reply is not a report.
pub async fn generate_report_body(
    generator: &dyn TextGenerator,
    study: &Study,
    interviews: &[Interview],
) -> Result<ReportBody, LlmError> {
    let count = interviews.len();
    let request = CompletionRequest {
        system: report_prompt(study, count),
        turns: vec![Turn::participant(format!(
            "Here are the {count} interview transcripts to analyze:\n\n{}\n\nPlease analyze these interviews and return the JSON report as specified.",
            transcripts(interviews)
        ))],
        max_tokens: REPORT_MAX_TOKENS,
    };
    let text = generator.complete(&request).await?;
    tracing::debug!(study_id = %study.id, chars = text.len(), "report response received");
    parse_report(&text)
}
