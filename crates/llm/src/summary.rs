use crate::error::LlmError;
use crate::generator::{CompletionRequest, TextGenerator, Turn};

/// Token budget for an interview summary.
pub const SUMMARY_MAX_TOKENS: u32 = 200;

const NO_SUMMARY: &str = "No summary generated.";

fn summary_prompt(research_goal: &str) -> String {
    format!(
        r#"You are a research analyst creating concise interview summaries.

RESEARCH GOAL: {research_goal}

Your task: Read this interview transcript and write a 1-2 sentence summary capturing the key insights or patterns that emerged. Focus on what the participant revealed about the research goal.

Be specific and concrete. Avoid generic statements like "the participant shared their experience." Instead, capture what they actually said or revealed.

Format: Just write the 1-2 sentence summary, nothing else."#
    )
}

/// Writes a 1-2 sentence summary of `transcript` against the research goal.
///
/// # Errors
/// Any backend error.
pub async fn summarize_transcript(
    generator: &dyn TextGenerator,
    transcript: &str,
    research_goal: &str,
) -> Result<String, LlmError> {
    let request = CompletionRequest {
        system: summary_prompt(research_goal),
        turns: vec![Turn::participant(transcript)],
        max_tokens: SUMMARY_MAX_TOKENS,
    };
    let text = generator.complete(&request).await?;
    let text = text.trim();
    Ok(if text.is_empty() { NO_SUMMARY.to_owned() } else { text.to_owned() })
}
