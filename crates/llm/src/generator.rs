//! The text-generation port and the interviewer-turn call built on it.

use async_trait::async_trait;
use surveyplus_core::constants::EMPTY_REPLY_PLACEHOLDER;
use surveyplus_core::{Message, Role};

use crate::ai_types::{ApiMessage, MessagesRequest};
use crate::client::LlmClient;
use crate::error::LlmError;

/// Token budget for one interviewer turn.
pub const INTERVIEW_MAX_TOKENS: u32 = 1000;

/// Stand-in opening user turn; the backend rejects a conversation that
/// starts with the assistant.
const OPENING_USER_TURN: &str = "[interview started]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    #[must_use]
    pub fn participant(content: impl Into<String>) -> Self {
        Self { role: Role::Participant, content: content.into() }
    }
}

/// One request to the backend: a system prompt plus the ordered conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub turns: Vec<Turn>,
    pub max_tokens: u32,
}

/// Opaque request/response text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the generated text, possibly empty.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

const fn api_role(role: Role) -> &'static str {
    match role {
        Role::Interviewer => "assistant",
        Role::Participant => "user",
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(request.turns.len().saturating_add(1));
        if request.turns.first().is_none_or(|t| t.role == Role::Interviewer) {
            messages.push(ApiMessage { role: "user", content: OPENING_USER_TURN });
        }
        messages.extend(
            request.turns.iter().map(|t| ApiMessage { role: api_role(t.role), content: &t.content }),
        );
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages,
        };
        self.messages(&body).await
    }
}

/// Generates the next interviewer utterance for `conversation`.
///
/// The welcome line must already be filtered out. An empty backend reply is
/// replaced with a neutral acknowledgement.
///
/// # Errors
/// Any backend error; the controller answers those with a canned fallback.
pub async fn interviewer_turn<'a>(
    generator: &dyn TextGenerator,
    system_prompt: &str,
    conversation: impl IntoIterator<Item = &'a Message>,
) -> Result<String, LlmError> {
    let request = CompletionRequest {
        system: system_prompt.to_owned(),
        turns: conversation
            .into_iter()
            .map(|m| Turn { role: m.role, content: m.text.clone() })
            .collect(),
        max_tokens: INTERVIEW_MAX_TOKENS,
    };
    let text = generator.complete(&request).await?;
    let text = text.trim();
    if text.is_empty() {
        tracing::debug!("backend returned no text, using placeholder");
        return Ok(EMPTY_REPLY_PLACEHOLDER.to_owned());
    }
    Ok(text.to_owned())
}
