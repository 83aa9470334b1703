use serde::{Deserialize, Serialize};

pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub system: &'a str,
    pub messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
pub(crate) struct ContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// All text blocks joined in order.
    pub fn text(&self) -> String {
        self.content.iter().filter_map(|c| c.text.as_deref()).collect()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReportJson {
    pub executive_summary: String,
    #[serde(default)]
    pub findings: Vec<FindingJson>,
    #[serde(default)]
    pub unexpected_insights: Vec<String>,
    #[serde(default)]
    pub further_research: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FindingJson {
    pub research_question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub themes: Vec<ThemeJson>,
}

#[derive(Deserialize)]
pub(crate) struct ThemeJson {
    pub theme: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub quotes: Vec<String>,
}
