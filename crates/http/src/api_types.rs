use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct StartInterviewRequest {
    #[serde(default)]
    pub participant_metadata: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}
