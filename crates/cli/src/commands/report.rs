use anyhow::{Result, anyhow};
use std::sync::Arc;
use surveyplus_llm::LlmClient;
use surveyplus_service::ReportService;
use surveyplus_storage::ReportStore;

use crate::open_storage;

pub(crate) async fn run(study_id: &str, stored: bool) -> Result<()> {
    let storage = open_storage()?;
    let report = if stored {
        ReportStore::get_report(&*storage, study_id)
            .await?
            .ok_or_else(|| anyhow!("no report stored for study {study_id}"))?
    } else {
        let llm = Arc::new(LlmClient::from_env()?);
        ReportService::new(storage, llm).generate_report(study_id).await?
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
