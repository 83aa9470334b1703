use anyhow::{Context, Result};
use std::path::Path;
use surveyplus_core::StudyDraft;
use surveyplus_service::StudyService;

use crate::open_storage;

fn service() -> Result<StudyService> {
    Ok(StudyService::new(open_storage()?))
}

pub(crate) async fn create(file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("reading study file {}", file.display()))?;
    let draft: StudyDraft = serde_json::from_str(&raw)
        .with_context(|| format!("parsing study file {}", file.display()))?;
    let study = service()?.create(draft).await?;
    println!("{}", serde_json::to_string_pretty(&study)?);
    Ok(())
}

pub(crate) async fn list() -> Result<()> {
    let studies = service()?.list().await?;
    println!("{}", serde_json::to_string_pretty(&studies)?);
    Ok(())
}

pub(crate) async fn activate(id: &str) -> Result<()> {
    let study = service()?.activate(id).await?;
    println!("{}", serde_json::to_string_pretty(&study)?);
    Ok(())
}

pub(crate) async fn stats(study_id: &str) -> Result<()> {
    let stats = service()?.stats(study_id).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
