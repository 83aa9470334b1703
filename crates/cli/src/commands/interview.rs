//! Terminal interview: interviewer turns on stdout, replies from stdin.

use anyhow::Result;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;
use surveyplus_core::PolicyConfig;
use surveyplus_llm::LlmClient;
use surveyplus_service::InterviewController;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::open_storage;

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

pub(crate) async fn run(study_id: &str) -> Result<()> {
    let llm = Arc::new(LlmClient::from_env()?);
    let controller = InterviewController::new(open_storage()?, llm, PolicyConfig::from_env());

    let interview = controller.start_interview(study_id, BTreeMap::new()).await?;
    for message in &interview.messages {
        println!("Interviewer: {}\n", message.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            let abandoned = controller.abandon(&interview.id).await?;
            println!("\nInterview {} abandoned after {}s.", abandoned.id, abandoned.duration_secs);
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        let outcome = controller.respond(&interview.id, &line).await?;
        println!("\nInterviewer: {}\n", outcome.reply);
        if !outcome.interview.is_in_progress() {
            println!(
                "Interview {} complete ({}s).",
                outcome.interview.id, outcome.interview.duration_secs
            );
            return Ok(());
        }
    }
}
