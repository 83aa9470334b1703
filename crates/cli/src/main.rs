mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use surveyplus_storage::Storage;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "surveyplus")]
#[command(about = "AI-moderated qualitative research interviews", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(short, long, default_value = "37780")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Create, list and activate studies
    Study {
        #[command(subcommand)]
        action: StudyAction,
    },
    /// Run one interview for a study in this terminal
    Interview { study_id: String },
    /// Interview counts and completion rate for a study
    Stats { study_id: String },
    /// Generate (or with --stored, print) the report for a study
    Report {
        study_id: String,
        #[arg(long)]
        stored: bool,
    },
}

#[derive(Subcommand)]
enum StudyAction {
    /// Create a draft study from a JSON file
    Create { file: PathBuf },
    List,
    Activate { id: String },
}

pub(crate) fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("SURVEYPLUS_DB_PATH") {
        return PathBuf::from(path);
    }
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("surveyplus")
        .join("surveyplus.db")
}

pub(crate) fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub(crate) fn open_storage() -> Result<Arc<Storage>> {
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    Ok(Arc::new(Storage::new(&db_path)?))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Study { action } => match action {
            StudyAction::Create { file } => commands::study::create(&file).await,
            StudyAction::List => commands::study::list().await,
            StudyAction::Activate { id } => commands::study::activate(&id).await,
        },
        Commands::Interview { study_id } => commands::interview::run(&study_id).await,
        Commands::Stats { study_id } => commands::study::stats(&study_id).await,
        Commands::Report { study_id, stored } => commands::report::run(&study_id, stored).await,
    }
}
