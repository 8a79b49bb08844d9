use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    builtin_catalogue, load_settings, style_for, ClassificationService,
    HttpClassificationService, SubmissionSession, SubmissionState,
};
use shared::domain::{CategoryInfo, ClassificationResult};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "email-triage", about = "Classify pasted email text with the triage service")]
struct Args {
    /// Overrides the service url from email_triage.toml / environment.
    #[arg(long, global = true)]
    service_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit one email, read from --file or stdin.
    Process {
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the result as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the categories the service classifies into.
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(service_url) = args.service_url {
        settings.service_url = service_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(timeout_secs);
    }
    let service = Arc::new(HttpClassificationService::from_settings(&settings)?);
    tracing::info!(service_url = service.service_url(), "using classification service");

    match args.command {
        Command::Process { file, json } => {
            let draft = read_draft(file).await?;
            let mut session = SubmissionSession::new(service);
            session.edit(draft);
            if let Err(err) = session.submit() {
                bail!("{err}");
            }
            let state = session.settle().await;
            match state {
                SubmissionState::Succeeded { result, .. } if json => {
                    println!("{}", serde_json::to_string_pretty(&result_json(result))?);
                }
                SubmissionState::Succeeded { .. } => print!("{}", render_state(state)),
                SubmissionState::Failed { error_message, .. } => bail!("{error_message}"),
                other => bail!("submission ended in unexpected state '{}'", other.name()),
            }
        }
        Command::Categories => {
            let categories = match service.list_categories().await {
                Ok(categories) if !categories.is_empty() => categories,
                Ok(_) => builtin_catalogue(),
                Err(err) => {
                    tracing::warn!("falling back to built-in categories: {err}");
                    builtin_catalogue()
                }
            };
            print!("{}", render_categories(&categories));
        }
    }

    Ok(())
}

async fn read_draft(file: Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read email from '{}'", path.display())),
        None => {
            let mut draft = String::new();
            tokio::io::stdin()
                .read_to_string(&mut draft)
                .await
                .context("failed to read email from stdin")?;
            Ok(draft)
        }
    }
}

fn result_json(result: &ClassificationResult) -> serde_json::Value {
    serde_json::json!({
        "sender_name": result.sender_name,
        "greeting": result.greeting,
        "classification": result.classification,
        "category_token": style_for(&result.classification).token(),
        "suggested_label": result.suggested_label,
        "email_snippet": result.email_snippet,
    })
}

fn render_state(state: &SubmissionState) -> String {
    match state {
        SubmissionState::Idle { .. } => "No results yet. Process an email to see the analysis.\n"
            .to_string(),
        SubmissionState::Processing { .. } => "Processing...\n".to_string(),
        SubmissionState::Succeeded { result, .. } => {
            let style = style_for(&result.classification);
            format!(
                "Name:            {}\nGreeting:        {}\nClassification:  {} [{}]\nSuggested Label: {}\nEmail Snippet:   \"{}\"\n",
                result.sender_display_name().unwrap_or("Not found"),
                result.greeting,
                result.classification,
                style.token(),
                result.suggested_label,
                result.email_snippet,
            )
        }
        SubmissionState::Failed { error_message, .. } => format!("{error_message}\n"),
    }
}

fn render_categories(categories: &[CategoryInfo]) -> String {
    categories
        .iter()
        .map(|category| {
            format!(
                "{:<22} [{}] {}\n",
                category.label,
                style_for(&category.label).token(),
                category.description
            )
        })
        .collect()
}
