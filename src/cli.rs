// src/cli.rs
use crate::core::{ConfigManager, ScoringClient};
use crate::resume::generate_resume;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "resume-gen")]
#[command(about = "Resume builder API server and DOCX renderer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Start the HTTP API server (default)
    Serve,
    /// Render a resume JSON file to a DOCX document
    Render {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long, default_value = "resume.docx")]
        output: PathBuf,
    },
    /// Score a resume text file against a job description file
    Score {
        #[arg(long)]
        resume: PathBuf,
        #[arg(long)]
        job: PathBuf,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = ConfigManager::load()?;
            start_web_server(config).await
        }

        Command::Render { input, output } => {
            let content = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("Failed to read input: {}", input.display()))?;
            let raw: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("Input is not valid JSON: {}", input.display()))?;

            let written = tokio::task::spawn_blocking(move || generate_resume(&raw, &output))
                .await
                .context("Render task failed")??;

            info!("Rendered {} to {}", input.display(), written.display());
            println!("✓ Resume written to {}", written.display());
            Ok(())
        }

        Command::Score { resume, job } => {
            let config = ConfigManager::load()?;
            let client = ScoringClient::from_config(&config.scoring)?
                .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY is not set"))?;

            let resume_text = tokio::fs::read_to_string(&resume)
                .await
                .with_context(|| format!("Failed to read resume: {}", resume.display()))?;
            let job_text = tokio::fs::read_to_string(&job)
                .await
                .with_context(|| format!("Failed to read job description: {}", job.display()))?;

            let result = client.score(&resume_text, &job_text).await?;
            match result.score {
                Some(score) => println!("Score: {}/100", score),
                None => println!("Score: n/a"),
            }
            println!("{}", result.analysis);
            Ok(())
        }
    }
}
