//! Convoca CLI - document checklists and deadlines from the terminal
//!
//! Reads backend-shaped JSON or talks to the REST API directly.

mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_today;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        tracing::debug!("command failed: {error:?}");
        eprintln!("Error: {}", error.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "convoca=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Summary { file, json } => {
            let today = resolve_today(cli.today.as_deref())?;
            commands::summary::run_summary(&file, json, today)?;
        }
        Commands::Dashboard { file, json } => {
            let today = resolve_today(cli.today.as_deref())?;
            commands::dashboard::run_dashboard(&file, json, today)?;
        }
        Commands::Permissions {
            admin,
            collaborator,
            assigned,
            collection,
            json,
        } => {
            commands::permissions::run_permissions(
                admin,
                collaborator,
                &assigned,
                collection.as_deref(),
                json,
            )?;
        }
        Commands::History {
            file,
            format,
            output,
        } => {
            commands::export::run_history(&file, format, output.as_deref())?;
        }
        Commands::Report {
            file,
            format,
            output,
        } => {
            let today = resolve_today(cli.today.as_deref())?;
            commands::export::run_report(&file, format, output.as_deref(), today)?;
        }
        Commands::Fetch { id, json } => {
            let today = resolve_today(cli.today.as_deref())?;
            commands::fetch::run_fetch(&id, json, profile, today).await?;
        }
        Commands::Completions { shell, output } => {
            commands::completions::run_completions(shell, output.as_deref())?;
        }
        Commands::Config { command } => {
            commands::config::run_config(command, profile)?;
        }
    }

    Ok(())
}
