//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod dataset;
mod export;
mod preannotation;
mod project;

pub use dataset::DatasetCommands;
pub use export::ExportCommands;
pub use preannotation::PreannotationCommands;
pub use project::ProjectCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use labellerr_client::PollError;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Project management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Dataset inspection and readiness checks
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },
    /// Annotation exports
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Pre-annotation imports
    Preannotation {
        #[command(subcommand)]
        command: PreannotationCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Project { command } => project::handle_project_command(command, config).await,
        Commands::Dataset { command } => dataset::handle_dataset_command(command, config).await,
        Commands::Export { command } => export::handle_export_command(command, config).await,
        Commands::Preannotation { command } => {
            preannotation::handle_preannotation_command(command, config).await
        }
    }
}

/// Print a one-line explanation of why a wait ended early
fn print_poll_failure<E: std::fmt::Display>(what: &str, err: &PollError<E>) {
    let line = match err {
        PollError::Failed { reason, .. } => format!("✗ {} failed: {}", what, reason),
        PollError::TimedOut { attempts, elapsed } => format!(
            "✗ Timed out waiting for {} ({} checks, {:.1}s)",
            what,
            attempts,
            elapsed.as_secs_f64()
        ),
        PollError::RetriesExhausted { attempts } => {
            format!("✗ {} still running after {} checks", what, attempts)
        }
        other => format!("✗ Could not track {}: {}", what, other),
    };
    eprintln!("{}", line.red());
}
