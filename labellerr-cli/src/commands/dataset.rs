//! Dataset command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use labellerr_client::LabellerrClient;
use labellerr_core::domain::dataset::{Dataset, DatasetStatus};

use super::print_poll_failure;
use crate::config::Config;
use crate::types::PollArgs;

/// Dataset subcommands
#[derive(Subcommand)]
pub enum DatasetCommands {
    /// Get dataset details
    Get {
        /// Dataset ID
        id: String,
    },
    /// Wait until a dataset has finished processing
    Wait {
        /// Dataset ID
        id: String,

        #[command(flatten)]
        poll: PollArgs,
    },
}

/// Handle dataset commands
///
/// # Arguments
/// * `command` - The dataset command to execute
/// * `config` - The CLI configuration
pub async fn handle_dataset_command(command: DatasetCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        DatasetCommands::Get { id } => get_dataset(&client, &id).await,
        DatasetCommands::Wait { id, poll } => wait_for_dataset(&client, &id, &poll).await,
    }
}

/// Get and display a single dataset
async fn get_dataset(client: &LabellerrClient, id: &str) -> Result<()> {
    let dataset = client
        .get_dataset(id)
        .await
        .with_context(|| format!("Failed to fetch dataset {}", id))?;

    print_dataset_details(&dataset);
    Ok(())
}

/// Block until the dataset is ready or the wait gives up
async fn wait_for_dataset(client: &LabellerrClient, id: &str, poll: &PollArgs) -> Result<()> {
    println!("{}", format!("Waiting for dataset {}...", id).dimmed());

    match client.wait_for_dataset(id, poll.config()).await {
        Ok(dataset) => {
            println!("{}", "✓ Dataset is ready".green().bold());
            print_dataset_details(&dataset);
            Ok(())
        }
        Err(err) => {
            print_poll_failure(&format!("dataset {}", id), &err);
            Err(err).context("Dataset is not ready")
        }
    }
}

fn colorize_status(status: DatasetStatus) -> ColoredString {
    match status {
        DatasetStatus::Ready => status.to_string().green(),
        DatasetStatus::Processing => status.to_string().yellow(),
        DatasetStatus::Failed(_) => status.to_string().red(),
    }
}

/// Print detailed dataset information
fn print_dataset_details(dataset: &Dataset) {
    println!("{}", "Dataset Details:".bold());
    println!("  ID:        {}", dataset.dataset_id.cyan());
    println!("  Name:      {}", dataset.name.bold());
    println!("  Data type: {}", dataset.data_type);
    println!("  Status:    {}", colorize_status(dataset.status()));
    if let Some(files) = dataset.files_count {
        println!("  Files:     {}", files);
    }
    if let Some(created_at) = dataset.created_at {
        println!("  Created:   {}", created_at.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(description) = &dataset.description {
        println!("  About:     {}", description.dimmed());
    }
}
