//! Project command handlers
//!
//! Creates projects from a JSON payload and shows project details.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use labellerr_client::{LabellerrClient, WorkflowError, WorkflowOptions};
use labellerr_core::dto::project::ProjectPayload;

use super::print_poll_failure;
use crate::config::Config;
use crate::types::PollArgs;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a dataset from local files and a project over it
    Create {
        /// Path to the JSON project payload
        #[arg(short, long)]
        payload: PathBuf,

        /// How to wait for the dataset to finish processing
        #[command(flatten)]
        poll: PollArgs,
    },
    /// Get project details
    Get {
        /// Project ID
        id: String,
    },
}

/// Handle project commands
///
/// # Arguments
/// * `command` - The project command to execute
/// * `config` - The CLI configuration
pub async fn handle_project_command(command: ProjectCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ProjectCommands::Create { payload, poll } => {
            create_project(&client, &payload, &poll).await
        }
        ProjectCommands::Get { id } => get_project(&client, &id).await,
    }
}

fn read_payload(path: &Path) -> Result<ProjectPayload> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse payload file: {}", path.display()))
}

/// Run the project creation workflow
async fn create_project(client: &LabellerrClient, path: &Path, poll: &PollArgs) -> Result<()> {
    let payload = read_payload(path)?;

    let options = WorkflowOptions {
        dataset_poll: poll.config_or(WorkflowOptions::default().dataset_poll),
    };

    println!(
        "{}",
        format!("Creating project '{}'...", payload.project_name).bold()
    );

    match client.create_project_with_dataset(&payload, options).await {
        Ok(created) => {
            println!("{}", "✓ Project created successfully!".green().bold());
            println!("  Project ID:  {}", created.project_id.cyan());
            println!("  Dataset ID:  {}", created.dataset_id.dimmed());
            println!("  Template ID: {}", created.template_id.dimmed());
            println!("  Files:       {}", created.files_uploaded);
            Ok(())
        }
        Err(err) => {
            if let WorkflowError::DatasetNotReady { dataset_id, source } = &err {
                print_poll_failure(&format!("dataset {}", dataset_id), source);
            }
            Err(err).context("Project was not created")
        }
    }
}

/// Get and display a single project
async fn get_project(client: &LabellerrClient, id: &str) -> Result<()> {
    let kind = client
        .get_project_kind(id)
        .await
        .with_context(|| format!("Failed to fetch project {}", id))?;
    let project = kind.project();

    println!("{}", "Project Details:".bold());
    println!("  ID:        {}", project.project_id.cyan());
    println!("  Name:      {}", project.project_name.bold());
    println!("  Data type: {}", kind.data_type());
    if let Some(template_id) = &project.annotation_template_id {
        println!("  Template:  {}", template_id.dimmed());
    }
    if let Some(created_by) = &project.created_by {
        println!("  Owner:     {}", created_by);
    }
    if !kind.attached_datasets().is_empty() {
        println!("\n{}", "Datasets:".bold());
        for dataset_id in kind.attached_datasets() {
            println!("  {} {}", "▸".cyan(), dataset_id);
        }
    }

    Ok(())
}
