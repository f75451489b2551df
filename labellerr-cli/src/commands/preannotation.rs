//! Pre-annotation command handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use labellerr_client::LabellerrClient;
use labellerr_core::domain::preannotation::{
    AnnotationFormat, PreannotationJob, PreannotationStatus,
};

use super::print_poll_failure;
use crate::config::Config;
use crate::types::PollArgs;

/// Pre-annotation subcommands
#[derive(Subcommand)]
pub enum PreannotationCommands {
    /// Upload a file of existing annotations into a project
    Upload {
        /// Project ID
        project_id: String,

        /// Annotation format: json, coco_json, csv or png
        format: AnnotationFormat,

        /// Annotation file to upload
        file: PathBuf,

        /// Return as soon as the upload is accepted
        #[arg(long)]
        no_wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Show the status of an import job
    Status {
        /// Project ID
        project_id: String,
        /// Job ID returned by `preannotation upload`
        job_id: String,
    },
}

/// Handle pre-annotation commands
///
/// # Arguments
/// * `command` - The pre-annotation command to execute
/// * `config` - The CLI configuration
pub async fn handle_preannotation_command(
    command: PreannotationCommands,
    config: &Config,
) -> Result<()> {
    let client = config.client()?;

    match command {
        PreannotationCommands::Upload {
            project_id,
            format,
            file,
            no_wait,
            poll,
        } => upload(&client, &project_id, format, &file, no_wait, &poll).await,
        PreannotationCommands::Status { project_id, job_id } => {
            let job = PreannotationJob { job_id, project_id };
            let status = client
                .preannotation_status(&job)
                .await
                .with_context(|| format!("Failed to fetch status of job {}", job.job_id))?;
            print_status(&status);
            Ok(())
        }
    }
}

async fn upload(
    client: &LabellerrClient,
    project_id: &str,
    format: AnnotationFormat,
    file: &Path,
    no_wait: bool,
    poll: &PollArgs,
) -> Result<()> {
    let job = client
        .upload_preannotation(project_id, format, file)
        .await
        .with_context(|| format!("Failed to upload {}", file.display()))?;

    println!("{}", "✓ Pre-annotations uploaded".green().bold());
    println!("  Job ID:  {}", job.job_id.cyan());
    println!("  Project: {}", job.project_id.dimmed());

    if no_wait {
        return Ok(());
    }

    println!("{}", "Waiting for the import to finish...".dimmed());
    match client.wait_for_preannotation(&job, poll.config()).await {
        Ok(status) => {
            println!("{}", "✓ Import completed".green().bold());
            print_status(&status);
            Ok(())
        }
        Err(err) => {
            print_poll_failure(&format!("pre-annotation job {}", job.job_id), &err);
            Err(err).context("Pre-annotation import did not complete")
        }
    }
}

fn print_status(status: &PreannotationStatus) {
    println!("  Status:  {}", status.status.yellow());
    for (key, value) in &status.extra {
        println!("  {} = {}", key.dimmed(), value);
    }
}
