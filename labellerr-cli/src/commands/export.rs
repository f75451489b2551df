//! Export command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use labellerr_client::{Export, LabellerrClient};
use labellerr_core::domain::export::ExportStatus;
use labellerr_core::dto::export::ExportConfig;

use super::print_poll_failure;
use crate::config::Config;
use crate::types::PollArgs;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Start a local export of a project's annotations
    Create {
        /// Project ID
        project_id: String,

        /// Export name
        #[arg(long)]
        name: String,

        /// Export description
        #[arg(long, default_value = "Exported from the labellerr CLI")]
        description: String,

        /// Export format (e.g. json, coco_json, csv)
        #[arg(long)]
        format: String,

        /// Annotation statuses to include (repeatable)
        #[arg(long = "status", default_value = "accepted")]
        statuses: Vec<String>,

        /// Wait for the export to be generated
        #[arg(long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Show the current status of an export
    Status {
        /// Project ID
        project_id: String,
        /// Report ID returned by `export create`
        report_id: String,
    },
    /// Wait until an export has been generated
    Wait {
        /// Project ID
        project_id: String,
        /// Report ID returned by `export create`
        report_id: String,

        #[command(flatten)]
        poll: PollArgs,
    },
}

/// Handle export commands
///
/// # Arguments
/// * `command` - The export command to execute
/// * `config` - The CLI configuration
pub async fn handle_export_command(command: ExportCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ExportCommands::Create {
            project_id,
            name,
            description,
            format,
            statuses,
            wait,
            poll,
        } => {
            let export_config = ExportConfig {
                export_name: name,
                export_description: description,
                export_format: format,
                statuses,
                export_destination: Default::default(),
                connection_id: None,
                export_folder_path: None,
            };
            let export = create_export(&client, &project_id, &export_config).await?;
            if wait {
                wait_for_export(&export, &poll).await?;
            }
            Ok(())
        }
        ExportCommands::Status {
            project_id,
            report_id,
        } => show_status(&client.export(project_id, report_id)).await,
        ExportCommands::Wait {
            project_id,
            report_id,
            poll,
        } => wait_for_export(&client.export(project_id, report_id), &poll).await,
    }
}

async fn create_export(
    client: &LabellerrClient,
    project_id: &str,
    config: &ExportConfig,
) -> Result<Export> {
    let export = client
        .create_local_export(project_id, config)
        .await
        .with_context(|| format!("Failed to start export of project {}", project_id))?;

    println!("{}", "✓ Export started".green().bold());
    println!("  Report ID: {}", export.report_id().cyan());
    println!("  Project:   {}", export.project_id().dimmed());
    Ok(export)
}

async fn show_status(export: &Export) -> Result<()> {
    let status = export
        .status()
        .await
        .with_context(|| format!("Failed to fetch status of export {}", export.report_id()))?;
    print_export_status(&status);
    Ok(())
}

async fn wait_for_export(export: &Export, poll: &PollArgs) -> Result<()> {
    println!(
        "{}",
        format!("Waiting for export {}...", export.report_id()).dimmed()
    );

    match export.wait(poll.config()).await {
        Ok(status) => {
            println!("{}", "✓ Export is ready".green().bold());
            print_export_status(&status);
            Ok(())
        }
        Err(err) => {
            print_poll_failure(&format!("export {}", export.report_id()), &err);
            Err(err).context("Export did not complete")
        }
    }
}

fn print_export_status(status: &ExportStatus) {
    let label = if status.export_status.is_empty() {
        "pending"
    } else {
        status.export_status.as_str()
    };
    println!("  Report:    {}", status.report_id.cyan());
    println!("  Status:    {}", label.yellow());
    println!(
        "  Completed: {}",
        if status.is_completed {
            "✓".green()
        } else {
            "✗".red()
        }
    );
    for (key, value) in &status.extra {
        println!("  {} = {}", key.dimmed(), value);
    }
}
