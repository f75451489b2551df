//! Local file collection and dataset uploads

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use labellerr_core::DataType;
use labellerr_core::ValidationError;
use labellerr_core::dto::dataset::{DatasetSource, MAX_BYTES_PER_DATASET, MAX_FILES_PER_DATASET};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::LabellerrClient;
use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, FilePart};

/// Upper bound on the bytes sent in one upload request
pub const BATCH_MAX_BYTES: u64 = 15 * 1024 * 1024;

/// Upper bound on the files sent in one upload request
pub const BATCH_MAX_FILES: usize = 900;

/// Upload requests in flight at once
const UPLOAD_CONCURRENCY: usize = 8;

/// A local file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Outcome of a completed upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub files: usize,
    pub bytes: u64,
    pub batches: usize,
}

/// Resolve a dataset source into the files to upload
///
/// Folders are walked recursively. Files whose extension does not belong to
/// `data_type` are skipped. Fails when nothing is left or when the selection
/// exceeds the per-dataset limits.
pub async fn collect_files(source: &DatasetSource, data_type: DataType) -> Result<Vec<LocalFile>> {
    let (field, candidates) = match source {
        DatasetSource::Files(files) => ("files_to_upload", files.clone()),
        DatasetSource::Folder(folder) => ("folder_to_upload", walk(folder).await?),
    };

    let mut selected = Vec::with_capacity(candidates.len());
    for path in candidates {
        if !data_type.accepts(&path) {
            debug!("Skipping {} (not a {} file)", path.display(), data_type);
            continue;
        }
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| ClientError::io(&path, e))?;
        selected.push(LocalFile {
            path,
            size: metadata.len(),
        });
    }

    if selected.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("No {} files found to upload", data_type),
        )
        .into());
    }

    check_limits(field, &selected)?;
    Ok(selected)
}

fn check_limits(field: &str, files: &[LocalFile]) -> Result<()> {
    if files.len() > MAX_FILES_PER_DATASET {
        return Err(ValidationError::new(
            field,
            format!(
                "Total file count: {} where limit is {} is too many files to upload",
                files.len(),
                MAX_FILES_PER_DATASET
            ),
        )
        .into());
    }

    let total: u64 = files.iter().map(|f| f.size).sum();
    if total > MAX_BYTES_PER_DATASET {
        return Err(ValidationError::new(
            field,
            format!(
                "Total file size: {:.1}MB where the limit is {:.1}MB is too large to upload",
                total as f64 / 1024.0 / 1024.0,
                MAX_BYTES_PER_DATASET as f64 / 1024.0 / 1024.0
            ),
        )
        .into());
    }

    Ok(())
}

async fn walk(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| ClientError::io(&dir, e))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ClientError::io(&dir, e))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| ClientError::io(&path, e))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Group files into upload batches bounded by [`BATCH_MAX_BYTES`] and [`BATCH_MAX_FILES`]
///
/// A single file larger than the byte bound gets a batch of its own.
pub fn batches(files: &[LocalFile]) -> Vec<Vec<LocalFile>> {
    let mut batches = Vec::new();
    let mut current: Vec<LocalFile> = Vec::new();
    let mut current_size = 0;

    for file in files {
        if !current.is_empty()
            && (current_size + file.size > BATCH_MAX_BYTES || current.len() >= BATCH_MAX_FILES)
        {
            batches.push(std::mem::take(&mut current));
            current_size = 0;
        }
        current_size += file.size;
        current.push(file.clone());
    }

    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

impl LabellerrClient {
    // =============================================================================
    // Dataset Uploads
    // =============================================================================

    /// Upload local files into an existing dataset
    ///
    /// # Arguments
    /// * `dataset_id` - Target dataset
    /// * `data_type` - Data type of the dataset; selects the accepted extensions
    /// * `source` - Files or folder to upload
    ///
    /// # Returns
    /// Counts of what was sent. Any failed batch fails the whole upload.
    pub async fn upload_files(
        &self,
        dataset_id: &str,
        data_type: DataType,
        source: &DatasetSource,
    ) -> Result<UploadSummary> {
        let files = collect_files(source, data_type).await?;
        self.upload_collected(dataset_id, data_type, &files).await
    }

    pub(crate) async fn upload_collected(
        &self,
        dataset_id: &str,
        data_type: DataType,
        files: &[LocalFile],
    ) -> Result<UploadSummary> {
        let bytes = files.iter().map(|f| f.size).sum();
        let batches = batches(files);
        info!(
            "Uploading {} file(s) ({} bytes) to {} in {} batch(es)",
            files.len(),
            bytes,
            dataset_id,
            batches.len()
        );

        let semaphore = Arc::new(Semaphore::new(UPLOAD_CONCURRENCY));
        let failed = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(batches.len());

        for batch in &batches {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| {
                    ClientError::InternalError(format!("Upload scheduler closed: {}", e))
                })?;
            // A failing batch raises the flag before giving its permit back
            if failed.load(Ordering::SeqCst) {
                warn!(
                    "Upload to {} failed; skipping {} remaining batch(es)",
                    dataset_id,
                    batches.len() - handles.len()
                );
                break;
            }

            let client = self.clone();
            let dataset_id = dataset_id.to_string();
            let batch = batch.clone();
            let failed = Arc::clone(&failed);

            handles.push(tokio::spawn(async move {
                let result = client.upload_batch(&dataset_id, data_type, &batch).await;
                if result.is_err() {
                    failed.store(true, Ordering::SeqCst);
                }
                drop(permit);
                result
            }));
        }

        let mut first_error = None;
        let mut pending = handles.into_iter();
        for handle in pending.by_ref() {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ClientError::InternalError(format!(
                    "Upload task panicked: {}",
                    e
                ))),
            };
            if let Err(e) = outcome {
                first_error = Some(e);
                break;
            }
        }
        for handle in pending {
            handle.abort();
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(UploadSummary {
                files: files.len(),
                bytes,
                batches: batches.len(),
            }),
        }
    }

    async fn upload_batch(
        &self,
        dataset_id: &str,
        data_type: DataType,
        batch: &[LocalFile],
    ) -> Result<()> {
        let mut parts = Vec::with_capacity(batch.len());
        for file in batch {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| ClientError::io(&file.path, e))?;
            let file_name = file
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            parts.push(FilePart { file_name, bytes });
        }

        let request = ApiRequest::post("/connectors/upload/local")
            .query("data_type", data_type)
            .query("dataset_id", dataset_id)
            .query("project_id", "null")
            .query("project_independent", "false")
            .files(parts);

        self.send(request).await?;
        debug!("Uploaded batch of {} file(s) to {}", batch.len(), dataset_id);
        Ok(())
    }
}
