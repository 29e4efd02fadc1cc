//! Append-only CSV log of [`MetricsRecord`]s.
//!
//! The header is written only when the file does not exist yet. Writers are
//! not coordinated: two processes appending to the same file can interleave
//! rows or both write a header. Run a single writer per file.

use async_trait::async_trait;
use std::path::{ Path, PathBuf };
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use super::{ MetricsRecord, CSV_COLUMNS };

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("failed to create metrics directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append metrics to '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[async_trait]
pub trait MetricsRecorder: Send + Sync {
    async fn append(&self, record: &MetricsRecord) -> Result<(), RecorderError>;
}

#[derive(Debug, Clone)]
pub struct CsvMetricsRecorder {
    path: PathBuf,
}

impl CsvMetricsRecorder {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl MetricsRecorder for CsvMetricsRecorder {
    async fn append(&self, record: &MetricsRecord) -> Result<(), RecorderError> {
        append_metrics_csv(record, &self.path).await
    }
}

pub async fn append_metrics_csv(
    record: &MetricsRecord,
    destination: &Path
) -> Result<(), RecorderError> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|source| RecorderError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_err = |source| RecorderError::Write { path: destination.to_path_buf(), source };

    let write_header = !tokio::fs::try_exists(destination).await.map_err(write_err)?;

    let mut chunk = String::new();
    if write_header {
        chunk.push_str(&CSV_COLUMNS.join(","));
        chunk.push_str("\r\n");
    }
    chunk.push_str(&record.to_csv_row());
    chunk.push_str("\r\n");

    let mut file = tokio::fs::OpenOptions
        ::new()
        .create(true)
        .append(true)
        .open(destination).await
        .map_err(write_err)?;

    file.write_all(chunk.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)?;
    Ok(())
}
