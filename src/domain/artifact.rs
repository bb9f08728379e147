use std::path::Path;

use super::{JobId, StoragePath};

/// The uploaded audio payload staged on disk for one job. Exclusively owned
/// by that job; deleted when the job reaches a terminal state, success or
/// failure.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    pub storage_path: StoragePath,
    pub filename: String,
    pub media_type: String,
    pub size_bytes: u64,
}

impl AudioArtifact {
    pub fn new(
        job_id: &JobId,
        filename: impl Into<String>,
        media_type: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        let filename = filename.into();
        Self {
            storage_path: StoragePath::new(job_id, &filename),
            filename,
            media_type: media_type.into(),
            size_bytes,
        }
    }

    /// Lowercased filename extension including the leading dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
    }
}
