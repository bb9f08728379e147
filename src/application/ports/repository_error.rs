#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("job not found: {0}")]
    NotFound(String),
    #[error("storage operation failed: {0}")]
    StorageFailed(String),
}
