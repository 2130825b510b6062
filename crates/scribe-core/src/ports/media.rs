//! Media storage port.

use async_trait::async_trait;
use thiserror::Error;

/// Persistence seam for uploaded thumbnails and avatars.
///
/// Failure handling is asymmetric on purpose: a failed `store` aborts the
/// surrounding request, while `remove` is best-effort cleanup that must never
/// block an otherwise-successful state transition.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist an upload under a collision-resistant filename derived from
    /// `original_name`. Returns the generated filename.
    async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, MediaError>;

    /// Best-effort delete of a previously stored file. Failures are logged
    /// by the implementation and never surfaced.
    async fn remove(&self, filename: &str);
}

/// Failure writing an upload to the media area.
#[derive(Debug, Error)]
#[error("failed to store {filename}: {message}")]
pub struct MediaError {
    pub filename: String,
    pub message: String,
}
