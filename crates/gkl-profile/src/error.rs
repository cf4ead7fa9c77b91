//! Error types for corpus retrieval
//!
//! Text retrieval is the only fallible seam in the profiling crate. The
//! error reaches the pipeline, which substitutes degraded text: the core
//! passes themselves never see a failure signal.

/// Errors during document text retrieval
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The blob could not be fetched at all
    #[error("blob unavailable at {path}: {detail}")]
    BlobUnavailable {
        /// Blob path within the container
        path: String,
        /// Collaborator-reported detail
        detail: String,
    },

    /// The blob was fetched but its text could not be extracted
    #[error("text extraction failed for {path}: {detail}")]
    ExtractionFailed {
        /// Blob path within the container
        path: String,
        /// Collaborator-reported detail
        detail: String,
    },
}

impl ExtractionError {
    /// Create a blob-unavailable error
    pub fn unavailable(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::BlobUnavailable {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create an extraction-failed error
    pub fn failed(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ExtractionError::unavailable("gov/lpa.pdf", "404");
        assert_eq!(err.to_string(), "blob unavailable at gov/lpa.pdf: 404");

        let err = ExtractionError::failed("gov/lpa.pdf", "encrypted");
        assert!(err.to_string().contains("text extraction failed"));
    }
}
