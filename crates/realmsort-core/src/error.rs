//! Error types for the realm sorter.

/// Error type covering storage access and stream decoding failures.
///
/// A missing source object ([`SortError::NoSuchKey`]) is the only variant
/// the orchestrator treats as benign; everything else is fatal for the
/// batch being processed.
#[derive(Debug, thiserror::Error)]
pub enum SortError {
    /// The requested object does not exist in storage.
    #[error("no such key: {key}")]
    NoSuchKey {
        /// The key that was not found.
        key: String,
    },

    /// Reading or decompressing the source body failed.
    #[error("failed to decode source body: {0}")]
    Decode(#[source] std::io::Error),

    /// Compressing an output buffer failed.
    #[error("failed to compress output: {0}")]
    Compress(#[source] std::io::Error),

    /// Storage backend failure with context.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl SortError {
    /// Whether this error means the object vanished before it was fetched.
    #[must_use]
    pub fn is_no_such_key(&self) -> bool {
        matches!(self, Self::NoSuchKey { .. })
    }
}

/// Convenience result type for sorter operations.
pub type SortResult<T> = Result<T, SortError>;
