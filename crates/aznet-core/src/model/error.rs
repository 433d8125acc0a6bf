//! Snapshot ingestion errors.

/// Errors that can occur while ingesting a snapshot from the collector.
///
/// Analysis itself is infallible by design: dangling references and
/// malformed-but-well-typed values degrade the output, never abort it.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}
