//! Error types for background jobs.

use pixkit_ops::OpsError;
use std::time::Duration;
use thiserror::Error;

/// Error type for background jobs.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The engine returned an error.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// The engine panicked. Holds the panic message.
    #[error("job panicked: {0}")]
    JobPanicked(String),

    /// The worker thread is gone and no reply will come.
    #[error("worker disconnected")]
    Disconnected,

    /// No reply within the given time.
    #[error("no reply within {0:?}")]
    Timeout(Duration),

    /// The worker thread could not be started.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Result type for background jobs.
pub type WorkerResult<T> = Result<T, WorkerError>;
