//! Message types for caller <-> worker communication.
//!
//! The caller sends a [`JobRequest`] and gets exactly one [`JobReply`]
//! back, whatever the engine.

use crate::WorkerResult;
use pixkit_color::Adjustment;
use pixkit_core::{PixelBuffer, Point, Rgb};
use pixkit_ops::{adjusted, flood_filled, pixelated, BlockSize, OpsResult};
use std::fmt;
use std::sync::mpsc::Sender;
use std::time::Duration;

/// Identifier of a job, unique per worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(pub(crate) u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// Work to run on a worker. Owns the buffer it operates on.
#[derive(Debug, Clone)]
pub enum JobRequest {
    /// Block mosaic.
    Pixelate {
        /// Input image
        buffer: PixelBuffer,
        /// Tile size
        block: BlockSize,
    },

    /// Lightness / saturation shift.
    Adjust {
        /// Input image
        buffer: PixelBuffer,
        /// Channel and delta
        adjustment: Adjustment,
    },

    /// Bucket fill.
    FloodFill {
        /// Input image
        buffer: PixelBuffer,
        /// Start pixel
        seed: Point,
        /// Fill color
        color: Rgb,
    },

    /// Panics inside the engine call.
    #[cfg(test)]
    Panic(PixelBuffer),
}

impl JobRequest {
    /// Engine name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pixelate { .. } => "pixelate",
            Self::Adjust { .. } => "adjust",
            Self::FloodFill { .. } => "flood_fill",
            #[cfg(test)]
            Self::Panic(_) => "panic",
        }
    }

    /// The buffer the job will work on.
    pub fn buffer(&self) -> &PixelBuffer {
        match self {
            Self::Pixelate { buffer, .. }
            | Self::Adjust { buffer, .. }
            | Self::FloodFill { buffer, .. } => buffer,
            #[cfg(test)]
            Self::Panic(buffer) => buffer,
        }
    }

    /// Runs the engine on the calling thread.
    pub fn execute(self) -> OpsResult<PixelBuffer> {
        match self {
            Self::Pixelate { buffer, block } => pixelated(buffer, block),
            Self::Adjust { buffer, adjustment } => adjusted(buffer, adjustment),
            Self::FloodFill {
                buffer,
                seed,
                color,
            } => flood_filled(buffer, seed, color),
            #[cfg(test)]
            Self::Panic(_) => panic!("engine blew up"),
        }
    }
}

/// The one reply shape for every job.
#[derive(Debug)]
pub struct JobReply {
    /// Job this replies to
    pub id: JobId,
    /// New buffer, or why there is none
    pub result: WorkerResult<PixelBuffer>,
    /// Time spent in the engine
    pub elapsed: Duration,
}

/// Messages from callers to the worker thread.
pub(crate) enum WorkerMsg {
    /// Run a job and send the reply on `reply`.
    Job {
        id: JobId,
        request: JobRequest,
        reply: Sender<JobReply>,
    },

    /// Stop after the jobs already queued.
    Shutdown,
}
