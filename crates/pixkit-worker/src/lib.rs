//! # pixkit-worker
//!
//! Runs pixkit engines on a background thread so the caller never blocks
//! on a large buffer.
//!
//! ```text
//! caller                          worker thread
//!   │  submit(JobRequest) ──────►  queue (FIFO)
//!   │  ◄── PendingJob               │ engine under catch_unwind
//!   │                               ▼
//!   │  try_wait / wait  ◄──────── JobReply { id, result, elapsed }
//! ```
//!
//! Each job owns its buffer while it runs. The [`PendingJob`] keeps the
//! caller's copy, and [`PendingJob::resolve`] falls back to it when the
//! engine fails or panics, so a failed job never loses the source image.
//!
//! # Example
//!
//! ```rust
//! use pixkit_core::PixelBuffer;
//! use pixkit_ops::BlockSize;
//! use pixkit_worker::Worker;
//!
//! let worker = Worker::spawn("pixelate").unwrap();
//! let job = worker.pixelate(PixelBuffer::new(64, 64), BlockSize::square(8.0));
//! let out = job.resolve();
//! assert_eq!(out.dimensions(), (64, 64));
//! ```
//!
//! # Dependencies
//!
//! - `pixkit-ops` - the engines
//!
//! # Used By
//!
//! - `pixkit-cli`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod handler;
pub mod messages;
mod worker;

pub use error::{WorkerError, WorkerResult};
pub use messages::{JobId, JobReply, JobRequest};
pub use worker::{PendingJob, Worker};
