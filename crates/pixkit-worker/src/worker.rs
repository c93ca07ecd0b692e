//! Worker handle and pending jobs.

use crate::handler::JobHandler;
use crate::messages::{JobId, JobReply, JobRequest, WorkerMsg};
use crate::{WorkerError, WorkerResult};
use pixkit_color::Adjustment;
use pixkit_core::{PixelBuffer, Point, Rgb};
use pixkit_ops::BlockSize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, trace};

/// A background thread running jobs in submission order.
///
/// Dropping the worker lets already queued jobs finish, then joins the
/// thread.
pub struct Worker {
    name: String,
    tx: Sender<WorkerMsg>,
    thread: Option<JoinHandle<()>>,
    next_id: AtomicU64,
}

impl Worker {
    /// Starts a worker thread with the given name.
    ///
    /// # Errors
    ///
    /// [`WorkerError::Spawn`] if the OS refuses the thread.
    pub fn spawn(name: impl Into<String>) -> WorkerResult<Self> {
        let name = name.into();
        let (tx, rx) = channel();

        let handler = JobHandler::new(rx, name.clone());
        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || handler.run())
            .map_err(WorkerError::Spawn)?;

        Ok(Self {
            name,
            tx,
            thread: Some(thread),
            next_id: AtomicU64::new(0),
        })
    }

    /// Thread name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues a job.
    ///
    /// The request's buffer goes to the worker; the returned handle keeps a
    /// copy so it can fall back to it.
    pub fn submit(&self, request: JobRequest) -> PendingJob {
        let id = JobId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let original = request.buffer().clone();
        let (reply_tx, reply_rx) = channel();

        trace!(worker = %self.name, job = %id, kind = request.name(), "Job submitted");
        let msg = WorkerMsg::Job {
            id,
            request,
            reply: reply_tx,
        };
        if self.tx.send(msg).is_err() {
            // reply_tx went down with the message, the job sees Disconnected
            error!(worker = %self.name, job = %id, "Worker thread is gone");
        }

        PendingJob {
            id,
            original,
            rx: reply_rx,
        }
    }

    /// Queues a pixelate job.
    pub fn pixelate(&self, buffer: PixelBuffer, block: BlockSize) -> PendingJob {
        self.submit(JobRequest::Pixelate { buffer, block })
    }

    /// Queues a lightness / saturation job.
    pub fn adjust(&self, buffer: PixelBuffer, adjustment: Adjustment) -> PendingJob {
        self.submit(JobRequest::Adjust { buffer, adjustment })
    }

    /// Queues a flood fill job.
    pub fn flood_fill(&self, buffer: PixelBuffer, seed: Point, color: Rgb) -> PendingJob {
        self.submit(JobRequest::FloodFill {
            buffer,
            seed,
            color,
        })
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("name", &self.name)
            .field("submitted", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        let _ = self.tx.send(WorkerMsg::Shutdown);

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!(worker = %self.name, "Worker thread panicked");
            }
        }
    }
}

/// Handle to a submitted job.
///
/// Holds the caller's original buffer until the reply arrives. A result can
/// be taken once; later polls report [`WorkerError::Disconnected`].
#[derive(Debug)]
pub struct PendingJob {
    id: JobId,
    original: PixelBuffer,
    rx: Receiver<JobReply>,
}

impl PendingJob {
    /// Job id.
    pub fn id(&self) -> JobId {
        self.id
    }

    /// The buffer as it was when submitted.
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// Non-blocking poll. `None` while the job is queued or running.
    pub fn try_wait(&self) -> Option<WorkerResult<PixelBuffer>> {
        match self.rx.try_recv() {
            Ok(reply) => Some(reply.result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WorkerError::Disconnected)),
        }
    }

    /// Blocks until the job finishes.
    pub fn wait(self) -> WorkerResult<PixelBuffer> {
        self.wait_reply()?.result
    }

    /// Blocks until the job finishes and returns the full reply.
    pub fn wait_reply(self) -> WorkerResult<JobReply> {
        self.rx.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Blocks for at most `timeout`.
    ///
    /// On [`WorkerError::Timeout`] the job keeps running and can be waited
    /// on again.
    pub fn wait_timeout(&self, timeout: Duration) -> WorkerResult<PixelBuffer> {
        match self.rx.recv_timeout(timeout) {
            Ok(reply) => reply.result,
            Err(RecvTimeoutError::Timeout) => Err(WorkerError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Waits for the job; on any failure logs it and returns the original
    /// buffer unmodified.
    pub fn resolve(self) -> PixelBuffer {
        let id = self.id;
        match self.rx.recv() {
            Ok(JobReply {
                result: Ok(buffer), ..
            }) => buffer,
            Ok(JobReply { result: Err(e), .. }) => {
                error!(job = %id, error = %e, "Job failed, keeping original buffer");
                self.original
            }
            Err(_) => {
                error!(job = %id, "Worker disconnected, keeping original buffer");
                self.original
            }
        }
    }
}
