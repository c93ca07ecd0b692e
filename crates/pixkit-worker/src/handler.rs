//! Worker thread loop.

use crate::messages::{JobId, JobReply, JobRequest, WorkerMsg};
use crate::{WorkerError, WorkerResult};
use pixkit_core::PixelBuffer;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Runs queued jobs one at a time until shutdown.
pub(crate) struct JobHandler {
    rx: Receiver<WorkerMsg>,
    name: String,
}

impl JobHandler {
    pub(crate) fn new(rx: Receiver<WorkerMsg>, name: String) -> Self {
        Self { rx, name }
    }

    /// Main loop. Returns on `Shutdown` or when every sender is gone.
    pub(crate) fn run(self) {
        debug!(worker = %self.name, "Worker started");

        while let Ok(msg) = self.rx.recv() {
            match msg {
                WorkerMsg::Shutdown => break,
                WorkerMsg::Job { id, request, reply } => self.handle(id, request, reply),
            }
        }

        debug!(worker = %self.name, "Worker shutdown");
    }

    fn handle(&self, id: JobId, request: JobRequest, reply: Sender<JobReply>) {
        let kind = request.name();
        let (width, height) = request.buffer().dimensions();
        trace!(worker = %self.name, job = %id, kind, width, height, "Job started");

        let start = Instant::now();
        let result = run_guarded(request);
        let elapsed = start.elapsed();

        match &result {
            Ok(_) => debug!(worker = %self.name, job = %id, kind, ?elapsed, "Job done"),
            Err(e) => warn!(worker = %self.name, job = %id, kind, error = %e, "Job failed"),
        }

        if reply.send(JobReply { id, result, elapsed }).is_err() {
            // caller dropped its PendingJob
            trace!(worker = %self.name, job = %id, "Reply discarded");
        }
    }
}

/// Runs the engine, turning a panic into an error so the worker survives.
fn run_guarded(request: JobRequest) -> WorkerResult<PixelBuffer> {
    match catch_unwind(AssertUnwindSafe(|| request.execute())) {
        Ok(result) => result.map_err(WorkerError::from),
        Err(payload) => Err(WorkerError::JobPanicked(panic_message(payload))),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
