//! Cancellable explanation requests
//!
//! An explanation runs on a worker thread while the caller stays
//! interactive. Dropping the task cancels the request context: the
//! worker's late-arriving result has nowhere to go and is discarded, so
//! a closed request can never deliver.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::ai::{Explain, ExplainError};
use crate::entities::Term;

/// One in-flight explanation request
pub struct ExplanationTask {
    rx: mpsc::Receiver<Result<String, ExplainError>>,
}

impl ExplanationTask {
    /// Spawn a request against the given provider.
    ///
    /// The task owns its own copy of the term; repository state is never
    /// shared with the worker.
    pub fn spawn<E>(provider: Arc<E>, term: Term) -> Self
    where
        E: Explain + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result = provider.explain(&term);
            // The receiver may already be gone (request cancelled); the
            // stale result is dropped on the floor.
            let _ = tx.send(result);
        });
        Self { rx }
    }

    /// Non-blocking poll: the result if the worker has finished
    pub fn try_result(&self) -> Option<Result<String, ExplainError>> {
        self.rx.try_recv().ok()
    }

    /// Block until the worker finishes.
    ///
    /// Returns None only if the worker thread died without reporting.
    pub fn wait(self) -> Option<Result<String, ExplainError>> {
        self.rx.recv().ok()
    }
}
