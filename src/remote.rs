//! Calls into the document store that must not block the UI thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use folio_store::{ContactMessage, DataService, DocumentId, StoreError, StoreResult};

/// Runs contact-message inserts on a background thread per submission.
#[derive(Clone)]
pub struct SubmissionWorker {
    service: Arc<dyn DataService>,
}

impl SubmissionWorker {
    pub fn new(service: Arc<dyn DataService>) -> Self {
        Self { service }
    }

    pub fn submit(&self, message: ContactMessage) -> PendingSubmission {
        let (tx, rx) = mpsc::channel();
        let service = Arc::clone(&self.service);
        thread::spawn(move || {
            let result = service.add_contact_message(message);
            match &result {
                Ok(id) => tracing::info!(id = %id, "contact message stored"),
                Err(err) => tracing::warn!(error = %err, "contact message rejected"),
            }
            // The form may have been dropped while we were running.
            let _ = tx.send(result);
        });
        PendingSubmission { rx }
    }
}

impl std::fmt::Debug for SubmissionWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionWorker").finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct PendingSubmission {
    rx: Receiver<StoreResult<DocumentId>>,
}

impl PendingSubmission {
    /// Result of the insert if it has finished.
    pub fn try_take(&self) -> Option<StoreResult<DocumentId>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(StoreError::Disconnected)),
        }
    }

    /// Block until the insert finishes.
    pub fn wait(self) -> StoreResult<DocumentId> {
        self.rx.recv().unwrap_or(Err(StoreError::Disconnected))
    }
}
