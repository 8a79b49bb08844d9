//! Async driver around [`SubmissionController`].
//!
//! Events are handled one at a time through `&mut self`; the remote call runs
//! as a spawned task whose outcome comes back over a channel tagged with its
//! attempt id. Superseded tasks are aborted, but correctness rests on the
//! controller's attempt check, not on the abort landing in time.

use std::sync::Arc;

use shared::domain::ClassificationResult;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{
    error::ProcessError,
    submission::{AttemptId, Resolution, SubmissionController, SubmissionState},
    ClassificationService,
};

#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub attempt: AttemptId,
    pub outcome: Result<ClassificationResult, ProcessError>,
}

struct InFlight {
    attempt: AttemptId,
    task: JoinHandle<()>,
}

pub struct SubmissionSession {
    controller: SubmissionController,
    service: Arc<dyn ClassificationService>,
    outcomes_tx: mpsc::UnboundedSender<AttemptOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<AttemptOutcome>,
    in_flight: Option<InFlight>,
}

impl SubmissionSession {
    pub fn new(service: Arc<dyn ClassificationService>) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            controller: SubmissionController::new(),
            service,
            outcomes_tx,
            outcomes_rx,
            in_flight: None,
        }
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn state(&self) -> &SubmissionState {
        self.controller.state()
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.controller.edit(text);
    }

    /// Validates and dispatches the draft. Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Result<AttemptId, ProcessError> {
        let request = self.controller.submit()?;
        self.abort_in_flight();

        let service = Arc::clone(&self.service);
        let outcomes_tx = self.outcomes_tx.clone();
        let attempt = request.attempt;
        let task = tokio::spawn(async move {
            let outcome = service.process_email(&request.email_content).await;
            if outcomes_tx.send(AttemptOutcome { attempt, outcome }).is_err() {
                debug!(attempt = %attempt, "session dropped before resolution");
            }
        });
        self.in_flight = Some(InFlight { attempt, task });
        Ok(attempt)
    }

    pub fn clear(&mut self) {
        self.abort_in_flight();
        self.controller.clear();
    }

    /// Waits for the next attempt outcome and feeds it to the controller.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        let AttemptOutcome { attempt, outcome } = self.outcomes_rx.recv().await?;
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.attempt == attempt)
        {
            self.in_flight = None;
        }
        Some(self.controller.resolve(attempt, outcome))
    }

    /// Drives resolutions until the current attempt lands. Returns immediately
    /// when nothing is in flight.
    pub async fn settle(&mut self) -> &SubmissionState {
        while self.controller.is_processing() {
            if self.next_resolution().await.is_none() {
                break;
            }
        }
        self.controller.state()
    }

    fn abort_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.task.is_finished() {
                debug!(attempt = %in_flight.attempt, "aborting superseded request");
            }
            in_flight.task.abort();
        }
    }
}

impl Drop for SubmissionSession {
    fn drop(&mut self) {
        self.abort_in_flight();
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
