//! Submission lifecycle: the single source of truth for the email form.
//!
//! The controller is a plain state machine. It never performs I/O itself;
//! `submit` hands back a [`SubmissionRequest`] for the caller to dispatch and
//! the caller feeds the outcome back through [`SubmissionController::resolve`].

use std::fmt;

use shared::domain::ClassificationResult;
use tracing::{debug, info, warn};

use crate::{error::ProcessError, validator::can_submit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle {
        draft_text: String,
    },
    Processing {
        draft_text: String,
    },
    Succeeded {
        draft_text: String,
        result: ClassificationResult,
    },
    Failed {
        draft_text: String,
        error_message: String,
    },
}

impl Default for SubmissionState {
    fn default() -> Self {
        Self::Idle {
            draft_text: String::new(),
        }
    }
}

impl SubmissionState {
    pub fn draft_text(&self) -> &str {
        match self {
            Self::Idle { draft_text }
            | Self::Processing { draft_text }
            | Self::Succeeded { draft_text, .. }
            | Self::Failed { draft_text, .. } => draft_text,
        }
    }

    fn draft_text_mut(&mut self) -> &mut String {
        match self {
            Self::Idle { draft_text }
            | Self::Processing { draft_text }
            | Self::Succeeded { draft_text, .. }
            | Self::Failed { draft_text, .. } => draft_text,
        }
    }

    pub fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { error_message, .. } => Some(error_message),
            _ => None,
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "idle",
            Self::Processing { .. } => "processing",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// One remote call the caller must dispatch on behalf of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub attempt: AttemptId,
    pub email_content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The attempt was superseded by `clear` or a newer `submit`.
    Stale,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    validation_notice: Option<String>,
    last_attempt: u64,
    current_attempt: Option<AttemptId>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn draft_text(&self) -> &str {
        self.state.draft_text()
    }

    pub fn validation_notice(&self) -> Option<&str> {
        self.validation_notice.as_deref()
    }

    pub fn current_attempt(&self) -> Option<AttemptId> {
        self.current_attempt
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing()
    }

    /// Gates the submit action in the view.
    pub fn can_submit(&self) -> bool {
        can_submit(self.draft_text())
    }

    /// Replaces the draft. The active variant and any in-flight attempt are untouched.
    pub fn edit(&mut self, text: impl Into<String>) {
        *self.state.draft_text_mut() = text.into();
        self.validation_notice = None;
    }

    pub fn submit(&mut self) -> Result<SubmissionRequest, ProcessError> {
        if !self.can_submit() {
            let err = ProcessError::Validation;
            self.validation_notice = Some(err.to_string());
            debug!(state = self.state.name(), "submit rejected: blank draft");
            return Err(err);
        }

        if let Some(previous) = self.current_attempt {
            debug!(attempt = %previous, "superseding in-flight attempt");
        }

        self.last_attempt += 1;
        let attempt = AttemptId(self.last_attempt);
        let draft_text = std::mem::take(self.state.draft_text_mut());
        let email_content = draft_text.clone();

        self.state = SubmissionState::Processing { draft_text };
        self.validation_notice = None;
        self.current_attempt = Some(attempt);

        info!(
            attempt = %attempt,
            draft_len = email_content.len(),
            "submission dispatched"
        );
        Ok(SubmissionRequest {
            attempt,
            email_content,
        })
    }

    pub fn on_success(&mut self, attempt: AttemptId, result: ClassificationResult) -> Resolution {
        self.resolve(attempt, Ok(result))
    }

    pub fn on_failure(&mut self, attempt: AttemptId, error: ProcessError) -> Resolution {
        self.resolve(attempt, Err(error))
    }

    /// Applies an attempt's outcome if that attempt is still the current one.
    pub fn resolve(
        &mut self,
        attempt: AttemptId,
        outcome: Result<ClassificationResult, ProcessError>,
    ) -> Resolution {
        if self.current_attempt != Some(attempt) || !self.state.is_processing() {
            debug!(
                attempt = %attempt,
                current = ?self.current_attempt,
                state = self.state.name(),
                "discarding stale resolution"
            );
            return Resolution::Stale;
        }

        self.current_attempt = None;
        let draft_text = std::mem::take(self.state.draft_text_mut());
        self.state = match outcome {
            Ok(result) => {
                info!(
                    attempt = %attempt,
                    classification = %result.classification,
                    "submission succeeded"
                );
                SubmissionState::Succeeded { draft_text, result }
            }
            Err(err) => {
                warn!(attempt = %attempt, error = ?err, "submission failed");
                SubmissionState::Failed {
                    draft_text,
                    error_message: err.failure_message(),
                }
            }
        };
        Resolution::Applied
    }

    /// Back to an empty `Idle` form; any in-flight attempt becomes stale.
    pub fn clear(&mut self) {
        if let Some(attempt) = self.current_attempt.take() {
            debug!(attempt = %attempt, "clear abandons in-flight attempt");
        }
        self.state = SubmissionState::default();
        self.validation_notice = None;
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
