//! Backend commands queued from UI to backend worker.

use client_core::AttemptId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Classify {
        attempt: AttemptId,
        email_content: String,
    },
    /// The attempt was cleared in the UI; its request may be dropped.
    Abandon {
        attempt: AttemptId,
    },
    FetchCategories,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Classify { .. } => "classify",
            BackendCommand::Abandon { .. } => "abandon",
            BackendCommand::FetchCategories => "fetch_categories",
        }
    }
}
