//! Backend-to-UI events for the desktop GUI controller.

use client_core::{AttemptId, ProcessError};
use shared::domain::{CategoryInfo, ClassificationResult};

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    /// The worker could not start; nothing will be classified until restart.
    BackendUnavailable(String),
    Resolved {
        attempt: AttemptId,
        outcome: Result<ClassificationResult, ProcessError>,
    },
    CategoriesLoaded(Vec<CategoryInfo>),
    CategoriesFailed(String),
}
