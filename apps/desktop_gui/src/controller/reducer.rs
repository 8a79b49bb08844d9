//! Applies backend events to the form model. The view only reads the model.

use client_core::{builtin_catalogue, Resolution, SubmissionController};
use shared::domain::CategoryInfo;

use crate::controller::events::UiEvent;

pub struct FormModel {
    pub controller: SubmissionController,
    pub categories: Vec<CategoryInfo>,
    pub status: String,
    pub backend_error: Option<String>,
}

impl Default for FormModel {
    fn default() -> Self {
        Self {
            controller: SubmissionController::new(),
            categories: builtin_catalogue(),
            status: String::new(),
            backend_error: None,
        }
    }
}

impl FormModel {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::BackendUnavailable(message) => {
                self.status = message.clone();
                self.backend_error = Some(message);
            }
            UiEvent::Resolved { attempt, outcome } => {
                if self.controller.resolve(attempt, outcome) == Resolution::Applied {
                    self.status = if self.controller.state().result().is_some() {
                        "Email processed".to_string()
                    } else {
                        "Processing failed".to_string()
                    };
                }
            }
            UiEvent::CategoriesLoaded(categories) => {
                if categories.is_empty() {
                    tracing::debug!("service returned no categories; keeping built-in catalogue");
                } else {
                    self.categories = categories;
                }
            }
            UiEvent::CategoriesFailed(reason) => {
                tracing::warn!("could not refresh categories: {reason}");
                self.status = format!("Using built-in categories ({reason})");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::{ProcessError, SubmissionState};
    use shared::domain::ClassificationResult;

    use super::*;

    fn result() -> ClassificationResult {
        ClassificationResult {
            sender_name: None,
            greeting: "Hi,".to_string(),
            classification: "Service Requests".to_string(),
            suggested_label: "Support".to_string(),
            email_snippet: "my router is down".to_string(),
        }
    }

    #[test]
    fn resolution_for_current_attempt_is_applied() {
        let mut model = FormModel::default();
        model.controller.edit("my router is down");
        let request = model.controller.submit().expect("submit");

        model.apply(UiEvent::Resolved {
            attempt: request.attempt,
            outcome: Ok(result()),
        });

        assert_eq!(model.controller.state().result(), Some(&result()));
        assert_eq!(model.status, "Email processed");
    }

    #[test]
    fn resolution_after_clear_is_ignored() {
        let mut model = FormModel::default();
        model.controller.edit("my router is down");
        let request = model.controller.submit().expect("submit");
        model.controller.clear();
        model.status = "cleared".to_string();

        model.apply(UiEvent::Resolved {
            attempt: request.attempt,
            outcome: Err(ProcessError::Service {
                status: 500,
                detail: None,
            }),
        });

        assert_eq!(model.controller.state(), &SubmissionState::default());
        assert_eq!(model.status, "cleared");
    }

    #[test]
    fn categories_replace_builtin_unless_empty() {
        let mut model = FormModel::default();
        assert_eq!(model.categories.len(), 4);

        model.apply(UiEvent::CategoriesLoaded(Vec::new()));
        assert_eq!(model.categories.len(), 4);

        model.apply(UiEvent::CategoriesLoaded(vec![CategoryInfo {
            label: "Payments".to_string(),
            description: "Money".to_string(),
        }]));
        assert_eq!(model.categories.len(), 1);
    }

    #[test]
    fn backend_unavailable_is_sticky_error() {
        let mut model = FormModel::default();
        model.apply(UiEvent::BackendUnavailable("no runtime".to_string()));
        model.apply(UiEvent::Info("later".to_string()));
        assert_eq!(model.backend_error.as_deref(), Some("no runtime"));
    }
}
