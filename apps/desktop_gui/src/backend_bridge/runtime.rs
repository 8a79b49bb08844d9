//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{AttemptId, ClassificationService, ClientSettings, HttpClassificationService};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service: Arc<dyn ClassificationService> =
            match HttpClassificationService::from_settings(&settings) {
                Ok(service) => Arc::new(service),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                        "backend worker startup failure: {err:#}"
                    )));
                    tracing::error!("failed to configure classification service: {err:#}");
                    return;
                }
            };

        runtime.block_on(serve_commands(cmd_rx, ui_tx, service));
    });
}

/// Processes commands until the UI drops its sender.
pub async fn serve_commands(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn ClassificationService>,
) {
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
    let mut in_flight: Option<(AttemptId, JoinHandle<()>)> = None;

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Classify {
                attempt,
                email_content,
            } => {
                if let Some((previous, task)) = in_flight.take() {
                    tracing::debug!(attempt = %previous, "aborting superseded request");
                    task.abort();
                }
                let service = Arc::clone(&service);
                let ui_tx = ui_tx.clone();
                let task = tokio::spawn(async move {
                    let outcome = service.process_email(&email_content).await;
                    if ui_tx.send(UiEvent::Resolved { attempt, outcome }).is_err() {
                        tracing::debug!(attempt = %attempt, "ui closed before resolution");
                    }
                });
                in_flight = Some((attempt, task));
            }
            BackendCommand::Abandon { attempt } => {
                if let Some((current, task)) = in_flight.take() {
                    if current == attempt {
                        tracing::debug!(attempt = %attempt, "abandoning request");
                        task.abort();
                    } else {
                        in_flight = Some((current, task));
                    }
                }
            }
            BackendCommand::FetchCategories => {
                let service = Arc::clone(&service);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = match service.list_categories().await {
                        Ok(categories) => UiEvent::CategoriesLoaded(categories),
                        Err(err) => UiEvent::CategoriesFailed(err.to_string()),
                    };
                    let _ = ui_tx.send(event);
                });
            }
        }
    }

    if let Some((_, task)) = in_flight {
        task.abort();
    }
    tracing::info!("backend command queue closed");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use client_core::ProcessError;
    use crossbeam_channel::bounded;
    use shared::domain::{CategoryInfo, ClassificationResult};

    use super::*;

    struct EchoService;

    #[async_trait]
    impl ClassificationService for EchoService {
        async fn process_email(
            &self,
            email_content: &str,
        ) -> Result<ClassificationResult, ProcessError> {
            Ok(ClassificationResult {
                sender_name: None,
                greeting: "Hi,".to_string(),
                classification: "Others".to_string(),
                suggested_label: "General".to_string(),
                email_snippet: email_content.to_string(),
            })
        }

        async fn list_categories(&self) -> Result<Vec<CategoryInfo>, ProcessError> {
            Err(ProcessError::Service {
                status: 404,
                detail: None,
            })
        }
    }

    fn spawn_worker() -> (Sender<BackendCommand>, Receiver<UiEvent>, thread::JoinHandle<()>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let worker = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(serve_commands(cmd_rx, ui_tx, Arc::new(EchoService)));
        });
        (cmd_tx, ui_rx, worker)
    }

    fn next_non_info(ui_rx: &Receiver<UiEvent>) -> UiEvent {
        loop {
            match ui_rx.recv_timeout(Duration::from_secs(5)).expect("event") {
                UiEvent::Info(_) => continue,
                event => return event,
            }
        }
    }

    #[test]
    fn classify_command_resolves_tagged_attempt() {
        let (cmd_tx, ui_rx, worker) = spawn_worker();

        cmd_tx
            .send(BackendCommand::Classify {
                attempt: AttemptId(7),
                email_content: "hello there".to_string(),
            })
            .expect("send");

        match next_non_info(&ui_rx) {
            UiEvent::Resolved { attempt, outcome } => {
                assert_eq!(attempt, AttemptId(7));
                assert_eq!(outcome.expect("ok").email_snippet, "hello there");
            }
            other => panic!("unexpected event: {other:?}"),
        }

        drop(cmd_tx);
        worker.join().expect("worker exits when queue closes");
    }

    #[test]
    fn category_failure_is_reported() {
        let (cmd_tx, ui_rx, worker) = spawn_worker();

        cmd_tx.send(BackendCommand::FetchCategories).expect("send");

        match next_non_info(&ui_rx) {
            UiEvent::CategoriesFailed(reason) => assert!(reason.contains("404")),
            other => panic!("unexpected event: {other:?}"),
        }

        drop(cmd_tx);
        worker.join().expect("worker exits when queue closes");
    }
}
