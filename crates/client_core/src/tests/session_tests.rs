use super::*;
use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use shared::domain::CategoryInfo;
use tokio::sync::{oneshot, Mutex};

use crate::{category::style_for, CategoryStyle, HttpClassificationService};

const REFUND_EMAIL: &str = "Hi team, please process my refund. Thanks, Alex";

fn refund_result() -> ClassificationResult {
    ClassificationResult {
        sender_name: Some("Alex".to_string()),
        greeting: "Hi team,".to_string(),
        classification: "Payments".to_string(),
        suggested_label: "Refund".to_string(),
        email_snippet: "please process my refund".to_string(),
    }
}

type Gate = oneshot::Sender<Result<ClassificationResult, ProcessError>>;

/// Each call waits until the test releases the matching gate.
struct GatedService {
    calls: AtomicUsize,
    pending: Mutex<VecDeque<oneshot::Receiver<Result<ClassificationResult, ProcessError>>>>,
    payloads: Mutex<Vec<String>>,
}

impl GatedService {
    fn with_gates(count: usize) -> (Arc<Self>, Vec<Gate>) {
        let mut gates = Vec::with_capacity(count);
        let mut pending = VecDeque::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            gates.push(tx);
            pending.push_back(rx);
        }
        let service = Arc::new(Self {
            calls: AtomicUsize::new(0),
            pending: Mutex::new(pending),
            payloads: Mutex::new(Vec::new()),
        });
        (service, gates)
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassificationService for GatedService {
    async fn process_email(
        &self,
        email_content: &str,
    ) -> Result<ClassificationResult, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().await.push(email_content.to_string());
        let gate = self.pending.lock().await.pop_front();
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(ProcessError::transport("gate dropped"))),
            None => std::future::pending().await,
        }
    }

    async fn list_categories(&self) -> Result<Vec<CategoryInfo>, ProcessError> {
        Ok(Vec::new())
    }
}

/// Lets spawned request tasks run up to their gate.
async fn let_tasks_start() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn refund_email_end_to_end() {
    let (service, mut gates) = GatedService::with_gates(1);
    let mut session = SubmissionSession::new(service.clone());
    session.edit(REFUND_EMAIL);

    session.submit().expect("submit");
    assert!(session.state().is_processing());
    gates.remove(0).send(Ok(refund_result())).expect("release");

    let state = session.settle().await.clone();

    match state {
        SubmissionState::Succeeded { draft_text, result } => {
            assert_eq!(draft_text, REFUND_EMAIL);
            assert_eq!(result, refund_result());
            assert_eq!(style_for(&result.classification), CategoryStyle::Payments);
        }
        other => panic!("unexpected state: {other:?}"),
    }
    assert_eq!(service.payloads.lock().await.as_slice(), [REFUND_EMAIL]);
}

#[tokio::test]
async fn blank_submit_never_contacts_service() {
    let (service, _gates) = GatedService::with_gates(1);
    let mut session = SubmissionSession::new(service.clone());
    session.edit("  \n ");

    let err = session.submit().expect_err("blank draft");
    let_tasks_start().await;

    assert_eq!(err, ProcessError::Validation);
    assert_eq!(service.calls(), 0);
    assert_eq!(
        session.state(),
        &SubmissionState::Idle {
            draft_text: "  \n ".to_string()
        }
    );
    assert!(session.controller().validation_notice().is_some());
}

#[tokio::test]
async fn clear_before_resolution_discards_late_outcome() {
    let (service, mut gates) = GatedService::with_gates(1);
    let mut session = SubmissionSession::new(service.clone());
    session.edit(REFUND_EMAIL);
    session.submit().expect("submit");
    let_tasks_start().await;

    session.clear();
    let _ = gates.remove(0).send(Ok(refund_result()));

    let late = tokio::time::timeout(Duration::from_millis(200), session.next_resolution()).await;
    if let Ok(resolution) = late {
        assert_eq!(resolution, Some(Resolution::Stale));
    }
    assert_eq!(session.state(), &SubmissionState::default());
}

#[tokio::test]
async fn second_submit_alone_drives_the_outcome() {
    let (service, mut gates) = GatedService::with_gates(2);
    let mut session = SubmissionSession::new(service.clone());
    session.edit(REFUND_EMAIL);

    let first = session.submit().expect("first");
    let_tasks_start().await;
    let second = session.submit().expect("second");
    let_tasks_start().await;
    assert_ne!(first, second);

    let second_gate = gates.remove(1);
    let first_gate = gates.remove(0);
    let _ = first_gate.send(Ok(refund_result()));
    second_gate
        .send(Err(ProcessError::Service {
            status: 500,
            detail: None,
        }))
        .expect("release second");

    let mut applied = 0;
    while session.state().is_processing() {
        if session.next_resolution().await == Some(Resolution::Applied) {
            applied += 1;
        }
    }

    assert_eq!(applied, 1);
    let message = session.state().error_message().expect("failed state");
    assert!(message.contains("500"), "{message}");
    assert_eq!(service.calls(), 2);
}

#[tokio::test]
async fn unresolved_request_stays_processing() {
    let (service, _gates) = GatedService::with_gates(0);
    let mut session = SubmissionSession::new(service);
    session.edit(REFUND_EMAIL);
    session.submit().expect("submit");

    let waited = tokio::time::timeout(Duration::from_millis(100), session.next_resolution()).await;

    assert!(waited.is_err(), "no resolution should arrive");
    assert!(session.state().is_processing());
    assert_eq!(session.controller().draft_text(), REFUND_EMAIL);
}

#[tokio::test]
async fn network_failure_end_to_end_preserves_draft() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let service = Arc::new(HttpClassificationService::new(format!("http://{addr}")));
    let mut session = SubmissionSession::new(service);
    session.edit(REFUND_EMAIL);
    session.submit().expect("submit");

    let state = session.settle().await;

    match state {
        SubmissionState::Failed {
            draft_text,
            error_message,
        } => {
            assert_eq!(draft_text, REFUND_EMAIL);
            assert!(error_message.starts_with("Failed to process email: "));
            assert!(error_message.contains("could not reach the classification service"));
        }
        other => panic!("unexpected state: {other:?}"),
    }
}

#[tokio::test]
async fn retry_after_failure_uses_preserved_draft() {
    let (service, mut gates) = GatedService::with_gates(2);
    let mut session = SubmissionSession::new(service.clone());
    session.edit(REFUND_EMAIL);

    session.submit().expect("first");
    gates
        .remove(0)
        .send(Err(ProcessError::transport("offline")))
        .expect("release first");
    assert!(session.settle().await.error_message().is_some());

    session.submit().expect("retry without retyping");
    gates.remove(0).send(Ok(refund_result())).expect("release retry");
    assert_eq!(session.settle().await.result(), Some(&refund_result()));
    assert_eq!(
        service.payloads.lock().await.as_slice(),
        [REFUND_EMAIL, REFUND_EMAIL]
    );
}

#[tokio::test]
async fn settle_returns_immediately_when_idle() {
    let (service, _gates) = GatedService::with_gates(0);
    let mut session = SubmissionSession::new(service);

    let state = tokio::time::timeout(Duration::from_millis(100), session.settle())
        .await
        .expect("settle should not wait");
    assert_eq!(state, &SubmissionState::default());
}
