//! Tests for the submission lifecycle controller.
//!
//! Timer contracts run under a paused tokio clock so the 3000 ms reset
//! window is observed exactly, not approximately.

use super::*;
use crate::model::form::fields;
use crate::transport::{StubBehavior, StubSendApi};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Delivery sink counting invocations.
#[derive(Debug, Default)]
struct CountingSink {
    delivered: AtomicUsize,
    last_role: Mutex<Option<RoleOption>>,
}

impl CountingSink {
    fn count(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    fn last_role(&self) -> Option<RoleOption> {
        *self.last_role.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeliverySink for CountingSink {
    fn deliver(&self, role: RoleOption) {
        self.delivered.fetch_add(1, Ordering::SeqCst);
        *self.last_role.lock().unwrap_or_else(PoisonError::into_inner) = Some(role);
    }
}

fn target() -> RelayTarget {
    RelayTarget {
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "key_test".to_string(),
    }
}

fn resume_controller(
    api: Arc<StubSendApi>,
    sink: Arc<CountingSink>,
) -> SubmissionController<StubSendApi> {
    SubmissionController::new(FormSpec::resume_request(), target(), api, sink)
}

fn fill_valid(controller: &SubmissionController<StubSendApi>) {
    controller.update_field(fields::EMAIL, "a@b.com");
    controller.set_role(RoleOption::DataEngineer);
}

// ===== Validation =====

#[tokio::test]
async fn empty_email_is_rejected_without_a_remote_call() {
    let api = Arc::new(StubSendApi::resolving("OK"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    controller.update_field(fields::EMAIL, "");
    controller.set_role(RoleOption::DataEngineer);

    let err = controller.submit().await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::Validation {
            missing: vec!["email".to_string()]
        }
    );
    assert_eq!(api.call_count(), 0, "validation must short-circuit transport");
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn missing_role_is_reported_by_name() {
    let api = Arc::new(StubSendApi::resolving("OK"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    controller.update_field(fields::EMAIL, "a@b.com");

    let err = controller.submit().await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::Validation {
            missing: vec!["role".to_string()]
        }
    );
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn validation_failure_leaves_failed_state_untouched() {
    let api = Arc::new(StubSendApi::rejecting("relay down"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);
    let _ = controller.submit().await;
    let failed = controller.state();
    assert!(matches!(failed, SubmissionState::Failed { .. }));

    controller.update_field(fields::EMAIL, "");
    let err = controller.submit().await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation { .. }));
    assert_eq!(controller.state(), failed, "validation never changes state");
    assert_eq!(api.call_count(), 1);
}

// ===== At-most-one-in-flight =====

#[tokio::test(start_paused = true)]
async fn second_submit_while_pending_is_a_noop() {
    let api = Arc::new(
        StubSendApi::resolving("OK").with_latency(Duration::from_millis(50)),
    );
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);

    let (first, second) = tokio::join!(controller.submit(), controller.submit());
    assert!(first.is_ok());
    assert!(second.is_ok());
    assert_eq!(api.call_count(), 1, "only the first submit may dispatch");
}

#[tokio::test(start_paused = true)]
async fn pending_state_is_observable_before_resolution() {
    let api = Arc::new(
        StubSendApi::resolving("OK").with_latency(Duration::from_millis(50)),
    );
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);

    let (outcome, observed) = tokio::join!(controller.submit(), async {
        tokio::task::yield_now().await;
        controller.state()
    });
    assert!(outcome.is_ok());
    assert_eq!(observed, SubmissionState::Pending);
}

// ===== Success path =====

#[tokio::test(start_paused = true)]
async fn successful_submit_runs_the_full_lifecycle() {
    let api = Arc::new(
        StubSendApi::resolving("OK").with_latency(Duration::from_millis(50)),
    );
    let sink = Arc::new(CountingSink::default());
    let controller = resume_controller(Arc::clone(&api), Arc::clone(&sink));
    fill_valid(&controller);

    assert_eq!(controller.state(), SubmissionState::Idle);
    controller.submit().await.unwrap();

    // Success confirmation visible for the full delay window.
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert_eq!(controller.field(fields::EMAIL).as_deref(), Some("a@b.com"));
    assert_eq!(sink.count(), 1, "side effect fires exactly once");
    assert_eq!(sink.last_role(), Some(RoleOption::DataEngineer));

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert_eq!(controller.state(), SubmissionState::Succeeded);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(controller.form().is_empty(), "fields clear on reset");
    assert_eq!(sink.count(), 1, "reset never re-fires the side effect");
}

#[tokio::test(start_paused = true)]
async fn derived_fields_reach_the_transport() {
    let api = Arc::new(StubSendApi::resolving("OK"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);
    controller.submit().await.unwrap();

    let request = api.last_request().unwrap();
    assert_eq!(request.target, target());
    assert_eq!(
        request.params.get("message").map(String::as_str),
        Some("Resume request for Data Engineer position from a@b.com")
    );
    assert_eq!(
        request.params.get("user_name").map(String::as_str),
        Some("Resume Request")
    );
}

#[tokio::test(start_paused = true)]
async fn contact_variant_sends_verbatim_fields_and_skips_delivery() {
    let api = Arc::new(StubSendApi::resolving("OK"));
    let sink = Arc::new(CountingSink::default());
    let controller = SubmissionController::new(
        FormSpec::contact(),
        target(),
        Arc::clone(&api),
        Arc::clone(&sink) as Arc<dyn DeliverySink>,
    );
    controller.update_field(fields::NAME, "Ada");
    controller.update_field(fields::EMAIL, "ada@b.com");
    controller.update_field(fields::SUBJECT, "Hello");
    controller.update_field(fields::MESSAGE, "Hi there");

    controller.submit().await.unwrap();
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert_eq!(sink.count(), 0, "contact form has no local side effect");

    let request = api.last_request().unwrap();
    assert_eq!(request.params.len(), 4);
    assert_eq!(request.params.get("message").map(String::as_str), Some("Hi there"));
}

// ===== Failure path =====

#[tokio::test(start_paused = true)]
async fn failed_submit_preserves_fields_and_reports_reason() {
    let api = Arc::new(StubSendApi::rejecting("relay returned 503"));
    let sink = Arc::new(CountingSink::default());
    let controller = resume_controller(Arc::clone(&api), Arc::clone(&sink));
    fill_valid(&controller);

    let err = controller.submit().await.unwrap_err();
    assert_eq!(
        err,
        SubmitError::Transport {
            reason: "relay returned 503".to_string()
        }
    );
    assert_eq!(
        controller.state(),
        SubmissionState::Failed {
            reason: "relay returned 503".to_string()
        }
    );
    assert_eq!(controller.field(fields::EMAIL).as_deref(), Some("a@b.com"));
    assert_eq!(sink.count(), 0, "no side effect on failure");

    // Failed state has no auto-reset.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(matches!(controller.state(), SubmissionState::Failed { .. }));
}

#[tokio::test(start_paused = true)]
async fn retry_after_failure_dispatches_again() {
    let api = Arc::new(StubSendApi::rejecting("first attempt fails"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);

    assert!(controller.submit().await.is_err());
    api.set_behavior(StubBehavior::Resolve {
        detail: "OK".to_string(),
    });
    controller.submit().await.unwrap();
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert_eq!(api.call_count(), 2);
}

// ===== Cancel and teardown =====

#[tokio::test(start_paused = true)]
async fn cancel_is_ignored_while_pending() {
    let api = Arc::new(
        StubSendApi::resolving("OK").with_latency(Duration::from_millis(50)),
    );
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);

    let (outcome, _) = tokio::join!(controller.submit(), async {
        tokio::task::yield_now().await;
        controller.cancel();
        // The in-flight call is not abortable: still pending, fields kept.
        assert_eq!(controller.state(), SubmissionState::Pending);
        assert_eq!(controller.field(fields::EMAIL).as_deref(), Some("a@b.com"));
    });
    assert!(outcome.is_ok());
    assert_eq!(api.call_count(), 1);
}

#[tokio::test]
async fn cancel_clears_a_failed_form() {
    let api = Arc::new(StubSendApi::rejecting("relay down"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);
    let _ = controller.submit().await;

    controller.cancel();
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(controller.form().is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancel_during_success_window_resets_immediately() {
    let api = Arc::new(StubSendApi::resolving("OK"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);
    controller.submit().await.unwrap();
    assert_eq!(controller.state(), SubmissionState::Succeeded);

    controller.cancel();
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert!(controller.form().is_empty());

    // The aborted reset timer must not fire later.
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(controller.state(), SubmissionState::Idle);
}

#[tokio::test(start_paused = true)]
async fn dispose_cancels_the_scheduled_reset() {
    let api = Arc::new(StubSendApi::resolving("OK"));
    let controller = resume_controller(Arc::clone(&api), Arc::new(CountingSink::default()));
    fill_valid(&controller);
    controller.submit().await.unwrap();

    controller.dispose();
    tokio::time::sleep(Duration::from_secs(60)).await;
    // No reset action after teardown: state and fields frozen.
    assert_eq!(controller.state(), SubmissionState::Succeeded);
    assert_eq!(controller.field(fields::EMAIL).as_deref(), Some("a@b.com"));
}
