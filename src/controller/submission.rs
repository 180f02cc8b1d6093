//! The submission lifecycle controller.
//!
//! Drives one user-initiated, at-most-one-in-flight submission against the
//! send API: collects field values, validates required fields, dispatches
//! the remote call, tracks `Idle`/`Pending`/`Succeeded`/`Failed`, triggers
//! the success side effect exactly once, and auto-resets after a delay.
//!
//! Ordering guarantee: `submit()` marks the state `Pending` under the lock
//! *before* the remote call is dispatched, so a second `submit()` racing
//! the first observes `Pending` and no-ops — at most one concurrent remote
//! call per controller instance.
//!
//! Timers are owned resources: the scheduled auto-reset is cancelled on
//! [`dispose`](SubmissionController::dispose) (and on drop), so no
//! callback can mutate state after teardown.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::delivery::DeliverySink;
use crate::model::{FormSpec, RoleOption, SubmissionForm, SubmissionState, SubmitError};
use crate::transport::{RelayTarget, SendApi, SendRequest};

/// How long the success confirmation stays visible before the form resets.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

/// State shared between the controller handle and its reset timer.
#[derive(Debug)]
struct Inner {
    form: SubmissionForm,
    state: SubmissionState,
    reset_task: Option<JoinHandle<()>>,
}

/// Controller for one mounted form.
///
/// Each mounted form owns an independent instance; no state is shared
/// across controllers. Methods take `&self` so a pending `submit()` future
/// and UI event handlers can coexist on the same instance.
pub struct SubmissionController<A: SendApi> {
    spec: FormSpec,
    target: RelayTarget,
    api: Arc<A>,
    sink: Arc<dyn DeliverySink>,
    reset_delay: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl<A: SendApi> SubmissionController<A> {
    /// Controller for `spec`, sending via `api` to `target` and invoking
    /// `sink` on success.
    pub fn new(
        spec: FormSpec,
        target: RelayTarget,
        api: Arc<A>,
        sink: Arc<dyn DeliverySink>,
    ) -> Self {
        SubmissionController {
            spec,
            target,
            api,
            sink,
            reset_delay: DEFAULT_RESET_DELAY,
            inner: Arc::new(Mutex::new(Inner {
                form: SubmissionForm::new(),
                state: SubmissionState::Idle,
                reset_task: None,
            })),
        }
    }

    /// Override the success auto-reset delay (default 3000 ms).
    pub fn with_reset_delay(mut self, reset_delay: Duration) -> Self {
        self.reset_delay = reset_delay;
        self
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Set `fields[name] = value`. Always succeeds; derived fields are
    /// recomputed from the stored values at snapshot time, so they can
    /// never drift.
    pub fn update_field(&self, name: &str, value: impl Into<String>) {
        self.inner().form.set(name, value);
    }

    /// Select a resume role from the closed option set.
    pub fn set_role(&self, role: RoleOption) {
        self.inner().form.set_role(role);
    }

    /// Current value of a field.
    pub fn field(&self, name: &str) -> Option<String> {
        self.inner().form.get(name).map(str::to_string)
    }

    /// Snapshot of the whole form (for rendering).
    pub fn form(&self) -> SubmissionForm {
        self.inner().form.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.inner().state.clone()
    }

    /// True while a remote call is in flight (disable the submit control).
    pub fn is_submitting(&self) -> bool {
        self.inner().state.is_pending()
    }

    /// Which form variant this controller drives.
    pub fn spec(&self) -> &FormSpec {
        &self.spec
    }

    /// Submit the current field values.
    ///
    /// - While `Pending`, the call is an idempotent no-op (`Ok`).
    /// - Empty required fields fail fast with
    ///   [`SubmitError::Validation`]; the transport is never invoked and
    ///   the lifecycle state does not change.
    /// - Otherwise the state becomes `Pending` synchronously, the send API
    ///   is invoked once with the field snapshot, and the outcome lands in
    ///   `Succeeded` (side effect fired, auto-reset scheduled) or
    ///   `Failed` (fields preserved for retry, also returned as
    ///   [`SubmitError::Transport`]).
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let params = {
            let mut inner = self.inner();
            if inner.state.is_pending() {
                debug!(form = self.spec.name(), "submit ignored: already pending");
                return Ok(());
            }
            let missing = inner.form.missing_required(&self.spec);
            if !missing.is_empty() {
                debug!(form = self.spec.name(), ?missing, "submit rejected: missing fields");
                return Err(SubmitError::Validation { missing });
            }
            // Observable before the remote call returns, so a racing
            // submit sees Pending and the UI can disable the control.
            inner.state = SubmissionState::Pending;
            if let Some(task) = inner.reset_task.take() {
                task.abort();
            }
            inner.form.snapshot(&self.spec)
        };

        let request = SendRequest {
            target: self.target.clone(),
            params,
        };

        match self.api.send(&request).await {
            Ok(receipt) => {
                let role = {
                    let mut inner = self.inner();
                    inner.state = SubmissionState::Succeeded;
                    inner.form.role()
                };
                info!(
                    form = self.spec.name(),
                    detail = %receipt.detail,
                    "submission accepted"
                );
                if self.spec.delivers_resume() {
                    if let Some(role) = role {
                        self.sink.deliver(role);
                    }
                }
                self.schedule_reset();
                Ok(())
            }
            Err(failure) => {
                let reason = failure.reason;
                {
                    let mut inner = self.inner();
                    inner.state = SubmissionState::Failed {
                        reason: reason.clone(),
                    };
                    // Fields stay as entered so the user can retry.
                }
                warn!(form = self.spec.name(), %reason, "submission failed");
                Err(SubmitError::Transport { reason })
            }
        }
    }

    /// Return to `Idle` after the reset delay, clearing the fields.
    ///
    /// Replaces any previously scheduled reset; the task mutates nothing
    /// once aborted.
    fn schedule_reset(&self) {
        let shared = Arc::clone(&self.inner);
        let delay = self.reset_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = shared.lock().unwrap_or_else(PoisonError::into_inner);
            inner.form.clear();
            inner.state = SubmissionState::Idle;
            inner.reset_task = None;
        });
        let mut inner = self.inner();
        if let Some(stale) = inner.reset_task.replace(task) {
            stale.abort();
        }
    }

    /// Clear user-entered state and return to `Idle`.
    ///
    /// A pending remote call cannot be aborted by this design, so `cancel`
    /// is a no-op while `Pending`. Any scheduled auto-reset is cancelled.
    pub fn cancel(&self) {
        let mut inner = self.inner();
        if inner.state.is_pending() {
            debug!(form = self.spec.name(), "cancel ignored while pending");
            return;
        }
        inner.form.clear();
        inner.state = SubmissionState::Idle;
        if let Some(task) = inner.reset_task.take() {
            task.abort();
        }
    }

    /// Release owned timers. After `dispose`, no scheduled reset may fire
    /// or mutate state. Called automatically on drop.
    pub fn dispose(&self) {
        if let Some(task) = self.inner().reset_task.take() {
            task.abort();
        }
    }
}

impl<A: SendApi> Drop for SubmissionController<A> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<A: SendApi> std::fmt::Debug for SubmissionController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("spec", &self.spec)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "submission_tests.rs"]
mod tests;
