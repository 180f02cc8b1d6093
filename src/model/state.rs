//! Submission lifecycle states.

/// Lifecycle state of a single submission, owned exclusively by one
/// [`SubmissionController`](crate::controller::SubmissionController).
///
/// Transitions are time-ordered and externally observable (the UI renders
/// differently per state):
///
/// ```text
/// Idle --submit(valid)--> Pending --ok--> Succeeded --timer--> Idle
///                         Pending --err--> Failed --submit()--> Pending
///                                          Failed --cancel()--> Idle
/// ```
///
/// `Idle --submit(invalid)--> Idle`: a validation failure surfaces an error
/// without changing state. `Succeeded` is terminal until the auto-reset
/// timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// No submission in progress; the form is editable.
    Idle,
    /// A remote call is in flight. At most one per controller instance;
    /// further `submit()` calls are no-ops until resolution.
    Pending,
    /// The remote call resolved. The success confirmation stays visible
    /// until the auto-reset delay elapses, then state returns to `Idle`.
    Succeeded,
    /// The remote call failed. Fields are preserved so the user can retry
    /// without re-typing; no auto-reset.
    Failed {
        /// Human-readable failure reason from the transport.
        reason: String,
    },
}

impl SubmissionState {
    /// True while a remote call is in flight (the submit control should be
    /// disabled).
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }

    /// True once the submission reached a terminal outcome (`Succeeded` or
    /// `Failed`).
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded | SubmissionState::Failed { .. }
        )
    }
}
