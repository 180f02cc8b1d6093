//! The send seam to the remote email relay.
//!
//! The core treats the relay as an opaque remote API: a flat field map plus
//! a service/template identifier and an access credential go in, an opaque
//! result detail comes back, and any failure surfaces as a single
//! [`TransportFailure`] with a human-readable reason. [`SendApi`] is the
//! trait boundary; [`emailjs::EmailJsApi`] is the production client and
//! [`stub::StubSendApi`] the scriptable in-memory double.

pub mod emailjs;
pub mod stub;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use emailjs::EmailJsApi;
pub use stub::{StubBehavior, StubSendApi};

/// Failure from the remote send call: network error, non-success response,
/// or anything else thrown by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TransportFailure {
    /// Human-readable failure detail.
    pub reason: String,
}

impl TransportFailure {
    /// Build a failure from any displayable cause.
    pub fn new(reason: impl ToString) -> Self {
        TransportFailure {
            reason: reason.to_string(),
        }
    }
}

/// Relay routing: which service and template receive the submission, and
/// the public key authorizing the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    /// Relay service identifier.
    pub service_id: String,
    /// Relay template identifier.
    pub template_id: String,
    /// Public access key.
    pub public_key: String,
}

impl RelayTarget {
    /// True when every routing component is non-empty.
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

/// One outgoing submission: routing plus the flat field snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// Relay routing for this submission.
    pub target: RelayTarget,
    /// Field name to value, including derived fields.
    pub params: BTreeMap<String, String>,
}

/// Acknowledgement of a successful send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendReceipt {
    /// Opaque result detail from the relay (e.g. `"OK"`).
    pub detail: String,
    /// When the relay acknowledged the send.
    pub sent_at: DateTime<Utc>,
}

/// Remote send API.
///
/// Implementations must return `Err` for every failure mode — a send never
/// panics and never hangs forever on an error path.
#[async_trait]
pub trait SendApi: Send + Sync {
    /// Dispatch one submission, resolving with a receipt or a failure
    /// reason.
    async fn send(&self, request: &SendRequest) -> Result<SendReceipt, TransportFailure>;
}
