//! Scriptable in-memory send API.
//!
//! Used by the test suite to observe dispatch counts and drive the
//! controller through success and failure paths, and by the CLI's
//! `--dry-run` mode to exercise the full submission flow without touching
//! the network.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::transport::{SendApi, SendReceipt, SendRequest, TransportFailure};

/// What the stub does when a request arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubBehavior {
    /// Resolve with the given receipt detail.
    Resolve {
        /// Receipt detail returned to the controller.
        detail: String,
    },
    /// Reject with the given failure reason.
    Reject {
        /// Failure reason returned to the controller.
        reason: String,
    },
}

/// In-memory [`SendApi`] double recording every request it receives.
#[derive(Debug)]
pub struct StubSendApi {
    behavior: Mutex<StubBehavior>,
    requests: Mutex<Vec<SendRequest>>,
    latency: Duration,
}

impl StubSendApi {
    /// Stub that resolves every send with the given detail.
    pub fn resolving(detail: impl Into<String>) -> Self {
        StubSendApi {
            behavior: Mutex::new(StubBehavior::Resolve {
                detail: detail.into(),
            }),
            requests: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    /// Stub that rejects every send with the given reason.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        StubSendApi {
            behavior: Mutex::new(StubBehavior::Reject {
                reason: reason.into(),
            }),
            requests: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    /// Delay each send by `latency` before resolving or rejecting.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Change the scripted outcome for subsequent sends.
    pub fn set_behavior(&self, behavior: StubBehavior) {
        *lock(&self.behavior) = behavior;
    }

    /// Number of sends dispatched so far.
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// The most recent request, if any send was dispatched.
    pub fn last_request(&self) -> Option<SendRequest> {
        lock(&self.requests).last().cloned()
    }
}

/// Ignore mutex poisoning: stub state stays usable after a panicking test.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl SendApi for StubSendApi {
    async fn send(&self, request: &SendRequest) -> Result<SendReceipt, TransportFailure> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        lock(&self.requests).push(request.clone());
        match lock(&self.behavior).clone() {
            StubBehavior::Resolve { detail } => Ok(SendReceipt {
                detail,
                sent_at: Utc::now(),
            }),
            StubBehavior::Reject { reason } => Err(TransportFailure { reason }),
        }
    }
}
