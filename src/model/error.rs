//! Error taxonomy for the submission and carousel cores.
//!
//! Two recoverable error kinds cover the whole submission flow:
//!
//! - [`SubmitError::Validation`] — local, required fields missing at submit
//!   time. Never reaches the transport; the user corrects input.
//! - [`SubmitError::Transport`] — the remote relay call rejected or threw.
//!   Fields are retained and an immediate retry is allowed.
//!
//! Neither is fatal; both are scoped to a single controller instance. Any
//! unexpected failure inside the transport is converted to a
//! `Transport` error rather than propagating — nothing in this crate
//! panics on a failed send.
//!
//! [`AppError`] is the top-level error for the CLI shell, composing the
//! domain errors via `From` so `?` propagates cleanly.

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::model::role::InvalidRole;

/// Outcome of a rejected `submit()` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// One or more required fields were empty at submit time.
    ///
    /// Raised before any remote call is made; the distinct kind keeps
    /// "missing information" messaging separate from network failures.
    #[error("Missing information: please fill in {}", missing.join(", "))]
    Validation {
        /// Names of the required fields that were empty, in declaration
        /// order.
        missing: Vec<String>,
    },

    /// The remote relay call rejected, returned a non-success status, or
    /// the transport threw.
    ///
    /// The controller keeps the entered fields so the user can retry
    /// without re-typing.
    #[error("Request failed: {reason}")]
    Transport {
        /// Human-readable failure detail from the transport.
        reason: String,
    },
}

/// Errors from the bounded carousel index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// A carousel needs at least one item; zero-item carousels are
    /// degenerate and unsupported.
    #[error("Carousel requires at least one item")]
    NoItems,

    /// `go_to` was asked for an index outside `[0, item_count)`.
    ///
    /// Out-of-range jumps are rejected rather than clamped so a caller bug
    /// cannot silently land on the wrong item.
    #[error("Index {index} out of range for {item_count} items")]
    OutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of real items in the carousel.
        item_count: usize,
    },
}

/// Top-level error for the `folio` CLI shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber setup failed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The submission itself failed (validation or transport).
    #[error("{0}")]
    Submit(#[from] SubmitError),

    /// A role argument outside the closed option set.
    #[error("{0}")]
    Role(#[from] InvalidRole),

    /// Relay credentials are required for a live send but were not
    /// configured.
    #[error(
        "Relay credentials missing: set service_id, template_id and public_key \
         in the [relay] config section (or FOLIO_SERVICE_ID / FOLIO_TEMPLATE_ID / \
         FOLIO_PUBLIC_KEY), or pass --dry-run"
    )]
    MissingCredentials,
}
