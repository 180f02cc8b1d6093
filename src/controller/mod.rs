//! Request-lifecycle controllers.
//!
//! Non-rendering objects owning form/submission state and behavior; the
//! rendering layer queries state and re-renders, it never holds lifecycle
//! logic of its own.

pub mod submission;

pub use submission::{SubmissionController, DEFAULT_RESET_DELAY};
