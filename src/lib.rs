//! folio
//!
//! The reusable core behind a single-page portfolio site: the contact /
//! resume-request submission lifecycle and the bounded carousel index.
//!
//! Rendering, styling, and page composition live elsewhere; this crate owns
//! the two pieces with real behavior. [`controller::SubmissionController`]
//! drives one at-most-one-in-flight submission against an email relay with
//! validation, a success side effect, and a timed auto-reset.
//! [`carousel::Carousel`] keeps a wrap-around current position over a fixed
//! item list, with optional paging and timer-driven auto-advance.

pub mod carousel;
pub mod config;
pub mod controller;
pub mod delivery;
pub mod logging;
pub mod model;
pub mod transport;
