//! Domain model types (pure).
//!
//! Form state, role options, submission lifecycle states, and the error
//! taxonomy. Everything here is plain data with smart constructors; timers
//! and transport live in the controller and transport modules.

pub mod error;
pub mod form;
pub mod role;
pub mod state;

// Re-export for convenience
pub use error::{AppError, CarouselError, SubmitError};
pub use form::{FormSpec, SubmissionForm};
pub use role::{InvalidRole, RoleOption};
pub use state::SubmissionState;
