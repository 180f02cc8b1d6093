//! Local resume delivery (success side effect).
//!
//! In the browser this is the file download triggered after a successful
//! resume request; in the CLI shell it copies the selected role's resume
//! out of the resume directory. Delivery is fire-and-forget: the
//! submission already succeeded, so failures here are logged and never
//! surfaced as submission errors.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::model::RoleOption;

/// Success side effect invoked exactly once per successful submission.
pub trait DeliverySink: Send + Sync {
    /// Deliver the resume for the selected role. Fire-and-forget; no
    /// return value is consumed by the controller.
    fn deliver(&self, role: RoleOption);
}

/// Sink for variants with no local side effect (the contact form).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DeliverySink for NullSink {
    fn deliver(&self, _role: RoleOption) {}
}

/// Copies the role's resume file from the resume directory into an output
/// directory, standing in for the browser download.
#[derive(Debug, Clone)]
pub struct DiskSink {
    resume_dir: PathBuf,
    output_dir: PathBuf,
}

impl DiskSink {
    /// Sink reading resumes from `resume_dir` and writing into
    /// `output_dir`.
    pub fn new(resume_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        DiskSink {
            resume_dir: resume_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    fn copy_resume(&self, role: RoleOption) -> std::io::Result<PathBuf> {
        let source = self.resume_dir.join(role.resume_file());
        let destination = self.output_dir.join(role.resume_file());
        ensure_dir(&self.output_dir)?;
        std::fs::copy(&source, &destination)?;
        Ok(destination)
    }
}

fn ensure_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

impl DeliverySink for DiskSink {
    fn deliver(&self, role: RoleOption) {
        match self.copy_resume(role) {
            Ok(destination) => {
                info!(role = %role, path = %destination.display(), "resume delivered");
            }
            Err(source) => {
                warn!(
                    role = %role,
                    resume_dir = %self.resume_dir.display(),
                    error = %source,
                    "resume delivery failed; submission already succeeded"
                );
            }
        }
    }
}
