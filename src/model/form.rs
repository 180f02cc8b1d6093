//! Form state and per-variant form specifications.
//!
//! A [`SubmissionForm`] is the mutable field map behind one mounted form.
//! Derived fields (summary message, subject line, role label) are never
//! stored as independent state: they are pure functions of the entered
//! values, recomputed into the snapshot handed to the transport.

use std::collections::BTreeMap;

use crate::model::role::RoleOption;

/// Well-known field names shared between the form variants and the relay
/// template.
pub mod fields {
    /// Sender name (contact form).
    pub const NAME: &str = "name";
    /// Sender email address (both variants).
    pub const EMAIL: &str = "email";
    /// Message subject (contact form; derived for resume requests).
    pub const SUBJECT: &str = "subject";
    /// Message body (contact form; derived for resume requests).
    pub const MESSAGE: &str = "message";
    /// Selected role value (resume-request form).
    pub const ROLE: &str = "role";
}

/// Label substituted wherever no role has been selected yet.
const NO_ROLE_LABEL: &str = "Position Not Selected";

/// Static description of one form variant: which fields must be non-empty
/// before a submit may reach the transport, and whether a resume is
/// delivered on success.
///
/// Both site forms are instances of the same controller; only the spec
/// differs (see [`FormSpec::contact`] and [`FormSpec::resume_request`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSpec {
    name: &'static str,
    required: &'static [&'static str],
    delivers_resume: bool,
}

impl FormSpec {
    /// The contact form: all four visible fields are required, nothing is
    /// delivered locally on success.
    pub fn contact() -> Self {
        FormSpec {
            name: "contact",
            required: &[fields::NAME, fields::EMAIL, fields::SUBJECT, fields::MESSAGE],
            delivers_resume: false,
        }
    }

    /// The resume-request modal: email and role are required, and the
    /// selected role's resume file is delivered on success.
    pub fn resume_request() -> Self {
        FormSpec {
            name: "resume-request",
            required: &[fields::EMAIL, fields::ROLE],
            delivers_resume: true,
        }
    }

    /// Variant name, used in logging.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Required field names, in declaration order.
    pub fn required(&self) -> &'static [&'static str] {
        self.required
    }

    /// Whether a successful submit triggers the local resume delivery side
    /// effect.
    pub fn delivers_resume(&self) -> bool {
        self.delivers_resume
    }
}

/// Current field values of one mounted form.
///
/// Created empty when the form is mounted, mutated field-by-field on user
/// input, and cleared on successful completion (after the auto-reset
/// delay) or explicit cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    values: BTreeMap<String, String>,
    role: Option<RoleOption>,
}

impl SubmissionForm {
    /// New empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `fields[name] = value`. No constraints; always succeeds.
    ///
    /// Writing the role field re-derives the parsed [`RoleOption`] so the
    /// selected role is always a function of the raw field value (an
    /// unknown value deselects).
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == fields::ROLE {
            self.role = RoleOption::parse(&value).ok();
        }
        self.values.insert(name.to_string(), value);
    }

    /// Select a role from the closed option set.
    pub fn set_role(&mut self, role: RoleOption) {
        self.set(fields::ROLE, role.value());
    }

    /// Current value of a field, if ever written.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Currently selected role, if the role field holds a valid option.
    pub fn role(&self) -> Option<RoleOption> {
        self.role
    }

    /// Drop all entered values and the role selection.
    pub fn clear(&mut self) {
        self.values.clear();
        self.role = None;
    }

    /// True when no field holds a non-empty value.
    pub fn is_empty(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    /// Required fields that are absent or empty, in declaration order.
    pub fn missing_required(&self, spec: &FormSpec) -> Vec<String> {
        spec.required()
            .iter()
            .filter(|name| self.get(name).is_none_or(str::is_empty))
            .map(|name| name.to_string())
            .collect()
    }

    /// Display label of the selected role, or the placeholder when none is
    /// selected.
    pub fn role_label(&self) -> &'static str {
        self.role.map(|r| r.label()).unwrap_or(NO_ROLE_LABEL)
    }

    /// Derived one-line summary of a resume request.
    pub fn summary_message(&self) -> String {
        let email = match self.get(fields::EMAIL) {
            Some(email) if !email.is_empty() => email,
            _ => "email not provided",
        };
        format!(
            "Resume request for {} position from {}",
            self.role_label(),
            email
        )
    }

    /// Derived subject line of a resume request.
    pub fn subject_line(&self) -> String {
        format!("Resume Request - {}", self.role_label())
    }

    /// Flat field snapshot handed to the transport.
    ///
    /// For resume requests the derived relay-template fields are folded in
    /// here; they are recomputed from the current values on every call, so
    /// they can never drift from the entered fields.
    pub fn snapshot(&self, spec: &FormSpec) -> BTreeMap<String, String> {
        let mut params = self.values.clone();
        if spec.delivers_resume() {
            params.insert("user_name".to_string(), "Resume Request".to_string());
            params.insert(fields::MESSAGE.to_string(), self.summary_message());
            params.insert(fields::SUBJECT.to_string(), self.subject_line());
            params.insert("role_interest".to_string(), self.role_label().to_string());
        }
        params
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
