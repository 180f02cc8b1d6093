//! Resume role options.
//!
//! Closed set of positions a visitor can request a resume for. Each option
//! carries the resume file delivered on success. Parsing is a smart
//! constructor: unknown values are rejected, never silently defaulted.

use thiserror::Error;

/// Error for a role value outside the closed option set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role '{raw}' (expected one of: data-analyst, data-engineer, data-science, full-stack)")]
pub struct InvalidRole {
    /// The rejected raw value.
    pub raw: String,
}

/// One entry in the resume-request role selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleOption {
    /// Data analyst position.
    DataAnalyst,
    /// Data engineer position.
    DataEngineer,
    /// Data science position.
    DataScience,
    /// Full-stack position.
    FullStack,
}

impl RoleOption {
    /// All options, in selector display order.
    pub const ALL: [RoleOption; 4] = [
        RoleOption::DataAnalyst,
        RoleOption::DataEngineer,
        RoleOption::DataScience,
        RoleOption::FullStack,
    ];

    /// Parse the machine value used in form fields (e.g. `"data-engineer"`).
    pub fn parse(raw: &str) -> Result<Self, InvalidRole> {
        match raw {
            "data-analyst" => Ok(RoleOption::DataAnalyst),
            "data-engineer" => Ok(RoleOption::DataEngineer),
            "data-science" => Ok(RoleOption::DataScience),
            "full-stack" => Ok(RoleOption::FullStack),
            _ => Err(InvalidRole {
                raw: raw.to_string(),
            }),
        }
    }

    /// Machine value carried in the form field map.
    pub fn value(&self) -> &'static str {
        match self {
            RoleOption::DataAnalyst => "data-analyst",
            RoleOption::DataEngineer => "data-engineer",
            RoleOption::DataScience => "data-science",
            RoleOption::FullStack => "full-stack",
        }
    }

    /// Human-readable label used in derived message text.
    pub fn label(&self) -> &'static str {
        match self {
            RoleOption::DataAnalyst => "Data Analyst",
            RoleOption::DataEngineer => "Data Engineer",
            RoleOption::DataScience => "Data Science",
            RoleOption::FullStack => "Full-Stack",
        }
    }

    /// Resume file delivered when a request for this role succeeds.
    pub fn resume_file(&self) -> &'static str {
        match self {
            RoleOption::DataAnalyst => "Anvay_Bhanap_Data_Analyst.pdf",
            RoleOption::DataEngineer => "Anvay_Bhanap_Data_Engineer.pdf",
            RoleOption::DataScience => "Anvay_Bhanap_Data_Science.pdf",
            RoleOption::FullStack => "Anvay_Bhanap_Full_Stack.pdf",
        }
    }
}

impl std::fmt::Display for RoleOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
