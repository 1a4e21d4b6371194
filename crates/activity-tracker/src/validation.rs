/// Client-correctable input failures. Every variant maps to a 400 at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("program category '{input}' is not recognized")]
    UnresolvedCategory { input: String },
    #[error("invalid program selection: {0}")]
    InvalidProgramSelection(SelectionIssue),
    #[error("missing mandatory field: {field}")]
    MissingMandatoryField { field: &'static str },
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("proof document '{file_name}' must be a PDF, JPEG or PNG file")]
    UnsupportedProofDocument { file_name: String },
}

/// Which part of a (category, program, specialization) triple failed to match the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionIssue {
    #[error("category '{0}' is not offered")]
    UnknownCategory(String),
    #[error("program '{program}' is not offered under {category}")]
    UnknownProgram {
        category: &'static str,
        program: String,
    },
    #[error("specialization '{specialization}' is not offered for {program}")]
    UnknownSpecialization {
        program: String,
        specialization: String,
    },
}

/// Trims `value`, treating blank input as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

pub(crate) fn require(
    value: Option<&str>,
    field: &'static str,
) -> Result<String, ValidationError> {
    non_blank(value)
        .map(str::to_string)
        .ok_or(ValidationError::MissingMandatoryField { field })
}
