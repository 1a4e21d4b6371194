use std::sync::Arc;

use serde::Serialize;

use super::catalog::ProgramCatalog;
use super::domain::ProgramCategory;
use crate::validation::{non_blank, SelectionIssue, ValidationError};

/// Normalized selection produced by [`ProgramSelectionValidator::validate_selection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSelection {
    pub category: ProgramCategory,
    pub program: Option<String>,
    pub specialization: Option<String>,
}

/// Strict counterpart to the catalog's permissive lookups.
#[derive(Debug, Clone)]
pub struct ProgramSelectionValidator {
    catalog: Arc<ProgramCatalog>,
}

impl Default for ProgramSelectionValidator {
    fn default() -> Self {
        Self::new(Arc::new(ProgramCatalog::standard()))
    }
}

impl ProgramSelectionValidator {
    pub fn new(catalog: Arc<ProgramCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ProgramCatalog {
        &self.catalog
    }

    /// Returns the display value for a key or display value, or `None` when neither matches.
    pub fn resolve_category_value(&self, input: &str) -> Option<&'static str> {
        ProgramCategory::resolve(input).map(ProgramCategory::display_value)
    }

    pub fn require_category(&self, input: &str) -> Result<ProgramCategory, ValidationError> {
        ProgramCategory::resolve(input).ok_or_else(|| ValidationError::UnresolvedCategory {
            input: input.to_string(),
        })
    }

    /// Checks a triple against the catalog. Blank program or specialization is accepted; the
    /// student-only "specialization is mandatory" rule is applied by the account flows.
    pub fn validate_selection(
        &self,
        category: &str,
        program: &str,
        specialization: &str,
    ) -> Result<ProgramSelection, ValidationError> {
        let resolved = ProgramCategory::resolve(category).ok_or_else(|| {
            ValidationError::InvalidProgramSelection(SelectionIssue::UnknownCategory(
                category.to_string(),
            ))
        })?;

        let program = non_blank(Some(program));
        let specialization = non_blank(Some(specialization));

        let offered = match program {
            Some(code) => Some(self.catalog.program(resolved, code).ok_or_else(|| {
                ValidationError::InvalidProgramSelection(SelectionIssue::UnknownProgram {
                    category: resolved.display_value(),
                    program: code.to_string(),
                })
            })?),
            None => None,
        };

        if let Some(specialization) = specialization {
            let accepted = offered
                .map(|program| program.offers(specialization))
                .unwrap_or(false);
            if !accepted {
                return Err(ValidationError::InvalidProgramSelection(
                    SelectionIssue::UnknownSpecialization {
                        program: program.unwrap_or_default().to_string(),
                        specialization: specialization.to_string(),
                    },
                ));
            }
        }

        Ok(ProgramSelection {
            category: resolved,
            program: program.map(str::to_string),
            specialization: specialization.map(str::to_string),
        })
    }
}
