use chrono::{Datelike, Utc};

use super::domain::{ProfileUpdate, Registration, UserId, UserRecord, UserRole};
use crate::programs::{ProgramCategory, ProgramSelectionValidator};
use crate::validation::{non_blank, require, ValidationError};

const EARLIEST_ADMISSION_YEAR: u16 = 1950;

/// Academic fields after role-specific validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcademicProfile {
    pub program_category: Option<ProgramCategory>,
    pub program: Option<String>,
    pub specialization: Option<String>,
    pub admission_year: Option<u16>,
}

/// Guard responsible for producing valid `UserRecord` instances.
#[derive(Debug, Clone, Default)]
pub struct ProfileGuard {
    validator: ProgramSelectionValidator,
}

impl ProfileGuard {
    pub fn new(validator: ProgramSelectionValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &ProgramSelectionValidator {
        &self.validator
    }

    /// Convert an inbound registration into an account with a placeholder id.
    pub fn profile_from_registration(
        &self,
        registration: Registration,
    ) -> Result<UserRecord, ValidationError> {
        let name = require(Some(registration.name.as_str()), "name")?;
        let email = require(Some(registration.email.as_str()), "email")?;
        if !looks_like_email(&email) {
            return Err(ValidationError::InvalidField {
                field: "email",
                reason: format!("'{email}' is not an email address"),
            });
        }

        let academic = self.academic_profile(
            registration.role,
            registration.program_category.as_deref(),
            registration.program.as_deref(),
            registration.specialization.as_deref(),
            registration.admission_year,
        )?;

        Ok(UserRecord {
            id: UserId("pending".to_string()),
            name,
            email: email.to_ascii_lowercase(),
            role: registration.role,
            program_category: academic.program_category,
            program: academic.program,
            specialization: academic.specialization,
            admission_year: academic.admission_year,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// Merge an edit into an existing account and re-run the role rules on the result.
    pub fn apply_update(
        &self,
        existing: &UserRecord,
        update: ProfileUpdate,
    ) -> Result<UserRecord, ValidationError> {
        let name = match update.name.as_deref() {
            Some(name) => require(Some(name), "name")?,
            None => existing.name.clone(),
        };

        let category_changed = update.program_category.is_some();
        let category = update
            .program_category
            .or_else(|| existing.program_category.map(|c| c.display_value().to_string()));
        let program = update.program.or_else(|| existing.program.clone());
        // A new category invalidates the old program's specialization unless one is supplied.
        let specialization = match update.specialization {
            Some(specialization) => Some(specialization),
            None if category_changed => None,
            None => existing.specialization.clone(),
        };
        let admission_year = update.admission_year.or(existing.admission_year);

        let academic = self.academic_profile(
            existing.role,
            category.as_deref(),
            program.as_deref(),
            specialization.as_deref(),
            admission_year,
        )?;

        Ok(UserRecord {
            name,
            program_category: academic.program_category,
            program: academic.program,
            specialization: academic.specialization,
            admission_year: academic.admission_year,
            ..existing.clone()
        })
    }

    /// Role rules: students need category, program, admission year and (when the program
    /// offers any) a specialization; faculty need a category; admins carry no academic data.
    pub fn academic_profile(
        &self,
        role: UserRole,
        program_category: Option<&str>,
        program: Option<&str>,
        specialization: Option<&str>,
        admission_year: Option<u16>,
    ) -> Result<AcademicProfile, ValidationError> {
        if role == UserRole::Admin {
            return Ok(AcademicProfile {
                program_category: None,
                program: None,
                specialization: None,
                admission_year: None,
            });
        }

        let category = require(program_category, "programCategory")?;
        self.validator.require_category(&category)?;

        let program = non_blank(program);
        let specialization = non_blank(specialization);

        if role == UserRole::Student {
            let code = program.ok_or(ValidationError::MissingMandatoryField { field: "program" })?;
            let offers_specializations = !self
                .validator
                .catalog()
                .specializations_for(&category, code)
                .is_empty();
            if offers_specializations && specialization.is_none() {
                return Err(ValidationError::MissingMandatoryField {
                    field: "specialization",
                });
            }
            let year = admission_year.ok_or(ValidationError::MissingMandatoryField {
                field: "admissionYear",
            })?;
            validate_admission_year(year)?;
        }

        let selection = self.validator.validate_selection(
            &category,
            program.unwrap_or_default(),
            specialization.unwrap_or_default(),
        )?;

        Ok(AcademicProfile {
            program_category: Some(selection.category),
            program: selection.program,
            specialization: selection.specialization,
            admission_year: match role {
                UserRole::Student => admission_year,
                _ => None,
            },
        })
    }
}

fn validate_admission_year(year: u16) -> Result<(), ValidationError> {
    let latest = u16::try_from(Utc::now().year() + 1).unwrap_or(u16::MAX);
    if (EARLIEST_ADMISSION_YEAR..=latest).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::InvalidField {
            field: "admissionYear",
            reason: format!("{year} is outside {EARLIEST_ADMISSION_YEAR}..={latest}"),
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
