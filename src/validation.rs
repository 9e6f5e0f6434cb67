// 📐 Validation - raw form text → Persona
// Every rule runs; errors accumulate instead of short-circuiting

use crate::persona::{Persona, PersonaForm};
use std::fmt;
use thiserror::Error;

// ============================================================================
// FIELD ERRORS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("The 'Name' field must not be empty.")]
    EmptyName,

    #[error("The 'Surname' field must not be empty.")]
    EmptySurname,

    #[error("The 'Age' field must be a valid integer.")]
    InvalidAge,

    #[error("The age must be non-negative.")]
    NegativeAge,
}

/// Non-empty list of field errors, displayed one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, error: FieldError) -> bool {
        self.0.contains(&error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// VALIDATE
// ============================================================================

/// Validate the three raw inputs.
///
/// Name and surname are trimmed and must not end up empty. The age text is
/// trimmed and parsed as a base-10 `i32`, so anything outside that range is
/// reported as not being an integer at all.
pub fn validate(form: &PersonaForm) -> Result<Persona, ValidationErrors> {
    let mut errors = Vec::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.push(FieldError::EmptyName);
    }

    let surname = form.surname.trim();
    if surname.is_empty() {
        errors.push(FieldError::EmptySurname);
    }

    let age = match form.age.trim().parse::<i32>() {
        Ok(age) if age < 0 => {
            errors.push(FieldError::NegativeAge);
            None
        }
        Ok(age) => Some(age.unsigned_abs()),
        Err(_) => {
            errors.push(FieldError::InvalidAge);
            None
        }
    };

    match age {
        Some(age) if errors.is_empty() => Ok(Persona::new(name, surname, age)),
        _ => Err(ValidationErrors(errors)),
    }
}
