// 👤 Persona Record - the row type shown in the table
// Equality is field equality: there is no id column

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PERSONA
// ============================================================================

/// A validated person record.
///
/// Two personas are the same record iff name, surname and age all match.
/// That comparison is the only uniqueness rule the store enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub surname: String,
    pub age: u32,
}

impl Persona {
    pub fn new(name: impl Into<String>, surname: impl Into<String>, age: u32) -> Self {
        Persona {
            name: name.into(),
            surname: surname.into(),
            age,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.name, self.surname, self.age)
    }
}

// ============================================================================
// PERSONA FORM
// ============================================================================

/// Raw contents of the three input fields, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaForm {
    pub name: String,
    pub surname: String,
    pub age: String,
}

impl PersonaForm {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        PersonaForm {
            name: name.into(),
            surname: surname.into(),
            age: age.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.surname.is_empty() && self.age.is_empty()
    }
}

impl From<&Persona> for PersonaForm {
    fn from(persona: &Persona) -> Self {
        PersonaForm {
            name: persona.name.clone(),
            surname: persona.surname.clone(),
            age: persona.age.to_string(),
        }
    }
}
