// 🎛️ Main Window Controller - select / add / modify / delete
// Two states: Idle (no row selected) and Editing(row)

use crate::persona::{Persona, PersonaForm};
use crate::store::PersonaStore;
use crate::validation::{validate, ValidationErrors};
use crate::view::{ModalOutcome, Severity, TableView, ViewResult};
use thiserror::Error;
use tracing::{debug, error, info, warn};

// ============================================================================
// ERRORS & OUTCOMES
// ============================================================================

/// User-input errors. All are shown to the user and are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonaError {
    #[error("{0}")]
    Invalid(ValidationErrors),

    #[error("Duplicate person: a person with the same data already exists.")]
    Duplicate,

    #[error("You must select a person in the table first.")]
    NoSelection,
}

impl PersonaError {
    pub fn severity(&self) -> Severity {
        match self {
            PersonaError::NoSelection => Severity::Warning,
            PersonaError::Invalid(_) | PersonaError::Duplicate => Severity::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing(usize),
}

/// What a controller call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(usize),
    Added(usize),
    Updated(usize),
    Deleted(Persona),
    Cleared,
    DialogClosed { added: bool },
    /// The dialog could not be shown; already logged.
    DialogFailed,
    Rejected(PersonaError),
}

// ============================================================================
// MAIN CONTROLLER
// ============================================================================

pub struct MainController<S: PersonaStore> {
    store: S,
    state: EditState,
}

impl<S: PersonaStore> MainController<S> {
    pub fn new(store: S) -> Self {
        MainController {
            store,
            state: EditState::Idle,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Fill the view with the current rows and an empty form.
    pub fn initialize<V: TableView>(&mut self, view: &mut V) {
        self.reset(view);
    }

    /// Row click: mirror the record into the input fields.
    pub fn select_row<V: TableView>(&mut self, view: &mut V, row: usize) -> Outcome {
        match self.store.get(row) {
            Some(persona) => {
                debug!(row, persona = %persona, "Row selected");
                view.write_form(&PersonaForm::from(persona));
                view.set_selected(Some(row));
                self.state = EditState::Editing(row);
                Outcome::Selected(row)
            }
            None => {
                self.reset(view);
                Outcome::Cleared
            }
        }
    }

    /// Leave edit mode without touching the store.
    pub fn cancel<V: TableView>(&mut self, view: &mut V) -> Outcome {
        self.reset(view);
        Outcome::Cleared
    }

    /// Add when idle, overwrite the selected record when editing.
    pub fn submit<V: TableView>(&mut self, view: &mut V) -> ViewResult<Outcome> {
        let persona = match validate(&view.read_form()) {
            Ok(persona) => persona,
            Err(errors) => return self.reject(view, PersonaError::Invalid(errors)),
        };

        let editing = match self.state {
            EditState::Editing(row) => Some(row),
            EditState::Idle => None,
        };

        if self.store.contains_duplicate(&persona, editing) {
            return self.reject(view, PersonaError::Duplicate);
        }

        let outcome = match editing.and_then(|row| self.store.get_mut(row).map(|slot| (row, slot))) {
            Some((row, slot)) => {
                info!(row, from = %slot, to = %persona, "Persona updated");
                *slot = persona;
                Outcome::Updated(row)
            }
            None => {
                info!(persona = %persona, "Persona added");
                self.store.add(persona);
                Outcome::Added(self.store.len() - 1)
            }
        };

        self.reset(view);
        let text = match outcome {
            Outcome::Updated(_) => "Person updated successfully.",
            _ => "Person added successfully.",
        };
        view.show_message(Severity::Info, text)?;

        Ok(outcome)
    }

    pub fn delete<V: TableView>(&mut self, view: &mut V) -> ViewResult<Outcome> {
        let removed = match self.state {
            EditState::Editing(row) => self.store.remove_at(row),
            EditState::Idle => None,
        };

        let persona = match removed {
            Some(persona) => persona,
            None => return self.reject(view, PersonaError::NoSelection),
        };

        info!(persona = %persona, remaining = self.store.len(), "Persona deleted");
        self.reset(view);
        view.show_message(Severity::Info, "Person deleted successfully.")?;

        Ok(Outcome::Deleted(persona))
    }

    /// Open the add dialog and block until it closes.
    ///
    /// Failures to run the dialog are logged and swallowed so the main
    /// window stays usable.
    pub fn open_add_dialog<V: TableView>(&mut self, view: &mut V) -> Outcome {
        let outcome = match view.open_modal(&mut self.store) {
            Ok(ModalOutcome::Added(persona)) => {
                debug!(persona = %persona, "Dialog closed after adding");
                Outcome::DialogClosed { added: true }
            }
            Ok(ModalOutcome::Cancelled) => Outcome::DialogClosed { added: false },
            Err(err) => {
                error!(error = %err, "Failed to open the add dialog");
                Outcome::DialogFailed
            }
        };

        view.refresh(self.store.as_slice());
        outcome
    }

    fn reset<V: TableView>(&mut self, view: &mut V) {
        self.state = EditState::Idle;
        view.clear_form();
        view.set_selected(None);
        view.refresh(self.store.as_slice());
    }

    fn reject<V: TableView>(&mut self, view: &mut V, error: PersonaError) -> ViewResult<Outcome> {
        warn!(error = %error, state = ?self.state, "Input rejected");
        view.show_message(error.severity(), &error.to_string())?;
        Ok(Outcome::Rejected(error))
    }
}
