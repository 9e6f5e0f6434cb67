// 🪟 View Layer - what the controllers need from the presentation
// The terminal UI implements these; tests use a recording fake

use crate::persona::{Persona, PersonaForm};
use crate::store::PersonaStore;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn title(&self) -> &str {
        match self {
            Severity::Info => "Information",
            Severity::Warning => "Warning",
            Severity::Error => "Invalid data",
        }
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("could not open dialog: {0}")]
    Modal(String),
}

pub type ViewResult<T> = Result<T, ViewError>;

/// How a modal add dialog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Added(Persona),
    Cancelled,
}

/// Three input fields plus blocking messages.
pub trait FormView {
    fn read_form(&self) -> PersonaForm;

    fn write_form(&mut self, form: &PersonaForm);

    fn clear_form(&mut self) {
        self.write_form(&PersonaForm::default());
    }

    /// Returns once the user has dismissed the message.
    fn show_message(&mut self, severity: Severity, text: &str) -> ViewResult<()>;
}

/// The main window: a table of records above the input fields.
pub trait TableView: FormView {
    fn selected(&self) -> Option<usize>;

    fn set_selected(&mut self, row: Option<usize>);

    /// Re-render the table after the store changed.
    fn refresh(&mut self, rows: &[Persona]);

    /// Run the add dialog against `store`, blocking until it closes.
    fn open_modal(&mut self, store: &mut dyn PersonaStore) -> ViewResult<ModalOutcome>;
}

pub trait ModalView: FormView {
    fn close(&mut self);
}
