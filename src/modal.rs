// ➕ Add Dialog Controller - add-only, on the main window's store
// The store is borrowed for as long as the dialog is open

use crate::controller::PersonaError;
use crate::persona::Persona;
use crate::store::PersonaStore;
use crate::validation::validate;
use crate::view::{ModalView, ViewResult};
use tracing::{info, warn};

/// Result of one press of the dialog's add button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalStep {
    /// Record appended; the dialog has been closed.
    Added(Persona),
    /// Error shown; the dialog stays open.
    Rejected(PersonaError),
}

pub struct ModalController<'s> {
    store: &'s mut dyn PersonaStore,
}

impl<'s> ModalController<'s> {
    pub fn new(store: &'s mut dyn PersonaStore) -> Self {
        ModalController { store }
    }

    pub fn submit<V: ModalView + ?Sized>(&mut self, view: &mut V) -> ViewResult<ModalStep> {
        let persona = match validate(&view.read_form()) {
            Ok(persona) => persona,
            Err(errors) => return self.reject(view, PersonaError::Invalid(errors)),
        };

        if self.store.contains_duplicate(&persona, None) {
            return self.reject(view, PersonaError::Duplicate);
        }

        self.store.add(persona.clone());
        info!(persona = %persona, total = self.store.len(), "Persona added from dialog");

        view.close();
        Ok(ModalStep::Added(persona))
    }

    fn reject<V: ModalView + ?Sized>(
        &mut self,
        view: &mut V,
        error: PersonaError,
    ) -> ViewResult<ModalStep> {
        warn!(error = %error, "Dialog input rejected");
        view.show_message(error.severity(), &error.to_string())?;
        Ok(ModalStep::Rejected(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::validation::FieldError;
    use crate::view::fake::FakeView;
    use crate::view::Severity;

    #[test]
    fn test_valid_input_adds_and_closes() {
        let mut store = MemoryStore::new();
        let mut view = FakeView::with_form("Ana", "Ruiz", "30");

        let step = ModalController::new(&mut store).submit(&mut view).unwrap();

        assert_eq!(step, ModalStep::Added(Persona::new("Ana", "Ruiz", 30)));
        assert!(view.closed);
        assert!(view.messages.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_invalid_input_keeps_dialog_open() {
        let mut store = MemoryStore::new();
        let mut view = FakeView::with_form("", "Ruiz", "-5");

        let step = ModalController::new(&mut store).submit(&mut view).unwrap();

        match step {
            ModalStep::Rejected(PersonaError::Invalid(errors)) => {
                assert!(errors.contains(FieldError::EmptyName));
                assert!(errors.contains(FieldError::NegativeAge));
            }
            other => panic!("unexpected step: {:?}", other),
        }
        assert!(!view.closed);
        assert_eq!(view.messages.len(), 1);
        assert_eq!(view.messages[0].0, Severity::Error);
        assert!(store.is_empty());
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut store = MemoryStore::from(vec![Persona::new("Ana", "Ruiz", 30)]);
        let mut view = FakeView::with_form("Ana", "Ruiz", "30");

        let step = ModalController::new(&mut store).submit(&mut view).unwrap();

        assert_eq!(step, ModalStep::Rejected(PersonaError::Duplicate));
        assert!(!view.closed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_retry_after_error() {
        let mut store = MemoryStore::new();
        let mut view = FakeView::with_form("Ana", "Ruiz", "abc");
        let mut controller = ModalController::new(&mut store);

        assert!(matches!(controller.submit(&mut view).unwrap(), ModalStep::Rejected(_)));
        view.type_form("Ana", "Ruiz", "31");
        assert!(matches!(controller.submit(&mut view).unwrap(), ModalStep::Added(_)));

        assert!(view.closed);
        assert_eq!(store.as_slice(), &[Persona::new("Ana", "Ruiz", 31)]);
    }
}
