// Persona Table - Core Library
// Records, validation, store and controllers; the binary adds the terminal UI

pub mod persona;
pub mod validation;
pub mod store;
pub mod view;
pub mod controller;
pub mod modal;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use persona::{Persona, PersonaForm};
pub use validation::{validate, FieldError, ValidationErrors};
pub use store::{find_duplicate, MemoryStore, PersonaStore};
pub use view::{FormView, ModalOutcome, ModalView, Severity, TableView, ViewError, ViewResult};
pub use controller::{EditState, MainController, Outcome, PersonaError};
pub use modal::{ModalController, ModalStep};
pub use config::{AppConfig, LoggingConfig, WindowConfig, CONFIG_FILE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
