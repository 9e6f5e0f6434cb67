// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::path::Path;

use persona_table::{logging, AppConfig, CONFIG_FILE};

fn main() -> Result<()> {
    let config = AppConfig::load(Path::new(CONFIG_FILE))?;
    let _log_guard = logging::init_logging(&config.logging)?;

    tracing::info!(version = persona_table::VERSION, "Starting persona-table");

    run_ui_mode(&config)
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    use persona_table::{MainController, MemoryStore, PersonaStore};

    let mut controller = MainController::new(MemoryStore::new());
    ui::run_ui(&mut controller, &config.window)?;

    tracing::info!(records = controller.store().len(), "UI closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
