//! Full-screen TUI for the shelf client.

pub mod effects;
pub mod events;
pub mod fields;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use shelf_core::config::Config;
use shelf_core::session::Session;

/// Runs the interactive shelf client.
///
/// # Errors
/// Returns an error if stderr is not a terminal or the event loop fails.
pub async fn run(config: Config, session: Session) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The shelf TUI requires a terminal.\n\
             Use `shelf items list` for non-interactive use."
        );
    }

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "shelf")?;
    writeln!(err, "Server: {}", config.base_url)?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(config, session)?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
