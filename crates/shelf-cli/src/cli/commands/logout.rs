//! Logout command handler.

use anyhow::{Context, Result};
use shelf_core::session::Session;
use tracing::info;

pub fn run() -> Result<()> {
    let mut session = Session::restore_default().context("restore session")?;
    session.clear().context("clear credential")?;

    info!("logged out");
    println!("Logged out.");
    Ok(())
}
