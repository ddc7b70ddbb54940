//! Command handlers.

pub mod config;
pub mod items;
pub mod login;
pub mod logout;
pub mod me;

use anyhow::{Context, Result};
use shelf_core::session::Session;

/// Restores the session and fails when there is no stored credential.
pub(crate) fn require_session() -> Result<Session> {
    let session = Session::restore_default().context("restore session")?;
    if !session.is_authenticated() {
        anyhow::bail!("Not logged in. Run `shelf login` first.");
    }
    Ok(session)
}
