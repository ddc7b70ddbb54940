//! Login command handler.

use anyhow::{Context, Result};
use shelf_core::api::ApiClient;
use shelf_core::config::Config;
use shelf_core::session::Session;
use tracing::info;

pub async fn run(config: &Config, email: &str, password: &str) -> Result<()> {
    let api = ApiClient::new(config.base_url.clone());
    let token = api.login(email, password).await?;

    let mut session = Session::restore_default().context("restore session")?;
    session.establish(&token).context("store credential")?;

    info!(email, "logged in");
    println!("Logged in as {email}");
    Ok(())
}
