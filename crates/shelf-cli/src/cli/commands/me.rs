//! Current-user command handler.

use anyhow::{Context, Result};
use shelf_core::api::ApiClient;
use shelf_core::config::Config;
use tracing::warn;

use super::require_session;

pub async fn run(config: &Config) -> Result<()> {
    let mut session = require_session()?;
    let api = ApiClient::new(config.base_url.clone());

    // The credential is present by construction of require_session.
    let token = session.credential().unwrap_or_default().to_string();
    match api.current_user(&token).await {
        Ok(user) => {
            println!("{}", user.email);
            if let Some(name) = &user.full_name {
                println!("{name}");
            }
            Ok(())
        }
        Err(e) => {
            // Any failure here means the credential is invalid; drop it.
            warn!(error = ?e, "current-user fetch failed, clearing session");
            session.clear().context("clear credential")?;
            Err(e.context("Session invalid, credential cleared. Run `shelf login` again"))
        }
    }
}
