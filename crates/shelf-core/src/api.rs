//! HTTP client for the shelf API.
//!
//! Every operation except [`ApiClient::login`] attaches the bearer token.
//! Failures are uniform: a transport error and a non-success status both
//! surface as one error with the operation in context. No timeouts are
//! configured and nothing is retried.

use anyhow::{Context, Result};
use tracing::debug;

use crate::types::{Item, ItemPayload, TokenResponse, User};

/// Client for the shelf HTTP API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for a server base URL (scheme + host, no trailing
    /// slash required).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Exchanges credentials for a bearer token.
    ///
    /// The body is form-encoded (`username`, `password`); the response must
    /// carry an `access_token` field.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or a
    /// response without a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        debug!(username, "login");
        let resp = self
            .http
            .post(self.url("/api/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to send login request")?;

        if !resp.status().is_success() {
            anyhow::bail!("Login failed with status {}", resp.status());
        }

        let token: TokenResponse = resp
            .json()
            .await
            .context("Failed to decode login response")?;
        Ok(token.access_token)
    }

    /// Fetches the user the token belongs to.
    ///
    /// # Errors
    /// Any failure here means the credential should be treated as invalid.
    pub async fn current_user(&self, token: &str) -> Result<User> {
        debug!("fetch current user");
        let resp = self
            .http
            .get(self.url("/api/me"))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send current-user request")?;

        if !resp.status().is_success() {
            anyhow::bail!("Current-user request failed with status {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to decode current-user response")
    }

    /// Lists all items, in server order.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    pub async fn list_items(&self, token: &str) -> Result<Vec<Item>> {
        debug!("list items");
        let resp = self
            .http
            .get(self.url("/api/items"))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send item-list request")?;

        if !resp.status().is_success() {
            anyhow::bail!("Item-list request failed with status {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to decode item-list response")
    }

    /// Creates an item. The identifier is assigned server-side.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    pub async fn create_item(&self, token: &str, name: &str, description: &str) -> Result<Item> {
        debug!(name, "create item");
        let resp = self
            .http
            .post(self.url("/api/items"))
            .bearer_auth(token)
            .json(&ItemPayload { name, description })
            .send()
            .await
            .context("Failed to send item-create request")?;

        if !resp.status().is_success() {
            anyhow::bail!("Item-create request failed with status {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to decode item-create response")
    }

    /// Replaces the name and description of the item with this identifier.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    pub async fn update_item(
        &self,
        token: &str,
        id: i64,
        name: &str,
        description: &str,
    ) -> Result<Item> {
        debug!(id, name, "update item");
        let resp = self
            .http
            .put(self.url(&format!("/api/items/{id}")))
            .bearer_auth(token)
            .json(&ItemPayload { name, description })
            .send()
            .await
            .context("Failed to send item-update request")?;

        if !resp.status().is_success() {
            anyhow::bail!("Item-update request failed with status {}", resp.status());
        }

        resp.json()
            .await
            .context("Failed to decode item-update response")
    }

    /// Deletes the item with this identifier.
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-success status.
    pub async fn delete_item(&self, token: &str, id: i64) -> Result<()> {
        debug!(id, "delete item");
        let resp = self
            .http
            .delete(self.url(&format!("/api/items/{id}")))
            .bearer_auth(token)
            .send()
            .await
            .context("Failed to send item-delete request")?;

        if !resp.status().is_success() {
            anyhow::bail!("Item-delete request failed with status {}", resp.status());
        }

        Ok(())
    }
}
