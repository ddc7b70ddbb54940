//! Wire types for the shelf HTTP API.

use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// Optional display name; the server may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl User {
    /// Returns the name to show in headers: display name when present,
    /// email otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.email)
    }
}

/// A shelf item. The identifier is assigned server-side and immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// The server may store NULL descriptions; treat missing as empty.
    #[serde(default)]
    pub description: String,
}

/// Successful login response. Only `access_token` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Request body for item create/update.
#[derive(Debug, Serialize)]
pub struct ItemPayload<'a> {
    pub name: &'a str,
    pub description: &'a str,
}
