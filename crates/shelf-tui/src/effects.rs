//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only (network calls, credential persistence, quit);
//! the reducer itself never performs I/O or spawns tasks.
//!
//! Each network effect completes by sending the matching
//! [`crate::events::UiEvent`] back through the runtime's inbox.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Exchange credentials for a bearer token.
    SubmitLogin { email: String, password: String },

    /// Fetch the user for the active credential.
    FetchCurrentUser,

    /// Fetch the full item list.
    FetchItems,

    /// Create an item (identifier assigned server-side).
    CreateItem { name: String, description: String },

    /// Update an item in place.
    UpdateItem {
        id: i64,
        name: String,
        description: String,
    },

    /// Delete an item by identifier.
    DeleteItem { id: i64 },

    /// Persist the token as the active credential (memory + disk).
    PersistCredential { token: String },

    /// Drop the active credential from memory and disk.
    ClearCredential,
}
