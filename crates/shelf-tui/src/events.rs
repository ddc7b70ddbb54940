//! UI event types.
//!
//! Events are everything that can reach the reducer: terminal input, the
//! tick, and completions of async effects. Completion payloads carry
//! `Result<T, String>` so they stay `Send` and render-ready; the full error
//! chain is flattened at the spawn site.

use shelf_core::types::{Item, User};

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick from the runtime.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// Login finished; `Ok` carries the bearer token.
    LoginCompleted(Result<String, String>),
    /// Current-user fetch finished. Any failure invalidates the session.
    UserLoaded(Result<User, String>),
    /// Item-list fetch finished.
    ItemsLoaded(Result<Vec<Item>, String>),
    /// Item creation finished.
    ItemCreated(Result<Item, String>),
    /// Item update finished.
    ItemUpdated(Result<Item, String>),
    /// Item deletion finished; `Ok` carries the deleted identifier.
    ItemDeleted(Result<i64, String>),
}
