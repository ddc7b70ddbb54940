//! Core shelf library (config, session, API client, logging).

pub mod api;
pub mod config;
pub mod logging;
pub mod session;
pub mod types;
