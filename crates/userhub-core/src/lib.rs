//! Resource store and business operations for UserHub.
//!
//! This crate owns the in-memory user store (active records plus tombstones
//! behind a single lock) and the [`UserService`] operations the HTTP layer
//! dispatches to. It knows nothing about wire formats or status codes beyond
//! the error taxonomy in `userhub-model`.

mod config;
mod service;
mod store;

pub use config::UserHubConfig;
pub use service::{UpsertOutcome, UserService};
pub use store::{Lookup, UserStore};
