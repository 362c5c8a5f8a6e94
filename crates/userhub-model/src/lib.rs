//! Data types shared by the UserHub store, HTTP layer, and server.
//!
//! This crate defines the user record and identifier types, the negotiated
//! media types, the operation enum produced by the router, and the error
//! type that carries the HTTP status contract.

pub mod error;
pub mod operations;
pub mod types;

pub use error::{UsersError, UsersErrorCode, UsersResult};
pub use operations::UsersOperation;
pub use types::{MediaType, UserId, UserRecord};
