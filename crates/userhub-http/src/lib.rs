//! HTTP layer for the UserHub resource server.
//!
//! This crate turns raw HTTP requests into [`userhub_model::UsersOperation`]s
//! and typed responses:
//!
//! - [`router`] — method + path + host routing, including the `api1`/`api2`
//!   subdomain views.
//! - [`negotiate`] — `Accept` policy (JSON/XML/406) and write `Content-Type`
//!   validation (415).
//! - [`codec`] — JSON and XML encoding of response values, JSON-only
//!   decoding of write bodies.
//! - [`body`] — the response body type.
//! - [`dispatch`] — the handler trait the business logic implements.
//! - [`response`] — negotiated data/error/empty response builders.
//! - [`service`] — the hyper `Service` tying it all together.

pub mod body;
pub mod codec;
pub mod dispatch;
pub mod negotiate;
pub mod response;
pub mod router;
pub mod service;
