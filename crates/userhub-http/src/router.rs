//! Request routing: method + path dispatch and host-based API versioning.
//!
//! The [`UsersRouter`] maps incoming HTTP requests to [`UsersOperation`]s by
//! examining:
//!
//! - The request host: a subdomain relative to the configured base domain
//!   selects a versioned read-only view (`api1` → raw, `api2` → transformed).
//! - The URI path (`/`, `/users`, `/users/{id}`).
//! - The HTTP method.
//!
//! Unknown paths are NotFound; known paths with unlisted methods are
//! MethodNotAllowed (notably PUT/PATCH/DELETE on the collection).

use http::Method;
use percent_encoding::percent_decode_str;

use userhub_model::{UserId, UsersError, UsersOperation};

/// The host-derived API surface a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApiSurface {
    /// The main CRUD surface.
    Main,
    /// The raw read-only view (`api1` subdomain).
    V1,
    /// The transformed read-only view (`api2` subdomain).
    V2,
}

/// Configuration for request routing.
#[derive(Debug, Clone)]
pub struct UsersRouter {
    /// Base domain for subdomain dispatch (e.g. `users.localhost`); the
    /// hosts `api1.users.localhost` and `api2.users.localhost` select the
    /// versioned views.
    pub domain: String,
}

/// The result of routing a request, passed through to the handler.
#[derive(Debug, Clone)]
pub struct RoutingContext {
    /// The identified operation.
    pub operation: UsersOperation,
    /// The item identifier from the path, if any (already canonicalized).
    pub user_id: Option<UserId>,
}

impl UsersRouter {
    /// Create a router for the given base domain.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Resolve a request to an operation.
    ///
    /// # Errors
    ///
    /// Returns NotFound for unknown paths and MethodNotAllowed for known
    /// paths with unsupported methods.
    pub fn resolve<B>(&self, req: &http::Request<B>) -> Result<RoutingContext, UsersError> {
        let surface = self.resolve_surface(req.headers());
        let method = req.method();
        let path = req.uri().path();
        let segments = parse_segments(path);

        match surface {
            ApiSurface::Main => resolve_main(method, path, &segments),
            ApiSurface::V1 => resolve_versioned(method, path, &segments, UsersOperation::ListUsersV1),
            ApiSurface::V2 => resolve_versioned(method, path, &segments, UsersOperation::ListUsersV2),
        }
    }

    /// Pick the API surface from the Host header.
    ///
    /// `api1.<domain>` and `api2.<domain>` select the versioned views; any
    /// other host (including a bare `<domain>` or an IP) is the main surface.
    fn resolve_surface(&self, headers: &http::HeaderMap) -> ApiSurface {
        match extract_subdomain(headers, &self.domain).as_deref() {
            Some("api1") => ApiSurface::V1,
            Some("api2") => ApiSurface::V2,
            _ => ApiSurface::Main,
        }
    }
}

/// Extract the subdomain from a Host header relative to the base domain.
///
/// For example, with domain `users.localhost` and Host
/// `api1.users.localhost:4567`, this returns `Some("api1")`.
fn extract_subdomain(headers: &http::HeaderMap, domain: &str) -> Option<String> {
    let host = headers
        .get(http::header::HOST)
        .and_then(|v| v.to_str().ok())?;

    // Strip port if present.
    let host_without_port = host.split(':').next().unwrap_or(host);

    let suffix = format!(".{domain}");
    if host_without_port.ends_with(&suffix) && host_without_port.len() > suffix.len() {
        let subdomain = &host_without_port[..host_without_port.len() - suffix.len()];
        if !subdomain.is_empty() {
            return Some(subdomain.to_owned());
        }
    }

    None
}

/// Split a path into percent-decoded, non-empty segments.
fn parse_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

/// Route a request on the main CRUD surface.
fn resolve_main(
    method: &Method,
    path: &str,
    segments: &[String],
) -> Result<RoutingContext, UsersError> {
    match segments {
        [] => match *method {
            Method::GET => Ok(context(UsersOperation::Banner, None)),
            _ => Err(UsersError::method_not_allowed(method.as_str())),
        },
        [col] if col == "users" => {
            let operation = match *method {
                Method::OPTIONS => UsersOperation::OptionsUsers,
                Method::HEAD => UsersOperation::HeadUsers,
                Method::GET => UsersOperation::ListUsers,
                Method::POST => UsersOperation::CreateUser,
                // PUT/PATCH/DELETE directly on the collection.
                _ => return Err(UsersError::method_not_allowed(method.as_str())),
            };
            Ok(context(operation, None))
        }
        [col, id] if col == "users" => {
            let operation = match *method {
                Method::OPTIONS => UsersOperation::OptionsUser,
                // HEAD is served as GET; hyper omits the body on the wire.
                Method::GET | Method::HEAD => UsersOperation::GetUser,
                Method::PUT => UsersOperation::ReplaceUser,
                Method::PATCH => UsersOperation::PatchUser,
                Method::DELETE => UsersOperation::DeleteUser,
                _ => return Err(UsersError::method_not_allowed(method.as_str())),
            };
            Ok(context(operation, Some(UserId::new(id))))
        }
        _ => Err(UsersError::not_found(path)),
    }
}

/// Route a request on a versioned read-only surface.
///
/// Versioned hosts expose `GET /users` only.
fn resolve_versioned(
    method: &Method,
    path: &str,
    segments: &[String],
    list_op: UsersOperation,
) -> Result<RoutingContext, UsersError> {
    match segments {
        [col] if col == "users" => match *method {
            Method::GET => Ok(context(list_op, None)),
            _ => Err(UsersError::method_not_allowed(method.as_str())),
        },
        _ => Err(UsersError::not_found(path)),
    }
}

fn context(operation: UsersOperation, user_id: Option<UserId>) -> RoutingContext {
    RoutingContext { operation, user_id }
}
