//! The hyper `Service` for the users surface.
//!
//! [`UsersHttpService`] ties together routing, content negotiation, body
//! collection, dispatch, and error rendering:
//!
//! 1. Route by method, path, and host via [`UsersRouter`].
//! 2. Validate the declared Content-Type on writes (415 before anything
//!    else, matching the order the endpoints check in).
//! 3. Negotiate the response representation once; versioned views pin JSON
//!    and only operations that render a negotiated body can 406.
//! 4. Collect the request body and dispatch to the [`UsersHandler`].
//! 5. Render errors through the codec and add common response headers.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::service::Service;
use tracing::{debug, error, warn};
use uuid::Uuid;

use userhub_model::{MediaType, UsersError};

use crate::body::UsersResponseBody;
use crate::dispatch::{RequestContext, UsersHandler, dispatch_operation};
use crate::negotiate;
use crate::response::error_to_response;
use crate::router::UsersRouter;

/// Configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct UsersHttpConfig {
    /// Base domain for host-based API version dispatch.
    pub domain: String,
}

impl Default for UsersHttpConfig {
    fn default() -> Self {
        Self {
            domain: "users.localhost".to_owned(),
        }
    }
}

/// The users HTTP service implementing hyper's `Service` trait.
#[derive(Debug)]
pub struct UsersHttpService<H: UsersHandler> {
    handler: Arc<H>,
    router: UsersRouter,
}

impl<H: UsersHandler> UsersHttpService<H> {
    /// Create a new service with the given handler and configuration.
    #[must_use]
    pub fn new(handler: H, config: UsersHttpConfig) -> Self {
        Self {
            handler: Arc::new(handler),
            router: UsersRouter::new(config.domain),
        }
    }

    /// Create a new service from a shared handler.
    #[must_use]
    pub fn from_shared(handler: Arc<H>, config: UsersHttpConfig) -> Self {
        Self {
            handler,
            router: UsersRouter::new(config.domain),
        }
    }
}

impl<H: UsersHandler> Clone for UsersHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            router: self.router.clone(),
        }
    }
}

impl<H: UsersHandler> Service<http::Request<Incoming>> for UsersHttpService<H> {
    type Response = http::Response<UsersResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let router = self.router.clone();

        Box::pin(async move {
            let request_id = Uuid::new_v4().to_string();
            let response = process_request(req, handler.as_ref(), &router, &request_id).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a request through the full pipeline.
async fn process_request<H, B>(
    req: http::Request<B>,
    handler: &H,
    router: &UsersRouter,
    request_id: &str,
) -> http::Response<UsersResponseBody>
where
    H: UsersHandler,
    B: http_body::Body,
    B::Error: fmt::Display,
{
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!(%method, %uri, request_id, "processing request");

    // 1. Route by method, path, and host.
    let routed = match router.resolve(&req) {
        Ok(routed) => routed,
        Err(err) => {
            warn!(%method, %uri, error = %err, request_id, "failed to route request");
            // Best-effort negotiation so the error body still honors Accept.
            let media =
                negotiate::response_media_type(req.headers()).unwrap_or(MediaType::Json);
            return error_to_response(&err, media);
        }
    };

    debug!(
        operation = %routed.operation,
        user = ?routed.user_id,
        request_id,
        "routed request"
    );

    // 2. Writes declare a Content-Type; reject unsupported ones up front.
    if routed.operation.is_write() {
        if let Err(err) = negotiate::validate_write_content_type(req.headers(), routed.operation)
        {
            warn!(error = %err, request_id, "unsupported write content type");
            return error_to_response(&err, MediaType::Json);
        }
    }

    // 3. Fix the response representation for the rest of the request.
    //    Versioned views are always JSON. Operations that never render a
    //    negotiated body skip the 406 check; for them an unmatched Accept
    //    list only downgrades error bodies to JSON.
    let media_type = if routed.operation.is_versioned_view() {
        MediaType::Json
    } else if routed.operation.negotiates_response() {
        match negotiate::response_media_type(req.headers()) {
            Ok(media) => media,
            Err(err) => {
                debug!(request_id, "no acceptable representation");
                return error_to_response(&err, MediaType::Json);
            }
        }
    } else {
        negotiate::response_media_type(req.headers()).unwrap_or(MediaType::Json)
    };

    let ctx = RequestContext {
        operation: routed.operation,
        user_id: routed.user_id,
        media_type,
    };

    // 4. Collect the body and dispatch.
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            error!(error = %err, request_id, "failed to collect request body");
            let err = UsersError::internal_error("Failed to read request body");
            return error_to_response(&err, media_type);
        }
    };

    match dispatch_operation(handler, body, ctx).await {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, request_id, "operation returned error");
            error_to_response(&err, media_type)
        }
    }
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<UsersResponseBody>,
    request_id: &str,
) -> http::Response<UsersResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::header::HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", hv);
    }
    headers.insert("Server", http::header::HeaderValue::from_static("UserHub"));

    response
}
