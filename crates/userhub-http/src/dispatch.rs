//! Handler trait and operation dispatch.
//!
//! [`UsersHandler`] is the boundary between the HTTP transport and the
//! business logic: the service resolves the operation, identifier, and
//! media type, and the handler turns them into a response.

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use userhub_model::{MediaType, UserId, UsersError, UsersOperation};

use crate::body::UsersResponseBody;

/// Everything the handler needs about a request, resolved once up front.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The identified operation.
    pub operation: UsersOperation,
    /// The item identifier from the path, if any.
    pub user_id: Option<UserId>,
    /// The negotiated response representation.
    ///
    /// Computed at most once per request (negotiation can halt processing
    /// with a 406 before the handler ever runs) and fixed for its duration.
    pub media_type: MediaType,
}

/// Trait the business logic provider implements.
pub trait UsersHandler: Send + Sync + 'static {
    /// Handle an operation and produce an HTTP response.
    fn handle_operation(
        &self,
        body: Bytes,
        ctx: RequestContext,
    ) -> Pin<
        Box<dyn Future<Output = Result<http::Response<UsersResponseBody>, UsersError>> + Send>,
    >;
}

/// Dispatch a routed request to the handler.
pub async fn dispatch_operation<H: UsersHandler>(
    handler: &H,
    body: Bytes,
    ctx: RequestContext,
) -> Result<http::Response<UsersResponseBody>, UsersError> {
    tracing::debug!(operation = %ctx.operation, user = ?ctx.user_id, "dispatching operation");
    handler.handle_operation(body, ctx).await
}

/// Default handler that fails every operation.
///
/// Useful for testing the transport layer in isolation.
#[derive(Debug, Clone, Default)]
pub struct UnhandledHandler;

impl UsersHandler for UnhandledHandler {
    fn handle_operation(
        &self,
        _body: Bytes,
        ctx: RequestContext,
    ) -> Pin<
        Box<dyn Future<Output = Result<http::Response<UsersResponseBody>, UsersError>> + Send>,
    > {
        Box::pin(async move {
            Err(UsersError::internal_error(format!(
                "no handler for {}",
                ctx.operation
            )))
        })
    }
}
