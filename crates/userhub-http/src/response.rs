//! Response builders: negotiated data responses and error rendering.
//!
//! Handlers produce a [`Representation`] — the JSON shape and the XML shape
//! of the same result — and these builders encode whichever one the request
//! negotiated. Errors are rendered as `{message}` through the same codec,
//! except the 406 (plain-text list of supported types) and the bodyless 415.

use serde_json::{Value, json};

use userhub_model::{MediaType, UsersError, UsersErrorCode, UsersResult};

use crate::body::UsersResponseBody;
use crate::codec;

/// The two wire shapes of a response value.
///
/// JSON and XML shapes differ structurally (e.g. the collection is a JSON
/// array but an XML element keyed by identifier), so handlers provide both
/// and the negotiated one is encoded.
#[derive(Debug, Clone)]
pub struct Representation {
    /// The JSON shape.
    pub json: Value,
    /// The XML shape (a top-level object; keys become elements).
    pub xml: Value,
}

impl Representation {
    /// Pair a JSON shape with an XML shape.
    #[must_use]
    pub fn new(json: Value, xml: Value) -> Self {
        Self { json, xml }
    }

    /// A shape that is identical in both representations.
    #[must_use]
    pub fn uniform(value: Value) -> Self {
        Self {
            json: value.clone(),
            xml: value,
        }
    }
}

/// Build a response with the negotiated representation of `repr`.
pub fn data_response(
    status: http::StatusCode,
    media: MediaType,
    repr: &Representation,
) -> UsersResult<http::Response<UsersResponseBody>> {
    let shape = match media {
        MediaType::Json => &repr.json,
        MediaType::Xml => &repr.xml,
    };
    let bytes = codec::encode(media, shape)?;

    build(
        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, media.content_type()),
        UsersResponseBody::from_bytes(bytes),
    )
}

/// Build a bodyless response.
pub fn empty_response(status: http::StatusCode) -> UsersResult<http::Response<UsersResponseBody>> {
    build(
        http::Response::builder().status(status),
        UsersResponseBody::empty(),
    )
}

/// Build a bodyless 200 carrying only the negotiated Content-Type (HEAD).
pub fn head_response(media: MediaType) -> UsersResult<http::Response<UsersResponseBody>> {
    build(
        http::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::CONTENT_TYPE, media.content_type()),
        UsersResponseBody::empty(),
    )
}

/// Build a plain-text response.
pub fn text_response(
    status: http::StatusCode,
    body: impl Into<String>,
) -> UsersResult<http::Response<UsersResponseBody>> {
    build(
        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "text/plain"),
        UsersResponseBody::from_string(body),
    )
}

/// Build a 200 advertising the allowed methods for a resource.
pub fn options_response(allow: &str) -> UsersResult<http::Response<UsersResponseBody>> {
    build(
        http::Response::builder()
            .status(http::StatusCode::OK)
            .header(http::header::ALLOW, allow),
        UsersResponseBody::empty(),
    )
}

/// Render an error in the representation the request negotiated.
///
/// The 406 body is the plain-text list of supported types and the 415 is
/// status-only; every other error is `{message}` through the codec.
pub fn error_to_response(
    err: &UsersError,
    media: MediaType,
) -> http::Response<UsersResponseBody> {
    let result = match err.code {
        UsersErrorCode::NotAcceptable => {
            text_response(err.status_code, MediaType::SUPPORTED)
        }
        UsersErrorCode::UnsupportedMediaType => empty_response(err.status_code),
        _ => {
            let repr = Representation::uniform(json!({ "message": err.message }));
            data_response(err.status_code, media, &repr)
        }
    };

    result.unwrap_or_else(|_| {
        let mut response = http::Response::new(UsersResponseBody::empty());
        *response.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}

fn build(
    builder: http::response::Builder,
    body: UsersResponseBody,
) -> UsersResult<http::Response<UsersResponseBody>> {
    builder
        .body(body)
        .map_err(|e| UsersError::internal_error(format!("failed to build HTTP response: {e}")))
}
