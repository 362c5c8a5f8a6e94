//! The UserHub error type and its HTTP status contract.

use std::fmt;

/// Well-known error codes for the users surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum UsersErrorCode {
    /// A write body could not be parsed.
    ParseError,
    /// The request declared a Content-Type other than JSON or XML.
    UnsupportedMediaType,
    /// No entry in the Accept list matched a supported representation.
    NotAcceptable,
    /// A create collided with an existing active record.
    Conflict,
    /// The resource was deleted and is only observable as a tombstone.
    Gone,
    /// The resource never existed.
    NotFound,
    /// The method is not allowed on this resource.
    MethodNotAllowed,
    /// Internal error.
    #[default]
    InternalError,
}

impl UsersErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "ParseError",
            Self::UnsupportedMediaType => "UnsupportedMediaType",
            Self::NotAcceptable => "NotAcceptable",
            Self::Conflict => "Conflict",
            Self::Gone => "Gone",
            Self::NotFound => "NotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(self) -> http::StatusCode {
        match self {
            Self::ParseError => http::StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotAcceptable => http::StatusCode::NOT_ACCEPTABLE,
            Self::Conflict => http::StatusCode::CONFLICT,
            Self::Gone => http::StatusCode::GONE,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the default message for this error.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::ParseError => "The request body could not be parsed",
            Self::UnsupportedMediaType => "The declared content type is not supported",
            Self::NotAcceptable => "No acceptable representation is available",
            Self::Conflict => "The resource already exists",
            Self::Gone => "The resource has been deleted",
            Self::NotFound => "The resource does not exist",
            Self::MethodNotAllowed => "The method is not allowed against this resource",
            Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for UsersErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error response for the users surface.
///
/// Carries the code, a human-readable message (rendered as `{message}` in
/// the negotiated representation), and the HTTP status.
#[derive(Debug)]
pub struct UsersError {
    /// The error code.
    pub code: UsersErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The resource that caused the error, if any.
    pub resource: Option<String>,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for UsersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UsersError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for UsersError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl UsersError {
    /// Create an error from a code with its default message.
    #[must_use]
    pub fn new(code: UsersErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_owned(),
            resource: None,
            status_code: code.status_code(),
            source: None,
        }
    }

    /// Create an error with a custom message.
    #[must_use]
    pub fn with_message(code: UsersErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.status_code(),
            message: message.into(),
            code,
            resource: None,
            source: None,
        }
    }

    /// Set the resource that caused this error.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a ParseError carrying the parser's message.
    #[must_use]
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::with_message(UsersErrorCode::ParseError, message)
    }

    /// Create an UnsupportedMediaType error for the declared content type.
    #[must_use]
    pub fn unsupported_media_type(content_type: impl Into<String>) -> Self {
        Self::new(UsersErrorCode::UnsupportedMediaType).with_resource(content_type)
    }

    /// Create a NotAcceptable error.
    #[must_use]
    pub fn not_acceptable() -> Self {
        Self::new(UsersErrorCode::NotAcceptable)
    }

    /// Create a Conflict error for a duplicate user.
    #[must_use]
    pub fn duplicate_user(first_name: impl fmt::Display) -> Self {
        Self::with_message(
            UsersErrorCode::Conflict,
            format!("User {first_name} already in DB."),
        )
    }

    /// Create a Gone error for a tombstoned identifier.
    #[must_use]
    pub fn gone(id: impl Into<String>) -> Self {
        Self::new(UsersErrorCode::Gone).with_resource(id)
    }

    /// Create a NotFound error for an unknown identifier.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::new(UsersErrorCode::NotFound).with_resource(id)
    }

    /// Create a MethodNotAllowed error.
    #[must_use]
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::new(UsersErrorCode::MethodNotAllowed).with_resource(method)
    }

    /// Create an InternalError with a message.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(UsersErrorCode::InternalError, message)
    }
}

/// Convenience result type for users operations.
pub type UsersResult<T> = Result<T, UsersError>;

/// Create a [`UsersError`] from an error code.
///
/// # Examples
///
/// ```
/// use userhub_model::users_error;
/// use userhub_model::error::UsersErrorCode;
///
/// let err = users_error!(NotFound);
/// assert_eq!(err.code, UsersErrorCode::NotFound);
///
/// let err = users_error!(ParseError, "unexpected end of input");
/// assert_eq!(err.message, "unexpected end of input");
/// ```
#[macro_export]
macro_rules! users_error {
    ($code:ident) => {
        $crate::error::UsersError::new($crate::error::UsersErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::UsersError::with_message($crate::error::UsersErrorCode::$code, $msg)
    };
}
