//! The operations exposed by the users surface.

use std::fmt;

/// An operation identified by the router from method, path, and host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsersOperation {
    /// `GET /` — plain-text service banner.
    Banner,
    /// `OPTIONS /users` — collection capabilities.
    OptionsUsers,
    /// `HEAD /users` — collection headers only.
    HeadUsers,
    /// `GET /users` — list active records.
    ListUsers,
    /// `POST /users` — create a record.
    CreateUser,
    /// `OPTIONS /users/{id}` — item capabilities.
    OptionsUser,
    /// `GET /users/{id}` — fetch a record.
    GetUser,
    /// `PUT /users/{id}` — replace or create a record.
    ReplaceUser,
    /// `PATCH /users/{id}` — shallow-merge into a record.
    PatchUser,
    /// `DELETE /users/{id}` — tombstone a record.
    DeleteUser,
    /// `GET /users` on the v1 host — raw list projection.
    ListUsersV1,
    /// `GET /users` on the v2 host — `{full_name, age}` projection.
    ListUsersV2,
}

impl UsersOperation {
    /// Returns the operation name as a string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Banner => "Banner",
            Self::OptionsUsers => "OptionsUsers",
            Self::HeadUsers => "HeadUsers",
            Self::ListUsers => "ListUsers",
            Self::CreateUser => "CreateUser",
            Self::OptionsUser => "OptionsUser",
            Self::GetUser => "GetUser",
            Self::ReplaceUser => "ReplaceUser",
            Self::PatchUser => "PatchUser",
            Self::DeleteUser => "DeleteUser",
            Self::ListUsersV1 => "ListUsersV1",
            Self::ListUsersV2 => "ListUsersV2",
        }
    }

    /// Whether this operation carries a request body to validate.
    #[must_use]
    pub fn is_write(self) -> bool {
        matches!(self, Self::CreateUser | Self::ReplaceUser | Self::PatchUser)
    }

    /// Whether this operation belongs to a versioned read-only view.
    ///
    /// Versioned views are always JSON and bypass content negotiation.
    #[must_use]
    pub fn is_versioned_view(self) -> bool {
        matches!(self, Self::ListUsersV1 | Self::ListUsersV2)
    }

    /// Whether this operation renders a negotiated representation.
    ///
    /// Only these can fail negotiation with a 406. The rest (banner,
    /// OPTIONS, DELETE, and the bodyless POST/PUT success responses) are
    /// Accept-insensitive; an unmatched Accept list on them only affects
    /// error bodies, which fall back to JSON.
    #[must_use]
    pub fn negotiates_response(self) -> bool {
        matches!(
            self,
            Self::HeadUsers | Self::ListUsers | Self::GetUser | Self::PatchUser
        )
    }
}

impl fmt::Display for UsersOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
