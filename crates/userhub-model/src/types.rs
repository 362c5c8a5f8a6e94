//! User records, identifiers, and negotiated media types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user identifier: the record's `first_name`, lower-cased.
///
/// Identity is case-insensitive, so `John`, `JOHN`, and `john` all name the
/// same resource. The canonical form is always lower-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Create an identifier, lower-casing the input.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    /// The canonical (lower-case) identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A stored user record.
///
/// Records are schemaless JSON objects: `first_name`, `last_name`, and `age`
/// are the well-known fields, but any additional string-keyed fields a
/// client supplies are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    fields: Map<String, Value>,
}

impl UserRecord {
    /// Wrap a JSON object as a record.
    #[must_use]
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from the three well-known fields.
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, age: i64) -> Self {
        let mut fields = Map::new();
        fields.insert("first_name".to_owned(), Value::String(first_name.to_owned()));
        fields.insert("last_name".to_owned(), Value::String(last_name.to_owned()));
        fields.insert("age".to_owned(), Value::Number(age.into()));
        Self { fields }
    }

    /// The record's `first_name`, if present and a string.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.fields.get("first_name").and_then(Value::as_str)
    }

    /// The record's `last_name`, if present and a string.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.fields.get("last_name").and_then(Value::as_str)
    }

    /// The record's `age`, if present and an integer.
    #[must_use]
    pub fn age(&self) -> Option<i64> {
        self.fields.get("age").and_then(Value::as_i64)
    }

    /// The identifier derived from `first_name`.
    #[must_use]
    pub fn id(&self) -> Option<UserId> {
        self.first_name().map(UserId::new)
    }

    /// Shallow-merge another record's fields into this one, overwriting on
    /// key collision and leaving untouched keys intact.
    pub fn merge(&mut self, partial: &Self) {
        for (key, value) in &partial.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// The record as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// The record as a JSON value with an `id` field merged in.
    #[must_use]
    pub fn to_value_with_id(&self, id: &UserId) -> Value {
        let mut fields = self.fields.clone();
        fields.insert("id".to_owned(), Value::String(id.as_str().to_owned()));
        Value::Object(fields)
    }

    /// Direct access to the underlying fields.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A negotiated wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// `application/json`.
    Json,
    /// `application/xml`.
    Xml,
}

impl MediaType {
    /// The `Content-Type` header value for this representation.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
        }
    }

    /// The comma-separated list of supported types, used as the 406 body.
    pub const SUPPORTED: &'static str = "application/json, application/xml";
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}
