//! Business operations over the user store.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use userhub_model::{UserId, UserRecord, UsersError, UsersResult};

use crate::store::{Lookup, UserStore};

/// The outcome of a replace-or-create (PUT) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The identifier was unseen; a record was created.
    Created,
    /// An active record was overwritten wholesale.
    Replaced,
}

/// The users business logic, shared across all requests.
#[derive(Debug, Clone)]
pub struct UserService {
    store: Arc<UserStore>,
}

impl UserService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }

    /// All active records with their identifiers.
    #[must_use]
    pub fn list_users(&self) -> Vec<(UserId, UserRecord)> {
        self.store.list()
    }

    /// Fetch an active record, mapping tombstones to Gone and unseen
    /// identifiers to NotFound.
    pub fn get_user(&self, id: &UserId) -> UsersResult<UserRecord> {
        match self.store.get(id) {
            Lookup::Active(record) => Ok(record),
            Lookup::Tombstoned => Err(UsersError::gone(id.as_str())),
            Lookup::Absent => Err(UsersError::not_found(id.as_str())),
        }
    }

    /// Create a record keyed by its own `first_name`, returning the new
    /// identifier. Fails with ParseError when `first_name` is missing and
    /// Conflict when the identifier is already active.
    pub fn create_user(&self, record: UserRecord) -> UsersResult<UserId> {
        let id = record_id(&record)?;
        self.store.create(id.clone(), record)?;
        debug!(user = %id, "created user");
        Ok(id)
    }

    /// Replace or create the record under the path identifier.
    ///
    /// The path parameter is authoritative; the body's `first_name` must be
    /// present (records without one are rejected as unparsable) but does not
    /// affect the storage key.
    pub fn replace_user(&self, id: &UserId, record: UserRecord) -> UsersResult<UpsertOutcome> {
        record_id(&record)?;
        let existed = self.store.replace_or_create(id.clone(), record)?;
        debug!(user = %id, existed, "replaced user");
        Ok(if existed {
            UpsertOutcome::Replaced
        } else {
            UpsertOutcome::Created
        })
    }

    /// Shallow-merge a partial record into the active record under `id`.
    pub fn patch_user(&self, id: &UserId, partial: &UserRecord) -> UsersResult<UserRecord> {
        let merged = self.store.merge_patch(id, partial)?;
        debug!(user = %id, "patched user");
        Ok(merged)
    }

    /// Tombstone the record under `id`. Idempotent.
    pub fn delete_user(&self, id: &UserId) {
        self.store.delete(id);
        debug!(user = %id, "deleted user");
    }

    /// The v1 projection: raw records, no identifier annotation.
    #[must_use]
    pub fn list_v1(&self) -> Vec<Value> {
        self.store
            .list()
            .into_iter()
            .map(|(_, record)| record.to_value())
            .collect()
    }

    /// The v2 projection: `{full_name, age}` per record.
    #[must_use]
    pub fn list_v2(&self) -> Vec<Value> {
        self.store
            .list()
            .into_iter()
            .map(|(_, record)| {
                let full_name = format!(
                    "{} {}",
                    record.first_name().unwrap_or_default(),
                    record.last_name().unwrap_or_default(),
                );
                json!({ "full_name": full_name, "age": record.age() })
            })
            .collect()
    }
}

/// Derive the storage identifier from a client-supplied record.
fn record_id(record: &UserRecord) -> UsersResult<UserId> {
    record
        .id()
        .ok_or_else(|| UsersError::parse_error("first_name is required and must be a string"))
}
