//! The in-memory user store: active records and tombstones.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use userhub_model::{UserId, UserRecord, UsersError, UsersResult};

/// The three-way result of looking up an identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// The identifier names an active record.
    Active(UserRecord),
    /// The identifier was deleted; only a 410 signal remains.
    Tombstoned,
    /// The identifier was never seen.
    Absent,
}

/// Both maps live behind one lock so delete and create appear atomic to
/// readers: no reader can observe an identifier in the active and tombstone
/// sets at the same time.
#[derive(Debug, Default)]
struct StoreInner {
    active: BTreeMap<UserId, UserRecord>,
    tombstones: BTreeMap<UserId, UserRecord>,
}

/// Thread-safe store of user records keyed by identifier.
///
/// An identifier is in at most one of the active or tombstone maps. Deletion
/// moves a record from active to tombstone; tombstoned records are immutable
/// and never served, they only drive 410 responses.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: RwLock<StoreInner>,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the three sample users the server ships
    /// with (john, simon, thibault).
    #[must_use]
    pub fn with_sample_users() -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write();
            for (first, last, age) in [
                ("John", "Smith", 28),
                ("Simon", "Random", 26),
                ("Thibault", "Denizet", 25),
            ] {
                let record = UserRecord::new(first, last, age);
                inner.active.insert(UserId::new(first), record);
            }
        }
        store
    }

    /// All active records with their identifiers, in stable (sorted) order.
    #[must_use]
    pub fn list(&self) -> Vec<(UserId, UserRecord)> {
        let inner = self.inner.read();
        inner
            .active
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    /// Look up an identifier.
    #[must_use]
    pub fn get(&self, id: &UserId) -> Lookup {
        let inner = self.inner.read();
        if let Some(record) = inner.active.get(id) {
            Lookup::Active(record.clone())
        } else if inner.tombstones.contains_key(id) {
            Lookup::Tombstoned
        } else {
            Lookup::Absent
        }
    }

    /// Insert a new record under `id`.
    ///
    /// Fails with Conflict if the identifier is active. A tombstoned
    /// identifier is resurrected: the duplicate check only consults the
    /// active set, and the stale tombstone is dropped on insert.
    pub fn create(&self, id: UserId, record: UserRecord) -> UsersResult<()> {
        let mut inner = self.inner.write();
        if inner.active.contains_key(&id) {
            let name = record.first_name().unwrap_or(id.as_str()).to_owned();
            return Err(UsersError::duplicate_user(name));
        }
        inner.tombstones.remove(&id);
        inner.active.insert(id, record);
        Ok(())
    }

    /// Replace the record under `id` wholesale, or insert it if unseen.
    ///
    /// Returns `true` if a record previously existed. Fails with Gone for a
    /// tombstoned identifier; PUT does not resurrect.
    pub fn replace_or_create(&self, id: UserId, record: UserRecord) -> UsersResult<bool> {
        let mut inner = self.inner.write();
        if inner.tombstones.contains_key(&id) {
            return Err(UsersError::gone(id.as_str()));
        }
        let existed = inner.active.insert(id, record).is_some();
        Ok(existed)
    }

    /// Shallow-merge `partial` into the active record under `id`, field by
    /// field, overwriting on key collision. Returns the merged record.
    pub fn merge_patch(&self, id: &UserId, partial: &UserRecord) -> UsersResult<UserRecord> {
        let mut inner = self.inner.write();
        if inner.tombstones.contains_key(id) {
            return Err(UsersError::gone(id.as_str()));
        }
        let Some(record) = inner.active.get_mut(id) else {
            return Err(UsersError::not_found(id.as_str()));
        };
        record.merge(partial);
        Ok(record.clone())
    }

    /// Move the record under `id` to the tombstone set.
    ///
    /// Idempotent: deleting a tombstoned or unseen identifier is a no-op.
    pub fn delete(&self, id: &UserId) {
        let mut inner = self.inner.write();
        if let Some(record) = inner.active.remove(id) {
            inner.tombstones.insert(id.clone(), record);
        }
    }

    /// Number of active records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().active.len()
    }

    /// Whether the active set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().active.is_empty()
    }

    /// Drop all active records and tombstones.
    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.active.clear();
        inner.tombstones.clear();
    }
}
