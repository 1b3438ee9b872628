//! In-memory implementation of the identity store.
//!
//! `InMemoryUserStore` keeps every user behind one `Arc<Mutex<_>>`. Handles
//! returned by `user()` share that state, so writes through a handle are
//! visible to every other handle and to `snapshot()`.
//!
//! `replace_acceptance` is applied under a single lock: a concurrent reader
//! sees either the old pair or the new pair, never a half-cleared record.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use termsgate_contracts::{
    error::{GateError, GateResult},
    policy::UserAcceptanceRecord,
    user::{UserId, ATTR_AGREED_PRIVACY, ATTR_AGREED_TOS},
};
use termsgate_core::traits::UserHandle;

// ── Internal mutable state ────────────────────────────────────────────────────

/// One stored user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,
    /// Single-valued attributes by name.
    pub attributes: BTreeMap<String, String>,
    /// Pending required actions.
    pub required_actions: BTreeSet<String>,
}

#[derive(Default)]
pub(crate) struct StoreState {
    pub(crate) users: HashMap<UserId, UserEntry>,
}

fn lock(state: &Mutex<StoreState>) -> GateResult<MutexGuard<'_, StoreState>> {
    state.lock().map_err(|e| GateError::Store {
        reason: format!("user store lock poisoned: {}", e),
    })
}

fn entry_mut<'s>(state: &'s mut StoreState, id: &UserId) -> GateResult<&'s mut UserEntry> {
    state.users.get_mut(id).ok_or_else(|| GateError::Store {
        reason: format!("user '{}' no longer exists", id),
    })
}

// ── Public store ──────────────────────────────────────────────────────────────

/// An in-memory user store. Clones share the same users.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with no attributes and no pending actions.
    pub fn create_user(&self, username: impl Into<String>) -> GateResult<UserId> {
        let id = UserId::new();
        let entry = UserEntry {
            username: username.into(),
            ..UserEntry::default()
        };
        debug!(user_id = %id, username = %entry.username, "user created");
        lock(&self.state)?.users.insert(id.clone(), entry);
        Ok(id)
    }

    /// A handle for reading and writing one user.
    pub fn user(&self, id: &UserId) -> GateResult<StoredUser> {
        let state = lock(&self.state)?;
        let entry = state.users.get(id).ok_or_else(|| GateError::Store {
            reason: format!("unknown user '{}'", id),
        })?;
        Ok(StoredUser {
            id: id.clone(),
            username: entry.username.clone(),
            state: Arc::clone(&self.state),
        })
    }

    /// A copy of the user's current entry.
    pub fn snapshot(&self, id: &UserId) -> Option<UserEntry> {
        self.state.lock().ok()?.users.get(id).cloned()
    }

    /// Remove a satisfied required action, as the host does after success.
    pub fn clear_required_action(&self, id: &UserId, action: &str) -> GateResult<()> {
        let mut state = lock(&self.state)?;
        entry_mut(&mut state, id)?.required_actions.remove(action);
        Ok(())
    }
}

// ── UserHandle impl ───────────────────────────────────────────────────────────

/// A handle on one user in an `InMemoryUserStore`.
#[derive(Clone)]
pub struct StoredUser {
    id: UserId,
    username: String,
    state: Arc<Mutex<StoreState>>,
}

impl StoredUser {
    pub fn pending_actions(&self) -> GateResult<BTreeSet<String>> {
        let mut state = lock(&self.state)?;
        Ok(entry_mut(&mut state, &self.id)?.required_actions.clone())
    }
}

impl UserHandle for StoredUser {
    fn id(&self) -> &UserId {
        &self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn first_attribute(&self, name: &str) -> GateResult<Option<String>> {
        let mut state = lock(&self.state)?;
        Ok(entry_mut(&mut state, &self.id)?.attributes.get(name).cloned())
    }

    fn set_single_attribute(&self, name: &str, value: &str) -> GateResult<()> {
        let mut state = lock(&self.state)?;
        entry_mut(&mut state, &self.id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> GateResult<()> {
        let mut state = lock(&self.state)?;
        entry_mut(&mut state, &self.id)?.attributes.remove(name);
        Ok(())
    }

    fn add_required_action(&self, action: &str) -> GateResult<()> {
        let mut state = lock(&self.state)?;
        entry_mut(&mut state, &self.id)?
            .required_actions
            .insert(action.to_string());
        Ok(())
    }

    fn acceptance_record(&self) -> GateResult<UserAcceptanceRecord> {
        let mut state = lock(&self.state)?;
        let entry = entry_mut(&mut state, &self.id)?;
        Ok(UserAcceptanceRecord {
            accepted_tos_version: entry.attributes.get(ATTR_AGREED_TOS).cloned(),
            accepted_privacy_version: entry.attributes.get(ATTR_AGREED_PRIVACY).cloned(),
        })
    }

    fn replace_acceptance(&self, record: &UserAcceptanceRecord) -> GateResult<()> {
        let mut state = lock(&self.state)?;
        let attributes = &mut entry_mut(&mut state, &self.id)?.attributes;

        attributes.remove(ATTR_AGREED_TOS);
        attributes.remove(ATTR_AGREED_PRIVACY);
        if let Some(tos) = &record.accepted_tos_version {
            attributes.insert(ATTR_AGREED_TOS.to_string(), tos.clone());
        }
        if let Some(privacy) = &record.accepted_privacy_version {
            attributes.insert(ATTR_AGREED_PRIVACY.to_string(), privacy.clone());
        }
        Ok(())
    }
}
