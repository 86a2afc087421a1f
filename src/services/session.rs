// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session access: who is the current user?
//!
//! Repository operations take the session explicitly instead of reading an
//! ambient "logged in" key, so the same code serves a multi-user API
//! ([`crate::middleware::auth::AuthUser`]) and a single-user embedding
//! ([`StoredSession`]).

use crate::db::{collections, Storage};
use crate::models::User;

/// Capability returning the current user's identifier, if anyone is logged in.
pub trait SessionAccessor {
    fn current_user_id(&self) -> Option<String>;
}

/// No one is logged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSession;

impl SessionAccessor for NoSession {
    fn current_user_id(&self) -> Option<String> {
        None
    }
}

/// Session held in storage as the logged-in user object.
///
/// The identifier is taken from `_id`, falling back to `id`. A missing or
/// unreadable blob means no session.
#[derive(Debug, Clone)]
pub struct StoredSession {
    storage: Storage,
}

impl StoredSession {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Record `user` as the logged-in user.
    pub fn login(&self, user: &User) -> Result<(), crate::db::StoreError> {
        let data = serde_json::to_string(user).map_err(crate::db::StoreError::Serialization)?;
        self.storage.set_item(collections::SESSION_USER, &data)
    }

    pub fn logout(&self) -> Result<(), crate::db::StoreError> {
        self.storage.remove_item(collections::SESSION_USER)
    }
}

impl SessionAccessor for StoredSession {
    fn current_user_id(&self) -> Option<String> {
        let data = match self.storage.get_item(collections::SESSION_USER) {
            Ok(data) => data?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session user");
                return None;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "Session user is not valid JSON");
                return None;
            }
        };

        ["_id", "id"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

impl<S: SessionAccessor + ?Sized> SessionAccessor for &S {
    fn current_user_id(&self) -> Option<String> {
        (**self).current_user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(blob: Option<&str>) -> StoredSession {
        let storage = Storage::in_memory();
        if let Some(blob) = blob {
            storage.set_item(collections::SESSION_USER, blob).unwrap();
        }
        StoredSession::new(storage)
    }

    #[test]
    fn test_no_session() {
        assert_eq!(NoSession.current_user_id(), None);
        assert_eq!(stored(None).current_user_id(), None);
        assert_eq!(
            StoredSession::new(Storage::offline()).current_user_id(),
            None
        );
    }

    #[test]
    fn test_prefers_underscore_id() {
        let session = stored(Some(r#"{"_id":"user_a","id":"user_b"}"#));
        assert_eq!(session.current_user_id().as_deref(), Some("user_a"));
    }

    #[test]
    fn test_falls_back_to_plain_id() {
        let session = stored(Some(r#"{"id":"user_b","name":"B"}"#));
        assert_eq!(session.current_user_id().as_deref(), Some("user_b"));
    }

    #[test]
    fn test_unreadable_blob_is_no_session() {
        assert_eq!(stored(Some("not json")).current_user_id(), None);
        assert_eq!(stored(Some(r#"{"name":"anon"}"#)).current_user_id(), None);
    }

    #[test]
    fn test_login_logout() {
        let session = StoredSession::new(Storage::in_memory());
        let user = User {
            id: "user_c".to_string(),
            email: "c@example.com".to_string(),
            name: "C".to_string(),
            provider: None,
            avatar_url: None,
            created_at: String::new(),
            last_login: String::new(),
        };

        session.login(&user).unwrap();
        assert_eq!(session.current_user_id().as_deref(), Some("user_c"));

        session.logout().unwrap();
        assert_eq!(session.current_user_id(), None);
    }
}
