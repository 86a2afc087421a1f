// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mock account management.
//!
//! There are no passwords or provider round-trips: registering or logging in
//! just finds or creates a `users` document.

use crate::db::{collections, DocumentStore, Storage};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::ids;
use chrono::Utc;
use serde_json::{json, Map, Value};

const ID_PREFIX: &str = "user";
const AVATAR_PLACEHOLDER: &str = "/placeholder.svg?height=40&width=40";

#[derive(Clone)]
pub struct UserService {
    store: DocumentStore<User>,
}

fn now() -> String {
    crate::time_utils::format_utc_iso_millis(Utc::now())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl UserService {
    pub fn new(storage: Storage) -> Self {
        Self {
            store: DocumentStore::new(storage, collections::USERS),
        }
    }

    pub fn get(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.store.find_by_id(user_id)?)
    }

    fn new_user(email: &str, name: &str, provider: Option<&str>) -> Result<User> {
        let now = now();
        Ok(User {
            id: ids::short_id(ID_PREFIX)?,
            email: email.to_string(),
            name: name.to_string(),
            provider: provider.map(str::to_string),
            avatar_url: provider.map(|_| AVATAR_PLACEHOLDER.to_string()),
            created_at: now.clone(),
            last_login: now,
        })
    }

    /// Insert `user` unless its email is already registered.
    ///
    /// Returns the stored account and whether it was just created.
    fn create_unless_registered(&self, user: User) -> Result<(User, bool)> {
        let email = Value::from(user.email.as_str());
        let (user, created) = self.store.find_or_insert("email", &email, user)?;
        if created {
            tracing::info!(user_id = %user.id, provider = ?user.provider, "User created");
        }
        Ok((user, created))
    }

    fn touch_login(&self, user: User) -> Result<User> {
        let patch = Map::from_iter([("lastLogin".to_string(), json!(now()))]);
        Ok(self.store.update(&user.id, patch)?.unwrap_or(user))
    }

    /// Create an account; the email must not be taken.
    pub fn register(&self, email: &str, name: &str) -> Result<User> {
        let email = email.trim();
        match self.create_unless_registered(Self::new_user(email, name.trim(), None)?)? {
            (user, true) => Ok(user),
            (_, false) => Err(AppError::Conflict(format!(
                "Email {email} is already registered"
            ))),
        }
    }

    /// Log in by email, creating the account on first use.
    ///
    /// New accounts are named after the local part of the email.
    pub fn login(&self, email: &str) -> Result<User> {
        let email = email.trim();
        let name = email.split('@').next().unwrap_or(email);
        match self.create_unless_registered(Self::new_user(email, name, None)?)? {
            (user, true) => Ok(user),
            (user, false) => self.touch_login(user),
        }
    }

    /// Log in through a (mock) social provider with a new random address.
    pub fn social_login(&self, provider: &str) -> Result<User> {
        let provider = provider.trim().to_lowercase();
        let domain = match provider.as_str() {
            "google" => "gmail.com".to_string(),
            "github" => "github.com".to_string(),
            other => format!("{other}.com"),
        };
        let email = format!("user.{}@{}", ids::random_base36(4)?, domain);
        let name = match provider.as_str() {
            "google" => "Google User".to_string(),
            "github" => "GitHub User".to_string(),
            other => format!("{} User", capitalize(other)),
        };
        let (user, _) =
            self.create_unless_registered(Self::new_user(&email, &name, Some(&provider))?)?;
        Ok(user)
    }

    /// Change the display name. Provider-managed profiles are read-only.
    pub fn rename(&self, user_id: &str, name: &str) -> Result<User> {
        let user = self
            .get(user_id)?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

        if let Some(provider) = &user.provider {
            return Err(AppError::BadRequest(format!(
                "Name is managed by your {provider} account"
            )));
        }

        let patch = Map::from_iter([("name".to_string(), json!(name.trim()))]);
        self.store
            .update(user_id, patch)?
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }
}
