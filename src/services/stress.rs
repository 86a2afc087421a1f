// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stress entry repository, scoped to the current user.
//!
//! A missing session is not an error: reads come back empty and saves are
//! dropped. Callers that need to tell "no session" from "no entries" check
//! the `Option` returned by [`StressRepository::save`] or call
//! [`StressRepository::load_for_user`] with an explicit id.

use crate::db::{collections, DocumentStore, Storage};
use crate::error::Result;
use crate::models::{NewStressEntry, StressEntry};
use crate::services::aggregation;
use crate::services::ids;
use crate::services::session::SessionAccessor;
use std::collections::HashMap;

const ID_PREFIX: &str = "stress";

#[derive(Clone)]
pub struct StressRepository {
    store: DocumentStore<StressEntry>,
}

impl StressRepository {
    pub fn new(storage: Storage) -> Self {
        Self {
            store: DocumentStore::new(storage, collections::STRESS_DATA),
        }
    }

    /// Store a captured entry for the current user.
    ///
    /// Returns the stored entry, or `None` when no one is logged in (nothing
    /// is written).
    pub fn save(
        &self,
        session: &dyn SessionAccessor,
        entry: NewStressEntry,
    ) -> Result<Option<StressEntry>> {
        let Some(user_id) = session.current_user_id() else {
            tracing::debug!("No session, discarding stress entry");
            return Ok(None);
        };

        let id = ids::timestamped_id(ID_PREFIX)?;
        let entry = self
            .store
            .insert(StressEntry::from_new(id, user_id, entry))?;

        tracing::info!(
            user_id = %entry.user_id,
            entry_id = %entry.id,
            stress_level = entry.stress_level,
            "Stress entry saved"
        );
        Ok(Some(entry))
    }

    /// All entries owned by `user_id`, in insertion order.
    pub fn load_for_user(&self, user_id: &str) -> Result<Vec<StressEntry>> {
        let entries = self
            .store
            .find_by("userId", &serde_json::Value::from(user_id))?;
        tracing::debug!(user_id, count = entries.len(), "Loaded stress entries");
        Ok(entries)
    }

    /// All entries of the current user; empty without a session.
    pub fn load_all(&self, session: &dyn SessionAccessor) -> Result<Vec<StressEntry>> {
        match session.current_user_id() {
            Some(user_id) => self.load_for_user(&user_id),
            None => Ok(Vec::new()),
        }
    }

    /// Current user's mean stress level to one decimal; 0 with no entries.
    pub fn average_stress_level(&self, session: &dyn SessionAccessor) -> Result<f64> {
        Ok(aggregation::average_stress_level(&self.load_all(session)?))
    }

    /// Current user's entry count per trimmed, non-empty stress source.
    pub fn stress_source_frequency(
        &self,
        session: &dyn SessionAccessor,
    ) -> Result<HashMap<String, u32>> {
        Ok(aggregation::stress_source_frequency(
            &self.load_all(session)?,
        ))
    }
}
