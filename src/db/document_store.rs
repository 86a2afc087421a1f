// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed document collections persisted as one JSON array per key.
//!
//! Each mutation reads the whole collection, changes it, and writes the whole
//! collection back under the collection lock. That is O(n) per write and is
//! only meant for small per-user data sets.

use crate::db::storage::{Storage, StorageMedium};
use crate::db::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// Reserved field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// A record that can live in a [`DocumentStore`].
///
/// Implementors must serialize their identifier under [`ID_FIELD`].
pub trait Document {
    fn id(&self) -> &str;
}

/// Collection-scoped CRUD over a [`Storage`] handle.
pub struct DocumentStore<T> {
    storage: Storage,
    collection: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for DocumentStore<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            collection: self.collection.clone(),
            _marker: PhantomData,
        }
    }
}

fn id_of(doc: &Value) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

impl<T> DocumentStore<T>
where
    T: Document + Serialize + DeserializeOwned,
{
    pub fn new(storage: Storage, collection: impl Into<String>) -> Self {
        Self {
            storage,
            collection: collection.into(),
            _marker: PhantomData,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Whether writes will actually be persisted.
    pub fn is_available(&self) -> bool {
        self.storage.is_available()
    }

    // ─── Raw Access ──────────────────────────────────────────────

    fn read_raw(&self, medium: &dyn StorageMedium) -> Result<Vec<Value>, StoreError> {
        match medium.get_item(&self.collection)? {
            Some(data) => serde_json::from_str(&data).map_err(|source| {
                tracing::error!(
                    collection = %self.collection,
                    error = %source,
                    "Stored collection is not a JSON array"
                );
                StoreError::Corrupted {
                    collection: self.collection.clone(),
                    source,
                }
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write_raw(&self, medium: &dyn StorageMedium, docs: &[Value]) -> Result<(), StoreError> {
        let data = serde_json::to_string(docs).map_err(StoreError::Serialization)?;
        medium.set_item(&self.collection, &data)
    }

    fn decode(&self, doc: Value) -> Result<T, StoreError> {
        serde_json::from_value(doc).map_err(|source| StoreError::Corrupted {
            collection: self.collection.clone(),
            source,
        })
    }

    fn decode_all(&self, docs: Vec<Value>) -> Result<Vec<T>, StoreError> {
        docs.into_iter().map(|doc| self.decode(doc)).collect()
    }

    // ─── Queries ─────────────────────────────────────────────────

    /// All documents in storage order. Empty when nothing is stored or offline.
    pub fn get_all(&self) -> Result<Vec<T>, StoreError> {
        self.storage
            .locked(&self.collection, |m| {
                let raw = self.read_raw(m)?;
                self.decode_all(raw)
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    /// First document whose id matches.
    pub fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.get_all()?.into_iter().find(|doc| doc.id() == id))
    }

    /// Documents whose serialized `field` equals `value` exactly.
    pub fn find_by(&self, field: &str, value: &Value) -> Result<Vec<T>, StoreError> {
        self.storage
            .locked(&self.collection, |m| {
                let matching = self
                    .read_raw(m)?
                    .into_iter()
                    .filter(|doc| doc.get(field) == Some(value))
                    .collect();
                self.decode_all(matching)
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.storage
            .locked(&self.collection, |m| Ok(self.read_raw(m)?.len()))
            .unwrap_or(Ok(0))
    }

    // ─── Mutations ───────────────────────────────────────────────

    /// Append a document and persist the collection.
    ///
    /// Rejects a document whose id is already present. Offline, the document
    /// is returned without being stored.
    pub fn insert(&self, document: T) -> Result<T, StoreError> {
        let value = serde_json::to_value(&document).map_err(StoreError::Serialization)?;

        let written = self.storage.locked(&self.collection, |m| {
            let mut docs = self.read_raw(m)?;
            self.append(m, &mut docs, value, document.id())
        });

        match written {
            Some(result) => result?,
            None => tracing::debug!(
                collection = %self.collection,
                id = document.id(),
                "Storage offline, insert dropped"
            ),
        }
        Ok(document)
    }

    /// Return the first document whose `field` equals `value`, or insert
    /// `document` if there is none.
    ///
    /// The lookup and the insert happen under one collection lock, so
    /// concurrent callers cannot both insert. The flag is `true` when
    /// `document` was inserted. Offline, `document` is returned as inserted.
    pub fn find_or_insert(
        &self,
        field: &str,
        value: &Value,
        document: T,
    ) -> Result<(T, bool), StoreError> {
        let encoded = serde_json::to_value(&document).map_err(StoreError::Serialization)?;

        let outcome = self.storage.locked(&self.collection, |m| {
            let mut docs = self.read_raw(m)?;
            if let Some(existing) = docs.iter().find(|doc| doc.get(field) == Some(value)) {
                return self.decode(existing.clone()).map(Some);
            }
            self.append(m, &mut docs, encoded, document.id())?;
            Ok(None)
        });

        match outcome {
            Some(Ok(Some(existing))) => Ok((existing, false)),
            Some(Ok(None)) => Ok((document, true)),
            Some(Err(e)) => Err(e),
            None => {
                tracing::debug!(
                    collection = %self.collection,
                    id = document.id(),
                    "Storage offline, insert dropped"
                );
                Ok((document, true))
            }
        }
    }

    /// Push `value` onto `docs` and persist, unless `id` is already present.
    fn append(
        &self,
        medium: &dyn StorageMedium,
        docs: &mut Vec<Value>,
        value: Value,
        id: &str,
    ) -> Result<(), StoreError> {
        if docs.iter().any(|doc| id_of(doc) == Some(id)) {
            return Err(StoreError::DuplicateId {
                collection: self.collection.clone(),
                id: id.to_string(),
            });
        }
        docs.push(value);
        self.write_raw(medium, docs)
    }

    /// Shallow-merge `patch` over the document with `id` and persist.
    ///
    /// Top-level fields in `patch` replace the stored ones; everything else is
    /// kept. The id field cannot be changed. Returns `None` (and writes
    /// nothing) when no document matches.
    pub fn update(&self, id: &str, patch: Map<String, Value>) -> Result<Option<T>, StoreError> {
        self.storage
            .locked(&self.collection, |m| {
                let mut docs = self.read_raw(m)?;
                let Some(doc) = docs.iter_mut().find(|doc| id_of(doc) == Some(id)) else {
                    return Ok(None);
                };

                let invalid = |reason: String| StoreError::InvalidUpdate {
                    collection: self.collection.clone(),
                    id: id.to_string(),
                    reason,
                };

                let mut merged = doc
                    .as_object()
                    .cloned()
                    .ok_or_else(|| invalid("stored document is not an object".to_string()))?;
                for (field, value) in patch {
                    if field != ID_FIELD {
                        merged.insert(field, value);
                    }
                }

                let merged = Value::Object(merged);
                let updated: T = serde_json::from_value(merged.clone())
                    .map_err(|e| invalid(e.to_string()))?;
                *doc = merged;

                self.write_raw(m, &docs)?;
                Ok(Some(updated))
            })
            .unwrap_or(Ok(None))
    }

    /// Remove the first document with `id`. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.storage
            .locked(&self.collection, |m| {
                let mut docs = self.read_raw(m)?;
                let Some(index) = docs.iter().position(|doc| id_of(doc) == Some(id)) else {
                    return Ok(false);
                };
                docs.remove(index);
                self.write_raw(m, &docs)?;
                Ok(true)
            })
            .unwrap_or(Ok(false))
    }
}
