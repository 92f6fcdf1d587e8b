// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Reliagraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Reliagraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyed persistence.
//!
//! A [`StorageBackend`] is a flat string-to-string map (in memory or a folder of JSON files).
//! [`KeyedStore`] binds one key of a backend to one typed value, serialized as JSON. Reads never
//! fail: an absent, unreadable or corrupted value reads as the default. Writes surface
//! [`PersistenceError`].
//!
//! There is no locking or transaction discipline across processes. Two writers sharing a
//! backend silently overwrite each other at the granularity of a whole key.

pub mod folder;
pub mod memory;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PersistenceError;
use crate::model::ProjectId;

pub use folder::{FolderBackend, WriteDurability};
pub use memory::MemoryBackend;

/// Key holding the global project list.
pub const PROJECTS_KEY: &str = "projects";

/// Key holding the diagram list of one project.
pub fn diagrams_key(project_id: &ProjectId) -> String {
    format!("diagrams:{project_id}")
}

pub trait StorageBackend: fmt::Debug + Send + Sync {
    /// Raw value under `key`, `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}

/// One typed value persisted under one key.
pub struct KeyedStore<T> {
    backend: Arc<dyn StorageBackend>,
    key: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for KeyedStore<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            key: self.key.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for KeyedStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedStore")
            .field("key", &self.key)
            .field("backend", &self.backend)
            .finish()
    }
}

impl<T> KeyedStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value, or `default()` when the key is absent, unreadable or not valid JSON for `T`.
    pub fn read_or_else(&self, default: impl FnOnce() -> T) -> T {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default(),
            Err(err) => {
                warn!(key = self.key.as_str(), error = err.to_string(); "Unreadable stored value, using default");
                return default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = self.key.as_str(), error = err.to_string(); "Corrupted stored value, using default");
                default()
            }
        }
    }

    pub fn write(&self, value: &T) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set(&self.key, &encoded)
    }

    /// Removes the key entirely; a later read yields the default.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        self.backend.remove(&self.key)
    }
}

impl<T> KeyedStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn read(&self) -> T {
        self.read_or_else(T::default)
    }
}
