//! The record store.
//!
//! Every collection lives under one key as a single JSON document and is read
//! and written wholesale.  Substrate and parse failures never reach callers:
//! they are logged and the value is treated as absent.
//!
//! All access goes through one mutex, and [`RecordStore::modify`] holds it
//! across the whole read-modify-write, so two writers in the same process
//! cannot lose each other's updates.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::substrate::{Detached, MemorySubstrate, Substrate};

pub struct RecordStore {
    substrate: Mutex<Box<dyn Substrate>>,
}

impl RecordStore {
    pub fn new(substrate: impl Substrate + 'static) -> Self {
        Self {
            substrate: Mutex::new(Box::new(substrate)),
        }
    }

    /// Store backed by the default on-disk database.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(Database::new()?))
    }

    /// Volatile store, mostly for tests.
    pub fn in_memory() -> Self {
        Self::new(MemorySubstrate::new())
    }

    /// Store with no usable backend.
    pub fn detached() -> Self {
        Self::new(Detached)
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn Substrate>> {
        // A panic mid-write leaves at worst a stale document behind.
        self.substrate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read and decode the value under `key`.
    pub(crate) fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let guard = self.lock();
        read_value(&**guard, key)
    }

    /// Read a collection, empty when absent or unreadable.
    pub(crate) fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read(key).unwrap_or_default()
    }

    pub(crate) fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let mut guard = self.lock();
        write_value(&mut **guard, key, value);
    }

    pub(crate) fn remove(&self, key: &str) {
        if let Err(e) = self.lock().remove(key) {
            tracing::error!(key, error = %e, "failed to remove value");
        }
    }

    /// Read-modify-write under one lock.
    ///
    /// `f` receives the current value (default when absent) and the result is
    /// persisted only when `f` returns `Some`.
    pub(crate) fn modify<T, R>(&self, key: &str, f: impl FnOnce(&mut T) -> Option<R>) -> Option<R>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let mut guard = self.lock();
        let mut value: T = read_value(&**guard, key).unwrap_or_default();
        let outcome = f(&mut value)?;
        write_value(&mut **guard, key, &value);
        Some(outcome)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

fn read_value<T: DeserializeOwned>(substrate: &dyn Substrate, key: &str) -> Option<T> {
    let raw = match substrate.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to read value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(source) => {
            let e = StoreError::Json {
                key: key.to_string(),
                source,
            };
            tracing::error!(key, error = %e, "discarding unreadable value");
            None
        }
    }
}

fn write_value<T: Serialize + ?Sized>(substrate: &mut dyn Substrate, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(key, error = %e, "failed to serialize value");
            return;
        }
    };

    if let Err(e) = substrate.set(key, &json) {
        tracing::error!(key, error = %e, "failed to write value");
    }
}
