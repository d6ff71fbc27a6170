//! Key-value backends for the record store.

use std::collections::HashMap;

use crate::error::Result;

/// A string key-value store holding one JSON document per key.
pub trait Substrate: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile substrate, used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySubstrate {
    entries: HashMap<String, String>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Substrate for MemorySubstrate {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage is unavailable: reads find nothing and writes are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl Substrate for Detached {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<()> {
        tracing::debug!(key, "storage detached, dropping write");
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<()> {
        Ok(())
    }
}
