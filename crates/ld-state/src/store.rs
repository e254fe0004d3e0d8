//! Key-value store trait and the in-memory implementation

use std::collections::HashMap;

use ld_core::LdResult;
use parking_lot::RwLock;

/// Named buckets the draw session persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Participants,
    History,
    Settings,
    Awards,
    AwardWinners,
    AwardCursor,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Self::Participants,
        Self::History,
        Self::Settings,
        Self::Awards,
        Self::AwardWinners,
        Self::AwardCursor,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Participants => "participants",
            Self::History => "history",
            Self::Settings => "settings",
            Self::Awards => "awards",
            Self::AwardWinners => "award_winners",
            Self::AwardCursor => "award_cursor",
        }
    }
}

/// Durable get/set over named keys
///
/// `set` overwrites the whole value for the key.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> LdResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> LdResult<()>;
}

/// Process-local store, used by tests and embedders without a disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every key
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> LdResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LdResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for std::sync::Arc<S> {
    fn get(&self, key: &str) -> LdResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> LdResult<()> {
        (**self).set(key, value)
    }
}
