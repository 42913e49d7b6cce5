use std::sync::{PoisonError, RwLock};

use super::{DocumentStore, IoError};

/// Keeps the document in memory. Starts out empty (not found) unless seeded.
#[derive(Debug, Default)]
pub struct MemoryStore {
    text: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: RwLock::new(Some(text.into())),
        }
    }

    /// Current stored text, `None` if nothing was ever saved.
    pub fn text(&self) -> Option<String> {
        self.text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<String, IoError> {
        self.text()
            .ok_or_else(|| IoError::NotFound("in-memory document".to_string()))
    }

    fn save(&self, text: &str) -> Result<(), IoError> {
        *self.text.write().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        Ok(())
    }
}
