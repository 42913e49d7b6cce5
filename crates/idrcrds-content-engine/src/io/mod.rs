//! Storage boundary for the content document.
//!
//! The parser and patcher never touch storage. Callers load text through a
//! [`DocumentStore`], run it through the engine and save the result.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::editing::apply_update;
use crate::models::{PartialSiteContent, SiteContent};
use crate::parsing::{parse, parse_content};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to replace document: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Whole-document storage. `save` replaces the stored text in one step.
pub trait DocumentStore {
    fn load(&self) -> Result<String, IoError>;
    fn save(&self, text: &str) -> Result<(), IoError>;
}

/// Loads the document, treating any read failure as an empty document.
pub fn load_or_empty<S: DocumentStore + ?Sized>(store: &S) -> String {
    match store.load() {
        Ok(text) => text,
        Err(IoError::NotFound(what)) => {
            log::debug!("{what} does not exist yet, reading it as empty");
            String::new()
        }
        Err(e) => {
            log::warn!("Failed to read content document, reading it as empty: {e}");
            String::new()
        }
    }
}

/// Reads the current site content.
pub fn read_content<S: DocumentStore + ?Sized>(store: &S) -> SiteContent {
    parse(&load_or_empty(store))
}

/// Applies `update` to the stored document and saves it.
///
/// Returns the content parsed from the saved text. Save failures are
/// returned unchanged; nothing is retried.
pub fn update_content<S: DocumentStore + ?Sized>(
    store: &S,
    update: &PartialSiteContent,
) -> Result<SiteContent, IoError> {
    let current = xi_rope::Rope::from(load_or_empty(store));
    let result = apply_update(&current, update);
    for field in &result.skipped {
        log::info!("Skipped {field}: its section markers are missing from the document");
    }
    store.save(&result.text.to_string())?;
    Ok(parse_content(&result.text))
}
