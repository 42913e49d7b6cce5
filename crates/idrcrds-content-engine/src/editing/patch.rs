use xi_rope::Rope;

use crate::models::Field;
use crate::parsing::rope::Span;

/// Result of applying a partial update to a document.
#[derive(Debug, Clone)]
pub struct Patch {
    pub text: Rope,
    /// Rewritten fields with the byte span of their new text, in the order
    /// they were applied. Each span refers to the text right after its own edit.
    pub changed: Vec<(Field, Span)>,
    /// Fields present in the update whose markers are missing from the document.
    pub skipped: Vec<Field>,
}

impl Patch {
    pub fn changed_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.changed.iter().map(|(field, _)| *field)
    }

    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}
