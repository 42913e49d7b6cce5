use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::parsing::rope::{Span, slice_to_string};

/// Replacement of one byte span of the document with new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub span: Span,
    pub text: String,
}

impl Splice {
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Compiles the splice into a delta against a rope of `base_len` bytes.
    pub fn to_delta(&self, base_len: usize) -> Delta<RopeInfo> {
        let mut builder = Builder::new(base_len);
        builder.replace(self.span.range(), Rope::from(&self.text));
        builder.build()
    }

    /// True when applying the splice would leave `rope` unchanged.
    pub fn is_noop(&self, rope: &Rope) -> bool {
        slice_to_string(rope, self.span) == self.text
    }

    pub fn apply(&self, rope: &Rope) -> Rope {
        self.to_delta(rope.len()).apply(rope)
    }

    /// Span occupied by the inserted text once applied.
    pub fn changed(&self) -> Span {
        Span {
            start: self.span.start,
            end: self.span.start + self.text.len(),
        }
    }
}
