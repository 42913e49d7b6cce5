use xi_rope::Rope;

use super::span::Span;

/// Terminator of a single line, kept so rewritten lines match their neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Last line of a document that does not end with a newline.
    #[default]
    None,
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::None => "",
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    pub fn is_none(self) -> bool {
        self == LineEnding::None
    }

    fn of(raw: &str) -> Self {
        if raw.ends_with("\r\n") {
            LineEnding::CrLf
        } else if raw.ends_with('\n') {
            LineEnding::Lf
        } else {
            LineEnding::None
        }
    }
}

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes the terminator if present).
    pub span: Span,
    /// The line text without its terminator.
    pub text: String,
    pub ending: LineEnding,
}

impl LineRef {
    /// Span of the line content, excluding the terminator.
    pub fn content_span(&self) -> Span {
        Span {
            start: self.span.start,
            end: self.span.start + self.text.len(),
        }
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so the terminator of every line is observed; a document
/// that ends with a newline yields no trailing empty line.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        offset += line.len();
        let ending = LineEnding::of(&line);
        let text = line[..line.len() - ending.as_str().len()].to_string();
        LineRef {
            span: Span { start, end: offset },
            text,
            ending,
        }
    })
}
