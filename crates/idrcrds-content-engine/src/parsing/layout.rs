//! Line ranges owned by each field of the content document.
//!
//! Parsing reads these ranges and patching replaces them, so both sides agree
//! on where a field starts and stops.

use std::ops::Range;

use xi_rope::Rope;

use super::markers::{Marker, MarkerMap, find_in_line};
use super::rope::{LineEnding, LineRef, Span, lines_with_spans};

/// Markers that can end the recording packages block.
const AFTER_PACKAGES: [Marker; 6] = [
    Marker::AdditionalServices,
    Marker::BudgetScenarios,
    Marker::ScenarioA,
    Marker::ScenarioB,
    Marker::Booking,
    Marker::Closing,
];

/// Markers that can end a scenario block.
const AFTER_SCENARIO: [Marker; 3] = [Marker::ScenarioA, Marker::ScenarioB, Marker::Booking];

/// A marker found partway through a line: the line index and the byte column
/// where the field's text begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineAnchor {
    pub line: usize,
    pub column: usize,
}

/// The mission statement: starts at the marker's column on its line and runs
/// up to the first `IDENTITY` after it, which may sit on the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionRegion {
    pub start: InlineAnchor,
    pub end: InlineAnchor,
}

impl MissionRegion {
    pub fn lines(&self) -> Range<usize> {
        self.start.line..self.end.line + 1
    }
}

/// A scanned document: its lines and the marker positions.
#[derive(Debug, Clone)]
pub struct Layout {
    lines: Vec<LineRef>,
    markers: MarkerMap,
    byte_len: usize,
}

impl Layout {
    pub fn scan(rope: &Rope) -> Self {
        let lines: Vec<LineRef> = lines_with_spans(rope).collect();
        let markers = MarkerMap::locate(&lines);
        Self {
            lines,
            markers,
            byte_len: rope.len(),
        }
    }

    pub fn lines(&self) -> &[LineRef] {
        &self.lines
    }

    pub fn markers(&self) -> &MarkerMap {
        &self.markers
    }

    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn slice(&self, range: Range<usize>) -> &[LineRef] {
        &self.lines[range]
    }

    fn eof(&self) -> usize {
        self.lines.len()
    }

    /// Where the subtitle text begins: just past `"Subtitle - "`.
    pub fn subtitle(&self) -> Option<InlineAnchor> {
        let line = self.markers.line(Marker::Subtitle)?;
        let (at, needle) = find_in_line(&self.lines[line].text, Marker::Subtitle)?;
        Some(InlineAnchor {
            line,
            column: at + needle.len(),
        })
    }

    pub fn mission(&self) -> Option<MissionRegion> {
        let line = self.markers.line(Marker::Mission)?;
        let end_line = self.markers.line(Marker::Identity)?;
        let (column, _) = find_in_line(&self.lines[line].text, Marker::Mission)?;
        let end_text = &self.lines[end_line].text;
        let end_column = if end_line == line {
            let (at, _) = find_in_line(&end_text[column..], Marker::Identity)?;
            column + at
        } else {
            find_in_line(end_text, Marker::Identity)?.0
        };
        Some(MissionRegion {
            start: InlineAnchor { line, column },
            end: InlineAnchor {
                line: end_line,
                column: end_column,
            },
        })
    }

    /// Pieces of each line of `region`, cut at its start and end columns.
    /// Terminators are not included.
    pub fn mission_pieces<'a>(&'a self, region: &MissionRegion) -> Vec<&'a str> {
        let range = region.lines();
        let last = range.end - 1;
        range
            .map(|i| {
                let text = self.lines[i].text.as_str();
                let from = if i == region.start.line { region.start.column } else { 0 };
                let to = if i == last { region.end.column } else { text.len() };
                &text[from..to]
            })
            .collect()
    }

    /// Byte span of the mission text, without the whitespace and blank lines
    /// that separate it from `IDENTITY`.
    pub fn mission_span(&self, region: &MissionRegion) -> Span {
        let start = self.lines[region.start.line].span.start + region.start.column;
        let end = region
            .lines()
            .rev()
            .find_map(|i| {
                let line = &self.lines[i];
                let from = if i == region.start.line { region.start.column } else { 0 };
                let to = if i == region.end.line { region.end.column } else { line.text.len() };
                let kept = line.text[from..to].trim_end();
                (!kept.is_empty() || i == region.start.line)
                    .then(|| line.span.start + from + kept.len())
            })
            .unwrap_or(start);
        Span { start, end }
    }

    /// Lines below `Recording Packages` up to the next known marker.
    pub fn packages(&self) -> Option<Range<usize>> {
        let header = self.markers.line(Marker::RecordingPackages)?;
        Some(self.body_after(header, &AFTER_PACKAGES))
    }

    /// Lines strictly between `Additional Studio Services` and
    /// `Sample Budget Scenarios`. Both headers are required.
    pub fn additional_services(&self) -> Option<Range<usize>> {
        let header = self.markers.line(Marker::AdditionalServices)?;
        let end = self.markers.line(Marker::BudgetScenarios)?;
        (end > header).then_some(header + 1..end)
    }

    /// A scenario block, including its title line.
    pub fn scenario(&self, marker: Marker) -> Option<Range<usize>> {
        let title = self.markers.line(marker)?;
        let end = self
            .markers
            .next_after(title, &AFTER_SCENARIO)
            .unwrap_or(self.eof());
        Some(title..end)
    }

    /// Lines below `Booking Information` up to the closing header.
    pub fn booking(&self) -> Option<Range<usize>> {
        let header = self.markers.line(Marker::Booking)?;
        Some(self.body_after(header, &[Marker::Closing]))
    }

    /// Lines below the closing header to the end of the document.
    pub fn closing(&self) -> Option<Range<usize>> {
        let header = self.markers.line(Marker::Closing)?;
        Some(header + 1..self.eof())
    }

    fn body_after(&self, header: usize, terminators: &[Marker]) -> Range<usize> {
        let end = self
            .markers
            .next_after(header, terminators)
            .unwrap_or(self.eof());
        header + 1..end
    }

    /// Narrows `range` so it neither starts nor ends on a blank line.
    ///
    /// An all-blank range collapses to an empty range at its start.
    pub fn trim_blank(&self, range: Range<usize>) -> Range<usize> {
        let body = &self.lines[range.clone()];
        match body.iter().position(|l| !l.is_blank()) {
            None => range.start..range.start,
            Some(first) => {
                let last = body.iter().rposition(|l| !l.is_blank()).unwrap_or(first);
                range.start + first..range.start + last + 1
            }
        }
    }

    /// Byte offset where line `index` starts, or the end of the document.
    pub fn line_start(&self, index: usize) -> usize {
        self.lines
            .get(index)
            .map_or(self.byte_len, |l| l.span.start)
    }

    /// Byte span covering the content of `range`, stopping before the
    /// terminator of its last line.
    pub fn content_span(&self, range: Range<usize>) -> Span {
        match range.end.checked_sub(1).and_then(|last| self.lines.get(last)) {
            Some(last) if range.start < range.end => Span {
                start: self.line_start(range.start),
                end: last.content_span().end,
            },
            _ => Span::point(self.line_start(range.start)),
        }
    }

    /// Byte span covering `range` including every terminator.
    pub fn full_span(&self, range: Range<usize>) -> Span {
        Span {
            start: self.line_start(range.start),
            end: self.line_start(range.end),
        }
    }

    /// Terminator to use for lines written into `range`: the first one found
    /// in the range, then the first one in the document, then `\n`.
    pub fn ending_for(&self, range: Range<usize>) -> LineEnding {
        let terminated = |lines: &[LineRef]| {
            lines
                .iter()
                .map(|l| l.ending)
                .find(|e| !e.is_none())
        };
        let within = self.lines.get(range).and_then(terminated);
        within
            .or_else(|| terminated(&self.lines))
            .unwrap_or(LineEnding::Lf)
    }
}
