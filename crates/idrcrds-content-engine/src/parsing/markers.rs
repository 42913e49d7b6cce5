//! Marker substrings that delimit the sections of the site content document.
//!
//! The document has no formal structure; these strings act as its schema.
//! Every marker resolves to the first line containing it, scanning top to
//! bottom. The strings are shared with existing content files and must not
//! change.

use super::rope::LineRef;

/// Typographic spelling of the closing header (U+2019 apostrophe).
pub const CLOSING_TYPOGRAPHIC: &str = "Let\u{2019}s Build Your Sound";
/// ASCII spelling of the closing header.
pub const CLOSING_PLAIN: &str = "Let's Build Your Sound";

/// Package title prefixes in priority order; the first one a line starts with wins.
pub const PACKAGE_PREFIXES: [&str; 3] = ["Basic \u{2013}", "Pro \u{2013}", "Pro Plus \u{2013}"];

/// Separator between a package title and its price (en dash).
pub const PRICE_SEPARATOR: char = '\u{2013}';

const MARKER_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Marker {
    Subtitle,
    Mission,
    /// Header that ends the mission statement. Only searched below the mission line.
    Identity,
    RecordingPackages,
    AdditionalServices,
    BudgetScenarios,
    ScenarioA,
    ScenarioB,
    Booking,
    Closing,
}

impl Marker {
    pub const ALL: [Marker; MARKER_COUNT] = [
        Marker::Subtitle,
        Marker::Mission,
        Marker::Identity,
        Marker::RecordingPackages,
        Marker::AdditionalServices,
        Marker::BudgetScenarios,
        Marker::ScenarioA,
        Marker::ScenarioB,
        Marker::Booking,
        Marker::Closing,
    ];

    /// Substrings identifying this marker, in lookup priority order.
    pub fn needles(self) -> &'static [&'static str] {
        match self {
            Marker::Subtitle => &["Subtitle - "],
            Marker::Mission => &["At ID RCRDS"],
            Marker::Identity => &["IDENTITY"],
            Marker::RecordingPackages => &["Recording Packages"],
            Marker::AdditionalServices => &["Additional Studio Services"],
            Marker::BudgetScenarios => &["Sample Budget Scenarios"],
            Marker::ScenarioA => &["Scenario A"],
            Marker::ScenarioB => &["Scenario B"],
            Marker::Booking => &["Booking Information"],
            Marker::Closing => &[CLOSING_TYPOGRAPHIC, CLOSING_PLAIN],
        }
    }

    /// The canonical needle, used when a header has to be written from scratch.
    pub fn text(self) -> &'static str {
        self.needles()[0]
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Line index of every marker found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerMap {
    lines: [Option<usize>; MARKER_COUNT],
}

impl MarkerMap {
    /// Resolves every marker against `lines`.
    ///
    /// A marker with several spellings takes the first line holding its
    /// preferred spelling, falling back to the next spelling only when the
    /// preferred one is absent from the whole document.
    pub fn locate(lines: &[LineRef]) -> Self {
        let mut map = MarkerMap::default();
        for marker in Marker::ALL {
            let found = match marker {
                Marker::Identity => map
                    .line(Marker::Mission)
                    .and_then(|mission| identity_line(lines, mission)),
                _ => find_from(lines, 0, marker.needles()),
            };
            map.lines[marker.index()] = found;
        }
        log::debug!("located markers: {map:?}");
        map
    }

    pub fn line(&self, marker: Marker) -> Option<usize> {
        self.lines[marker.index()]
    }

    /// First line strictly after `start` that holds one of `terminators`.
    pub fn next_after(&self, start: usize, terminators: &[Marker]) -> Option<usize> {
        terminators
            .iter()
            .filter_map(|m| self.line(*m))
            .filter(|line| *line > start)
            .min()
    }
}

/// `IDENTITY` is looked up from the mission marker onwards: first in the rest
/// of the mission line, then in the lines below it.
fn identity_line(lines: &[LineRef], mission: usize) -> Option<usize> {
    let text = &lines[mission].text;
    let (column, _) = find_in_line(text, Marker::Mission)?;
    if find_in_line(&text[column..], Marker::Identity).is_some() {
        return Some(mission);
    }
    find_from(lines, mission + 1, Marker::Identity.needles())
}

fn find_from(lines: &[LineRef], from: usize, needles: &[&str]) -> Option<usize> {
    let tail = lines.get(from..)?;
    needles.iter().find_map(|needle| {
        tail.iter()
            .position(|l| l.text.contains(needle))
            .map(|pos| from + pos)
    })
}

/// Byte offset of the marker's needle inside `text`, if present.
pub fn find_in_line(text: &str, marker: Marker) -> Option<(usize, &'static str)> {
    marker
        .needles()
        .iter()
        .find_map(|needle| text.find(needle).map(|at| (at, *needle)))
}
