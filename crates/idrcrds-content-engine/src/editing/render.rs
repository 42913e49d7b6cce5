//! Renders field values back into document lines, mirroring what the parser reads.

use crate::models::{Package, Scenario};
use crate::parsing::markers::{Marker, PRICE_SEPARATOR};
use crate::parsing::rope::LineEnding;
use crate::parsing::sections::{BULLET, collapse_whitespace};

pub fn bullet_line(text: &str) -> String {
    format!("{BULLET} {}", text.trim())
}

pub fn package_lines(packages: &[Package]) -> Vec<String> {
    packages
        .iter()
        .flat_map(|pkg| {
            let header = format!(
                "{} {PRICE_SEPARATOR} {}",
                pkg.title.trim(),
                pkg.price.trim()
            );
            std::iter::once(header).chain(pkg.bullets.iter().map(|b| bullet_line(b)))
        })
        .collect()
}

pub fn bullet_lines(items: &[String]) -> Vec<String> {
    items.iter().map(|item| bullet_line(item)).collect()
}

/// Title line, one bullet per item, then the total when there is one.
///
/// An empty title is replaced by the marker text so the block stays findable.
pub fn scenario_lines(scenario: &Scenario, marker: Marker) -> Vec<String> {
    let title = match scenario.title.trim() {
        "" => marker.text().to_string(),
        title => title.to_string(),
    };
    let mut lines = vec![title];
    lines.extend(bullet_lines(&scenario.items));
    let total = scenario.total.trim();
    if !total.is_empty() {
        lines.push(format!("Estimated Total: {total}"));
    }
    lines
}

/// Lines of a free text value, without surrounding blank lines.
pub fn text_lines(text: &str) -> Vec<String> {
    text.trim().lines().map(str::to_string).collect()
}

/// A single-line value: newlines and runs of whitespace become one space.
pub fn inline_text(text: &str) -> String {
    collapse_whitespace(text)
}

/// Joins `lines` with `ending`. The last line is terminated only when
/// `terminate_last` is set.
pub fn join_lines(lines: &[String], ending: LineEnding, terminate_last: bool) -> String {
    let mut out = lines.join(ending.as_str());
    if terminate_last && !lines.is_empty() {
        out.push_str(ending.as_str());
    }
    out
}
