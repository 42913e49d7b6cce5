//! Field extraction from the line ranges of a [`Layout`](super::layout::Layout).

use std::sync::OnceLock;

use regex::Regex;

use super::markers::{PACKAGE_PREFIXES, PRICE_SEPARATOR};
use super::rope::LineRef;
use crate::models::{Package, Scenario};

pub const BULLET: char = '•';

const TOTAL_LABEL: &str = "Estimated Total";

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));
    re.replace_all(text, " ").trim().to_string()
}

/// Text of a bullet line with the glyph and surrounding whitespace removed,
/// or `None` when the trimmed line does not start with the glyph.
pub fn bullet_text(line: &LineRef) -> Option<String> {
    line.trimmed()
        .strip_prefix(BULLET)
        .map(|rest| rest.trim().to_string())
}

/// Bullets following `from`, skipping blank lines, up to the first other line.
pub fn bullet_run(lines: &[LineRef], from: usize) -> Vec<String> {
    lines
        .get(from..)
        .unwrap_or_default()
        .iter()
        .filter(|l| !l.is_blank())
        .map_while(bullet_text)
        .collect()
}

/// Every bullet line in `lines`, in order.
pub fn all_bullets(lines: &[LineRef]) -> Vec<String> {
    lines.iter().filter_map(bullet_text).collect()
}

/// Splits a package header such as `Basic – $150` into title and price.
///
/// Only lines whose trimmed text starts with one of the known package
/// prefixes qualify, so a bullet mentioning a package is not a header.
pub fn package_header(line: &LineRef) -> Option<(String, String)> {
    let text = line.trimmed();
    PACKAGE_PREFIXES.iter().find(|p| text.starts_with(*p))?;
    let (title, price) = text.split_once(PRICE_SEPARATOR)?;
    Some((title.trim().to_string(), price.trim().to_string()))
}

pub fn packages(lines: &[LineRef]) -> Vec<Package> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let (title, price) = package_header(line)?;
            Some(Package {
                title,
                price,
                bullets: bullet_run(lines, i + 1),
            })
        })
        .collect()
}

/// Reads a scenario block whose first line is the title.
///
/// The `Estimated Total` line supplies the total and is never an item, even
/// when it contains a bullet glyph.
pub fn scenario(lines: &[LineRef]) -> Scenario {
    let Some((title, body)) = lines.split_first() else {
        return Scenario::default();
    };
    let total_at = body
        .iter()
        .position(|l| l.trimmed().starts_with(TOTAL_LABEL));
    let items = body
        .iter()
        .enumerate()
        .filter(|(i, l)| Some(*i) != total_at && l.text.contains(BULLET))
        .map(|(_, l)| {
            let text = l.trimmed();
            text.strip_prefix(BULLET).unwrap_or(text).trim().to_string()
        })
        .collect();
    let total = total_at
        .and_then(|i| body[i].trimmed().strip_prefix(TOTAL_LABEL))
        .map(|rest| rest.trim_start().trim_start_matches(':').trim().to_string())
        .unwrap_or_default();
    Scenario {
        title: title.trimmed().to_string(),
        items,
        total,
    }
}

/// Joins the lines of a free text block and collapses whitespace.
pub fn flowed_text(lines: &[LineRef]) -> String {
    let joined = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&joined)
}
