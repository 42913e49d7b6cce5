//! # Section Parser
//!
//! Turns the site content document into a [`SiteContent`] value.
//!
//! Parsing happens in two steps:
//!
//! 1. **Layout** (`layout`): the rope is split into lines and every marker is
//!    resolved to its first line, giving each field a line range.
//! 2. **Extraction** (`sections`): each range is read into its field
//!    (bullet runs, package headers, scenario totals, flowed text).
//!
//! Parsing is total. A missing marker leaves its field empty.

pub mod layout;
pub mod markers;
pub mod rope;
pub mod sections;

use xi_rope::Rope;

use crate::models::SiteContent;
use layout::Layout;
use markers::Marker;

pub fn parse(document: &str) -> SiteContent {
    parse_content(&Rope::from(document))
}

pub fn parse_content(rope: &Rope) -> SiteContent {
    read_layout(&Layout::scan(rope))
}

pub(crate) fn read_layout(layout: &Layout) -> SiteContent {
    let subtitle = layout
        .subtitle()
        .map(|at| sections::collapse_whitespace(&layout.lines()[at.line].text[at.column..]))
        .unwrap_or_default();

    let mission = layout
        .mission()
        .map(|region| layout.mission_pieces(&region).join("\n").trim().to_string())
        .unwrap_or_default();

    let scenario = |marker| {
        layout
            .scenario(marker)
            .map(|range| sections::scenario(layout.slice(range)))
            .unwrap_or_default()
    };

    SiteContent {
        subtitle,
        mission,
        booking: layout
            .booking()
            .map(|range| sections::flowed_text(layout.slice(range)))
            .unwrap_or_default(),
        closing: layout
            .closing()
            .map(|range| sections::flowed_text(layout.slice(range)))
            .unwrap_or_default(),
        packages: layout
            .packages()
            .map(|range| sections::packages(layout.slice(range)))
            .unwrap_or_default(),
        additional_services: layout
            .additional_services()
            .map(|range| sections::all_bullets(layout.slice(range)))
            .unwrap_or_default(),
        scenario_a: scenario(Marker::ScenarioA),
        scenario_b: scenario(Marker::ScenarioB),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Package, Scenario};
    use crate::tests::SAMPLE_CONTENT;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::empty("")]
    #[case::no_markers("Welcome to the label.\n\n• a stray bullet\nBasic pricing - ask us\n")]
    #[case::whitespace(" \n\t\n")]
    fn unrecognised_documents_parse_to_defaults(#[case] doc: &str) {
        assert_eq!(parse(doc), SiteContent::default());
    }

    #[test]
    fn package_bullets_stop_at_the_next_section() {
        let doc = "Recording Packages\nBasic – $100\n• A\n• B\n\nNext Section";
        assert_eq!(
            parse(doc).packages,
            vec![Package {
                title: "Basic".to_string(),
                price: "$100".to_string(),
                bullets: vec!["A".to_string(), "B".to_string()],
            }]
        );
    }

    #[test]
    fn scenario_block_ends_at_the_next_scenario() {
        let doc = "Scenario A\n• Item1\n• Item2\nEstimated Total: $500\nScenario B";
        let content = parse(doc);
        assert_eq!(
            content.scenario_a,
            Scenario {
                title: "Scenario A".to_string(),
                items: vec!["Item1".to_string(), "Item2".to_string()],
                total: "$500".to_string(),
            }
        );
        assert_eq!(content.scenario_b.title, "Scenario B");
        assert!(content.scenario_b.items.is_empty());
    }

    #[rstest]
    #[case::typographic("Let\u{2019}s Build Your Sound")]
    #[case::plain("Let's Build Your Sound")]
    fn closing_marker_accepts_either_apostrophe(#[case] header: &str) {
        let doc = format!("Booking Information\nEmail us.\n{header}\nSee you\n  in the studio.\n");
        let content = parse(&doc);
        assert_eq!(content.booking, "Email us.");
        assert_eq!(content.closing, "See you in the studio.");
    }

    #[test]
    fn subtitle_is_the_rest_of_its_line() {
        let content = parse("ID RCRDS\nSubtitle -   IDENTITY  //  IDEAS \nmore\n");
        assert_eq!(content.subtitle, "IDENTITY // IDEAS");
    }

    #[test]
    fn mission_starts_at_the_marker_and_ends_before_identity() {
        let doc = "About: At ID RCRDS we listen.\nThen we record.\n\nIDENTITY // IDEAS\n";
        assert_eq!(parse(doc).mission, "At ID RCRDS we listen.\nThen we record.");
    }

    #[test]
    fn mission_stops_at_identity_on_its_own_line() {
        let doc = "At ID RCRDS we build IDENTITY first.\nMore words.\nIDENTITY // IDEAS\n";
        assert_eq!(parse(doc).mission, "At ID RCRDS we build");
    }

    #[test]
    fn mission_without_identity_is_empty() {
        assert_eq!(parse("At ID RCRDS we listen.\n").mission, "");
    }

    #[test]
    fn crlf_documents_parse_like_lf_documents() {
        let crlf = SAMPLE_CONTENT.replace('\n', "\r\n");
        assert_eq!(parse(&crlf), parse(SAMPLE_CONTENT));
    }

    #[test]
    fn sample_document_fields() {
        let content = parse(SAMPLE_CONTENT);
        assert_eq!(content.subtitle, "IDENTITY // IDEAS // IDEALS");
        assert!(content.mission.starts_with("At ID RCRDS"));
        assert_eq!(content.packages.len(), 3);
        assert_eq!(content.packages[2].title, "Pro Plus");
        assert_eq!(content.additional_services.len(), 3);
        assert_eq!(content.scenario_b.total, "$1,165");
        assert!(content.closing.starts_with("Whether"));
    }
}
