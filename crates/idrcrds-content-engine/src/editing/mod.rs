/*!
 * # Section Patcher
 *
 * Applies a [`PartialSiteContent`] to an existing document and produces the
 * new document text.
 *
 * ## Approach
 *
 * - The document lives in an `xi_rope::Rope`; every field edit compiles to a
 *   single-span [`Splice`] which becomes a `Delta` over the current rope.
 * - Fields are applied one at a time in document order. Markers are located
 *   again before each field, so earlier edits that change the line count do
 *   not throw later ones off.
 * - Each field replaces only the line range the parser reads it from, minus
 *   leading and trailing blank lines. Bytes outside that range are copied
 *   through untouched, line endings included.
 * - Rewritten lines take the line ending already used in the range.
 * - A field whose markers are missing is skipped and reported in
 *   [`Patch::skipped`].
 *
 * ## Usage
 *
 * ```rust
 * use idrcrds_content_engine::{PartialSiteContent, parse, patch};
 *
 * let doc = "Booking Information\nCall us.\n\nLet's Build Your Sound\nBye.\n";
 * let update = PartialSiteContent {
 *     booking: Some("Email bookings@example.com".to_string()),
 *     ..Default::default()
 * };
 * let updated = patch(doc, &update);
 * assert_eq!(parse(&updated).booking, "Email bookings@example.com");
 * assert!(updated.ends_with("\n\nLet's Build Your Sound\nBye.\n"));
 * ```
 */

pub mod patch;
pub mod render;
pub mod splice;

use std::ops::Range;

use xi_rope::Rope;

use crate::models::{Field, PartialSiteContent, Scenario};
use crate::parsing::layout::Layout;
use crate::parsing::markers::Marker;
use crate::parsing::rope::{LineEnding, Span, preview};

pub use patch::Patch;
pub use splice::Splice;

/// Applies `update` to `document` and returns the new document text.
pub fn patch(document: &str, update: &PartialSiteContent) -> String {
    patch_rope(&Rope::from(document), update).to_string()
}

pub fn patch_rope(rope: &Rope, update: &PartialSiteContent) -> Rope {
    apply_update(rope, update).text
}

/// Applies `update` field by field, reporting what changed and what was skipped.
pub fn apply_update(rope: &Rope, update: &PartialSiteContent) -> Patch {
    let mut text = rope.clone();
    let mut changed = Vec::new();
    let mut skipped = Vec::new();

    for field in update.fields() {
        let layout = Layout::scan(&text);
        match splice_for(&layout, field, update) {
            None => {
                log::debug!("markers for {field} not found, leaving it unchanged");
                skipped.push(field);
            }
            Some(splice) if splice.is_noop(&text) => {}
            Some(splice) => {
                log::debug!(
                    "rewriting {field} at {}..{}: {:?}",
                    splice.span.start,
                    splice.span.end,
                    preview(&splice.text, 40)
                );
                text = splice.apply(&text);
                changed.push((field, splice.changed()));
            }
        }
    }

    Patch {
        text,
        changed,
        skipped,
    }
}

fn splice_for(layout: &Layout, field: Field, update: &PartialSiteContent) -> Option<Splice> {
    match field {
        Field::Subtitle => subtitle_splice(layout, update.subtitle.as_deref()?),
        Field::Mission => mission_splice(layout, update.mission.as_deref()?),
        Field::Packages => {
            let lines = render::package_lines(update.packages.as_deref()?);
            Some(replace_lines(layout, layout.packages()?, &lines))
        }
        Field::AdditionalServices => {
            let lines = render::bullet_lines(update.additional_services.as_deref()?);
            Some(replace_lines(layout, layout.additional_services()?, &lines))
        }
        Field::ScenarioA => scenario_splice(layout, field, Marker::ScenarioA, update.scenario_a.as_ref()?),
        Field::ScenarioB => scenario_splice(layout, field, Marker::ScenarioB, update.scenario_b.as_ref()?),
        Field::Booking => {
            let lines = render::text_lines(update.booking.as_deref()?);
            Some(replace_lines(layout, layout.booking()?, &lines))
        }
        Field::Closing => {
            let lines = render::text_lines(update.closing.as_deref()?);
            Some(replace_lines(layout, layout.closing()?, &lines))
        }
    }
}

/// Rewrites the text after `"Subtitle - "` on its line.
fn subtitle_splice(layout: &Layout, value: &str) -> Option<Splice> {
    let at = layout.subtitle()?;
    let line = &layout.lines()[at.line];
    let span = Span {
        start: line.span.start + at.column,
        end: line.content_span().end,
    };
    Some(Splice::new(span, render::inline_text(value)))
}

/// Rewrites the mission from its marker up to the last non-blank text before
/// `IDENTITY`. Text before the marker and from `IDENTITY` on is kept.
fn mission_splice(layout: &Layout, value: &str) -> Option<Splice> {
    let region = layout.mission()?;
    let lines = render::text_lines(value);
    warn_if_marker_dropped(Field::Mission, &lines, Marker::Mission);

    let ending = layout.ending_for(region.start.line..region.end.line);
    Some(Splice::new(
        layout.mission_span(&region),
        render::join_lines(&lines, ending, false),
    ))
}

fn scenario_splice(
    layout: &Layout,
    field: Field,
    marker: Marker,
    scenario: &Scenario,
) -> Option<Splice> {
    let range = layout.scenario(marker)?;
    let lines = render::scenario_lines(scenario, marker);
    warn_if_marker_dropped(field, &lines[..1], marker);
    Some(replace_lines(layout, range, &lines))
}

/// Replaces the non-blank core of `range` with `lines`.
fn replace_lines(layout: &Layout, range: Range<usize>, lines: &[String]) -> Splice {
    let range = layout.trim_blank(range);
    let ending = layout.ending_for(range.clone());

    if range.is_empty() {
        return insert_lines(layout, range.start, lines, ending);
    }
    if lines.is_empty() {
        return Splice::new(layout.full_span(range), "");
    }
    Splice::new(
        layout.content_span(range),
        render::join_lines(lines, ending, false),
    )
}

/// Inserts `lines` in front of line `at`, or at the end of the document.
fn insert_lines(layout: &Layout, at: usize, lines: &[String], ending: LineEnding) -> Splice {
    let point = Span::point(layout.line_start(at));
    if lines.is_empty() {
        return Splice::new(point, "");
    }
    let at_eof = at >= layout.lines().len();
    let after_unterminated = at_eof && layout.lines().last().is_some_and(|l| l.ending.is_none());
    let text = if after_unterminated {
        format!(
            "{}{}",
            ending.as_str(),
            render::join_lines(lines, ending, false)
        )
    } else {
        render::join_lines(lines, ending, true)
    };
    Splice::new(point, text)
}

fn warn_if_marker_dropped(field: Field, lines: &[String], marker: Marker) {
    let kept = lines
        .iter()
        .any(|l| marker.needles().iter().any(|needle| l.contains(needle)));
    if !kept {
        log::warn!(
            "new {field} text does not contain {:?}; it will not be found on the next read",
            marker.text()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Package, SiteContent};
    use crate::parsing::parse;
    use crate::tests::SAMPLE_CONTENT;
    use pretty_assertions::assert_eq;

    fn only<F: FnOnce(&mut PartialSiteContent)>(set: F) -> PartialSiteContent {
        let mut update = PartialSiteContent::default();
        set(&mut update);
        update
    }

    #[test]
    fn empty_update_returns_input_unchanged() {
        let doc = "Subtitle - x\r\nRecording Packages\r\nBasic – $1\r\n";
        assert_eq!(patch(doc, &PartialSiteContent::default()), doc);
    }

    #[test]
    fn subtitle_keeps_prefix_and_line_ending() {
        let doc = "Top\r\n## Subtitle - Old words\r\nNext\r\n";
        let update = only(|u| u.subtitle = Some("New\nwords ".to_string()));
        assert_eq!(
            patch(doc, &update),
            "Top\r\n## Subtitle - New words\r\nNext\r\n"
        );
    }

    #[test]
    fn mission_replaces_up_to_identity() {
        let doc = "About At ID RCRDS old.\nStill old.\n\nIDENTITY\nrest\n";
        let update = only(|u| u.mission = Some("At ID RCRDS new.\nSecond line.".to_string()));
        assert_eq!(
            patch(doc, &update),
            "About At ID RCRDS new.\nSecond line.\n\nIDENTITY\nrest\n"
        );
    }

    #[test]
    fn mission_ending_on_the_identity_line_keeps_the_rest_of_it() {
        let doc = "At ID RCRDS we build IDENTITY first.\nMore words.\nIDENTITY // IDEAS\n";
        let update = only(|u| u.mission = Some("At ID RCRDS we listen".to_string()));
        let out = patch(doc, &update);
        assert_eq!(
            out,
            "At ID RCRDS we listen IDENTITY first.\nMore words.\nIDENTITY // IDEAS\n"
        );
        assert_eq!(parse(&out).mission, "At ID RCRDS we listen");
    }

    #[test]
    fn packages_are_rendered_between_headers() {
        let doc = "Recording Packages\n\nBasic – $1\n• a\n\nAdditional Studio Services\n• x\nSample Budget Scenarios\n";
        let update = only(|u| {
            u.packages = Some(vec![
                Package {
                    title: "Basic".to_string(),
                    price: "$2".to_string(),
                    bullets: vec!["b".to_string()],
                },
                Package {
                    title: "Pro".to_string(),
                    price: "$5".to_string(),
                    bullets: vec![],
                },
            ])
        });
        assert_eq!(
            patch(doc, &update),
            "Recording Packages\n\nBasic – $2\n• b\nPro – $5\n\nAdditional Studio Services\n• x\nSample Budget Scenarios\n"
        );
    }

    #[test]
    fn clearing_additional_services_removes_their_lines() {
        let doc = "Additional Studio Services\n• x\n• y\n\nSample Budget Scenarios\n";
        let update = only(|u| u.additional_services = Some(vec![]));
        assert_eq!(
            patch(doc, &update),
            "Additional Studio Services\n\nSample Budget Scenarios\n"
        );
    }

    #[test]
    fn filling_an_empty_section_inserts_after_its_header() {
        let doc = "Additional Studio Services\n\nSample Budget Scenarios\n";
        let update = only(|u| u.additional_services = Some(vec!["Stems".to_string()]));
        assert_eq!(
            patch(doc, &update),
            "Additional Studio Services\n• Stems\n\nSample Budget Scenarios\n"
        );
    }

    #[test]
    fn scenario_a_edit_leaves_scenario_b_alone() {
        let doc = "Scenario A\n• one\nEstimated Total: $1\n\nScenario B\n• two\nBooking Information\n";
        let update = only(|u| {
            u.scenario_a = Some(Scenario {
                title: "Scenario A – Single".to_string(),
                items: vec!["uno".to_string(), "dos".to_string()],
                total: String::new(),
            })
        });
        assert_eq!(
            patch(doc, &update),
            "Scenario A – Single\n• uno\n• dos\n\nScenario B\n• two\nBooking Information\n"
        );
    }

    #[test]
    fn closing_at_end_of_unterminated_document() {
        let doc = "Let's Build Your Sound\nOld goodbye";
        let update = only(|u| u.closing = Some("New goodbye".to_string()));
        assert_eq!(patch(doc, &update), "Let's Build Your Sound\nNew goodbye");
    }

    #[test]
    fn booking_inserted_after_unterminated_header() {
        let doc = "Booking Information";
        let update = only(|u| u.booking = Some("Call us".to_string()));
        assert_eq!(patch(doc, &update), "Booking Information\nCall us");
    }

    #[test]
    fn missing_markers_are_reported_as_skipped() {
        let doc = "Just a note.\n";
        let update = PartialSiteContent::from(SiteContent::default());
        let result = apply_update(&Rope::from(doc), &update);
        assert_eq!(result.text.to_string(), doc);
        assert_eq!(result.skipped, Field::ALL.to_vec());
        assert!(result.is_unchanged());
    }

    #[test]
    fn changed_lists_only_real_edits() {
        let content = parse(SAMPLE_CONTENT);
        let update = PartialSiteContent {
            booking: Some("Walk-ins welcome.".to_string()),
            subtitle: Some(content.subtitle.clone()),
            ..Default::default()
        };
        let result = apply_update(&Rope::from(SAMPLE_CONTENT), &update);
        assert_eq!(result.changed_fields().collect::<Vec<_>>(), vec![Field::Booking]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn crlf_document_keeps_crlf_in_rewritten_lines() {
        let doc = SAMPLE_CONTENT.replace('\n', "\r\n");
        let update = only(|u| u.additional_services = Some(vec!["a".to_string(), "b".to_string()]));
        let out = patch(&doc, &update);
        assert!(out.contains("Additional Studio Services\r\n• a\r\n• b\r\n"));
        assert!(!out.replace("\r\n", "").contains('\n'));
    }
}
