//! Dialect conformance rules.

use crate::emr;
use crate::models::{EmrDialect, Finding, NoteContext};

/// Epic notes longer than this with zero markers draw a warning.
const EPIC_MARKERLESS_THRESHOLD: usize = 500;

/// Check EMR macro usage against the clinic's dialect.
///
/// Plain-text dialects treat every marker as an error; Epic notes of any
/// substance are expected to carry at least one marker.
pub fn check(text: &str, context: &NoteContext) -> Vec<Finding> {
    let markers = emr::find_markers(text);

    match context.dialect {
        EmrDialect::Credible => markers
            .iter()
            .map(|marker| {
                Finding::error(
                    &format!("dialect.{}", code_suffix(marker.kind.label())),
                    format!(
                        "{} \"{}\" is not supported in Credible notes",
                        marker.kind.label(),
                        marker.text
                    ),
                    marker.kind.dialect_penalty(),
                )
                .with_recommendation(format!(
                    "Replace \"{}\" with the expanded plain text before filing",
                    marker.text
                ))
            })
            .collect(),
        EmrDialect::Epic => {
            if text.chars().count() > EPIC_MARKERLESS_THRESHOLD && markers.is_empty() {
                vec![Finding::warning(
                    "dialect.no_markers",
                    "Epic note contains no SmartPhrase, DotPhrase, or SmartList markers",
                    5,
                )
                .with_recommendation(
                    "Consider Epic macros for vitals, medication lists, and review of systems",
                )]
            } else {
                Vec::new()
            }
        }
        EmrDialect::Other => Vec::new(),
    }
}

fn code_suffix(label: &str) -> String {
    label.to_lowercase()
}
