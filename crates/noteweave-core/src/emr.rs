//! EMR inline macro syntax detection.
//!
//! Epic-style notes carry smart phrases, dot phrases, smart lists, and
//! wildcards inline; plain-text dialects (Credible and friends) forbid all
//! of them. The patterns here are load-bearing for compatibility and must
//! not be loosened.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Kind of EMR macro marker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EmrMarkerKind {
    /// `@VITALS@`
    SmartPhrase,
    /// `.hpi`
    DotPhrase,
    /// `{Mood:12345}`
    SmartList,
    /// `***`
    Wildcard,
}

impl EmrMarkerKind {
    /// Display name used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            EmrMarkerKind::SmartPhrase => "SmartPhrase",
            EmrMarkerKind::DotPhrase => "DotPhrase",
            EmrMarkerKind::SmartList => "SmartList",
            EmrMarkerKind::Wildcard => "Wildcard",
        }
    }

    /// Validation penalty when this marker appears in a plain-text dialect.
    pub fn dialect_penalty(&self) -> u32 {
        match self {
            EmrMarkerKind::SmartPhrase => 30,
            EmrMarkerKind::SmartList => 25,
            EmrMarkerKind::DotPhrase => 15,
            EmrMarkerKind::Wildcard => 10,
        }
    }
}

/// One marker occurrence in a text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmrMarker {
    pub kind: EmrMarkerKind,
    /// Byte offset of the marker start
    pub start: usize,
    /// Byte offset one past the marker end
    pub end: usize,
    /// Matched text, verbatim
    pub text: String,
}

fn marker_patterns() -> &'static [(EmrMarkerKind, Regex)] {
    static PATTERNS: OnceLock<Vec<(EmrMarkerKind, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            (
                EmrMarkerKind::SmartPhrase,
                Regex::new(r"@[A-Z][A-Z0-9]*[A-Z]@").unwrap(),
            ),
            (
                EmrMarkerKind::DotPhrase,
                Regex::new(r"\.[a-z][a-z0-9]*[a-z]").unwrap(),
            ),
            (
                EmrMarkerKind::SmartList,
                Regex::new(r"\{[A-Za-z\s]+:\d+\}").unwrap(),
            ),
            (
                EmrMarkerKind::Wildcard,
                Regex::new(r"\*\*\*").unwrap(),
            ),
        ]
    })
}

/// Find every EMR marker in the text, sorted by start offset.
pub fn find_markers(text: &str) -> Vec<EmrMarker> {
    let mut markers = Vec::new();
    for (kind, pattern) in marker_patterns() {
        for m in pattern.find_iter(text) {
            markers.push(EmrMarker {
                kind: *kind,
                start: m.start(),
                end: m.end(),
                text: m.as_str().to_string(),
            });
        }
    }
    markers.sort_by_key(|m| (m.start, m.end));
    markers
}

/// Whether the text carries any EMR macro syntax.
pub fn contains_markers(text: &str) -> bool {
    marker_patterns()
        .iter()
        .any(|(_, pattern)| pattern.is_match(text))
}

/// Whether a byte range overlaps any of the given marker spans.
pub fn overlaps_marker(markers: &[EmrMarker], start: usize, end: usize) -> bool {
    markers.iter().any(|m| start < m.end && m.start < end)
}
