//! Line-anchored header scanning.

use crate::emr::{self, EmrMarker};
use crate::models::SectionType;
use crate::registry;

/// A header occurrence located in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMatch {
    /// Matched section type
    pub section_type: SectionType,
    /// Registry confidence for this variant
    pub confidence: f64,
    /// Byte offset of the start of the header line
    pub line_start: usize,
    /// Byte offset just past the header token (colon included, if any)
    pub header_end: usize,
    /// Header text without trailing colon
    pub title: String,
    /// The header line as written, trimmed
    pub raw: String,
}

/// Scan every line for a registered header.
///
/// A line is a header when it is exactly a registered variant, or when the
/// text before its first colon is one. Matches whose header token overlaps
/// an EMR marker span are discarded so macro payloads cannot masquerade as
/// structure.
pub fn scan_headers(text: &str, markers: &[EmrMarker]) -> Vec<HeaderMatch> {
    let mut matches = Vec::new();
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let stripped = line.trim_end_matches(['\n', '\r']);
        let leading_ws = stripped.len() - stripped.trim_start().len();
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            continue;
        }

        let content_start = line_start + leading_ws;

        let (candidate, header_end) = match trimmed.find(':') {
            Some(colon_idx) => (
                trimmed[..colon_idx].trim_end(),
                content_start + colon_idx + 1,
            ),
            None => (trimmed, content_start + trimmed.len()),
        };

        let Some((section_type, confidence)) = registry::match_header(candidate) else {
            continue;
        };

        if emr::overlaps_marker(markers, content_start, header_end) {
            continue;
        }

        matches.push(HeaderMatch {
            section_type,
            confidence,
            line_start,
            header_end,
            title: candidate.to_string(),
            raw: trimmed.to_string(),
        });
    }

    matches
}

/// Drop earlier occurrences of duplicated section types.
///
/// The later occurrence wins; the earlier header's text is left in place so
/// it folds into the section that precedes it. Returns the surviving
/// matches and one warning per folded duplicate.
pub fn fold_duplicates(matches: Vec<HeaderMatch>) -> (Vec<HeaderMatch>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut survivors: Vec<HeaderMatch> = Vec::with_capacity(matches.len());

    for m in matches {
        if let Some(prev_idx) = survivors
            .iter()
            .position(|s| s.section_type == m.section_type)
        {
            let prev = survivors.remove(prev_idx);
            warnings.push(format!(
                "Duplicate header \"{}\" at offset {}; earlier occurrence at offset {} folded into the preceding section",
                m.title, m.line_start, prev.line_start
            ));
        }
        survivors.push(m);
    }

    survivors.sort_by_key(|m| m.line_start);
    (survivors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_basic_headers() {
        let text = "SUBJECTIVE:\nPatient reports anxiety.\n\nPLAN:\nContinue therapy.";
        let matches = scan_headers(text, &[]);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].section_type, SectionType::Subjective);
        assert_eq!(matches[0].line_start, 0);
        assert_eq!(matches[0].header_end, 11);
        assert_eq!(matches[1].section_type, SectionType::Plan);
        assert_eq!(matches[1].title, "PLAN");
    }

    #[test]
    fn test_scan_header_without_colon() {
        let text = "Review of Systems\nDenies fever.";
        let matches = scan_headers(text, &[]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].section_type, SectionType::ReviewOfSystems);
    }

    #[test]
    fn test_inline_colon_sentence_not_header() {
        let text = "Patient reports: anxiety has worsened.\n";
        assert!(scan_headers(text, &[]).is_empty());
    }

    #[test]
    fn test_header_inside_marker_masked() {
        // Smart list spanning lines swallows a PLAN line
        let text = "{Assessment\nPLAN\nOptions:123}\nPLAN:\nReal plan.";
        let markers = emr::find_markers(text);
        assert_eq!(markers.len(), 1);

        let matches = scan_headers(text, &markers);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "PLAN");
        assert!(matches[0].line_start > markers[0].end - 1);
    }

    #[test]
    fn test_indented_header_matches() {
        let text = "  ASSESSMENT:\nGAD.";
        let matches = scan_headers(text, &[]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_start, 0);
        // Header token begins past the indentation
        assert_eq!(matches[0].header_end, 13);
    }

    #[test]
    fn test_fold_duplicates_later_wins() {
        let text = "PLAN:\nFirst plan.\n\nASSESSMENT:\nGAD.\n\nPLAN:\nSecond plan.";
        let (survivors, warnings) = fold_duplicates(scan_headers(text, &[]));

        assert_eq!(survivors.len(), 2);
        assert_eq!(survivors[0].section_type, SectionType::Assessment);
        assert_eq!(survivors[1].section_type, SectionType::Plan);
        // The surviving PLAN is the later one
        assert!(survivors[1].line_start > survivors[0].line_start);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Duplicate header"));
    }

    #[test]
    fn test_fold_no_duplicates_no_warnings() {
        let text = "SUBJECTIVE:\nx\nOBJECTIVE:\ny";
        let (survivors, warnings) = fold_duplicates(scan_headers(text, &[]));
        assert_eq!(survivors.len(), 2);
        assert!(warnings.is_empty());
    }
}
