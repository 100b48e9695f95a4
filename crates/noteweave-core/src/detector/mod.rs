//! Section detector.
//!
//! Pipeline: header scan → duplicate folding → section slicing → format and
//! dialect classification. Falls back to a narrative quartile split when a
//! note yields fewer than two recognizable headers.

mod fallback;
mod scanner;

pub use fallback::*;
pub use scanner::*;

use std::time::Instant;

use tracing::debug;

use crate::emr;
use crate::models::{
    EmrDialect, NoteFormat, ParsedNote, Section, SectionMetadata, SoapSlot,
};

/// Multiplier applied when a header has no body text.
const EMPTY_CONTENT_PENALTY: f64 = 0.75;

/// Minimum matched headers before the narrative fallback takes over.
const MIN_HEADERS_FOR_STRUCTURE: usize = 2;

/// Detector for slicing raw note text into labeled sections.
///
/// Stateless; `parse` never fails. Unparseable input produces a
/// [`ParsedNote`] with zero sections and a populated `errors` vec, so
/// callers must branch on `sections.is_empty()`.
pub struct SectionDetector;

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionDetector {
    /// Create a new detector.
    pub fn new() -> Self {
        Self
    }

    /// Parse raw note text into an ordered, labeled section sequence.
    pub fn parse(&self, text: &str) -> ParsedNote {
        let started = Instant::now();

        if text.trim().is_empty() {
            return ParsedNote {
                sections: Vec::new(),
                format: NoteFormat::Narrative,
                dialect: EmrDialect::Other,
                overall_confidence: 0.0,
                warnings: Vec::new(),
                errors: vec!["Note text is empty; no sections detected".to_string()],
                processing_duration_ms: started.elapsed().as_millis() as u64,
            };
        }

        let markers = emr::find_markers(text);
        let (matches, mut warnings) = fold_duplicates(scan_headers(text, &markers));

        let (sections, format) = if matches.len() < MIN_HEADERS_FOR_STRUCTURE {
            warnings.push(format!(
                "Only {} recognized header(s); applying narrative quartile split",
                matches.len()
            ));
            (narrative_split(text), NoteFormat::Narrative)
        } else {
            let sections = slice_sections(text, &matches, &mut warnings);
            let format = classify_format(&sections);
            (sections, format)
        };

        let dialect = if markers.is_empty() {
            EmrDialect::Other
        } else {
            EmrDialect::Epic
        };

        let errors = if sections.is_empty() {
            vec!["No sections could be detected in the note text".to_string()]
        } else {
            Vec::new()
        };

        let overall_confidence = length_weighted_confidence(&sections);

        debug!(
            sections = sections.len(),
            ?format,
            ?dialect,
            overall_confidence,
            "parsed note"
        );

        ParsedNote {
            sections,
            format,
            dialect,
            overall_confidence,
            warnings,
            errors,
            processing_duration_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Slice section bodies out of the source given surviving header matches.
///
/// Content of section i is the text strictly between header i's end and
/// header i+1's line start (or end of document), outer whitespace trimmed.
/// Section spans run line start to line start so spans plus gaps cover the
/// source exactly.
fn slice_sections(text: &str, matches: &[HeaderMatch], warnings: &mut Vec<String>) -> Vec<Section> {
    let mut sections = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let end = matches
            .get(i + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len());
        let content = text[m.header_end..end].trim().to_string();

        let mut confidence = m.confidence;
        if content.is_empty() {
            confidence *= EMPTY_CONTENT_PENALTY;
            warnings.push(format!(
                "Header \"{}\" has no content before the next section",
                m.title
            ));
        }

        sections.push(Section {
            section_type: m.section_type,
            title: m.title.clone(),
            content: content.clone(),
            start_offset: m.line_start,
            end_offset: end,
            confidence,
            metadata: SectionMetadata {
                word_count: content.split_whitespace().count(),
                has_emr_syntax: emr::contains_markers(&content),
                is_standardized: true,
                original_header_text: m.raw.clone(),
            },
        });
    }

    sections
}

/// SOAP iff all four slots are filled and their first occurrences appear in
/// Subjective, Objective, Assessment, Plan order.
fn classify_format(sections: &[Section]) -> NoteFormat {
    let mut first: [Option<usize>; 4] = [None; 4];
    for (idx, section) in sections.iter().enumerate() {
        for slot in section.section_type.soap_slots() {
            let slot_idx = *slot as usize;
            if first[slot_idx].is_none() {
                first[slot_idx] = Some(idx);
            }
        }
    }

    let ordered = [
        SoapSlot::Subjective,
        SoapSlot::Objective,
        SoapSlot::Assessment,
        SoapSlot::Plan,
    ];
    let mut last_seen = 0usize;
    for slot in ordered {
        match first[slot as usize] {
            Some(idx) if idx >= last_seen => last_seen = idx,
            _ => return NoteFormat::Narrative,
        }
    }
    NoteFormat::Soap
}

/// Content-length-weighted mean of section confidences.
fn length_weighted_confidence(sections: &[Section]) -> f64 {
    if sections.is_empty() {
        return 0.0;
    }
    // Uniform confidence needs no weighting
    let first = sections[0].confidence;
    if sections.iter().all(|s| s.confidence == first) {
        return first;
    }
    let mut weighted = 0.0;
    let mut total = 0.0;
    for section in sections {
        let weight = section.content_len().max(1) as f64;
        weighted += section.confidence * weight;
        total += weight;
    }
    weighted / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SectionType;

    const SOAP_NOTE: &str = "SUBJECTIVE:\nPatient reports anxiety.\n\nOBJECTIVE:\nAlert, oriented.\n\nASSESSMENT:\nGAD.\n\nPLAN:\nContinue therapy.";

    #[test]
    fn test_parse_soap_note() {
        let parsed = SectionDetector::new().parse(SOAP_NOTE);

        assert_eq!(parsed.sections.len(), 4);
        assert_eq!(parsed.format, NoteFormat::Soap);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.sections[0].content, "Patient reports anxiety.");
        assert_eq!(parsed.sections[3].content, "Continue therapy.");
        assert_eq!(parsed.overall_confidence, 1.0);
    }

    #[test]
    fn test_parse_empty_input() {
        let parsed = SectionDetector::new().parse("   \n  ");
        assert!(parsed.is_empty());
        assert!(!parsed.errors.is_empty());
        assert_eq!(parsed.overall_confidence, 0.0);
    }

    #[test]
    fn test_out_of_order_soap_is_narrative() {
        let text = "PLAN:\nTherapy.\n\nSUBJECTIVE:\nAnxiety.\n\nOBJECTIVE:\nAlert.\n\nASSESSMENT:\nGAD.";
        let parsed = SectionDetector::new().parse(text);
        assert_eq!(parsed.sections.len(), 4);
        assert_eq!(parsed.format, NoteFormat::Narrative);
    }

    #[test]
    fn test_combined_assessment_and_plan_is_soap() {
        let text = "HPI:\nAnxiety worsening.\n\nMental Status Exam:\nAlert, cooperative.\n\nAssessment and Plan:\nGAD; continue sertraline.";
        let parsed = SectionDetector::new().parse(text);
        assert_eq!(parsed.format, NoteFormat::Soap);
    }

    #[test]
    fn test_single_header_falls_back() {
        let text = "SUBJECTIVE:\nPatient doing well.\n\nNo other structure here.\n\nMore narrative.\n\nFinal thoughts.";
        let parsed = SectionDetector::new().parse(text);

        assert!(parsed
            .warnings
            .iter()
            .any(|w| w.contains("narrative quartile split")));
        assert!(parsed.overall_confidence <= FALLBACK_CONFIDENCE);
        assert_eq!(parsed.format, NoteFormat::Narrative);
        assert!(!parsed.sections.is_empty());
        assert!(parsed.sections.iter().all(|s| !s.metadata.is_standardized));
    }

    #[test]
    fn test_epic_dialect_detection() {
        let text = "SUBJECTIVE:\nReports anxiety.\n\nOBJECTIVE:\n@VITALS@\n\nASSESSMENT:\nGAD.\n\nPLAN:\nContinue.";
        let parsed = SectionDetector::new().parse(text);
        assert_eq!(parsed.dialect, EmrDialect::Epic);
        assert!(parsed.section(SectionType::Objective).unwrap().metadata.has_emr_syntax);
    }

    #[test]
    fn test_plain_note_dialect_other() {
        let parsed = SectionDetector::new().parse(SOAP_NOTE);
        assert_eq!(parsed.dialect, EmrDialect::Other);
    }

    #[test]
    fn test_empty_section_penalized_not_error() {
        let text = "SUBJECTIVE:\n\nOBJECTIVE:\nAlert.";
        let parsed = SectionDetector::new().parse(text);

        assert!(parsed.errors.is_empty());
        let subjective = parsed.section(SectionType::Subjective).unwrap();
        assert!(subjective.is_empty());
        assert!(subjective.confidence < 1.0);
        assert!(parsed.warnings.iter().any(|w| w.contains("no content")));
    }

    #[test]
    fn test_duplicate_header_warns() {
        let text = "SUBJECTIVE:\nFirst.\n\nOBJECTIVE:\nAlert.\n\nSUBJECTIVE:\nSecond.";
        let parsed = SectionDetector::new().parse(text);

        assert_eq!(parsed.sections.len(), 2);
        assert!(parsed.warnings.iter().any(|w| w.contains("Duplicate header")));
        // Later occurrence wins
        let subjective = parsed.section(SectionType::Subjective).unwrap();
        assert_eq!(subjective.content, "Second.");
    }

    #[test]
    fn test_coverage_invariant() {
        let parsed = SectionDetector::new().parse(SOAP_NOTE);
        for pair in parsed.sections.windows(2) {
            assert!(pair[0].end_offset <= pair[1].start_offset);
        }
        assert_eq!(parsed.sections.last().unwrap().end_offset, SOAP_NOTE.len());
    }

    #[test]
    fn test_alias_headers_lower_confidence() {
        let text = "HPI:\nAnxiety.\n\nROS:\nDenies fever.\n\nPLAN:\nContinue.";
        let parsed = SectionDetector::new().parse(text);

        let hpi = parsed.section(SectionType::Hpi).unwrap();
        assert!(hpi.confidence >= 0.6 && hpi.confidence <= 0.8);
        assert!(parsed.overall_confidence < 1.0);
    }
}
