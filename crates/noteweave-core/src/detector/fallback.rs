//! Narrative fallback split for notes with too few recognizable headers.

use crate::emr;
use crate::models::{Section, SectionMetadata, SectionType};

/// Confidence assigned to heuristically split sections.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

const FALLBACK_LABELS: [SectionType; 4] = [
    SectionType::Subjective,
    SectionType::Objective,
    SectionType::Assessment,
    SectionType::Plan,
];

/// Split a note body into up to four contiguous paragraph-count quartiles
/// labeled SUBJECTIVE / OBJECTIVE / ASSESSMENT / PLAN.
///
/// Quartiles that receive no paragraphs (short notes) are skipped.
pub fn narrative_split(text: &str) -> Vec<Section> {
    let paras = paragraph_spans(text);
    let n = paras.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sections = Vec::new();
    for (k, label) in FALLBACK_LABELS.iter().enumerate() {
        // Ceiling boundaries so a short note fills the earliest quartiles
        let lo = (k * n).div_ceil(4);
        let hi = ((k + 1) * n).div_ceil(4);
        if lo == hi {
            continue;
        }

        let start = paras[lo].0;
        let end = paras[hi - 1].1;
        let content = text[start..end].trim().to_string();

        sections.push(Section {
            section_type: *label,
            title: label.canonical_title().to_string(),
            content: content.clone(),
            start_offset: start,
            end_offset: end,
            confidence: FALLBACK_CONFIDENCE,
            metadata: SectionMetadata {
                word_count: content.split_whitespace().count(),
                has_emr_syntax: emr::contains_markers(&content),
                is_standardized: false,
                original_header_text: String::new(),
            },
        });
    }

    sections
}

/// Byte spans of blank-line separated paragraphs.
fn paragraph_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let stripped = line.trim_end_matches(['\n', '\r']);
        let trimmed = stripped.trim();
        if trimmed.is_empty() {
            if let Some(span) = current.take() {
                spans.push(span);
            }
            continue;
        }

        let content_start = line_start + (stripped.len() - stripped.trim_start().len());
        let content_end = content_start + trimmed.len();
        current = match current {
            Some((start, _)) => Some((start, content_end)),
            None => Some((content_start, content_end)),
        };
    }
    if let Some(span) = current {
        spans.push(span);
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_paragraphs_four_sections() {
        let text = "First block.\n\nSecond block.\n\nThird block.\n\nFourth block.";
        let sections = narrative_split(text);

        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].section_type, SectionType::Subjective);
        assert_eq!(sections[3].section_type, SectionType::Plan);
        assert_eq!(sections[0].content, "First block.");
        assert_eq!(sections[3].content, "Fourth block.");
        assert!(sections.iter().all(|s| s.confidence == FALLBACK_CONFIDENCE));
        assert!(sections.iter().all(|s| !s.metadata.is_standardized));
    }

    #[test]
    fn test_single_paragraph_fills_first_quartile() {
        let sections = narrative_split("Just one narrative paragraph here.");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].section_type, SectionType::Subjective);
    }

    #[test]
    fn test_six_paragraphs_distribute() {
        let text = "a\n\nb\n\nc\n\nd\n\ne\n\nf";
        let sections = narrative_split(text);
        assert_eq!(sections.len(), 4);
        let total: usize = sections.iter().map(|s| s.metadata.word_count).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn test_spans_sorted_nonoverlapping() {
        let text = "a\n\nb\n\nc\n\nd\n\ne";
        let sections = narrative_split(text);
        for pair in sections.windows(2) {
            assert!(pair[0].end_offset <= pair[1].start_offset);
        }
    }

    #[test]
    fn test_empty_text_no_sections() {
        assert!(narrative_split("").is_empty());
        assert!(narrative_split("\n\n  \n").is_empty());
    }
}
