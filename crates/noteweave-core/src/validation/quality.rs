//! Quality heuristics: length, paragraph structure, clinical vocabulary.

use crate::models::Finding;

const MIN_NOTE_CHARS: usize = 200;
const MAX_NOTE_CHARS: usize = 15_000;
const MIN_PARAGRAPHS: usize = 4;
const MIN_DISTINCT_CLINICAL_TERMS: usize = 3;
const QUALITY_PENALTY: u32 = 5;

/// Frozen clinical vocabulary used for the terminology-density heuristic.
const CLINICAL_TERMS: &[&str] = &[
    "patient",
    "reports",
    "denies",
    "symptoms",
    "mood",
    "affect",
    "medication",
    "therapy",
    "diagnosis",
    "treatment",
    "assessment",
    "mental status",
    "anxiety",
    "depression",
    "sleep",
    "ideation",
    "risk",
    "follow-up",
    "session",
    "plan",
];

/// Check overall note quality.
pub fn check(text: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let char_count = text.chars().count();

    if char_count < MIN_NOTE_CHARS {
        findings.push(
            Finding::warning(
                "quality.too_short",
                format!("Note is only {} characters long", char_count),
                QUALITY_PENALTY,
            )
            .with_recommendation("Document enough detail to support the billed service level"),
        );
    }

    if char_count > MAX_NOTE_CHARS {
        findings.push(
            Finding::warning(
                "quality.too_long",
                format!("Note is {} characters long", char_count),
                QUALITY_PENALTY,
            )
            .with_recommendation("Trim boilerplate; very long notes obscure clinical reasoning"),
        );
    }

    let paragraphs = paragraph_count(text);
    if paragraphs < MIN_PARAGRAPHS {
        findings.push(
            Finding::warning(
                "quality.few_paragraphs",
                format!("Note has only {} paragraph(s)", paragraphs),
                QUALITY_PENALTY,
            )
            .with_recommendation("Break the note into separate clinical sections"),
        );
    }

    let term_hits = distinct_term_hits(text);
    if term_hits < MIN_DISTINCT_CLINICAL_TERMS {
        findings.push(
            Finding::warning(
                "quality.low_term_density",
                format!(
                    "Only {} distinct clinical term(s) recognized in the note",
                    term_hits
                ),
                QUALITY_PENALTY,
            )
            .with_recommendation("Use standard clinical terminology for findings and plans"),
        );
    }

    findings
}

/// Count blank-line separated paragraphs.
fn paragraph_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_paragraph = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            count += 1;
            in_paragraph = true;
        }
    }
    count
}

/// Number of distinct vocabulary entries appearing in the text.
fn distinct_term_hits(text: &str) -> usize {
    let lower = text.to_lowercase();
    CLINICAL_TERMS
        .iter()
        .filter(|term| lower.contains(*term))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substantial_note() -> String {
        "SUBJECTIVE:\nPatient reports improved mood and better sleep since the last session. Denies medication side effects.\n\nOBJECTIVE:\nAlert and oriented; affect congruent and full range.\n\nASSESSMENT:\nMajor depressive disorder, improving on current treatment.\n\nPLAN:\nContinue therapy and current medication; follow-up in four weeks.".to_string()
    }

    #[test]
    fn test_substantial_note_clean() {
        assert!(check(&substantial_note()).is_empty());
    }

    #[test]
    fn test_short_note_warns() {
        let findings = check("Patient seen. Doing well.");
        assert!(findings.iter().any(|f| f.code == "quality.too_short"));
        assert!(findings.iter().any(|f| f.code == "quality.few_paragraphs"));
    }

    #[test]
    fn test_overlong_note_warns() {
        let text = format!("{}{}", substantial_note(), "Filler sentence. ".repeat(1000));
        let findings = check(&text);
        assert!(findings.iter().any(|f| f.code == "quality.too_long"));
    }

    #[test]
    fn test_low_terminology_density() {
        let text = "The weather was discussed at length.\n\nSeveral topics came up.\n\nNothing else of note happened.\n\nThe meeting ended on time and everyone left the building at the same hour.";
        let findings = check(text);
        assert!(findings.iter().any(|f| f.code == "quality.low_term_density"));
    }

    #[test]
    fn test_paragraph_count() {
        assert_eq!(paragraph_count("a\n\nb\n\nc"), 3);
        assert_eq!(paragraph_count("a\nb\nc"), 1);
        assert_eq!(paragraph_count(""), 0);
    }

    #[test]
    fn test_distinct_term_hits() {
        assert_eq!(distinct_term_hits("no matches here at all"), 0);
        assert!(distinct_term_hits("patient reports anxiety") >= 3);
    }
}
