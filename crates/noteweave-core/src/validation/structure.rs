//! Structural rules: SOAP header presence, order, and section substance.

use crate::detector::{fold_duplicates, scan_headers, HeaderMatch};
use crate::emr;
use crate::models::{Finding, SoapSlot};

/// Sections with fewer characters than this are flagged as thin.
const MIN_SECTION_CONTENT_CHARS: usize = 20;

const MISSING_HEADER_PENALTY: u32 = 15;
const OUT_OF_ORDER_PENALTY: u32 = 10;
const SHORT_SECTION_PENALTY: u32 = 8;

/// Check the note's section skeleton.
pub fn check(text: &str) -> Vec<Finding> {
    let markers = emr::find_markers(text);
    let (matches, _) = fold_duplicates(scan_headers(text, &markers));

    let mut findings = Vec::new();
    findings.extend(check_soap_slots(&matches));
    findings.extend(check_section_substance(text, &matches));
    findings
}

/// Missing slots are errors; out-of-order first occurrences a warning.
fn check_soap_slots(matches: &[HeaderMatch]) -> Vec<Finding> {
    let mut first: [Option<usize>; 4] = [None; 4];
    for (idx, m) in matches.iter().enumerate() {
        for slot in m.section_type.soap_slots() {
            let slot_idx = *slot as usize;
            if first[slot_idx].is_none() {
                first[slot_idx] = Some(idx);
            }
        }
    }

    let slots = [
        (SoapSlot::Subjective, "Subjective"),
        (SoapSlot::Objective, "Objective"),
        (SoapSlot::Assessment, "Assessment"),
        (SoapSlot::Plan, "Plan"),
    ];

    let mut findings = Vec::new();
    for (slot, name) in slots {
        if first[slot as usize].is_none() {
            findings.push(
                Finding::error(
                    "structure.missing_header",
                    format!("Missing {} section header", name),
                    MISSING_HEADER_PENALTY,
                )
                .with_recommendation(format!("Add a {} section", name)),
            );
        }
    }

    let present: Vec<usize> = slots
        .iter()
        .filter_map(|(slot, _)| first[*slot as usize])
        .collect();
    if present.windows(2).any(|pair| pair[0] > pair[1]) {
        findings.push(Finding::warning(
            "structure.out_of_order",
            "SOAP sections appear out of canonical order",
            OUT_OF_ORDER_PENALTY,
        ));
    }

    findings
}

/// Warn on detected sections with almost no body text.
fn check_section_substance(text: &str, matches: &[HeaderMatch]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (i, m) in matches.iter().enumerate() {
        let end = matches
            .get(i + 1)
            .map(|next| next.line_start)
            .unwrap_or(text.len());
        let content_chars = text[m.header_end..end].trim().chars().count();
        if content_chars < MIN_SECTION_CONTENT_CHARS {
            findings.push(
                Finding::warning(
                    "structure.short_section",
                    format!(
                        "Section \"{}\" has only {} characters of content",
                        m.title, content_chars
                    ),
                    SHORT_SECTION_PENALTY,
                )
                .with_recommendation(format!("Expand the \"{}\" section", m.title)),
            );
        }
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    const COMPLETE: &str = "SUBJECTIVE:\nPatient reports anxiety has improved somewhat.\n\nOBJECTIVE:\nAlert, oriented, cooperative today.\n\nASSESSMENT:\nGeneralized anxiety disorder, improving.\n\nPLAN:\nContinue weekly therapy sessions.";

    #[test]
    fn test_complete_note_clean() {
        assert!(check(COMPLETE).is_empty());
    }

    #[test]
    fn test_missing_plan_is_error() {
        let text = "SUBJECTIVE:\nPatient reports anxiety has improved.\n\nOBJECTIVE:\nAlert and oriented throughout.\n\nASSESSMENT:\nGeneralized anxiety disorder, stable.";
        let findings = check(text);

        let errors: Vec<_> = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Plan"));
        assert_eq!(errors[0].penalty, 15);
    }

    #[test]
    fn test_all_headers_missing() {
        let findings = check("Just a narrative paragraph with no headers at all in it.");
        let errors = findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        assert_eq!(errors, 4);
    }

    #[test]
    fn test_out_of_order_warns() {
        let text = "OBJECTIVE:\nAlert and oriented, good eye contact.\n\nSUBJECTIVE:\nReports persistent worry most days.\n\nASSESSMENT:\nGeneralized anxiety disorder.\n\nPLAN:\nContinue current treatment plan.";
        let findings = check(text);
        assert!(findings
            .iter()
            .any(|f| f.code == "structure.out_of_order" && f.severity == Severity::Warning));
    }

    #[test]
    fn test_short_section_warns() {
        let text = "SUBJECTIVE:\nOk.\n\nOBJECTIVE:\nAlert, oriented, engaged in session.\n\nASSESSMENT:\nGeneralized anxiety disorder.\n\nPLAN:\nContinue weekly therapy sessions.";
        let findings = check(text);
        assert!(findings
            .iter()
            .any(|f| f.code == "structure.short_section" && f.message.contains("SUBJECTIVE")));
    }

    #[test]
    fn test_hpi_fills_subjective_slot() {
        let text = "HPI:\nAnxiety stable on current regimen.\n\nOBJECTIVE:\nAlert and fully oriented.\n\nASSESSMENT:\nGeneralized anxiety disorder.\n\nPLAN:\nContinue sertraline 50mg daily.";
        let findings = check(text);
        assert!(!findings
            .iter()
            .any(|f| f.code == "structure.missing_header" && f.message.contains("Subjective")));
    }
}
