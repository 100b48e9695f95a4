//! Section header registry.
//!
//! Static map from standardized section types to their recognized textual
//! header variants. Loaded once as frozen constants; header matching is
//! case-insensitive and tolerant of internal whitespace.

use strsim::jaro_winkler;

use crate::models::SectionType;

/// Alias matches score inside this band; canonical matches score 1.0.
const ALIAS_CONFIDENCE_FLOOR: f64 = 0.6;
const ALIAS_CONFIDENCE_CEIL: f64 = 0.8;

/// (type, canonical header, alias headers)
const HEADER_VARIANTS: &[(SectionType, &str, &[&str])] = &[
    (
        SectionType::Hpi,
        "History of Present Illness",
        &["HPI", "History of Presenting Illness", "Present Illness"],
    ),
    (
        SectionType::ReviewOfSystems,
        "Review of Systems",
        &["ROS", "Systems Review"],
    ),
    (
        SectionType::PsychiatricExam,
        "Psychiatric Exam",
        &[
            "Psychiatric Examination",
            "Mental Status Exam",
            "Mental Status Examination",
            "MSE",
        ],
    ),
    (
        SectionType::AssessmentAndPlan,
        "Assessment and Plan",
        &["Assessment & Plan", "A/P", "A&P", "Impression and Plan"],
    ),
    (
        SectionType::CurrentMedications,
        "Current Medications",
        &["Medications", "Current Meds", "Medication List"],
    ),
    (
        SectionType::MedicationsPlan,
        "Medications Plan",
        &["Medication Plan", "Med Plan", "Medication Changes"],
    ),
    (
        SectionType::Risks,
        "Risks",
        &["Risk Assessment", "Risk Factors"],
    ),
    (
        SectionType::SafetyPlan,
        "Safety Plan",
        &["Safety Planning", "Crisis Plan"],
    ),
    (
        SectionType::QuestionnairesSurveys,
        "Questionnaires / Surveys",
        &["Questionnaires", "Surveys", "Rating Scales", "Screeners"],
    ),
    (
        SectionType::Medical,
        "Medical",
        &["Medical History", "Past Medical History", "PMH"],
    ),
    (
        SectionType::Psychosocial,
        "Psychosocial",
        &["Psychosocial History", "Social History"],
    ),
    (
        SectionType::FollowUp,
        "Follow-Up",
        &["Follow Up", "Followup", "Return to Clinic", "Disposition"],
    ),
    (SectionType::Subjective, "SUBJECTIVE", &[]),
    (SectionType::Objective, "OBJECTIVE", &[]),
    (SectionType::Assessment, "ASSESSMENT", &["Impression"]),
    (SectionType::Plan, "PLAN", &["Treatment Plan", "Plan of Care"]),
];

/// Lowercase and collapse runs of whitespace to single spaces.
pub fn normalize_header(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// All registered section types (Unknown excluded).
pub fn registered_types() -> impl Iterator<Item = SectionType> {
    HEADER_VARIANTS.iter().map(|(ty, _, _)| *ty)
}

/// Canonical plus alias headers for a section type.
pub fn variants(section_type: SectionType) -> Vec<&'static str> {
    HEADER_VARIANTS
        .iter()
        .find(|(ty, _, _)| *ty == section_type)
        .map(|(_, canonical, aliases)| {
            std::iter::once(*canonical).chain(aliases.iter().copied()).collect()
        })
        .unwrap_or_default()
}

/// Match a candidate header against the registry.
///
/// Returns the section type and a confidence: 1.0 for the canonical form,
/// 0.6 - 0.8 for an alias (graded by similarity to the canonical form).
pub fn match_header(text: &str) -> Option<(SectionType, f64)> {
    let normalized = normalize_header(text);
    if normalized.is_empty() {
        return None;
    }

    for (ty, canonical, aliases) in HEADER_VARIANTS {
        let canonical_norm = normalize_header(canonical);
        if normalized == canonical_norm {
            return Some((*ty, 1.0));
        }
        for alias in *aliases {
            if normalized == normalize_header(alias) {
                return Some((*ty, alias_confidence(alias, canonical)));
            }
        }
    }

    None
}

/// Grade an alias into the 0.6 - 0.8 band by similarity to the canonical.
fn alias_confidence(alias: &str, canonical: &str) -> f64 {
    let similarity = jaro_winkler(&normalize_header(alias), &normalize_header(canonical));
    ALIAS_CONFIDENCE_FLOOR + (ALIAS_CONFIDENCE_CEIL - ALIAS_CONFIDENCE_FLOOR) * similarity
}
