//! Section types and per-section parse records.

use serde::{Deserialize, Serialize};

/// Closed set of standardized clinical note section categories.
///
/// The legacy SOAP variants (`Subjective`, `Objective`, `Assessment`, `Plan`)
/// remain first-class because older notes still use bare SOAP headers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SectionType {
    Hpi,
    ReviewOfSystems,
    PsychiatricExam,
    AssessmentAndPlan,
    CurrentMedications,
    MedicationsPlan,
    Risks,
    SafetyPlan,
    QuestionnairesSurveys,
    Medical,
    Psychosocial,
    FollowUp,
    Subjective,
    Objective,
    Assessment,
    Plan,
    Unknown,
}

/// One of the four canonical SOAP slots a section can stand in for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoapSlot {
    Subjective,
    Objective,
    Assessment,
    Plan,
}

impl SectionType {
    /// Canonical display title for this section type.
    pub fn canonical_title(&self) -> &'static str {
        match self {
            SectionType::Hpi => "History of Present Illness",
            SectionType::ReviewOfSystems => "Review of Systems",
            SectionType::PsychiatricExam => "Psychiatric Exam",
            SectionType::AssessmentAndPlan => "Assessment and Plan",
            SectionType::CurrentMedications => "Current Medications",
            SectionType::MedicationsPlan => "Medications Plan",
            SectionType::Risks => "Risks",
            SectionType::SafetyPlan => "Safety Plan",
            SectionType::QuestionnairesSurveys => "Questionnaires / Surveys",
            SectionType::Medical => "Medical",
            SectionType::Psychosocial => "Psychosocial",
            SectionType::FollowUp => "Follow-Up",
            SectionType::Subjective => "SUBJECTIVE",
            SectionType::Objective => "OBJECTIVE",
            SectionType::Assessment => "ASSESSMENT",
            SectionType::Plan => "PLAN",
            SectionType::Unknown => "Unknown",
        }
    }

    /// SOAP slots this section type can fill.
    ///
    /// A combined Assessment and Plan section fills both the Assessment and
    /// Plan slots.
    pub fn soap_slots(&self) -> &'static [SoapSlot] {
        match self {
            SectionType::Subjective | SectionType::Hpi => &[SoapSlot::Subjective],
            SectionType::Objective | SectionType::PsychiatricExam => &[SoapSlot::Objective],
            SectionType::Assessment => &[SoapSlot::Assessment],
            SectionType::Plan | SectionType::MedicationsPlan => &[SoapSlot::Plan],
            SectionType::AssessmentAndPlan => &[SoapSlot::Assessment, SoapSlot::Plan],
            _ => &[],
        }
    }

    /// Whether this is one of the four legacy SOAP types.
    pub fn is_soap(&self) -> bool {
        matches!(
            self,
            SectionType::Subjective
                | SectionType::Objective
                | SectionType::Assessment
                | SectionType::Plan
        )
    }
}

/// Metadata captured for a section at parse time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionMetadata {
    /// Word count of the section content
    pub word_count: usize,
    /// Whether the content carries EMR macro syntax (smart phrases etc.)
    pub has_emr_syntax: bool,
    /// Whether the header matched a registered variant (false for fallback splits)
    pub is_standardized: bool,
    /// The header text exactly as it appeared in the source
    pub original_header_text: String,
}

/// A single detected section. Created once per parse, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    /// Standardized type this section was classified as
    pub section_type: SectionType,
    /// Verbatim header text (without trailing colon/newline)
    pub title: String,
    /// Verbatim body text between this header and the next
    pub content: String,
    /// Byte offset where the section (header included) starts
    pub start_offset: usize,
    /// Byte offset one past the section end
    pub end_offset: usize,
    /// Detection confidence (0.0 - 1.0)
    pub confidence: f64,
    /// Parse-time metadata
    pub metadata: SectionMetadata,
}

impl Section {
    /// Character length of the section content.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Whether the header matched but no body text followed it.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soap_slots() {
        assert_eq!(SectionType::Hpi.soap_slots(), &[SoapSlot::Subjective]);
        assert_eq!(
            SectionType::AssessmentAndPlan.soap_slots(),
            &[SoapSlot::Assessment, SoapSlot::Plan]
        );
        assert!(SectionType::Risks.soap_slots().is_empty());
    }

    #[test]
    fn test_is_soap() {
        assert!(SectionType::Subjective.is_soap());
        assert!(SectionType::Plan.is_soap());
        assert!(!SectionType::Hpi.is_soap());
        assert!(!SectionType::Unknown.is_soap());
    }

    #[test]
    fn test_canonical_titles_nonempty() {
        for ty in [
            SectionType::Hpi,
            SectionType::SafetyPlan,
            SectionType::QuestionnairesSurveys,
            SectionType::Subjective,
        ] {
            assert!(!ty.canonical_title().is_empty());
        }
    }
}
