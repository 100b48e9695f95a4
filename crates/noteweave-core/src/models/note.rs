//! Parsed note, note context, and classification enums.

use serde::{Deserialize, Serialize};

use super::section::{Section, SectionType};

/// Overall structure a note was classified as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoteFormat {
    /// All four SOAP slots present, in relative order
    Soap,
    /// Anything else
    Narrative,
}

/// EMR dialect a note or clinic operates under.
///
/// Epic carries inline macro syntax (smart phrases, dot phrases, smart
/// lists); Credible and other plain-text systems forbid it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EmrDialect {
    Epic,
    Credible,
    Other,
}

/// Visit type driving instruction templates and completeness checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VisitType {
    Intake,
    FollowUp,
    TherapySession,
    MedManagement,
    CrisisEvaluation,
    Other,
}

/// Caller-supplied context for an encounter note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteContext {
    /// Clinic identifier (opaque to the engine)
    pub clinic: String,
    /// EMR dialect the clinic documents in
    pub dialect: EmrDialect,
    /// Type of visit this note documents
    pub visit_type: VisitType,
}

/// Result of parsing a raw note into labeled sections.
///
/// Invariant: sections are sorted by `start_offset`, non-overlapping, and
/// together with the inter-section gaps exactly cover the source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedNote {
    /// Detected sections, ordered by start offset
    pub sections: Vec<Section>,
    /// Detected overall structure
    pub format: NoteFormat,
    /// Dialect evidenced by the text itself (Epic iff markers present)
    pub dialect: EmrDialect,
    /// Length-weighted mean of per-section confidences (0.0 - 1.0)
    pub overall_confidence: f64,
    /// Non-fatal parse observations
    pub warnings: Vec<String>,
    /// Parse failures (zero sections detected)
    pub errors: Vec<String>,
    /// Wall-clock parse duration
    pub processing_duration_ms: u64,
}

impl ParsedNote {
    /// Look up the first section of the given type.
    pub fn section(&self, section_type: SectionType) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.section_type == section_type)
    }

    /// Whether parsing recovered no structure at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Types present in this note, in document order.
    pub fn section_types(&self) -> Vec<SectionType> {
        self.sections.iter().map(|s| s.section_type).collect()
    }
}
