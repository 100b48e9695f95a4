//! Merge and reconstruction engine.
//!
//! Applies merge strategies to regenerated section text and reassembles the
//! full note, preserving untouched sections verbatim and emitting one audit
//! record per output section.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    ChangeAction, MergeStrategy, NoteFormat, ParsedNote, Section, SectionChange, SectionType,
};

/// Provisional confidence for regenerated sections. The engine has no
/// signal about generation quality, so this is an honest constant rather
/// than computed.
pub const REGENERATED_CONFIDENCE: f64 = 0.85;

/// Ordering rank for sections that fill no SOAP slot.
const NON_SOAP_RANK: usize = 100;

/// Regenerated text for one section, ready to merge back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegeneratedSection {
    /// Section the text belongs to
    pub section_type: SectionType,
    /// Generator output
    pub text: String,
    /// How to combine with the original body
    pub strategy: MergeStrategy,
    /// Caller-supplied reason recorded in the audit trail
    pub reason: Option<String>,
}

/// Reassembled note plus its audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconstructionResult {
    /// The full reassembled note text
    pub content: String,
    /// One change record per output section, in output order
    pub changes: Vec<SectionChange>,
}

struct OutputSection {
    section_type: SectionType,
    title: String,
    content: String,
    original_offset: usize,
    action: ChangeAction,
    original_content: String,
    reason: String,
    confidence: f64,
}

/// Reassemble the note from preserved and regenerated sections.
///
/// SOAP-formatted notes render in canonical SOAP order with remaining
/// standardized sections in their original relative order; narrative notes
/// keep document order throughout. Each section renders as
/// `"<Title>:\n<content>\n\n"`.
pub fn reconstruct(
    parsed: &ParsedNote,
    preserved: &[Section],
    regenerated: &[RegeneratedSection],
) -> ReconstructionResult {
    let mut outputs: Vec<OutputSection> = Vec::with_capacity(preserved.len() + regenerated.len());

    for section in preserved {
        outputs.push(OutputSection {
            section_type: section.section_type,
            title: section.title.clone(),
            content: section.content.clone(),
            original_offset: section.start_offset,
            action: ChangeAction::Preserved,
            original_content: section.content.clone(),
            reason: "No update requested".to_string(),
            confidence: 1.0,
        });
    }

    for regen in regenerated {
        let original = parsed.section(regen.section_type);
        let original_content = original.map(|s| s.content.clone()).unwrap_or_default();

        let (content, action) = match (original, regen.strategy) {
            (None, _) => (regen.text.clone(), ChangeAction::Added),
            (Some(_), MergeStrategy::Replace) => (regen.text.clone(), ChangeAction::Updated),
            (Some(s), MergeStrategy::Append) => {
                (join_bodies(&s.content, &regen.text), ChangeAction::Updated)
            }
            // Naive concatenation, no deduplication
            (Some(s), MergeStrategy::Merge) => {
                (join_bodies(&s.content, &regen.text), ChangeAction::Merged)
            }
        };

        outputs.push(OutputSection {
            section_type: regen.section_type,
            title: original
                .map(|s| s.title.clone())
                .unwrap_or_else(|| regen.section_type.canonical_title().to_string()),
            content,
            original_offset: original.map(|s| s.start_offset).unwrap_or(usize::MAX),
            action,
            original_content,
            reason: regen
                .reason
                .clone()
                .unwrap_or_else(|| "Regenerated from new encounter information".to_string()),
            confidence: REGENERATED_CONFIDENCE,
        });
    }

    match parsed.format {
        NoteFormat::Soap => outputs.sort_by_key(|o| (soap_rank(o.section_type), o.original_offset)),
        NoteFormat::Narrative => outputs.sort_by_key(|o| o.original_offset),
    }

    let mut content = String::new();
    let mut changes = Vec::with_capacity(outputs.len());
    for output in outputs {
        content.push_str(&output.title);
        content.push_str(":\n");
        content.push_str(&output.content);
        content.push_str("\n\n");

        changes.push(SectionChange::new(
            output.section_type,
            output.action,
            output.original_content,
            output.content,
            output.reason,
            output.confidence,
        ));
    }

    let content = format!("{}\n", content.trim_end());

    debug!(sections = changes.len(), "note reconstructed");

    ReconstructionResult { content, changes }
}

/// Original body, blank line, new body; degenerate cases collapse cleanly.
fn join_bodies(original: &str, new: &str) -> String {
    match (original.trim().is_empty(), new.trim().is_empty()) {
        (true, _) => new.trim().to_string(),
        (_, true) => original.trim().to_string(),
        (false, false) => format!("{}\n\n{}", original.trim(), new.trim()),
    }
}

/// First SOAP slot a type fills, or a rank past all slots.
fn soap_rank(section_type: SectionType) -> usize {
    section_type
        .soap_slots()
        .first()
        .map(|slot| *slot as usize)
        .unwrap_or(NON_SOAP_RANK)
}
