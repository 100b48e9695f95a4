//! End-to-end note update pipeline.
//!
//! parse → plan → concurrent regeneration → reconstruct → validate. The
//! pipeline either completes every requested regeneration or fails naming
//! the sections that could not be regenerated; it never emits a note with a
//! silently un-regenerated section.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use noteweave_core::{
    plan, reconstruct, validate, NoteContext, ParsedNote, PlanError, SectionChange,
    SectionDetector, UpdateDirective, ValidationResult,
};

use crate::generation::{regenerate_all, RegenerationFailure, SectionGenerator};

/// Pipeline errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("note could not be parsed: {}", .0.join("; "))]
    Unparseable(Vec<String>),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Regeneration(#[from] RegenerationFailure),
}

/// A completed note update. Plain data, transport-agnostic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteUpdate {
    /// The parse of the original note
    pub parsed: ParsedNote,
    /// The reassembled note text
    pub content: String,
    /// Audit trail, one record per output section
    pub changes: Vec<SectionChange>,
    /// Validation of the reassembled text
    pub validation: ValidationResult,
}

/// Update a note: regenerate the directed sections from `new_material`,
/// preserve everything else byte-for-byte, and validate the result.
pub async fn update_note<G: SectionGenerator + Sync>(
    generator: &G,
    text: &str,
    context: &NoteContext,
    directives: &[UpdateDirective],
    new_material: &str,
) -> Result<NoteUpdate, PipelineError> {
    let parsed = SectionDetector::new().parse(text);
    if parsed.is_empty() {
        return Err(PipelineError::Unparseable(parsed.errors));
    }

    let update_plan = plan(&parsed, directives, context, new_material)?;
    let regenerated = regenerate_all(generator, &update_plan, context).await?;
    let reconstruction = reconstruct(&parsed, &update_plan.preserve, &regenerated);
    let validation = validate(&reconstruction.content, context);

    debug!(
        updated = regenerated.len(),
        preserved = update_plan.preserve.len(),
        score = validation.score,
        "note update complete"
    );

    Ok(NoteUpdate {
        parsed,
        content: reconstruction.content,
        changes: reconstruction.changes,
        validation,
    })
}
