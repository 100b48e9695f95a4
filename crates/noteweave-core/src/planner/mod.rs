//! Update planner.
//!
//! Partitions a parsed note into sections to preserve verbatim and
//! generation requests for sections marked for regeneration. Deterministic,
//! no I/O; the only failure is a directive naming a section the note does
//! not have.

mod templates;

pub use templates::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    EmrDialect, MergeStrategy, NoteContext, ParsedNote, Section, SectionType, UpdateDirective,
    VisitType,
};

/// Planner errors.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Section not found in parsed note: {0:?}")]
    SectionNotFound(SectionType),
}

pub type PlanResult<T> = Result<T, PlanError>;

/// Everything the external generator needs to regenerate one section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Section being regenerated
    pub section_type: SectionType,
    /// Visit type keying the instruction template
    pub visit_type: VisitType,
    /// Dialect the output must conform to
    pub dialect: EmrDialect,
    /// Section body as it currently stands
    pub original_content: String,
    /// New encounter information supplied by the caller
    pub new_material: String,
    /// Instruction text from the template table
    pub instruction: String,
    /// Dialect-derived formatting constraints
    pub constraints: Vec<String>,
    /// How the generated text is merged back
    pub merge_strategy: MergeStrategy,
}

/// One section scheduled for regeneration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedRegeneration {
    /// The section as parsed
    pub section: Section,
    /// The request to hand to the generator
    pub request: GenerationRequest,
    /// Caller's stated reason, carried through to the audit trail
    pub update_reason: Option<String>,
}

/// Output of the planner: preserved sections plus generation requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdatePlan {
    /// Sections routed through unchanged, in document order
    pub preserve: Vec<Section>,
    /// Sections to regenerate, in document order
    pub regenerate: Vec<PlannedRegeneration>,
}

/// Partition sections per the caller's directives and build generation
/// requests for those marked for update.
///
/// A directive with `should_update` naming a section type absent from the
/// note is a caller error and fails immediately; it is never silently
/// skipped. Directives with `should_update = false`, and section types with
/// no directive, route to `preserve` unchanged.
pub fn plan(
    parsed: &ParsedNote,
    directives: &[UpdateDirective],
    context: &NoteContext,
    new_material: &str,
) -> PlanResult<UpdatePlan> {
    let mut regenerate = Vec::new();
    let mut update_types: HashSet<SectionType> = HashSet::new();

    for directive in directives.iter().filter(|d| d.should_update) {
        if !update_types.insert(directive.section_type) {
            continue;
        }

        let section = parsed
            .section(directive.section_type)
            .ok_or(PlanError::SectionNotFound(directive.section_type))?;

        let request = GenerationRequest {
            section_type: directive.section_type,
            visit_type: context.visit_type,
            dialect: context.dialect,
            original_content: section.content.clone(),
            new_material: new_material.to_string(),
            instruction: instruction_for(directive.section_type, context.visit_type),
            constraints: dialect_constraints(context.dialect),
            merge_strategy: directive.merge_strategy,
        };

        regenerate.push(PlannedRegeneration {
            section: section.clone(),
            request,
            update_reason: directive.update_reason.clone(),
        });
    }

    regenerate.sort_by_key(|r| r.section.start_offset);

    let preserve: Vec<Section> = parsed
        .sections
        .iter()
        .filter(|s| !update_types.contains(&s.section_type))
        .cloned()
        .collect();

    debug!(
        preserve = preserve.len(),
        regenerate = regenerate.len(),
        "update plan built"
    );

    Ok(UpdatePlan {
        preserve,
        regenerate,
    })
}

/// Formatting constraints derived from the target dialect.
fn dialect_constraints(dialect: EmrDialect) -> Vec<String> {
    match dialect {
        EmrDialect::Epic => vec![
            "Preserve Epic SmartPhrase, DotPhrase, SmartList, and wildcard tokens exactly as written".to_string(),
            "Do not introduce macro syntax that is not present in the original".to_string(),
        ],
        EmrDialect::Credible => vec![
            "Plain text only; no EMR macro syntax of any kind".to_string(),
            "Standard punctuation only".to_string(),
        ],
        EmrDialect::Other => vec!["Plain text only".to_string()],
    }
}
