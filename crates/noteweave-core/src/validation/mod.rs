//! Validation engine.
//!
//! Runs the dialect, structural, quality, and completeness rule families
//! over a final note and folds every finding into one scored result. Pure
//! function of text and context; findings accumulate, nothing
//! short-circuits, and validation itself never fails.

mod completeness;
mod dialect;
mod quality;
mod structure;

use tracing::debug;

use crate::models::{Finding, NoteContext, ValidationResult};

/// Validate a note against its clinic's formatting contract and the
/// visit type's completeness expectations.
pub fn validate(text: &str, context: &NoteContext) -> ValidationResult {
    let mut findings: Vec<Finding> = Vec::new();
    findings.extend(dialect::check(text, context));
    findings.extend(structure::check(text));
    findings.extend(quality::check(text));
    findings.extend(completeness::check(text, context));

    let result = ValidationResult::from_findings(findings);

    debug!(
        is_valid = result.is_valid,
        score = result.score,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "note validated"
    );

    result
}
