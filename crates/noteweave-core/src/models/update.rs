//! Update directives and the per-section audit trail.

use serde::{Deserialize, Serialize};

use super::section::SectionType;

/// How regenerated text is combined with the original section body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Discard the original, keep only the new text
    Replace,
    /// Original text, blank line, new text
    Append,
    /// Concatenation without deduplication (placeholder semantics)
    Merge,
}

/// Caller instruction for one section type.
///
/// Section types with no directive default to preserve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateDirective {
    /// Section type this directive addresses
    pub section_type: SectionType,
    /// Regenerate (true) or preserve verbatim (false)
    pub should_update: bool,
    /// Free-text reason recorded in the audit trail
    pub update_reason: Option<String>,
    /// Strategy applied when `should_update` is true
    pub merge_strategy: MergeStrategy,
}

impl UpdateDirective {
    /// Directive to regenerate a section with the given strategy.
    pub fn update(section_type: SectionType, merge_strategy: MergeStrategy) -> Self {
        Self {
            section_type,
            should_update: true,
            update_reason: None,
            merge_strategy,
        }
    }

    /// Directive to explicitly preserve a section.
    pub fn preserve(section_type: SectionType) -> Self {
        Self {
            section_type,
            should_update: false,
            update_reason: None,
            merge_strategy: MergeStrategy::Replace,
        }
    }

    /// Attach a reason for the audit trail.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.update_reason = Some(reason.into());
        self
    }
}

/// What happened to a section during reconstruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeAction {
    Updated,
    Preserved,
    Merged,
    Added,
}

/// Audit record for one section of a reconstructed note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionChange {
    /// Unique change ID
    pub id: String,
    /// Section this change applies to
    pub section_type: SectionType,
    /// What happened
    pub action: ChangeAction,
    /// Section body before reconstruction (empty for Added)
    pub original_content: String,
    /// Section body after reconstruction
    pub new_content: String,
    /// Why the section changed (directive reason or engine note)
    pub change_reason: String,
    /// Confidence in the change (1.0 preserved, provisional 0.85 generated)
    pub confidence: f64,
    /// When the change was recorded (RFC3339)
    pub changed_at: String,
}

impl SectionChange {
    /// Record a change, stamping id and timestamp.
    pub fn new(
        section_type: SectionType,
        action: ChangeAction,
        original_content: String,
        new_content: String,
        change_reason: String,
        confidence: f64,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            section_type,
            action,
            original_content,
            new_content,
            change_reason,
            confidence,
            changed_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
