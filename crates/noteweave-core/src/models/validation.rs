//! Validation findings and the aggregate result.

use serde::{Deserialize, Serialize};

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    /// Blocks the note (isValid = false)
    Error,
    /// Reported, does not block
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    /// Error or Warning
    pub severity: Severity,
    /// Stable rule code, e.g. "dialect.smart_phrase"
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Suggested fix, when the rule has one
    pub recommendation: Option<String>,
    /// Score penalty this finding carries
    pub penalty: u32,
}

impl Finding {
    /// Error-level finding.
    pub fn error(code: &str, message: impl Into<String>, penalty: u32) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message: message.into(),
            recommendation: None,
            penalty,
        }
    }

    /// Warning-level finding.
    pub fn warning(code: &str, message: impl Into<String>, penalty: u32) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message: message.into(),
            recommendation: None,
            penalty,
        }
    }

    /// Attach a recommendation.
    pub fn with_recommendation(mut self, rec: impl Into<String>) -> Self {
        self.recommendation = Some(rec.into());
        self
    }
}

/// Aggregate validation outcome. Pure function of text + context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    /// True iff no Error-level findings
    pub is_valid: bool,
    /// Error messages
    pub errors: Vec<String>,
    /// Warning messages
    pub warnings: Vec<String>,
    /// Collected recommendations
    pub recommendations: Vec<String>,
    /// 100 minus accumulated penalties, floored at 0
    pub score: u8,
    /// All findings, in rule order
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// Fold findings into the aggregate result.
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut recommendations = Vec::new();
        let mut penalty_total: u32 = 0;

        for finding in &findings {
            match finding.severity {
                Severity::Error => errors.push(finding.message.clone()),
                Severity::Warning => warnings.push(finding.message.clone()),
            }
            if let Some(rec) = &finding.recommendation {
                recommendations.push(rec.clone());
            }
            penalty_total += finding.penalty;
        }

        let score = 100u32.saturating_sub(penalty_total) as u8;

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            recommendations,
            score,
            findings,
        }
    }
}
