//! Generator trait, per-section fan-out, and the mock backend.

use std::collections::HashMap;

use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use noteweave_core::{
    GenerationRequest, NoteContext, RegeneratedSection, SectionType, UpdatePlan,
};

/// Generation errors for a single section call.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("generation backend error: {0}")]
    Backend(String),

    #[error("generation timed out: {0}")]
    Timeout(String),

    #[error("generator returned empty text for {0}")]
    Empty(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// A batch regeneration that could not complete.
///
/// Any failed section aborts the whole batch; every failure is named so the
/// caller knows exactly which sections to retry.
#[derive(Error, Debug)]
#[error("section regeneration failed for {}", failed_summary(.failed))]
pub struct RegenerationFailure {
    /// (section, error message) per failed call
    pub failed: Vec<(SectionType, String)>,
}

fn failed_summary(failed: &[(SectionType, String)]) -> String {
    failed
        .iter()
        .map(|(ty, msg)| format!("{:?} ({})", ty, msg))
        .collect::<Vec<_>>()
        .join(", ")
}

/// External text-generation collaborator.
///
/// One call per section marked for regeneration. Implementations own their
/// transport and model; no retry or backoff is assumed at this layer.
pub trait SectionGenerator {
    /// Generate replacement body text for one section.
    fn generate(
        &self,
        request: &GenerationRequest,
        context: &NoteContext,
    ) -> impl std::future::Future<Output = GenerationResult<String>> + Send;
}

/// Regenerate every planned section concurrently and join the results.
///
/// Calls are independent and issued together, so batch latency is bounded
/// by the slowest single section. Output order follows the plan (original
/// document offset), never completion order. A failure in one call fails
/// only that section; any failed section aborts the batch with every
/// failure named.
pub async fn regenerate_all<G: SectionGenerator + Sync>(
    generator: &G,
    plan: &UpdatePlan,
    context: &NoteContext,
) -> Result<Vec<RegeneratedSection>, RegenerationFailure> {
    let calls = plan.regenerate.iter().map(|planned| async move {
        let outcome = generator.generate(&planned.request, context).await;
        (planned, outcome)
    });

    let results = join_all(calls).await;

    let mut regenerated = Vec::with_capacity(results.len());
    let mut failed = Vec::new();

    for (planned, outcome) in results {
        let section_type = planned.request.section_type;
        match outcome {
            Ok(text) if text.trim().is_empty() => {
                failed.push((section_type, "generator returned empty text".to_string()));
            }
            Ok(text) => regenerated.push(RegeneratedSection {
                section_type,
                text,
                strategy: planned.request.merge_strategy,
                reason: planned.update_reason.clone(),
            }),
            Err(err) => {
                warn!(?section_type, error = %err, "section regeneration failed");
                failed.push((section_type, err.to_string()));
            }
        }
    }

    if !failed.is_empty() {
        return Err(RegenerationFailure { failed });
    }

    debug!(sections = regenerated.len(), "regeneration batch complete");
    Ok(regenerated)
}

/// Generator adapter enforcing a hard per-call deadline.
///
/// A timeout fails only the section whose call exceeded it; other sections
/// in the same batch are unaffected.
pub struct TimedGenerator<G> {
    inner: G,
    timeout: std::time::Duration,
}

impl<G> TimedGenerator<G> {
    /// Wrap `inner` with a per-section deadline.
    pub fn new(inner: G, timeout: std::time::Duration) -> Self {
        Self { inner, timeout }
    }
}

impl<G: SectionGenerator + Sync> SectionGenerator for TimedGenerator<G> {
    async fn generate(
        &self,
        request: &GenerationRequest,
        context: &NoteContext,
    ) -> GenerationResult<String> {
        match tokio::time::timeout(self.timeout, self.inner.generate(request, context)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(GenerationError::Timeout(format!(
                "{:?} exceeded {:?}",
                request.section_type, self.timeout
            ))),
        }
    }
}

/// Mock generator for tests and offline development.
///
/// Returns canned text per section type and can be scripted to fail
/// specific sections; no model required.
#[derive(Debug, Default)]
pub struct MockGenerator {
    responses: HashMap<SectionType, String>,
    failures: HashMap<SectionType, String>,
}

impl MockGenerator {
    /// Create a mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `text` for the given section type.
    pub fn with_response(mut self, section_type: SectionType, text: &str) -> Self {
        self.responses.insert(section_type, text.to_string());
        self
    }

    /// Fail the given section type with a backend error.
    pub fn with_failure(mut self, section_type: SectionType, message: &str) -> Self {
        self.failures.insert(section_type, message.to_string());
        self
    }
}

impl SectionGenerator for MockGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
        _context: &NoteContext,
    ) -> GenerationResult<String> {
        if let Some(message) = self.failures.get(&request.section_type) {
            return Err(GenerationError::Backend(message.clone()));
        }

        Ok(self
            .responses
            .get(&request.section_type)
            .cloned()
            .unwrap_or_else(|| {
                format!(
                    "{} updated with new encounter information.",
                    request.section_type.canonical_title()
                )
            }))
    }
}
