//! LLM collaborator interface for section regeneration.
//!
//! This crate owns the only suspension point in the note section engine:
//! the external text-generation call. It renders prompts from planner
//! requests, fans out one concurrent call per section marked for update,
//! and drives the end-to-end parse → plan → generate → reconstruct →
//! validate pipeline.

pub mod generation;
pub mod pipeline;
pub mod prompts;

pub use generation::*;
pub use pipeline::*;
pub use prompts::*;
