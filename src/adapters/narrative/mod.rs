//! Narrative Adapters
//!
//! Implementations of the NarrativeGenerator port.
//!
//! - **TemplateNarrator** - Deterministic sentence templates
//! - **FallbackNarrator** - Falls back to a second generator when the first is unavailable

mod fallback_narrator;
mod template_narrator;

pub use fallback_narrator::FallbackNarrator;
pub use template_narrator::TemplateNarrator;
