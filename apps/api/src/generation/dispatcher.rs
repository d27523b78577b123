//! Content Dispatcher: one outbound generation call per user action.
//!
//! Failures never propagate: they come back as `GeneratedContent::Failed`
//! and only collapse into the "An error occurred: ..." string at the
//! presentation boundary.

use tracing::{info, warn};

use crate::llm_client::ContentGenerator;

/// Prefix the page shows in place of generated markdown when the call fails.
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// Outcome of a single generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedContent {
    /// Markdown returned by the model, unmodified.
    Generated(String),
    /// Description of whatever went wrong during the call.
    Failed(String),
}

impl GeneratedContent {
    pub fn is_failure(&self) -> bool {
        matches!(self, GeneratedContent::Failed(_))
    }

    /// Collapses to the single display string.
    pub fn into_text(self) -> String {
        match self {
            GeneratedContent::Generated(text) => text,
            GeneratedContent::Failed(message) => format!("{ERROR_PREFIX}{message}"),
        }
    }
}

/// Sends `prompt` once. No retry, no caching.
pub async fn generate_content(generator: &dyn ContentGenerator, prompt: &str) -> GeneratedContent {
    match generator.generate(prompt).await {
        Ok(text) => {
            info!("Generated {} chars of content", text.len());
            GeneratedContent::Generated(text)
        }
        Err(e) => {
            warn!("Content generation failed: {e}");
            GeneratedContent::Failed(e.to_string())
        }
    }
}
