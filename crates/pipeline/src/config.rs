//! Pipeline configuration.

use v0mon_genai::GenAiConfig;

/// Settings the orchestrator is constructed with.
///
/// Loaded once at startup; nothing in the pipeline reads the environment.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Generator connection settings. `None` when no API credential is
    /// configured; cache hits still work, but any miss fails with a
    /// configuration error.
    pub genai: Option<GenAiConfig>,
}
