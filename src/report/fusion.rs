//! Referee synthesis: merge all generations and critiques into one summary.

use crate::llm::{CallParams, ProviderClient};
use crate::report::prompt;
use crate::types::{CritiqueEntry, ModelOutput, ProviderId};
use std::collections::BTreeMap;

/// Placeholder substituted when the referee call fails.
pub const FUSION_PLACEHOLDER: &str = "Error generating unified summary.";

/// Run the single fusion call against the referee provider.
///
/// Runs even when every upstream result is a placeholder; the referee is
/// simply handed the placeholder texts. A referee failure degrades the
/// summary but never the composite response around it.
pub async fn fuse(
    referee: &dyn ProviderClient,
    topic: &str,
    generations: &BTreeMap<ProviderId, ModelOutput>,
    critiques: &[CritiqueEntry],
    params: &CallParams,
) -> ModelOutput {
    let prompt = prompt::fusion_prompt(topic, generations, critiques);

    match referee
        .generate(prompt::FUSION_SYSTEM, &prompt, params)
        .await
    {
        Ok(text) => ModelOutput::genuine(text),
        Err(e) => {
            tracing::warn!(referee = %referee.id(), error = %e, "fusion call degraded");
            ModelOutput::placeholder(FUSION_PLACEHOLDER)
        }
    }
}
