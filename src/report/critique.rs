//! Cross-validation: one provider critiques another provider's generation.

use crate::llm::{CallParams, ProviderClient};
use crate::report::prompt;
use crate::types::{CritiqueEntry, ModelOutput, ProviderId};

/// Placeholder substituted when a critique call fails.
pub fn placeholder_for(critic: ProviderId) -> String {
    format!("(validation unavailable from {critic})")
}

/// Ask `critic` to critique `subject`'s generation text.
///
/// A failure is scoped to this one (subject, critic) pair: it is logged and
/// converted into a placeholder entry, never propagated.
pub async fn critique(
    critic: &dyn ProviderClient,
    subject: ProviderId,
    subject_text: &str,
    params: &CallParams,
) -> CritiqueEntry {
    let prompt = prompt::critique_prompt(subject_text);

    let output = match critic
        .generate(prompt::CRITIQUE_SYSTEM, &prompt, params)
        .await
    {
        Ok(text) => ModelOutput::genuine(text),
        Err(e) => {
            tracing::warn!(
                subject = %subject,
                critic = %critic.id(),
                error = %e,
                "critique call degraded"
            );
            ModelOutput::placeholder(placeholder_for(critic.id()))
        }
    };

    CritiqueEntry {
        subject,
        critic: critic.id(),
        output,
    }
}
