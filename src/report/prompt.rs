//! Prompt templates for all three pipeline stages.
//!
//! Pure functions of their inputs; nothing here touches the network.

use crate::types::{CritiqueEntry, DetailLevel, ModelOutput, ProviderId};
use std::collections::BTreeMap;

/// System prompt for first-pass generation.
pub const GENERATION_SYSTEM: &str = "You are an expert trend analyst, skilled at synthesizing \
     business and consumer insights in structured, concise form.";

/// System prompt for critique calls.
pub const CRITIQUE_SYSTEM: &str =
    "You are a rigorous business analyst and trend validation expert.";

/// System prompt for the referee fusion call.
pub const FUSION_SYSTEM: &str = "You are a professional research summary writer and must \
     synthesize multi-source AI research reports into one brief, unbiased summary. Cite sources \
     clearly as instructed.";

/// Build the research instruction sent to every provider.
pub fn research_prompt(topic: &str, detail_level: DetailLevel) -> String {
    match detail_level {
        DetailLevel::High => format!(
            r#"In-depth trend research and analysis for: "{topic}"
1. Give a synthesized summary of what this topic is and why it matters today.
2. List the top 10 mega trends related to this topic globally.
3. List the top consumer trends or implications for this topic.
4. Give at least 3 future scenarios or directions for this topic, with reasoning.
5. Provide supporting stats, innovations, and notable sources (if available).
Write in clear, business/professional language, numbered/structured, and avoid speculation."#
        ),
        DetailLevel::Low => format!(
            "Give a high-level summary and 3-5 key points about \"{topic}\" as a current global \
             trend. List top future directions, and highlight any notable stats or innovations. \
             Respond in clear, concise bullets."
        ),
    }
}

/// Wrap one provider's output in the critique instruction.
pub fn critique_prompt(subject_text: &str) -> String {
    format!(
        "Here is an AI-generated trend report. Critique for accuracy, completeness, and suggest \
         improvements or missing points:\n\n{subject_text}"
    )
}

/// Build the referee prompt embedding every generation and every critique,
/// each labeled by provider identity, followed by the synthesis rules.
pub fn fusion_prompt(
    topic: &str,
    generations: &BTreeMap<ProviderId, ModelOutput>,
    critiques: &[CritiqueEntry],
) -> String {
    let mut prompt = format!(
        r#"There are {count} AI-generated trend reports on "{topic}" and their cross-validations.
- Carefully read all responses and validations below.
- Your task: Synthesize one summary that contains **all important, validated information** from every model (but avoid duplicate facts).
- For every key point, **cite** the model(s) as sources, e.g. [OpenAI], [Perplexity], [Gemini].
- Clearly list numbers for facts and the corresponding model (e.g. "Fact X: ... [OpenAI, Gemini]").
- Be neutral if sources disagree or uncertain, and state disagreements explicitly.
- Do not invent claims that no source supports.
- Prefer structured, numbered output.
"#,
        count = generations.len(),
    );

    for (provider, output) in generations {
        prompt.push_str(&format!("\n---{provider} Main Output:\n{}\n", output.text));
    }

    prompt.push_str("\n---Validations:\n");
    for entry in critiques {
        prompt.push_str(&format!(
            "{} by {}:\n{}\n\n",
            entry.subject, entry.critic, entry.output.text
        ));
    }

    prompt
}
