use crate::llm::{client, CallParams, ProviderClient};
use crate::report::{critique, fusion, prompt};
use crate::types::{AppError, DetailLevel, FusedReport, ModelOutput, ProviderId, Result};
use crate::utils::config::{Config, TuningConfig};
use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

/// Longest accepted topic, in characters.
pub const MAX_TOPIC_LEN: usize = 80;

/// Drives one report request end to end: parallel generation, parallel
/// cross-validation over every ordered provider pair, then a single fusion
/// call by the fixed referee.
pub struct ReportOrchestrator {
    clients: Vec<Arc<dyn ProviderClient>>,
    referee: ProviderId,
    tuning: TuningConfig,
}

impl ReportOrchestrator {
    /// Build an orchestrator over the given clients. The referee must be one
    /// of them and ids must be distinct.
    pub fn new(
        clients: Vec<Arc<dyn ProviderClient>>,
        referee: ProviderId,
        tuning: TuningConfig,
    ) -> Result<Self> {
        if clients.len() < 2 {
            return Err(AppError::Config(
                "cross-validation needs at least two providers".to_string(),
            ));
        }

        for (i, a) in clients.iter().enumerate() {
            for b in &clients[i + 1..] {
                if a.id() == b.id() {
                    return Err(AppError::Config(format!(
                        "duplicate provider client: {}",
                        a.id()
                    )));
                }
            }
        }

        if !clients.iter().any(|c| c.id() == referee) {
            return Err(AppError::Config(format!(
                "referee {referee} is not among the configured providers"
            )));
        }

        Ok(Self {
            clients,
            referee,
            tuning,
        })
    }

    /// Build the production orchestrator: the three real provider clients,
    /// with OpenAI as the fixed referee.
    pub fn from_config(config: &Config) -> Result<Self> {
        let clients = client::build_clients(&config.providers)?;
        Self::new(clients, ProviderId::OpenAi, config.tuning.clone())
    }

    /// Run the full pipeline for one topic.
    ///
    /// Provider failures degrade into placeholders stage by stage; the only
    /// error this returns is invalid input.
    pub async fn run(&self, topic: &str, detail_level: DetailLevel) -> Result<FusedReport> {
        let topic = validate_topic(topic)?;
        let start = Instant::now();

        tracing::info!(topic = %topic, ?detail_level, "starting report pipeline");

        let generations = self.generate_all(&topic, detail_level).await;
        let critiques = self.critique_all(&generations).await;

        let fusion_params = CallParams::fusion(&self.tuning);
        let referee = self
            .clients
            .iter()
            .find(|c| c.id() == self.referee)
            .ok_or_else(|| AppError::Internal("referee client missing".to_string()))?;
        let summary = fusion::fuse(
            referee.as_ref(),
            &topic,
            &generations,
            &critiques,
            &fusion_params,
        )
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            duration_ms,
            degraded_generations = generations.values().filter(|g| g.degraded).count(),
            degraded_critiques = critiques.iter().filter(|c| c.output.degraded).count(),
            "report pipeline finished"
        );

        Ok(FusedReport {
            summary,
            generations,
            critiques,
            duration_ms,
        })
    }

    /// Fan out the generation prompt to every provider and join all results,
    /// substituting a placeholder for each failed call.
    async fn generate_all(
        &self,
        topic: &str,
        detail_level: DetailLevel,
    ) -> BTreeMap<ProviderId, ModelOutput> {
        let research_prompt = prompt::research_prompt(topic, detail_level);
        let params = CallParams::generation(&self.tuning);

        let calls = self.clients.iter().map(|client| {
            let research_prompt = &research_prompt;
            let params = &params;
            async move {
                let output = match client
                    .generate(prompt::GENERATION_SYSTEM, research_prompt, params)
                    .await
                {
                    Ok(text) => ModelOutput::genuine(text),
                    Err(e) => {
                        tracing::warn!(provider = %client.id(), error = %e, "generation call degraded");
                        ModelOutput::placeholder(format!("(no output from {})", client.id()))
                    }
                };
                (client.id(), output)
            }
        });

        join_all(calls).await.into_iter().collect()
    }

    /// Critique every generation with every other provider, concurrently.
    async fn critique_all(
        &self,
        generations: &BTreeMap<ProviderId, ModelOutput>,
    ) -> Vec<crate::types::CritiqueEntry> {
        let params = CallParams::critique(&self.tuning);

        let calls = self.clients.iter().flat_map(|subject| {
            let params = &params;
            self.clients
                .iter()
                .filter(move |critic| critic.id() != subject.id())
                .filter_map(move |critic| {
                    let subject_text = &generations.get(&subject.id())?.text;
                    Some(critique::critique(
                        critic.as_ref(),
                        subject.id(),
                        subject_text,
                        params,
                    ))
                })
        });

        join_all(calls).await
    }
}

fn validate_topic(topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::InvalidInput("topic must not be empty".to_string()));
    }
    if topic.chars().count() > MAX_TOPIC_LEN {
        return Err(AppError::InvalidInput(format!(
            "topic must be at most {MAX_TOPIC_LEN} characters"
        )));
    }
    Ok(topic.to_string())
}
