//! Shared test doubles for the report pipeline.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use trendfuse::{
    AppError, CallParams, ProviderClient, ProviderId, ReportOrchestrator, Result, TuningConfig,
};

/// One recorded provider call: (system prompt, user prompt, params).
pub type RecordedCall = (String, String, CallParams);

/// Deterministic in-memory provider. Returns a fixed response (or a fixed
/// failure) and records every call it receives.
pub struct MockProvider {
    id: ProviderId,
    response: String,
    fail: bool,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    pub fn new(id: ProviderId, response: &str) -> Self {
        Self {
            id,
            response: response.to_string(),
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(id: ProviderId) -> Self {
        Self {
            id,
            response: String::new(),
            fail: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded calls, usable after the provider is moved
    /// into the orchestrator.
    pub fn call_log(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    async fn generate(&self, system: &str, prompt: &str, params: &CallParams) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string(), *params));

        if self.fail {
            Err(AppError::Provider(format!("mock {} failure", self.id)))
        } else {
            Ok(self.response.clone())
        }
    }

    fn id(&self) -> ProviderId {
        self.id
    }
}

/// Three healthy mocks answering with fixed per-provider strings.
pub fn healthy_clients() -> Vec<Arc<dyn ProviderClient>> {
    vec![
        Arc::new(MockProvider::new(ProviderId::OpenAi, "EV-A")),
        Arc::new(MockProvider::new(ProviderId::Perplexity, "EV-B")),
        Arc::new(MockProvider::new(ProviderId::Gemini, "EV-C")),
    ]
}

/// Orchestrator over the given clients with default tuning and the OpenAI
/// referee, mirroring the production wiring.
pub fn orchestrator_with(clients: Vec<Arc<dyn ProviderClient>>) -> ReportOrchestrator {
    ReportOrchestrator::new(clients, ProviderId::OpenAi, TuningConfig::default())
        .expect("valid test orchestrator")
}
