//! Probe doubles for route tests

use std::sync::{Arc, Mutex};

use liveness::{Probe, ProbeOutcome};
use tokio::sync::Semaphore;

pub struct StubProbe {
    answer: ProbeOutcome,
    calls: Arc<Mutex<Vec<String>>>,
    gate: Option<Arc<Semaphore>>,
}

impl StubProbe {
    pub fn answering(answer: ProbeOutcome) -> Self {
        Self { answer, calls: Arc::default(), gate: None }
    }

    /// Each probe waits for one permit of `gate`
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl Probe for StubProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.answer.clone()
    }
}
