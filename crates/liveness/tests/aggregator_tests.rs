//! Monitoring pass tests

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use liveness::{
    Aggregator, HttpProbe, LifecycleState, LivenessError, Probe, ProbeOutcome, ProjectRef,
    ProjectStatus,
};
use tokio::sync::Semaphore;

/// Probe answering from a fixed table and recording every call
#[derive(Default)]
struct ScriptedProbe {
    answers: HashMap<String, ProbeOutcome>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedProbe {
    fn new(answers: &[(&str, ProbeOutcome)]) -> Self {
        Self {
            answers: answers.iter().map(|(url, o)| (url.to_string(), o.clone())).collect(),
            ..Self::default()
        }
    }

    fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.gate = Some(gate);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        } else {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.answers
            .get(url)
            .cloned()
            .unwrap_or_else(|| ProbeOutcome::transport("unknown host", 0))
    }
}

fn ok() -> ProbeOutcome {
    ProbeOutcome::responded(200, "OK", 5)
}

fn live(id: &str, url: &str) -> ProjectRef {
    ProjectRef::new(id, url, ProjectStatus::Live)
}

fn mixed_snapshot() -> Vec<ProjectRef> {
    vec![
        live("a", "https://a.example"),
        ProjectRef::new("b", "https://b.example", ProjectStatus::InProgress),
        live("c", "https://c.example"),
        ProjectRef::new("d", "https://d.example", ProjectStatus::ComingSoon),
        live("e", "https://e.example"),
    ]
}

#[tokio::test]
async fn test_status_map_keys_are_live_ids() {
    let probe = Arc::new(ScriptedProbe::new(&[
        ("https://a.example", ok()),
        ("https://c.example", ProbeOutcome::responded(500, "Internal Server Error", 5)),
        ("https://e.example", ProbeOutcome::timeout(5000, 5000)),
    ]));
    let aggregator = Aggregator::new(probe.clone());

    let report = aggregator.run_pass(&mixed_snapshot()).await.unwrap();

    let mut keys: Vec<_> = report.statuses.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["a", "c", "e"]);
    assert_eq!(report.statuses["a"], true);
    assert_eq!(report.statuses["c"], false);
    assert_eq!(report.statuses["e"], false);
    assert_eq!(report.reachable_count(), 1);
    assert_eq!(report.monitorable_count(), 3);
    assert!(report.outcomes["e"].is_timeout());
}

#[tokio::test]
async fn test_probes_run_sequentially_in_snapshot_order() {
    let probe = Arc::new(ScriptedProbe::new(&[]));
    let aggregator = Aggregator::new(probe.clone());

    aggregator.run_pass(&mixed_snapshot()).await.unwrap();

    assert_eq!(probe.calls(), ["https://a.example", "https://c.example", "https://e.example"]);
    assert_eq!(probe.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_snapshot_publishes_empty_map() {
    let aggregator = Aggregator::new(Arc::new(ScriptedProbe::new(&[])));
    let snapshot = vec![ProjectRef::new("x", "https://x", ProjectStatus::ComingSoon)];

    let report = aggregator.run_pass(&snapshot).await.unwrap();
    assert!(report.statuses.is_empty());
    assert_eq!(report.reachable_count(), 0);
    assert_eq!(report.monitorable_count(), 0);
    assert!(aggregator.latest().await.is_some());
}

#[tokio::test]
async fn test_repeated_passes_are_identical() {
    let probe = Arc::new(ScriptedProbe::new(&[
        ("https://a.example", ok()),
        ("https://c.example", ok()),
        ("https://e.example", ok()),
    ]));
    let aggregator = Aggregator::new(probe);
    let snapshot = mixed_snapshot();

    let first = aggregator.run_pass(&snapshot).await.unwrap();
    let second = aggregator.run_pass(&snapshot).await.unwrap();

    assert_eq!(first.statuses, second.statuses);
    assert_eq!(second.reachable_count(), 3);
}

#[tokio::test]
async fn test_second_pass_rejected_while_checking() {
    let gate = Arc::new(Semaphore::new(0));
    let probe = Arc::new(ScriptedProbe::new(&[("https://a.example", ok())]).gated(gate.clone()));
    let aggregator = Arc::new(Aggregator::new(probe.clone()));
    let snapshot = vec![live("a", "https://a.example"), live("b", "https://b.example")];

    assert_eq!(aggregator.state(), LifecycleState::Idle);
    let handle = aggregator.spawn_pass(snapshot.clone()).unwrap();
    assert_eq!(aggregator.state(), LifecycleState::Checking);

    let second = aggregator.run_pass(&snapshot).await;
    assert!(matches!(second, Err(LivenessError::PassInProgress)));
    assert!(matches!(aggregator.spawn_pass(snapshot.clone()), Err(LivenessError::PassInProgress)));

    // Nothing is published before the pass completes
    assert!(aggregator.latest().await.is_none());

    gate.add_permits(2);
    let report = handle.await.unwrap();
    assert_eq!(aggregator.state(), LifecycleState::Idle);
    assert_eq!(report.statuses, HashMap::from([("a".to_string(), true), ("b".to_string(), false)]));
    assert_eq!(probe.calls().len(), 2);

    gate.add_permits(2);
    assert!(aggregator.run_pass(&snapshot).await.is_ok());
}

#[tokio::test]
async fn test_observers_keep_previous_map_until_pass_completes() {
    // Two permits for the first pass, one for the first probe of the next
    let gate = Arc::new(Semaphore::new(3));
    let probe = Arc::new(ScriptedProbe::new(&[("https://a.example", ok())]).gated(gate.clone()));
    let aggregator = Arc::new(Aggregator::new(probe));
    let snapshot = vec![live("a", "https://a.example"), live("b", "https://b.example")];

    let first = aggregator.run_pass(&snapshot).await.unwrap();

    let handle = aggregator.spawn_pass(snapshot).unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(aggregator.is_checking());
    let visible = aggregator.latest().await.unwrap();
    assert!(Arc::ptr_eq(&visible, &first));

    gate.add_permits(1);
    let second = handle.await.unwrap();
    assert!(Arc::ptr_eq(&aggregator.latest().await.unwrap(), &second));
    assert!(!aggregator.is_checking());
}

#[tokio::test]
async fn test_dropped_handle_still_completes_pass() {
    let aggregator = Arc::new(Aggregator::new(Arc::new(ScriptedProbe::new(&[(
        "https://a.example",
        ok(),
    )]))));

    drop(aggregator.spawn_pass(vec![live("a", "https://a.example")]).unwrap());

    tokio::time::timeout(Duration::from_secs(1), async {
        while aggregator.is_checking() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    assert_eq!(aggregator.latest().await.unwrap().statuses["a"], true);
}

#[tokio::test]
async fn test_good_and_timed_out_upstreams() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let good = common::upstream(200, "OK").await;
    let (bad, _closed) = common::silent_upstream().await;
    let snapshot = vec![
        live("a", &good),
        live("b", &bad),
        ProjectRef::new("c", "https://x", ProjectStatus::ComingSoon),
    ];

    let probe = HttpProbe::new(Duration::from_millis(300)).unwrap();
    let aggregator = Aggregator::new(Arc::new(probe));
    let report = aggregator.run_pass(&snapshot).await.unwrap();

    assert_eq!(report.statuses, HashMap::from([("a".to_string(), true), ("b".to_string(), false)]));
    assert!(!report.statuses.contains_key("c"));
    assert_eq!(report.reachable_count(), 1);
    assert_eq!(report.monitorable_count(), 2);
    assert!(report.outcomes["b"].is_timeout());
    assert_eq!(aggregator.state(), LifecycleState::Idle);
}
