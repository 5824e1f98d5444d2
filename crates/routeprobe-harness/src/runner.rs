#![forbid(unsafe_code)]

//! Run controller: liveness gate, then every suite in declaration order, one
//! request in flight at a time. `Idle -> LivenessCheck -> {Aborted | Running}
//! -> Completed`; a failing case never skips later cases, only a dead server
//! aborts the run before any suite starts.

use crate::catalog::{catalog, CaseDescriptor, Check, DerivedCheck};
use crate::report::{CaseRecord, Recorder, RunReport};
use crate::transport::{Outcome, Transport};
use routeprobe_oracles::weights_agree;
use serde_json::Value;
use std::time::Duration;

/// Liveness probe endpoint; success iff the observed status is 200.
pub const PING_ENDPOINT: &str = "/ping";

/// Timeouts for the liveness probe and for normal case calls.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub probe_timeout: Duration,
    pub case_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(5),
            case_timeout: Duration::from_secs(30),
        }
    }
}

/// Observability side channel. Rendering lives with the caller; dropping
/// every event changes nothing about the run's semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    LivenessPassed,
    LivenessFailed,
    SuiteStarted { name: &'a str },
    CaseFinished { index: usize, record: &'a CaseRecord },
}

/// Terminal state of a run. An aborted run carries an empty report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarnessRun {
    Aborted { report: RunReport },
    Completed { report: RunReport },
}

impl HarnessRun {
    #[must_use]
    pub fn report(&self) -> &RunReport {
        match self {
            Self::Aborted { report } | Self::Completed { report } => report,
        }
    }

    /// Process-level verdict: only a completed run with zero failures counts.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        match self {
            Self::Aborted { .. } => false,
            Self::Completed { report } => report.failed == 0,
        }
    }
}

/// Execute the full battery against `transport`.
pub fn run_harness(
    transport: &dyn Transport,
    config: &RunConfig,
    progress: &mut dyn FnMut(ProgressEvent),
) -> HarnessRun {
    let probe = transport.fetch(PING_ENDPOINT, config.probe_timeout);
    if probe.status() != Some(200) {
        progress(ProgressEvent::LivenessFailed);
        return HarnessRun::Aborted {
            report: Recorder::new().summarize(),
        };
    }
    progress(ProgressEvent::LivenessPassed);

    let mut recorder = Recorder::new();
    let mut case_index = 0usize;

    for suite in catalog() {
        progress(ProgressEvent::SuiteStarted { name: suite.name });

        let mut captured_weights: Vec<f64> = Vec::new();
        for case in &suite.cases {
            let outcome = transport.fetch(&case.endpoint, config.case_timeout);
            let (passed, detail) = evaluate_case(case, &outcome);

            if passed {
                if let (Check::SpanningTree { .. }, Outcome::Success { payload, .. }) =
                    (&case.check, &outcome)
                {
                    if let Some(weight) = payload.get("totalWeight").and_then(Value::as_f64) {
                        captured_weights.push(weight);
                    }
                }
            }

            case_index += 1;
            let record = recorder.record(case.name, passed, detail);
            progress(ProgressEvent::CaseFinished {
                index: case_index,
                record,
            });
        }

        if let Some(DerivedCheck::WeightAgreement { name, tolerance }) = suite.derived {
            let (passed, detail) = agreement_result(&captured_weights, tolerance);
            case_index += 1;
            let record = recorder.record(name, passed, detail);
            progress(ProgressEvent::CaseFinished {
                index: case_index,
                record,
            });
        }
    }

    HarnessRun::Completed {
        report: recorder.summarize(),
    }
}

/// The agreement case is always recorded, even when one of the underlying
/// spanning-tree calls failed, so the declared case count stays fixed.
fn agreement_result(weights: &[f64], tolerance: f64) -> (bool, String) {
    match weights {
        [first, second] if weights_agree(*first, *second, tolerance) => {
            (true, format!("both algorithms report {first}"))
        }
        [first, second] => (false, format!("weights diverge: {first} vs {second}")),
        _ => (
            false,
            format!("captured {} of 2 spanning-tree weights", weights.len()),
        ),
    }
}

fn evaluate_case(case: &CaseDescriptor, outcome: &Outcome) -> (bool, String) {
    match outcome {
        Outcome::Transport { reason } => (false, format!("transport failure: {reason}")),
        Outcome::Failure { status } => (false, format!("HTTP {status}")),
        Outcome::Success { status, payload } => {
            if case.check.validate(payload) {
                (true, describe(&case.check, payload))
            } else {
                (
                    false,
                    format!("HTTP {status} with structurally invalid payload"),
                )
            }
        }
    }
}

/// Short human summary of a payload that already passed its oracle. Access
/// stays defensive anyway: detail extraction must never panic.
fn describe(check: &Check, payload: &Value) -> String {
    match check {
        Check::Cardinality { expected } => format!("{expected} elements"),
        Check::Reachability => match payload.get("path").and_then(Value::as_array) {
            Some(path) => format!("path length {}", path.len()),
            None => String::from("no path"),
        },
        Check::ShortestPath => {
            let weight = number_field(payload, "totalWeight");
            format!("total weight {weight} via {}", joined_nodes(payload, "path"))
        }
        Check::Tour => {
            let distance = number_field(payload, "totalDistance");
            format!("distance {distance}: {}", joined_nodes(payload, "route"))
        }
        Check::SpanningTree { .. } => {
            let weight = number_field(payload, "totalWeight");
            let edges = array_len(payload, "edges");
            format!("total weight {weight}, {edges} edges")
        }
        Check::Sorted { key } => {
            let items = payload
                .get("items")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let first = items.first().and_then(|item| item.get(*key));
            let last = items.last().and_then(|item| item.get(*key));
            match (first, last) {
                (Some(first), Some(last)) => {
                    format!("{} items, {key} range {first}..{last}", items.len())
                }
                _ => format!("{} items", items.len()),
            }
        }
        Check::GreedyAssignment => format!(
            "{} assigned, score {}, cost {}",
            array_len(payload, "assigned"),
            number_field(payload, "totalScore"),
            number_field(payload, "totalCost"),
        ),
        Check::ConstrainedAssignment => {
            let subjects = payload
                .get("assignments")
                .and_then(Value::as_object)
                .map_or(0, serde_json::Map::len);
            format!(
                "{subjects} subjects matched, score {}",
                number_field(payload, "totalScore")
            )
        }
        Check::CapacitySelection { capacity } => format!(
            "{} selected, priority {}, weight {} of {capacity}",
            array_len(payload, "selected"),
            number_field(payload, "totalPriority"),
            number_field(payload, "totalWeight"),
        ),
    }
}

fn number_field(payload: &Value, field: &str) -> f64 {
    payload.get(field).and_then(Value::as_f64).unwrap_or(f64::NAN)
}

fn array_len(payload: &Value, field: &str) -> usize {
    payload
        .get(field)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn joined_nodes(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_array)
        .map(|nodes| {
            nodes
                .iter()
                .map(|node| node.as_str().map_or_else(|| node.to_string(), str::to_owned))
                .collect::<Vec<String>>()
                .join(" -> ")
        })
        .unwrap_or_default()
}
