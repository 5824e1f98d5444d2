#![forbid(unsafe_code)]

//! Result aggregation: an append-only record sequence folded into a final
//! report. Pure model — rendering and progress output live with the caller.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::{SystemTime, UNIX_EPOCH};

/// One executed case. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseRecord {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Totals plus the ordered record sequence for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<CaseRecord>,
    pub generated_unix_ms: u128,
}

impl RunReport {
    /// Percentage of passed cases; 0.0 for an empty (aborted) run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Accumulates case records in execution order.
#[derive(Debug, Default)]
pub struct Recorder {
    results: Vec<CaseRecord>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record and return a borrow of it for progress reporting.
    pub fn record(
        &mut self,
        name: impl Into<String>,
        passed: bool,
        detail: impl Into<String>,
    ) -> &CaseRecord {
        let index = self.results.len();
        self.results.push(CaseRecord {
            name: name.into(),
            passed,
            detail: detail.into(),
        });
        &self.results[index]
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|record| record.passed)
    }

    /// Fold the record sequence into the final report. Counting is
    /// commutative over records, so totals are order-independent.
    #[must_use]
    pub fn summarize(self) -> RunReport {
        let passed = self.results.iter().filter(|record| record.passed).count();
        let total = self.results.len();
        RunReport {
            total,
            passed,
            failed: total.saturating_sub(passed),
            results: self.results,
            generated_unix_ms: now_unix_ms(),
        }
    }
}

/// Human-readable totals block for the runner binary.
#[must_use]
pub fn render_summary(report: &RunReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Run Summary");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total cases:  {}", report.total);
    let _ = writeln!(out, "Passed:       {}", report.passed);
    let _ = writeln!(out, "Failed:       {}", report.failed);
    if report.total > 0 {
        let _ = writeln!(out, "Pass rate:    {:.1}%", report.pass_rate());
    }
    out
}

fn now_unix_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis())
}

#[cfg(test)]
mod tests {
    use super::{render_summary, Recorder, RunReport};

    #[test]
    fn totals_partition_into_passed_and_failed() {
        let mut recorder = Recorder::new();
        recorder.record("a", true, "");
        recorder.record("b", false, "HTTP 500");
        recorder.record("c", true, "");
        let report = recorder.summarize();
        assert_eq!(report.total, 3);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.total, report.passed + report.failed);
    }

    #[test]
    fn records_keep_execution_order() {
        let mut recorder = Recorder::new();
        for name in ["first", "second", "third"] {
            recorder.record(name, true, "");
        }
        let report = recorder.summarize();
        let names: Vec<&str> = report.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn all_passed_tracks_failures() {
        let mut recorder = Recorder::new();
        assert!(recorder.all_passed(), "empty recorder has no failures");
        recorder.record("a", true, "");
        assert!(recorder.all_passed());
        recorder.record("b", false, "");
        assert!(!recorder.all_passed());
    }

    #[test]
    fn pass_rate_is_zero_for_empty_report() {
        let report = Recorder::new().summarize();
        assert_eq!(report.total, 0);
        assert!((report.pass_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_rendering_includes_totals_and_rate() {
        let mut recorder = Recorder::new();
        recorder.record("a", true, "");
        recorder.record("b", true, "");
        let rendered = render_summary(&recorder.summarize());
        assert!(rendered.contains("Total cases:  2"));
        assert!(rendered.contains("Passed:       2"));
        assert!(rendered.contains("Failed:       0"));
        assert!(rendered.contains("Pass rate:    100.0%"));
    }

    #[test]
    fn report_round_trips_through_json() {
        let mut recorder = Recorder::new();
        recorder.record("a", true, "path length 3");
        let report = recorder.summarize();
        let json = serde_json::to_string(&report).expect("report must serialize");
        let parsed: RunReport = serde_json::from_str(&json).expect("report must round-trip");
        assert_eq!(parsed, report);
    }
}
