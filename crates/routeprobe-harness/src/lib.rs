#![forbid(unsafe_code)]

//! routeprobe: external correctness-oracle harness for a combinatorial-
//! algorithm API.
//!
//! The harness drives a remote service's algorithm endpoints, applies one
//! structural oracle per response family (see `routeprobe-oracles`), and
//! folds the per-case verdicts into a single report with a binary exit
//! verdict. It never recomputes a reference answer and never retries.
//!
//! ## Module layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | `transport` | [`Transport`] seam, [`Outcome`], blocking HTTP client |
//! | `catalog`   | fixed suites and [`CaseDescriptor`]s with parameters  |
//! | `runner`    | liveness gate and sequential suite execution          |
//! | `report`    | [`Recorder`], [`RunReport`], summary rendering        |

pub mod catalog;
pub mod report;
pub mod runner;
pub mod transport;

pub use catalog::{catalog, declared_case_count, CaseDescriptor, Check, DerivedCheck, Suite};
pub use report::{render_summary, CaseRecord, Recorder, RunReport};
pub use runner::{run_harness, HarnessRun, ProgressEvent, RunConfig};
pub use transport::{ConfigError, HttpTransport, Outcome, Transport};
