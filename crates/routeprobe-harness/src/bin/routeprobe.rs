#![forbid(unsafe_code)]

use routeprobe_harness::{
    render_summary, run_harness, HarnessRun, HttpTransport, ProgressEvent, RunConfig,
};
use std::process::ExitCode;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const BASE_URL_ENV: &str = "ROUTEPROBE_BASE_URL";

fn print_usage(program: &str) {
    eprintln!("Usage: {program}");
    eprintln!("Runs the fixed case battery against the algorithm service and");
    eprintln!("exits 0 iff every case passed.");
    eprintln!();
    eprintln!("  {BASE_URL_ENV}  override the service base URL (default {DEFAULT_BASE_URL})");
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv
        .first()
        .cloned()
        .unwrap_or_else(|| String::from("routeprobe"));

    // The run is non-interactive and flagless; anything beyond -h is an error.
    match argv.get(1).map(String::as_str) {
        None => {}
        Some("-h" | "--help") => {
            print_usage(&program);
            return ExitCode::SUCCESS;
        }
        Some(unknown) => {
            eprintln!("unrecognized argument `{unknown}`");
            print_usage(&program);
            return ExitCode::from(2);
        }
    }

    let base_url =
        std::env::var(BASE_URL_ENV).unwrap_or_else(|_| String::from(DEFAULT_BASE_URL));
    let transport = match HttpTransport::new(&base_url) {
        Ok(transport) => transport,
        Err(error) => {
            eprintln!("invalid {BASE_URL_ENV}: {error}");
            return ExitCode::from(2);
        }
    };

    let rule = "=".repeat(50);
    println!("{rule}");
    println!("routeprobe: algorithm service correctness battery");
    println!("{rule}");
    println!("Target: {base_url}");
    println!("Checking server connection...");

    let run = run_harness(&transport, &RunConfig::default(), &mut |event| {
        match event {
            ProgressEvent::LivenessPassed => println!("Server is up."),
            ProgressEvent::LivenessFailed => {
                eprintln!("Server is not reachable at {base_url}; aborting.");
            }
            ProgressEvent::SuiteStarted { name } => println!("\n=== {name} ==="),
            ProgressEvent::CaseFinished { index, record } => {
                let status = if record.passed { "PASS" } else { "FAIL" };
                println!("[{index:2}] {status} {}", record.name);
                if !record.detail.is_empty() {
                    println!("     {}", record.detail);
                }
            }
        }
    });

    println!();
    print!("{}", render_summary(run.report()));

    match run {
        HarnessRun::Completed { ref report } if report.failed == 0 => {
            println!("\nAll cases passed.");
            ExitCode::SUCCESS
        }
        HarnessRun::Completed { .. } => {
            println!("\nSome cases failed.");
            ExitCode::from(1)
        }
        HarnessRun::Aborted { .. } => ExitCode::from(1),
    }
}
