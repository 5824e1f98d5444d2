//! End-to-end harness test over a loopback HTTP server serving canned JSON
//! for every catalog endpoint.
//!
//! Run: `cargo test -p routeprobe-harness --test harness_e2e`

#![forbid(unsafe_code)]

use routeprobe_harness::{
    catalog, declared_case_count, run_harness, Check, HarnessRun, HttpTransport, RunConfig,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A payload each oracle accepts, shaped like the live service's responses.
fn canned_payload(check: &Check) -> Value {
    match check {
        Check::Cardinality { expected } => json!(vec![json!({"id": 1}); *expected]),
        Check::Reachability => json!({"exists": true, "path": ["A", "C", "B"]}),
        Check::ShortestPath => json!({"path": ["H", "C", "A"], "totalWeight": 12.5}),
        Check::Tour => json!({"route": ["A", "B", "C", "A"], "totalDistance": 41.0}),
        Check::SpanningTree { node_count } => json!({
            "edges": vec![json!({"w": 1.0}); node_count - 1],
            "totalWeight": 120.5,
        }),
        Check::Sorted { key } => {
            let items: Vec<Value> = [1.0, 2.0, 5.0]
                .into_iter()
                .map(|n| {
                    let mut item = serde_json::Map::new();
                    item.insert((*key).to_owned(), json!(n));
                    Value::Object(item)
                })
                .collect();
            json!({ "items": items })
        }
        Check::GreedyAssignment => json!({
            "assigned": [{"id": "D1"}],
            "totalScore": 8.5,
            "totalCost": 300.0,
        }),
        Check::ConstrainedAssignment => json!({
            "assignments": {"P1": ["D3"], "P2": ["D7"]},
            "totalScore": 17.0,
        }),
        Check::CapacitySelection { capacity } => json!({
            "selected": [{"id": "D1"}],
            "totalPriority": 9.0,
            "totalWeight": capacity - 1.0,
            "capacity": capacity,
        }),
    }
}

fn canned_routes() -> HashMap<String, String> {
    let mut routes = HashMap::new();
    routes.insert(String::from("/ping"), String::from(r#"{"status":"ok"}"#));
    for suite in catalog() {
        for case in suite.cases {
            routes.insert(case.endpoint.clone(), canned_payload(&case.check).to_string());
        }
    }
    routes
}

fn handle_connection(mut stream: TcpStream, routes: &HashMap<String, String>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));

    // GET only; read until the end of the request headers.
    let mut raw = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                raw.extend_from_slice(&buf[..n]);
                if raw.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(_) => return,
        }
    }

    let request = String::from_utf8_lossy(&raw);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let response = match routes.get(path) {
        Some(body) => format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
        None => String::from(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        ),
    };
    let _ = stream.write_all(response.as_bytes());
}

/// Serve canned routes on an ephemeral port for the lifetime of the test.
fn spawn_server(routes: HashMap<String, String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle_connection(stream, &routes));
        }
    });
    format!("http://{addr}")
}

fn fast_config() -> RunConfig {
    RunConfig {
        probe_timeout: Duration::from_secs(2),
        case_timeout: Duration::from_secs(5),
    }
}

#[test]
fn full_battery_passes_against_canned_server() {
    let base_url = spawn_server(canned_routes());
    let transport = HttpTransport::new(base_url).expect("valid base url");

    let run = run_harness(&transport, &fast_config(), &mut |_| {});
    let report = run.report();

    assert!(matches!(run, HarnessRun::Completed { .. }));
    assert_eq!(report.total, declared_case_count(&catalog()));
    assert_eq!(
        report.failed,
        0,
        "unexpected failures: {:?}",
        report
            .results
            .iter()
            .filter(|record| !record.passed)
            .collect::<Vec<_>>()
    );
    assert!(run.all_passed());
}

#[test]
fn missing_endpoint_fails_its_case_only() {
    let mut routes = canned_routes();
    routes.remove("/assignments/constraints/backtracking");
    let base_url = spawn_server(routes);
    let transport = HttpTransport::new(base_url).expect("valid base url");

    let run = run_harness(&transport, &fast_config(), &mut |_| {});
    let report = run.report();

    assert_eq!(report.total, declared_case_count(&catalog()));
    assert_eq!(report.failed, 1);
    let record = report
        .results
        .iter()
        .find(|record| record.name == "backtracking multi-assignment")
        .expect("case must be recorded");
    assert!(!record.passed);
    assert!(record.detail.contains("404"), "detail: {}", record.detail);
}

#[test]
fn unreachable_server_aborts_the_run() {
    // Bind then drop to obtain a port with nothing listening on it.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let transport =
        HttpTransport::new(format!("http://127.0.0.1:{port}")).expect("valid base url");

    let run = run_harness(&transport, &fast_config(), &mut |_| {});
    assert!(matches!(run, HarnessRun::Aborted { .. }));
    assert_eq!(run.report().total, 0);
    assert!(!run.all_passed());
}

#[test]
fn non_json_200_body_fails_algorithm_case_but_not_liveness() {
    let mut routes = canned_routes();
    routes.insert(String::from("/ping"), String::from("pong"));
    routes.insert(
        String::from("/routes/shortest?from=H&to=A"),
        String::from("<html>not json</html>"),
    );
    let base_url = spawn_server(routes);
    let transport = HttpTransport::new(base_url).expect("valid base url");

    let run = run_harness(&transport, &fast_config(), &mut |_| {});
    let report = run.report();

    // Liveness only inspects the status, so the run still executes.
    assert!(matches!(run, HarnessRun::Completed { .. }));
    assert_eq!(report.failed, 1);
    let record = report
        .results
        .iter()
        .find(|record| record.name == "shortest H->A")
        .expect("case must be recorded");
    assert!(!record.passed);
}
