#![forbid(unsafe_code)]

//! Structural correctness oracles for combinatorial-algorithm API responses.
//!
//! Each oracle is a pure predicate over a decoded JSON payload. It checks the
//! *necessary* conditions of a correct answer (closure, feasibility bound,
//! monotonicity, non-negativity, cardinality) without recomputing the answer
//! itself — these are smoke/regression checks, not optimality certificates.
//!
//! Shared policy: a missing required field, a wrong field type, or an empty
//! collection where one is structurally required yields `false`. No oracle
//! panics on any input.
//!
//! | Oracle                   | Response family                     |
//! |--------------------------|-------------------------------------|
//! | [`reachability`]         | BFS/DFS reachability                |
//! | [`shortest_path`]        | weighted shortest path              |
//! | [`closed_tour`]          | cyclic tour (TSP)                   |
//! | [`spanning_tree`]        | minimum spanning tree               |
//! | [`sorted_by_key`]        | sorted collection                   |
//! | [`greedy_assignment`]    | greedy assignment                   |
//! | [`constrained_assignment`] | constrained multi-assignment      |
//! | [`capacity_selection`]   | capacity-bounded selection (DP)     |
//! | [`cardinality`]          | raw reference-data collections      |

use serde_json::Value;
use std::cmp::Ordering;

/// Slack added to the capacity bound to absorb floating-point drift in the
/// service's accumulated weights.
pub const CAPACITY_SLACK: f64 = 0.1;

/// Tolerance for the cross-algorithm spanning-tree weight agreement check.
pub const AGREEMENT_TOLERANCE: f64 = 0.01;

/// Validate a reachability response: `exists` must be a boolean; when it is
/// `true` a `path` array must be present. When `exists` is `false` the `path`
/// field may be absent entirely.
#[must_use]
pub fn reachability(payload: &Value) -> bool {
    let Some(exists) = payload.get("exists").and_then(Value::as_bool) else {
        return false;
    };
    if !exists {
        return true;
    }
    payload.get("path").and_then(Value::as_array).is_some()
}

/// Validate a weighted shortest-path response: a `path` of at least two nodes
/// and a strictly positive `totalWeight`.
#[must_use]
pub fn shortest_path(payload: &Value) -> bool {
    let Some(path) = payload.get("path").and_then(Value::as_array) else {
        return false;
    };
    if path.len() < 2 {
        return false;
    }
    positive_number(payload, "totalWeight")
}

/// Validate a cyclic-tour response: a `route` of at least three stops whose
/// first and last entries coincide (the tour returns to its origin) and a
/// strictly positive `totalDistance`.
#[must_use]
pub fn closed_tour(payload: &Value) -> bool {
    let Some(route) = payload.get("route").and_then(Value::as_array) else {
        return false;
    };
    if route.len() < 3 {
        return false;
    }
    match (route.first(), route.last()) {
        (Some(first), Some(last)) if first == last => {}
        _ => return false,
    }
    positive_number(payload, "totalDistance")
}

/// Validate a spanning-tree response: exactly `node_count - 1` edges and a
/// strictly positive `totalWeight`. The edge-count rule is the defining
/// structural property of a spanning tree over a connected graph.
#[must_use]
pub fn spanning_tree(payload: &Value, node_count: usize) -> bool {
    let Some(edges) = payload.get("edges").and_then(Value::as_array) else {
        return false;
    };
    if node_count == 0 || edges.len() != node_count - 1 {
        return false;
    }
    positive_number(payload, "totalWeight")
}

/// Validate a sorted-collection response: `items` must be a non-empty array
/// and every adjacent pair must satisfy `items[i][key] <= items[i + 1][key]`.
/// Keys may be numeric or string valued; an item missing the key, or a pair
/// with incomparable key types, fails.
#[must_use]
pub fn sorted_by_key(payload: &Value, key: &str) -> bool {
    let Some(items) = payload.get("items").and_then(Value::as_array) else {
        return false;
    };
    if items.is_empty() {
        return false;
    }
    items.windows(2).all(|pair| {
        let (Some(current), Some(next)) = (pair[0].get(key), pair[1].get(key)) else {
            return false;
        };
        matches!(
            compare_keys(current, next),
            Some(Ordering::Less | Ordering::Equal)
        )
    })
}

/// Validate a greedy-assignment response: an `assigned` array plus
/// non-negative `totalScore` and `totalCost`. Greedy feasibility itself is
/// not re-verified.
#[must_use]
pub fn greedy_assignment(payload: &Value) -> bool {
    if payload.get("assigned").and_then(Value::as_array).is_none() {
        return false;
    }
    non_negative_number(payload, "totalScore") && non_negative_number(payload, "totalCost")
}

/// Validate a constrained multi-assignment response: an `assignments` object
/// keyed by subject and a non-negative `totalScore`.
#[must_use]
pub fn constrained_assignment(payload: &Value) -> bool {
    if payload
        .get("assignments")
        .and_then(Value::as_object)
        .is_none()
    {
        return false;
    }
    non_negative_number(payload, "totalScore")
}

/// Validate a capacity-bounded selection response: a `selected` array, a
/// non-negative `totalPriority`, and a `totalWeight` that does not exceed the
/// requested capacity beyond [`CAPACITY_SLACK`].
#[must_use]
pub fn capacity_selection(payload: &Value, capacity: f64) -> bool {
    if payload.get("selected").and_then(Value::as_array).is_none() {
        return false;
    }
    let Some(total_weight) = payload.get("totalWeight").and_then(Value::as_f64) else {
        return false;
    };
    if total_weight > capacity + CAPACITY_SLACK {
        return false;
    }
    if payload.get("capacity").and_then(Value::as_f64).is_none() {
        return false;
    }
    non_negative_number(payload, "totalPriority")
}

/// Validate a raw reference-data collection: the payload must be an array of
/// exactly `expected` elements. These are fixed ground-truth counts that
/// catch dataset drift before any algorithm case runs.
#[must_use]
pub fn cardinality(payload: &Value, expected: usize) -> bool {
    payload
        .as_array()
        .is_some_and(|items| items.len() == expected)
}

/// Agreement check between two independently computed totals. Compares the
/// weights only, not the underlying edge sets: two distinct spanning trees of
/// the same graph legitimately share a minimum total weight.
#[must_use]
pub fn weights_agree(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

fn positive_number(payload: &Value, field: &str) -> bool {
    payload
        .get(field)
        .and_then(Value::as_f64)
        .is_some_and(|n| n > 0.0)
}

fn non_negative_number(payload: &Value, field: &str) -> bool {
    payload
        .get(field)
        .and_then(Value::as_f64)
        .is_some_and(|n| n >= 0.0)
}

fn compare_keys(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}
