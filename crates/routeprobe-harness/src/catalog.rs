#![forbid(unsafe_code)]

//! Fixed case catalog: every suite, case, and oracle parameter the harness
//! runs, in declaration order. The catalog is built once at startup and never
//! mutated; the run controller consumes it verbatim.

use routeprobe_oracles as oracles;
use serde_json::Value;

/// Node count of the service's fixed network graph. A spanning tree over it
/// must carry exactly one fewer edge.
pub const SPANNING_TREE_NODE_COUNT: usize = 15;

/// Expected cardinalities of the raw reference-data collections. These are
/// ground-truth dataset constants, not algorithmic properties.
pub const COLLECTION_A_COUNT: usize = 15;
pub const COLLECTION_B_COUNT: usize = 40;
pub const COLLECTION_C_COUNT: usize = 15;

/// Oracle reference plus its side parameters for one case.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    Cardinality { expected: usize },
    Reachability,
    ShortestPath,
    Tour,
    SpanningTree { node_count: usize },
    Sorted { key: &'static str },
    GreedyAssignment,
    ConstrainedAssignment,
    CapacitySelection { capacity: f64 },
}

impl Check {
    /// Apply the matching oracle predicate to a decoded payload.
    #[must_use]
    pub fn validate(&self, payload: &Value) -> bool {
        match self {
            Self::Cardinality { expected } => oracles::cardinality(payload, *expected),
            Self::Reachability => oracles::reachability(payload),
            Self::ShortestPath => oracles::shortest_path(payload),
            Self::Tour => oracles::closed_tour(payload),
            Self::SpanningTree { node_count } => oracles::spanning_tree(payload, *node_count),
            Self::Sorted { key } => oracles::sorted_by_key(payload, key),
            Self::GreedyAssignment => oracles::greedy_assignment(payload),
            Self::ConstrainedAssignment => oracles::constrained_assignment(payload),
            Self::CapacitySelection { capacity } => {
                oracles::capacity_selection(payload, *capacity)
            }
        }
    }
}

/// One named endpoint call with its oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseDescriptor {
    pub name: &'static str,
    pub endpoint: String,
    pub check: Check,
}

/// Suite-level check spanning multiple case responses. The weight agreement
/// compares the totals of two independently computed spanning trees; it is
/// the one place two computations are checked against each other instead of
/// against a structural rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedCheck {
    WeightAgreement {
        name: &'static str,
        tolerance: f64,
    },
}

/// A named group of cases for one algorithm family.
#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    pub name: &'static str,
    pub cases: Vec<CaseDescriptor>,
    pub derived: Option<DerivedCheck>,
}

impl Suite {
    fn new(name: &'static str, cases: Vec<CaseDescriptor>) -> Self {
        Self {
            name,
            cases,
            derived: None,
        }
    }
}

fn case(name: &'static str, endpoint: impl Into<String>, check: Check) -> CaseDescriptor {
    CaseDescriptor {
        name,
        endpoint: endpoint.into(),
        check,
    }
}

fn reachable(name: &'static str, from: &str, to: &str, method: &str) -> CaseDescriptor {
    case(
        name,
        format!("/graph/reachable?from={from}&to={to}&method={method}"),
        Check::Reachability,
    )
}

/// Build the full fixed battery, suites in execution order.
#[must_use]
pub fn catalog() -> Vec<Suite> {
    vec![
        Suite::new(
            "data-integrity",
            vec![
                case(
                    "collectionA cardinality",
                    "/collectionA",
                    Check::Cardinality {
                        expected: COLLECTION_A_COUNT,
                    },
                ),
                case(
                    "collectionB cardinality",
                    "/collectionB",
                    Check::Cardinality {
                        expected: COLLECTION_B_COUNT,
                    },
                ),
                case(
                    "collectionC cardinality",
                    "/collectionC",
                    Check::Cardinality {
                        expected: COLLECTION_C_COUNT,
                    },
                ),
            ],
        ),
        Suite::new(
            "reachability",
            vec![
                reachable("bfs A->B", "A", "B", "bfs"),
                reachable("bfs A->O", "A", "O", "bfs"),
                reachable("bfs E->M", "E", "M", "bfs"),
                reachable("dfs A->B", "A", "B", "dfs"),
                reachable("dfs I->K", "I", "K", "dfs"),
            ],
        ),
        Suite::new(
            "shortest-path",
            vec![
                case(
                    "shortest H->A",
                    "/routes/shortest?from=H&to=A",
                    Check::ShortestPath,
                ),
                case(
                    "shortest A->M",
                    "/routes/shortest?from=A&to=M",
                    Check::ShortestPath,
                ),
                case(
                    "shortest E->O",
                    "/routes/shortest?from=E&to=O",
                    Check::ShortestPath,
                ),
            ],
        ),
        Suite::new(
            "tour",
            vec![
                case("tsp 4 nodes", "/routes/tsp/bnb?nodes=A,B,C,H", Check::Tour),
                case(
                    "tsp 5 nodes",
                    "/routes/tsp/bnb?nodes=A,D,E,I,H",
                    Check::Tour,
                ),
                case(
                    "tsp 7 nodes",
                    "/routes/tsp/bnb?nodes=A,B,C,G,L,M,H",
                    Check::Tour,
                ),
            ],
        ),
        Suite {
            name: "spanning-tree",
            cases: vec![
                case(
                    "mst kruskal",
                    "/network/mst?algorithm=kruskal",
                    Check::SpanningTree {
                        node_count: SPANNING_TREE_NODE_COUNT,
                    },
                ),
                case(
                    "mst prim",
                    "/network/mst?algorithm=prim",
                    Check::SpanningTree {
                        node_count: SPANNING_TREE_NODE_COUNT,
                    },
                ),
            ],
            derived: Some(DerivedCheck::WeightAgreement {
                name: "mst weight agreement",
                tolerance: oracles::AGREEMENT_TOLERANCE,
            }),
        },
        Suite::new(
            "sorting",
            vec![
                case(
                    "sort priority mergesort",
                    "/items/sort?criteria=priority&algorithm=mergesort",
                    Check::Sorted { key: "priority" },
                ),
                case(
                    "sort priority quicksort",
                    "/items/sort?criteria=priority&algorithm=quicksort",
                    Check::Sorted { key: "priority" },
                ),
                case(
                    "sort age mergesort",
                    "/items/sort?criteria=age&algorithm=mergesort",
                    Check::Sorted { key: "age" },
                ),
                case(
                    "sort weight quicksort",
                    "/items/sort?criteria=weight&algorithm=quicksort",
                    Check::Sorted { key: "weight" },
                ),
            ],
        ),
        Suite::new(
            "greedy",
            vec![
                case(
                    "greedy P9",
                    "/assignments/greedy?subjectId=P9",
                    Check::GreedyAssignment,
                ),
                case(
                    "greedy P10",
                    "/assignments/greedy?subjectId=P10",
                    Check::GreedyAssignment,
                ),
                case(
                    "greedy P1",
                    "/assignments/greedy?subjectId=P1",
                    Check::GreedyAssignment,
                ),
            ],
        ),
        Suite::new(
            "constrained-assignment",
            vec![case(
                "backtracking multi-assignment",
                "/assignments/constraints/backtracking",
                Check::ConstrainedAssignment,
            )],
        ),
        Suite::new(
            "capacity-selection",
            vec![
                case(
                    "knapsack 30",
                    "/capacity/optimal-dp?capacity=30",
                    Check::CapacitySelection { capacity: 30.0 },
                ),
                case(
                    "knapsack 60",
                    "/capacity/optimal-dp?capacity=60",
                    Check::CapacitySelection { capacity: 60.0 },
                ),
                case(
                    "knapsack 100",
                    "/capacity/optimal-dp?capacity=100",
                    Check::CapacitySelection { capacity: 100.0 },
                ),
                case(
                    "knapsack 500",
                    "/capacity/optimal-dp?capacity=500",
                    Check::CapacitySelection { capacity: 500.0 },
                ),
            ],
        ),
    ]
}

/// Number of case records a complete (non-aborted) run produces, derived
/// checks included.
#[must_use]
pub fn declared_case_count(suites: &[Suite]) -> usize {
    suites
        .iter()
        .map(|suite| suite.cases.len() + usize::from(suite.derived.is_some()))
        .sum()
}
