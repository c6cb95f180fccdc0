use crate::{
    executor::{parallel, serial},
    graph::Graph,
    types::NodeId,
};
use thiserror::Error;
use tracing::debug;

/// Executor selection for [`topological_sort`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Single-threaded FIFO processing with a deterministic output order.
    Serial,
    /// Round-synchronized parallel processing; the order of nodes inside a
    /// round is unspecified.
    Parallel,
}

/// Failure conditions reported at the driver boundary.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SortError {
    /// An input edge references an id outside `1..=num_nodes`. Raised
    /// during construction, before any sort work begins.
    #[error("edge ({src}, {dst}) references ids outside 1..={num_nodes}")]
    InvalidEdge {
        /// Source id as given in the input.
        src: u32,
        /// Destination id as given in the input.
        dst: u32,
        /// Declared node count.
        num_nodes: u32,
    },
    /// At least one node never reached zero in-degree.
    #[error("graph contains cycle(s); {} node(s) never became ready", unprocessed.len())]
    CycleDetected {
        /// Ids of the nodes that were never admitted into a frontier: the
        /// nodes on or downstream of a cycle, in ascending order.
        unprocessed: Vec<NodeId>,
    },
    /// A node was observed entering a frontier twice. This is an
    /// internal-consistency failure, not a property of the input; the sort
    /// is aborted.
    #[error("node {node} was admitted into a frontier twice")]
    ConcurrencyInvariantViolation {
        /// The doubly-admitted node.
        node: NodeId,
    },
}

/// Topologically sorts a graph of `num_nodes` nodes (ids `1..=num_nodes`)
/// and the given `(source, destination)` edges using Kahn's algorithm,
/// returning the node ids in an order that respects every edge's
/// precedence.
///
/// [`Mode::Serial`] yields the canonical order (ties broken by ascending
/// id); [`Mode::Parallel`] yields some valid order, with only the grouping
/// into rounds being deterministic.
///
/// # Errors
///
/// - [`SortError::InvalidEdge`] if an edge references an id outside
///   `1..=num_nodes`.
/// - [`SortError::CycleDetected`] if some nodes can never become ready; the
///   error carries their ids.
/// - [`SortError::ConcurrencyInvariantViolation`] on an internal
///   double-admission. Impossible if there are no bugs in the code.
pub fn topological_sort(
    num_nodes: u32,
    edges: &[(u32, u32)],
    mode: Mode,
) -> Result<Vec<NodeId>, SortError> {
    let mut graph = Graph::build(num_nodes, edges)?;
    let seed = graph.collect_ready();
    debug!(
        "built graph: {num_nodes} node(s), {} edge(s), {} initially ready",
        edges.len(),
        seed.len()
    );
    let order = match mode {
        Mode::Serial => serial::run(&mut graph, seed),
        Mode::Parallel => {
            #[cfg(not(feature = "loom"))]
            let order = parallel::run(&graph, seed)?;
            #[cfg(feature = "loom")]
            let order = {
                let (returned, result) = parallel::run(graph, seed);
                graph = returned;
                result?
            };
            order
        }
    };
    let unprocessed = graph.unprocessed();
    if !unprocessed.is_empty() {
        return Err(SortError::CycleDetected { unprocessed });
    }
    assert_eq!(order.len(), graph.len(), "topological_sort: [1]");
    debug!("sorted {} node(s) in {mode:?} mode", order.len());
    Ok(order)
}
