use crate::{graph::Graph, types::NodeId};
use std::collections::VecDeque;

/// Processes nodes one at a time from a FIFO queue seeded with the initial
/// frontier.
///
/// Output order is deterministic: breadth-first by in-degree, ties broken by
/// ascending node id, because nodes are scanned and enqueued in ascending
/// arena order at every discovery point.
pub(crate) fn run(graph: &mut Graph, seed: Vec<u32>) -> Vec<NodeId> {
    let mut queue: VecDeque<u32> = seed.into();
    let mut order = Vec::with_capacity(graph.len());
    while let Some(current) = queue.pop_front() {
        order.push(graph.node(current).id());
        // Retire every outgoing edge, front to back.
        while let Some(target) = graph.first_outgoing(current) {
            let removed = graph.remove_edge(current, target);
            assert!(removed, "serial::run: [1]");
            let node = graph.node(target);
            if node.in_degree() == 0 {
                assert!(node.try_admit(), "serial::run: [2]");
                queue.push_back(target);
            }
        }
    }
    order
}
