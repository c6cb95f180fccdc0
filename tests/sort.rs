#![allow(missing_docs)]
#![cfg(not(feature = "loom"))]

use ktopo::{Mode, NodeId, SortError, topological_sort};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn nid(id: u32) -> NodeId {
    NodeId::new(id).unwrap()
}

fn ids(raw: &[u32]) -> Vec<NodeId> {
    raw.iter().copied().map(nid).collect()
}

/// Asserts that `order` is a permutation of `1..=num_nodes` respecting
/// every edge's precedence.
fn assert_valid_order(num_nodes: u32, edges: &[(u32, u32)], order: &[NodeId]) {
    let mut sorted: Vec<u32> = order.iter().map(|id| id.get()).collect();
    sorted.sort_unstable();
    assert_eq!(sorted, (1..=num_nodes).collect::<Vec<_>>());

    let positions: HashMap<NodeId, usize> = order
        .iter()
        .enumerate()
        .map(|(pos, &id)| (id, pos))
        .collect();
    for &(src, dst) in edges {
        assert!(
            positions[&nid(src)] < positions[&nid(dst)],
            "edge ({src}, {dst}) violated by order {order:?}"
        );
    }
}

#[test]
fn chain_is_sorted_in_both_modes() {
    let edges = [(1, 2), (2, 3)];
    for mode in [Mode::Serial, Mode::Parallel] {
        let order = topological_sort(3, &edges, mode).unwrap();
        assert_eq!(order, ids(&[1, 2, 3]));
    }
}

#[test]
fn serial_breaks_ties_by_ascending_id() {
    let order = topological_sort(4, &[(1, 3), (2, 3), (3, 4)], Mode::Serial).unwrap();
    assert_eq!(order, ids(&[1, 2, 3, 4]));
}

#[test]
fn serial_is_deterministic() {
    let edges = [(1, 4), (2, 4), (3, 5), (4, 6), (5, 6)];
    let first = topological_sort(6, &edges, Mode::Serial).unwrap();
    for _ in 0..10 {
        assert_eq!(topological_sort(6, &edges, Mode::Serial).unwrap(), first);
    }
}

#[test]
fn parallel_diamond_respects_round_boundaries() {
    let edges = [(1, 2), (1, 3), (2, 4), (3, 4)];
    // Round membership is deterministic: {1}, then {2, 3}, then {4}. Only
    // the order inside the middle round may vary.
    for _ in 0..10 {
        let order = topological_sort(4, &edges, Mode::Parallel).unwrap();
        assert_valid_order(4, &edges, &order);
        assert_eq!(order[0], nid(1));
        assert_eq!(order[3], nid(4));
        let middle = [order[1], order[2]];
        assert!(middle.contains(&nid(2)) && middle.contains(&nid(3)));
    }
}

#[test]
fn parallel_output_is_a_valid_topological_order() {
    let edges = [
        (1, 4),
        (2, 4),
        (3, 5),
        (4, 6),
        (5, 6),
        (6, 7),
        (7, 8),
        (7, 9),
        (8, 10),
        (9, 10),
    ];
    for _ in 0..20 {
        let order = topological_sort(10, &edges, Mode::Parallel).unwrap();
        assert_valid_order(10, &edges, &order);
    }
}

#[test]
fn both_modes_agree_on_duplicate_edges() {
    let edges = [(1, 2), (1, 2)];
    for mode in [Mode::Serial, Mode::Parallel] {
        let order = topological_sort(2, &edges, mode).unwrap();
        assert_eq!(order, ids(&[1, 2]));
    }
}

#[test]
fn disconnected_components_are_all_covered() {
    let edges = [(1, 2), (3, 4)];
    for mode in [Mode::Serial, Mode::Parallel] {
        let order = topological_sort(5, &edges, mode).unwrap();
        assert_valid_order(5, &edges, &order);
    }
}

#[test]
fn empty_graph_yields_empty_order() {
    for mode in [Mode::Serial, Mode::Parallel] {
        assert_eq!(topological_sort(0, &[], mode).unwrap(), vec![]);
    }
}

#[test]
fn two_cycle_reports_both_nodes() {
    for mode in [Mode::Serial, Mode::Parallel] {
        let err = topological_sort(2, &[(1, 2), (2, 1)], mode).unwrap_err();
        assert_eq!(
            err,
            SortError::CycleDetected {
                unprocessed: ids(&[1, 2])
            }
        );
    }
}

#[test]
fn nodes_downstream_of_a_cycle_are_reported_too() {
    // 1 -> 2 <-> 3 -> 4: node 1 is processed, everything behind the cycle
    // is not.
    let edges = [(1, 2), (2, 3), (3, 2), (3, 4)];
    for mode in [Mode::Serial, Mode::Parallel] {
        let err = topological_sort(4, &edges, mode).unwrap_err();
        assert_eq!(
            err,
            SortError::CycleDetected {
                unprocessed: ids(&[2, 3, 4])
            }
        );
    }
}

#[test]
fn self_loop_is_a_cycle() {
    let err = topological_sort(1, &[(1, 1)], Mode::Serial).unwrap_err();
    assert_eq!(
        err,
        SortError::CycleDetected {
            unprocessed: ids(&[1])
        }
    );
}

#[test]
fn out_of_range_edges_are_rejected_before_sorting() {
    for edge in [(0, 1), (1, 0), (1, 4), (4, 1)] {
        let err = topological_sort(3, &[edge], Mode::Serial).unwrap_err();
        assert_eq!(
            err,
            SortError::InvalidEdge {
                src: edge.0,
                dst: edge.1,
                num_nodes: 3
            }
        );
    }
}
