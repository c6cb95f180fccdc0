//! Round-synchronized parallel executor.
//!
//! Every frontier is processed as one round: one concurrent task per ready
//! node, forked as a binary fork/join tree over the frontier slice. The
//! return of the top-level join is the round barrier; no task of round
//! `k + 1` starts before every task of round `k` has finished.
//!
//! Shared state per invocation:
//! - the result sequence and the next-round candidate set, each behind its
//!   own mutex (two short critical sections);
//! - every node's in-degree, retired with an atomic fetch-sub whose previous
//!   value uniquely identifies the task that drove it to zero.
//!
//! A node discovered during round `k` is processed in round `k + 1`; the
//! round join and the candidate mutex order the publication of its adjacency
//! list to the task that will own it.

use crate::{graph::Graph, sort::SortError, sync::*, types::NodeId};
use core::ops::Deref;
#[cfg(not(feature = "loom"))]
use tracing::debug;

/// Fault sentinel: zero means no violation, any other value is the 1-based
/// id of a node observed entering a frontier twice.
const NO_FAULT: u32 = 0;

/// Runs rounds until a frontier comes up empty.
///
/// # Errors
///
/// `ConcurrencyInvariantViolation` if a node was admitted into a frontier
/// twice. Impossible if there are no bugs in the code.
#[cfg(not(feature = "loom"))]
pub(crate) fn run(graph: &Graph, seed: Vec<u32>) -> Result<Vec<NodeId>, SortError> {
    let order = Mutex::new(Vec::with_capacity(graph.len()));
    let fault = AtomicU32::new(NO_FAULT);
    let mut frontier = seed;
    let mut round = 0usize;
    while !frontier.is_empty() {
        debug!("round {round}: {} ready node(s)", frontier.len());
        let next = Mutex::new(Vec::new());
        fan_out(graph, &order, &next, &fault, frontier.as_slice());
        check_fault(&fault)?;
        frontier = next.into_inner().expect("parallel::run: [1]");
        round += 1;
    }
    Ok(order.into_inner().expect("parallel::run: [2]"))
}

/// Loom-testable version of `run`.
#[cfg(feature = "loom")]
pub(crate) fn run(graph: Graph, seed: Vec<u32>) -> (Graph, Result<Vec<NodeId>, SortError>) {
    let capacity = graph.len();
    let graph = Arc::new(graph);
    let order = Arc::new(Mutex::new(Vec::with_capacity(capacity)));
    let fault = Arc::new(AtomicU32::new(NO_FAULT));
    let mut frontier = seed;
    let result = loop {
        if frontier.is_empty() {
            let order = std::mem::take(&mut *order.lock().expect("parallel::run: [3]"));
            break Ok(order);
        }
        let next = Arc::new(Mutex::new(Vec::new()));
        let ready: Arc<[u32]> = frontier.into();
        fan_out(
            graph.clone(),
            order.clone(),
            next.clone(),
            fault.clone(),
            ready,
        );
        if let Err(err) = check_fault(&fault) {
            break Err(err);
        }
        frontier = std::mem::take(&mut *next.lock().expect("parallel::run: [4]"));
    };
    let graph = Arc::into_inner(graph).expect("parallel::run: [5]");
    (graph, result)
}

fn check_fault(fault: &AtomicU32) -> Result<(), SortError> {
    match fault.load(Ordering::Relaxed) {
        NO_FAULT => Ok(()),
        id => Err(SortError::ConcurrencyInvariantViolation {
            node: NodeId::new(id).expect("parallel::check_fault: [1]"),
        }),
    }
}

/// Forks one task per frontier node by splitting the slice in halves until
/// single nodes remain. Returns once every task of the round has finished.
fn fan_out(
    graph: GraphRef<'_>,
    order: OrderSink<'_>,
    next: FrontierSink<'_>,
    fault: FaultSlot<'_>,
    frontier: impl Deref<Target = [u32]>,
) {
    match frontier.first() {
        None => return,
        Some(&node_idx) if frontier.len() == 1 => {
            process_node(&graph, &order, &next, &fault, node_idx);
            return;
        }
        _ => {}
    }
    let (left, right) = frontier.split_at(frontier.len() / 2);
    #[cfg(feature = "loom")]
    let (left, right) = (Arc::from(left), Arc::from(right));
    // Just a zero-cost hack for `loom` to work.
    #[allow(noop_method_call)]
    let (rhs_graph, rhs_order, rhs_next, rhs_fault) =
        (graph.clone(), order.clone(), next.clone(), fault.clone());
    join(
        || fan_out(graph, order, next, fault, left),
        || fan_out(rhs_graph, rhs_order, rhs_next, rhs_fault, right),
    );
}

/// One round task: appends its node to the result, then retires every
/// outgoing edge, registering each destination it drove to zero as a
/// candidate for the next round.
fn process_node(
    graph: &Graph,
    order: &Mutex<Vec<NodeId>>,
    next: &Mutex<Vec<u32>>,
    fault: &AtomicU32,
    node_idx: u32,
) {
    let node = graph.node(node_idx);
    order
        .lock()
        .expect("parallel::process_node: [1]")
        .push(node.id());
    // SAFETY: A node enters exactly one frontier (`processed` flips once),
    // and each frontier node is assigned to exactly one task of its round,
    // so this task is the sole accessor of the adjacency list.
    let targets = unsafe { node.take_outgoing() };
    for target_idx in targets {
        let target = graph.node(target_idx);
        if target.retire_incoming() == 1 {
            // This task is the unique witness of the zero transition and
            // therefore the only one allowed to admit the target.
            if target.try_admit() {
                next.lock()
                    .expect("parallel::process_node: [2]")
                    .push(target_idx);
            } else {
                let _ = fault.compare_exchange(
                    NO_FAULT,
                    target.id().get(),
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                );
            }
        }
    }
}
