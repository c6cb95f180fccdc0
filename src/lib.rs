//! Concurrent topological sorting of directed acyclic graphs.
//!
//! This crate implements Kahn's algorithm over an arena-backed node graph
//! and offers two executors behind one entry point:
//! - a serial executor that drains the ready-node frontier through a FIFO
//!   queue, producing a deterministic order with ties broken by ascending
//!   node id;
//! - a parallel executor that processes each frontier as a synchronized
//!   round (one concurrent task per ready node, a hard barrier before the
//!   next round), producing a valid topological order whose intra-round
//!   node order depends on task-completion races.
//!
//! Cycles are detected after executor termination: any node that never
//! reached zero in-degree is reported instead of a truncated order.
//!
//! Key modules:
//! - `sort`: the driver — graph construction, executor selection, cycle
//!   detection and result assembly.
//! - `edgelist`: the text edge-list source consumed by the command-line
//!   front end.
//! - `types`: the id type and the cell wrapper used internally.
//!
//! Quick start:
//!
//! ```
//! use ktopo::{Mode, topological_sort};
//!
//! let order = topological_sort(3, &[(1, 2), (2, 3)], Mode::Serial)?;
//! assert_eq!(
//!     order.iter().map(|id| id.get()).collect::<Vec<_>>(),
//!     [1, 2, 3]
//! );
//! # Ok::<(), ktopo::SortError>(())
//! ```

/// Edge-list input source consumed by the command-line front end.
pub mod edgelist;
mod executor;
mod graph;
/// The sort driver: graph construction, executor selection, cycle
/// detection.
pub mod sort;
mod sync;
/// Core types: node ids and the cell wrapper used internally.
pub mod types;

pub use sort::{Mode, SortError, topological_sort};
pub use types::NodeId;
