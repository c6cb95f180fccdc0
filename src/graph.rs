use crate::{
    sort::SortError,
    sync::*,
    types::{NodeId, SyncUnsafeCell},
};

/// A single vertex of the graph.
///
/// `in_degree` and `processed` are shared across all tasks of a parallel
/// round and are only ever touched through atomics. The adjacency list is
/// exclusively owned: during construction and serial execution by the thread
/// holding `&mut Graph`, during parallel execution by the one round task the
/// node was assigned to.
#[must_use]
#[derive(Debug)]
#[repr(align(128))]
pub(crate) struct Node {
    id: NodeId,
    /// Count of incoming edges that have not yet been retired.
    in_degree: AtomicU32,
    /// Flips to `true` exactly once, when the node is admitted into a
    /// frontier.
    processed: AtomicBool,
    /// Arena indices of this node's edge targets, in insertion order.
    outgoing: SyncUnsafeCell<Vec<u32>>,
}

impl Node {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            in_degree: AtomicU32::new(0),
            processed: AtomicBool::new(false),
            outgoing: SyncUnsafeCell::new(Vec::new()),
        }
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn in_degree(&self) -> u32 {
        self.in_degree.load(Ordering::Relaxed)
    }

    pub(crate) fn is_processed(&self) -> bool {
        self.processed.load(Ordering::Relaxed)
    }

    /// Admits the node into a frontier. Returns `false` if it had already
    /// been admitted.
    pub(crate) fn try_admit(&self) -> bool {
        !self.processed.swap(true, Ordering::Relaxed)
    }

    /// Decrements the in-degree by one and returns the previous value, so
    /// the caller that observes `1` is the unique witness of the node
    /// reaching zero.
    ///
    /// Every call must correspond to one not-yet-retired incoming edge;
    /// `Graph::remove_edge` and the round tasks uphold this by only retiring
    /// entries still present in an adjacency list.
    pub(crate) fn retire_incoming(&self) -> u32 {
        self.in_degree.fetch_sub(1, Ordering::Relaxed)
    }

    fn bump_in_degree(&self) {
        self.in_degree.fetch_add(1, Ordering::Relaxed);
    }

    /// # Safety
    ///
    /// The caller must have exclusive logical access to this node's
    /// adjacency list (it holds `&mut Graph`, or it is the round task that
    /// owns this node).
    unsafe fn push_outgoing(&self, target: u32) {
        // SAFETY: Exclusive access is guaranteed by the caller.
        unsafe {
            self.outgoing.get_mut().with(|ptr| {
                ptr.as_mut().unwrap().push(target);
            });
        }
    }

    /// # Safety
    ///
    /// Same contract as [`Node::push_outgoing`].
    unsafe fn first_outgoing(&self) -> Option<u32> {
        // SAFETY: Exclusive access is guaranteed by the caller.
        unsafe {
            self.outgoing
                .get()
                .with(|ptr| ptr.as_ref().unwrap().first().copied())
        }
    }

    /// Removes the first adjacency entry matching `target`, reporting
    /// whether one was found.
    ///
    /// # Safety
    ///
    /// Same contract as [`Node::push_outgoing`].
    unsafe fn remove_outgoing_first(&self, target: u32) -> bool {
        // SAFETY: Exclusive access is guaranteed by the caller.
        unsafe {
            self.outgoing.get_mut().with(|ptr| {
                let outgoing = ptr.as_mut().unwrap();
                match outgoing.iter().position(|&entry| entry == target) {
                    Some(position) => {
                        outgoing.remove(position);
                        true
                    }
                    None => false,
                }
            })
        }
    }

    /// Takes the whole adjacency list, leaving it empty.
    ///
    /// # Safety
    ///
    /// Same contract as [`Node::push_outgoing`].
    pub(crate) unsafe fn take_outgoing(&self) -> Vec<u32> {
        // SAFETY: Exclusive access is guaranteed by the caller.
        unsafe {
            self.outgoing
                .get_mut()
                .with(|ptr| core::mem::take(ptr.as_mut().unwrap()))
        }
    }
}

/// An owning arena of nodes, indexed by `id - 1`.
#[must_use]
#[derive(Debug)]
pub(crate) struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Creates `num_nodes` nodes with ids `1..=num_nodes`, then applies
    /// every edge in input order.
    ///
    /// # Errors
    ///
    /// `InvalidEdge` if an edge references an id outside `1..=num_nodes`.
    pub(crate) fn build(num_nodes: u32, edges: &[(u32, u32)]) -> Result<Self, SortError> {
        let nodes = (1..=num_nodes)
            .map(|id| Node::new(NodeId::new(id).expect("Graph::build: [1]")))
            .collect();
        let mut graph = Self { nodes };
        for &(src, dst) in edges {
            let (src_idx, dst_idx) = graph.edge_indices(src, dst)?;
            graph.add_edge(src_idx, dst_idx);
        }
        Ok(graph)
    }

    fn edge_indices(&self, src: u32, dst: u32) -> Result<(u32, u32), SortError> {
        let num_nodes = self.nodes.len() as u32;
        if src == 0 || src > num_nodes || dst == 0 || dst > num_nodes {
            return Err(SortError::InvalidEdge {
                src,
                dst,
                num_nodes,
            });
        }
        Ok((src - 1, dst - 1))
    }

    /// Appends `dst` to `src`'s adjacency and bumps `dst`'s in-degree.
    /// Duplicate edges are kept as distinct entries, each retired on its
    /// own.
    pub(crate) fn add_edge(&mut self, src: u32, dst: u32) {
        // SAFETY: `&mut self` guarantees exclusive access to the adjacency
        // list.
        unsafe { self.nodes[src as usize].push_outgoing(dst) };
        self.nodes[dst as usize].bump_in_degree();
    }

    /// Removes the first adjacency entry of `src` matching `dst` and
    /// decrements `dst`'s in-degree. When no matching edge exists this is a
    /// no-op and the degree is left untouched.
    pub(crate) fn remove_edge(&mut self, src: u32, dst: u32) -> bool {
        // SAFETY: `&mut self` guarantees exclusive access to the adjacency
        // list.
        let removed = unsafe { self.nodes[src as usize].remove_outgoing_first(dst) };
        if removed {
            self.nodes[dst as usize].retire_incoming();
        }
        removed
    }

    /// First remaining adjacency entry of `src`, if any.
    pub(crate) fn first_outgoing(&mut self, src: u32) -> Option<u32> {
        // SAFETY: `&mut self` guarantees exclusive access to the adjacency
        // list.
        unsafe { self.nodes[src as usize].first_outgoing() }
    }

    /// Scans the arena in ascending id order, admitting every node with
    /// zero in-degree that has not been admitted before, and returns their
    /// indices as the seed frontier.
    pub(crate) fn collect_ready(&self) -> Vec<u32> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.in_degree() == 0 && node.try_admit())
            .map(|(idx, _)| idx as u32)
            .collect()
    }

    /// Ids of nodes that were never admitted into a frontier, in ascending
    /// order.
    pub(crate) fn unprocessed(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| !node.is_processed())
            .map(Node::id)
            .collect()
    }

    pub(crate) fn node(&self, idx: u32) -> &Node {
        &self.nodes[idx as usize]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
