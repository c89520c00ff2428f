/*!

  An order-keeping directed acyclic graph.

*/

use bitvec::bitvec;
use bitvec::vec::BitVec;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::hash::Hash;

/// An index into the node table of a [Dag]
type NodeId = usize;

/// A node in the table, holding the caller's data and its outgoing edges.
/// Incoming edges are tracked as a count only.
#[derive(Debug, Clone)]
struct Node<E> {
    /// The caller's value; also the key of this node in the index
    data: E,
    /// Outgoing edges, as indices into the node table
    succs: BTreeSet<NodeId>,
    /// The number of incoming edges
    num_preds: usize,
}

impl<E> Node<E> {
    fn new(data: E) -> Self {
        Self {
            data,
            succs: BTreeSet::new(),
            num_preds: 0,
        }
    }

    /// A node with no edges in either direction is pruned from the graph
    fn is_isolated(&self) -> bool {
        self.num_preds == 0 && self.succs.is_empty()
    }
}

/// A directed graph over caller-chosen values that can never contain a cycle.
///
/// Nodes are created lazily by [Dag::add_edge] and pruned as soon as they
/// lose their last edge, so the graph never stores isolated values. An edge
/// insertion that would close a cycle is rejected with `false` rather than
/// an error; a host (a library loader, a layering pass) is expected to probe
/// with [Dag::can_follow] and handle rejection as an ordinary outcome.
///
/// # Examples
///
/// ```
/// use sort_circuit::dag::Dag;
///
/// let mut deps = Dag::new();
/// assert!(deps.add_edge("gates", "plexers"));
/// assert!(deps.add_edge("plexers", "memory"));
///
/// // Closing the loop back to the base library is rejected
/// assert!(!deps.add_edge("memory", "gates"));
/// assert!(!deps.can_follow(&"gates", &"memory"));
/// ```
#[derive(Debug, Clone)]
pub struct Dag<E> {
    /// Maps a value to its slot in the node table
    index: HashMap<E, NodeId>,
    /// The node table. Pruned slots are `None` and kept on the free list.
    slots: Vec<Option<Node<E>>>,
    /// Slots available for reuse
    free: Vec<NodeId>,
}

impl<E> Dag<E>
where
    E: Eq + Hash + Clone,
{
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Returns the number of values currently stored in the graph
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the graph stores no values
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns `true` if a node exists for `data`
    pub fn contains(&self, data: &E) -> bool {
        self.index.contains_key(data)
    }

    /// Returns `true` if a node exists for `data` and has at least one
    /// incoming edge. Never creates a node.
    pub fn has_predecessors(&self, data: &E) -> bool {
        match self.find(data) {
            Some(id) => self.node(id).num_preds != 0,
            None => false,
        }
    }

    /// Returns `true` if a node exists for `data` and has at least one
    /// outgoing edge. Never creates a node.
    pub fn has_successors(&self, data: &E) -> bool {
        match self.find(data) {
            Some(id) => !self.node(id).succs.is_empty(),
            None => false,
        }
    }

    /// Returns the number of incoming edges at the node for `data`, or zero
    /// if no such node exists.
    pub fn predecessor_count(&self, data: &E) -> usize {
        match self.find(data) {
            Some(id) => self.node(id).num_preds,
            None => 0,
        }
    }

    /// Could `query` be placed after `base` without breaking the acyclic
    /// guarantee?
    ///
    /// A value can never follow itself. Two distinct values that are not in
    /// the graph yet are unordered, so either may follow the other.
    /// Otherwise the answer is found by searching the successor edges out of
    /// `query`: if `base` is reachable it already follows `query`, and so
    /// `query` cannot follow it.
    pub fn can_follow(&self, query: &E, base: &E) -> bool {
        if query == base {
            return false;
        }
        let (Some(query), Some(base)) = (self.find(query), self.find(base)) else {
            return true;
        };
        !self.reaches(query, base)
    }

    /// Attempts to add the edge `src -> dst`, creating nodes for either
    /// value as needed.
    ///
    /// Returns `false` and leaves the graph untouched if the edge would
    /// close a cycle or if `src` and `dst` are the same value. Returns
    /// `true` if the edge was installed or was already present.
    pub fn add_edge(&mut self, src: E, dst: E) -> bool {
        if !self.can_follow(&dst, &src) {
            return false;
        }

        let src = self.create(src);
        let dst = self.create(dst);

        // add unless already present
        if self.node_mut(src).succs.insert(dst) {
            self.node_mut(dst).num_preds += 1;
        }

        true
    }

    /// Removes the edge `src -> dst` if it is present, pruning either
    /// endpoint that is left with no edges at all.
    ///
    /// Returns `false` if either value has no node or the edge does not
    /// exist.
    pub fn remove_edge(&mut self, src: &E, dst: &E) -> bool {
        let (Some(src), Some(dst)) = (self.find(src), self.find(dst)) else {
            return false;
        };

        if !self.node_mut(src).succs.remove(&dst) {
            return false;
        }

        self.node_mut(dst).num_preds -= 1;
        self.prune(dst);
        self.prune(src);
        true
    }

    /// Removes the node for `data` entirely, if present.
    ///
    /// Every successor loses an incoming edge and is pruned if it becomes
    /// isolated. If the removed node had incoming edges, the remaining
    /// nodes are scanned for edges pointing at it; those edges are removed
    /// and any source left isolated is pruned as well.
    pub fn remove_node(&mut self, data: &E) {
        let Some(id) = self.find(data) else {
            return;
        };

        let node = self.slots[id].take().expect("Index points to a pruned slot");
        self.index.remove(data);
        self.free.push(id);

        for &succ in &node.succs {
            self.node_mut(succ).num_preds -= 1;
            self.prune(succ);
        }

        if node.num_preds > 0 {
            for other in 0..self.slots.len() {
                let removed = match self.slots[other].as_mut() {
                    Some(n) => n.succs.remove(&id),
                    None => false,
                };
                if removed {
                    self.prune(other);
                }
            }
        }
    }

    /// Returns an iterator over the values stored in the graph. The order
    /// is stable between mutations but otherwise unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.slots.iter().flatten().map(|node| &node.data)
    }

    /// Returns an iterator over the values `data` has an edge to. Empty if
    /// `data` has no node.
    pub fn successors<'a>(&'a self, data: &E) -> impl Iterator<Item = &'a E> {
        self.find(data).into_iter().flat_map(move |id| {
            self.node(id)
                .succs
                .iter()
                .map(move |&succ| &self.node(succ).data)
        })
    }

    /// Checks the internal consistency of the graph: the index and the node
    /// table agree, every edge lands on a live slot, every predecessor
    /// count matches the edges actually pointing at the node, no node is
    /// isolated, and no cycle exists.
    pub fn verify(&self) -> Result<(), String> {
        let live = self.slots.iter().flatten().count();
        if live != self.index.len() {
            return Err(format!(
                "Index holds {} entries but the table holds {live} nodes",
                self.index.len()
            ));
        }

        for (data, &id) in &self.index {
            match self.slots.get(id).and_then(|slot| slot.as_ref()) {
                Some(node) if node.data == *data => {}
                _ => return Err(format!("Index entry points to a stale slot {id}")),
            }
        }

        let mut preds = vec![0usize; self.slots.len()];
        for node in self.slots.iter().flatten() {
            for &succ in &node.succs {
                if self.slots.get(succ).and_then(|slot| slot.as_ref()).is_none() {
                    return Err(format!("Edge points to a stale slot {succ}"));
                }
                preds[succ] += 1;
            }
        }

        for (id, slot) in self.slots.iter().enumerate() {
            let Some(node) = slot else {
                continue;
            };
            if node.num_preds != preds[id] {
                return Err(format!(
                    "Slot {id} counts {} predecessors but has {}",
                    node.num_preds, preds[id]
                ));
            }
            if node.is_isolated() {
                return Err(format!("Isolated node left in slot {id}"));
            }
        }

        // Kahn's algorithm; anything unreached sits on a cycle
        let mut fringe: VecDeque<NodeId> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(id, slot)| slot.is_some() && preds[*id] == 0)
            .map(|(id, _)| id)
            .collect();
        let mut seen = 0;
        while let Some(id) = fringe.pop_front() {
            seen += 1;
            for &succ in &self.node(id).succs {
                preds[succ] -= 1;
                if preds[succ] == 0 {
                    fringe.push_back(succ);
                }
            }
        }
        if seen != live {
            return Err("Cycle detected in the graph".to_string());
        }

        Ok(())
    }

    /// Returns `true` if `target` is reachable from `from` along successor
    /// edges. Breadth-first, with a visited set local to this call.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut visited: BitVec = bitvec![0; self.slots.len()];
        let mut fringe = VecDeque::new();
        visited.set(from, true);
        fringe.push_back(from);

        while let Some(id) = fringe.pop_front() {
            for &succ in &self.node(id).succs {
                if succ == target {
                    return true;
                }
                if !visited[succ] {
                    visited.set(succ, true);
                    fringe.push_back(succ);
                }
            }
        }

        false
    }

    /// Looks up the slot for `data` without creating one
    fn find(&self, data: &E) -> Option<NodeId> {
        self.index.get(data).copied()
    }

    /// Returns the slot for `data`, allocating one if absent
    fn create(&mut self, data: E) -> NodeId {
        if let Some(id) = self.find(&data) {
            return id;
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(Node::new(data.clone()));
                id
            }
            None => {
                self.slots.push(Some(Node::new(data.clone())));
                self.slots.len() - 1
            }
        };
        self.index.insert(data, id);
        id
    }

    /// Drops the node in slot `id` if it has no edges left
    fn prune(&mut self, id: NodeId) {
        let isolated = self.node(id).is_isolated();
        if isolated {
            let node = self.slots[id].take().expect("Pruning a stale slot");
            self.index.remove(&node.data);
            self.free.push(id);
        }
    }

    fn node(&self, id: NodeId) -> &Node<E> {
        self.slots[id].as_ref().expect("Stale node slot")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<E> {
        self.slots[id].as_mut().expect("Stale node slot")
    }
}

impl<E> Default for Dag<E>
where
    E: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Display for Dag<E>
where
    E: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lead = "";
        for node in self.slots.iter().flatten() {
            write!(f, "{lead}{}->[", node.data)?;
            lead = ", ";
            let mut sep = "";
            for &succ in &node.succs {
                let succ = self.slots[succ].as_ref().expect("Stale successor slot");
                write!(f, "{sep}{}", succ.data)?;
                sep = ", ";
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Edge-list serialization for [Dag].
#[cfg(feature = "serde")]
pub mod serde {
    use super::Dag;
    use serde::de::Error;
    use serde::{Deserialize, Serialize, de::DeserializeOwned};
    use std::hash::Hash;

    #[derive(Debug, Serialize, Deserialize)]
    struct SerdeDag<E> {
        /// Every edge in the graph. Because isolated nodes are never
        /// stored, the edge list describes the graph completely.
        edges: Vec<(E, E)>,
    }

    impl<E> From<&Dag<E>> for SerdeDag<E>
    where
        E: Eq + Hash + Clone,
    {
        fn from(value: &Dag<E>) -> Self {
            let edges = value
                .iter()
                .flat_map(|src| {
                    value
                        .successors(src)
                        .map(move |dst| (src.clone(), dst.clone()))
                })
                .collect();
            SerdeDag { edges }
        }
    }

    /// Serialize the graph into the writer as a JSON edge list.
    pub fn dag_serialize<E: Eq + Hash + Clone + Serialize>(
        dag: &Dag<E>,
        writer: impl std::io::Write,
    ) -> Result<(), serde_json::Error> {
        let sobj: SerdeDag<E> = dag.into();
        serde_json::to_writer_pretty(writer, &sobj)
    }

    /// Deserialize a graph from a JSON edge list. The graph is rebuilt one
    /// edge at a time, so input containing a cycle or a self-loop is
    /// rejected.
    pub fn dag_deserialize<E: Eq + Hash + Clone + DeserializeOwned>(
        reader: impl std::io::Read,
    ) -> Result<Dag<E>, serde_json::Error> {
        let sobj: SerdeDag<E> = serde_json::from_reader(reader)?;
        let mut dag = Dag::new();
        for (src, dst) in sobj.edges {
            if !dag.add_edge(src, dst) {
                return Err(serde_json::Error::custom("edge list is not acyclic"));
            }
        }
        Ok(dag)
    }
}
