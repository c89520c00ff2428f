/*!

  Analyses over the `dag` module.

*/

use crate::dag::Dag;
#[cfg(feature = "graph")]
use petgraph::graph::DiGraph;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// A common trait of analyses that can be performed on a graph.
/// An analysis becomes stale when the graph is modified.
pub trait Analysis<'a, E>
where
    Self: Sized + 'a,
    E: Eq + Hash + Clone,
{
    /// Construct the analysis for the current state of the graph.
    fn build(dag: &'a Dag<E>) -> Result<Self, String>;
}

/// A total order over the values in a graph that respects every edge:
/// a value is placed after everything it follows.
pub struct TopoOrder<'a, E> {
    // A reference to the underlying graph
    _dag: &'a Dag<E>,
    // The values in dependency order
    order: Vec<&'a E>,
    /// Maps a value to its position in the order
    position: HashMap<&'a E, usize>,
}

impl<'a, E> TopoOrder<'a, E>
where
    E: Eq + Hash + Clone,
{
    /// Returns an iterator over the values in dependency order.
    pub fn iter(&self) -> impl Iterator<Item = &'a E> {
        self.order.iter().copied()
    }

    /// Returns the position of `data` in the order, if it is in the graph.
    pub fn position(&self, data: &E) -> Option<usize> {
        self.position.get(data).copied()
    }
}

impl<'a, E> Analysis<'a, E> for TopoOrder<'a, E>
where
    E: Eq + Hash + Clone,
{
    fn build(dag: &'a Dag<E>) -> Result<Self, String> {
        let mut degree: HashMap<&E, usize> = dag
            .iter()
            .map(|data| (data, dag.predecessor_count(data)))
            .collect();

        let mut fringe: VecDeque<&E> = dag.iter().filter(|data| degree[data] == 0).collect();

        let mut order = Vec::with_capacity(dag.len());
        while let Some(data) = fringe.pop_front() {
            order.push(data);
            for succ in dag.successors(data) {
                let left = degree
                    .get_mut(succ)
                    .ok_or("Edge target missing from the graph".to_string())?;
                *left -= 1;
                if *left == 0 {
                    fringe.push_back(succ);
                }
            }
        }

        if order.len() != dag.len() {
            return Err("Cycle detected in the graph".to_string());
        }

        let position = order
            .iter()
            .enumerate()
            .map(|(i, &data)| (data, i))
            .collect();

        Ok(TopoOrder {
            _dag: dag,
            order,
            position,
        })
    }
}

/// The layering analysis of a graph: each value is assigned the length of
/// the longest chain of edges leading to it, so roots sit at depth zero and
/// every value sits below everything it follows.
pub struct DepthTable<'a, E> {
    // A reference to the underlying graph
    _dag: &'a Dag<E>,
    // Maps a value to its layer
    depth: HashMap<&'a E, usize>,
    /// The maximum depth of the graph
    max_depth: usize,
}

impl<E> DepthTable<'_, E>
where
    E: Eq + Hash + Clone,
{
    /// Returns the layer of a value in the graph.
    pub fn get_depth(&self, data: &E) -> Option<usize> {
        self.depth.get(data).copied()
    }

    /// Returns the maximum layer of the graph.
    pub fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}

impl<'a, E> Analysis<'a, E> for DepthTable<'a, E>
where
    E: Eq + Hash + Clone,
{
    fn build(dag: &'a Dag<E>) -> Result<Self, String> {
        let topo = TopoOrder::build(dag)?;

        let mut depth: HashMap<&E, usize> = dag.iter().map(|data| (data, 0)).collect();
        for data in topo.iter() {
            let below = depth[data] + 1;
            for succ in dag.successors(data) {
                let entry = depth
                    .get_mut(succ)
                    .ok_or("Edge target missing from the graph".to_string())?;
                if *entry < below {
                    *entry = below;
                }
            }
        }

        let max_depth = depth.values().max().copied().unwrap_or(0);

        Ok(DepthTable {
            _dag: dag,
            depth,
            max_depth,
        })
    }
}

/// Returns a petgraph representation of the graph as a [DiGraph] over the
/// stored values.
#[cfg(feature = "graph")]
pub struct DagGraph<'a, E> {
    _dag: &'a Dag<E>,
    graph: DiGraph<E, ()>,
}

#[cfg(feature = "graph")]
impl<E> DagGraph<'_, E>
where
    E: Eq + Hash + Clone,
{
    /// Return a reference to the graph constructed by this analysis
    pub fn get_graph(&self) -> &DiGraph<E, ()> {
        &self.graph
    }
}

#[cfg(feature = "graph")]
impl<'a, E> Analysis<'a, E> for DagGraph<'a, E>
where
    E: Eq + Hash + Clone,
{
    fn build(dag: &'a Dag<E>) -> Result<Self, String> {
        // If we verify, we can hash by value
        dag.verify()?;
        let mut mapping = HashMap::new();
        let mut graph = DiGraph::new();

        for data in dag.iter() {
            let id = graph.add_node(data.clone());
            mapping.insert(data, id);
        }

        for data in dag.iter() {
            for succ in dag.successors(data) {
                graph.add_edge(mapping[data], mapping[succ], ());
            }
        }

        Ok(Self { _dag: dag, graph })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dag;

    /// The built-in library stack of a small circuit project
    fn library_deps() -> Dag<&'static str> {
        dag! {
            "gates" => "plexers",
            "gates" => "arithmetic",
            "plexers" => "memory",
            "arithmetic" => "memory",
        }
    }

    #[test]
    fn topo_order_respects_edges() {
        let deps = library_deps();
        let topo = TopoOrder::build(&deps);
        assert!(topo.is_ok());
        let topo = topo.unwrap();

        assert_eq!(topo.iter().count(), 4);
        for lib in deps.iter() {
            for succ in deps.successors(lib) {
                assert!(
                    topo.position(lib).unwrap() < topo.position(succ).unwrap(),
                    "{lib} must be placed before {succ}"
                );
            }
        }
        assert_eq!(topo.position(&"gates"), Some(0));
        assert_eq!(topo.position(&"missing"), None);
    }

    #[test]
    fn depth_table_layers_the_diamond() {
        let deps = library_deps();
        let depths = DepthTable::build(&deps).unwrap();
        assert_eq!(depths.get_depth(&"gates"), Some(0));
        assert_eq!(depths.get_depth(&"plexers"), Some(1));
        assert_eq!(depths.get_depth(&"arithmetic"), Some(1));
        assert_eq!(depths.get_depth(&"memory"), Some(2));
        assert_eq!(depths.get_max_depth(), 2);
        assert_eq!(depths.get_depth(&"missing"), None);
    }

    #[test]
    fn empty_graph_analyses() {
        let deps: Dag<&str> = Dag::new();
        let topo = TopoOrder::build(&deps).unwrap();
        assert_eq!(topo.iter().count(), 0);
        let depths = DepthTable::build(&deps).unwrap();
        assert_eq!(depths.get_max_depth(), 0);
    }
}
