use proptest::prelude::*;
use sort_circuit::dag::Dag;

const NAMES: [&str; 6] = ["luke", "leia", "han", "c3po", "r2d2", "vader"];

#[derive(Debug, Clone)]
enum Edit {
    AddEdge(usize, usize),
    RemoveEdge(usize, usize),
    RemoveNode(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        // weight insertions so graphs actually grow
        3 => (0..NAMES.len(), 0..NAMES.len()).prop_map(|(a, b)| Edit::AddEdge(a, b)),
        1 => (0..NAMES.len(), 0..NAMES.len()).prop_map(|(a, b)| Edit::RemoveEdge(a, b)),
        1 => (0..NAMES.len()).prop_map(Edit::RemoveNode),
    ]
}

proptest! {
    /// Any sequence of edits leaves the graph acyclic, with matching
    /// predecessor counts and no isolated nodes.
    #[test]
    fn edits_preserve_invariants(edits in proptest::collection::vec(edit(), 0..64)) {
        let mut dag: Dag<&str> = Dag::new();
        for edit in edits {
            match edit {
                Edit::AddEdge(a, b) => {
                    let added = dag.add_edge(NAMES[a], NAMES[b]);
                    if a == b {
                        prop_assert!(!added, "self-loops must be rejected");
                    }
                    if added {
                        // the new edge must now be ordered
                        prop_assert!(!dag.can_follow(&NAMES[a], &NAMES[b]));
                        prop_assert!(dag.has_successors(&NAMES[a]));
                        prop_assert!(dag.has_predecessors(&NAMES[b]));
                    }
                }
                Edit::RemoveEdge(a, b) => {
                    dag.remove_edge(&NAMES[a], &NAMES[b]);
                }
                Edit::RemoveNode(a) => {
                    dag.remove_node(&NAMES[a]);
                    prop_assert!(!dag.contains(&NAMES[a]));
                }
            }
            prop_assert!(dag.verify().is_ok(), "graph went inconsistent: {:?}", dag.verify());
        }
    }

    /// A rejected insertion leaves no trace.
    #[test]
    fn rejected_edges_change_nothing(path in proptest::collection::vec(0..NAMES.len(), 2..6)) {
        let mut dag: Dag<&str> = Dag::new();

        // chain the (deduplicated) path together
        let mut path: Vec<_> = path.into_iter().map(|i| NAMES[i]).collect();
        path.dedup();
        path.sort();
        path.dedup();
        for pair in path.windows(2) {
            prop_assert!(dag.add_edge(pair[0], pair[1]));
        }

        if path.len() >= 2 {
            let before = dag.to_string();
            // closing the chain into a ring must fail and change nothing
            let last = *path.last().unwrap();
            prop_assert!(!dag.add_edge(last, path[0]));
            prop_assert_eq!(dag.to_string(), before);
        }
        prop_assert!(dag.verify().is_ok());
    }
}
