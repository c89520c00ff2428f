/*!

  Utils for tests and demos.

*/

/// Build a [Dag](crate::dag::Dag) from a list of `src => dst` edges.
///
/// Panics if an edge is rejected, so this is meant for tests and demos
/// where the edge list is known to be acyclic.
///
/// ```
/// use sort_circuit::dag;
///
/// let deps = dag! {
///     "gates" => "plexers",
///     "plexers" => "memory",
/// };
/// assert_eq!(deps.len(), 3);
/// ```
#[macro_export]
macro_rules! dag {
    ($($src:expr => $dst:expr),* $(,)?) => {{
        let mut dag = $crate::dag::Dag::new();
        $(
            assert!(dag.add_edge($src, $dst), "edge would create a cycle");
        )*
        dag
    }};
}
