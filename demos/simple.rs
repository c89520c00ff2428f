use sort_circuit::dag::Dag;

fn main() {
    let mut deps = Dag::new();

    // The plexer and arithmetic libraries build on the base gates
    assert!(deps.add_edge("gates", "plexers"));
    assert!(deps.add_edge("gates", "arithmetic"));

    // Memory needs both of them
    assert!(deps.add_edge("plexers", "memory"));
    assert!(deps.add_edge("arithmetic", "memory"));

    // Loading gates after memory would be circular, so it is refused
    assert!(!deps.add_edge("memory", "gates"));
    assert!(!deps.can_follow(&"gates", &"memory"));

    // Print the graph
    println!("{deps}");
}
