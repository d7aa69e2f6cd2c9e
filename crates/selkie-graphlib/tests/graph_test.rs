use selkie_graphlib::{Graph, GraphOptions};

type TestGraph = Graph<String, u32, ()>;

fn new_graph(options: GraphOptions) -> TestGraph {
    Graph::new(options)
}

#[test]
fn nodes_iterate_in_insertion_order() {
    let mut g = new_graph(GraphOptions::default());
    for id in ["c", "a", "b"] {
        g.set_node(id, id.to_uppercase());
    }
    let ids: Vec<&str> = g.nodes().collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(g.node("a"), Some(&"A".to_string()));
}

#[test]
fn set_node_replaces_the_label() {
    let mut g = new_graph(GraphOptions::default());
    g.set_node("a", "one".to_string());
    g.set_node("a", "two".to_string());
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.node("a"), Some(&"two".to_string()));
}

#[test]
fn set_edge_creates_missing_endpoints_with_defaults() {
    let mut g = new_graph(GraphOptions::default());
    g.set_default_node_label(|| "default".to_string());
    g.set_edge_with_label("a", "b", 7);

    assert!(g.has_node("a"));
    assert_eq!(g.node("b"), Some(&"default".to_string()));
    assert_eq!(g.edge("a", "b", None), Some(&7));
}

#[test]
fn removal_keeps_iteration_order_of_survivors() {
    let mut g = new_graph(GraphOptions::default());
    for id in ["a", "b", "c", "d"] {
        g.set_node(id, String::new());
    }
    g.remove_node("b");
    let ids: Vec<&str> = g.nodes().collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
    assert_eq!(g.node_count(), 3);
}

#[test]
fn removing_a_node_removes_its_incident_edges() {
    let mut g = new_graph(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("a", "c");

    g.remove_node("b");

    assert_eq!(g.edge_count(), 1);
    assert!(g.has_edge("a", "c", None));
    assert!(!g.has_edge("a", "b", None));
}

#[test]
fn multigraph_names_distinguish_parallel_edges() {
    let mut g = new_graph(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    g.set_edge_named("a", "b", Some("one"), Some(1));
    g.set_edge_named("a", "b", Some("two"), Some(2));

    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edge("a", "b", Some("one")), Some(&1));
    assert_eq!(g.edge("a", "b", Some("two")), Some(&2));
}

#[test]
fn non_multigraphs_ignore_edge_names() {
    let mut g = new_graph(GraphOptions::default());
    g.set_edge_named("a", "b", Some("one"), Some(1));
    g.set_edge_named("a", "b", Some("two"), Some(2));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge("a", "b", None), Some(&2));
}

#[test]
fn successors_and_predecessors_follow_direction() {
    let mut g = new_graph(GraphOptions::default());
    g.set_edge("a", "b");
    g.set_edge("a", "c");
    g.set_edge("c", "a");

    assert_eq!(g.successors("a"), vec!["b", "c"]);
    assert_eq!(g.predecessors("a"), vec!["c"]);
    assert_eq!(g.neighbors("a"), vec!["b", "c"]);
}

#[test]
fn out_edges_filter_by_target() {
    let mut g = new_graph(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    g.set_edge("a", "b");
    g.set_edge_named("a", "b", Some("x"), Some(0));
    g.set_edge("a", "c");

    assert_eq!(g.out_edges("a", None).len(), 3);
    assert_eq!(g.out_edges("a", Some("b")).len(), 2);
    assert_eq!(g.in_edges("b", Some("a")).len(), 2);
}

#[test]
fn sources_and_sinks() {
    let mut g = new_graph(GraphOptions::default());
    g.set_path(&["a", "b", "c"]);
    assert_eq!(g.sources(), vec!["a"]);
    assert_eq!(g.sinks(), vec!["c"]);
}

#[test]
fn parent_links_require_compound() {
    let mut g = new_graph(GraphOptions::default());
    g.set_node("a", String::new());
    g.set_parent("a", "p");
    assert_eq!(g.parent("a"), None);

    let mut g = new_graph(GraphOptions {
        compound: true,
        ..Default::default()
    });
    g.set_parent("a", "p");
    assert_eq!(g.parent("a"), Some("p"));
    assert_eq!(g.children("p"), vec!["a"]);
    assert_eq!(g.children_root(), vec!["p"]);
}

#[test]
fn reparenting_moves_the_child() {
    let mut g = new_graph(GraphOptions {
        compound: true,
        ..Default::default()
    });
    g.set_parent("a", "p");
    g.set_parent("a", "q");
    assert_eq!(g.parent("a"), Some("q"));
    assert!(g.children("p").is_empty());
}

#[test]
fn filter_nodes_keeps_induced_edges_and_parents() {
    let mut g: Graph<String, u32, ()> = Graph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    for id in ["a", "b", "c"] {
        g.set_node(id, id.to_string());
    }
    g.set_edge_with_label("a", "b", 1);
    g.set_edge_with_label("b", "c", 2);
    g.set_parent("a", "b");

    let sub = g.filter_nodes(|id, _| id != "c");

    assert_eq!(sub.node_count(), 2);
    assert_eq!(sub.edge_count(), 1);
    assert_eq!(sub.edge("a", "b", None), Some(&1));
    assert_eq!(sub.parent("a"), Some("b"));
}

#[test]
fn copy_preserves_everything() {
    let mut g = new_graph(GraphOptions {
        multigraph: true,
        ..Default::default()
    });
    g.set_node("a", "label".to_string());
    g.set_edge_named("a", "b", Some("x"), Some(9));

    let copy = g.copy();
    assert_eq!(copy.node_count(), g.node_count());
    assert_eq!(copy.edge("a", "b", Some("x")), Some(&9));
}

#[test]
fn undirected_graphs_canonicalize_endpoints() {
    let mut g: TestGraph = Graph::new(GraphOptions {
        directed: false,
        ..Default::default()
    });
    g.set_edge_with_label("b", "a", 5);

    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge("a", "b", None), Some(&5));
    assert_eq!(g.edge("b", "a", None), Some(&5));
    assert!(g.has_edge("a", "b", None));

    assert_eq!(g.neighbors("a"), vec!["b"]);
    assert_eq!(g.successors("a"), vec!["b"]);
    assert_eq!(g.predecessors("b"), vec!["a"]);
}

#[test]
fn self_loops_count_once_in_node_edges() {
    let mut g = new_graph(GraphOptions::default());
    g.set_edge("a", "a");
    g.set_edge("a", "b");
    assert_eq!(g.node_edges("a").len(), 2);
}
