use selkie::graphlib::{Graph, GraphOptions};
use selkie::{EdgeValue, GraphValue, NodeValue, acyclic, greedy_fas};

fn new_graph() -> Graph<NodeValue, EdgeValue, GraphValue> {
    let mut g: Graph<NodeValue, EdgeValue, GraphValue> = Graph::new(GraphOptions {
        directed: true,
        multigraph: true,
        compound: false,
    });
    g.set_graph(GraphValue::default());
    g.set_default_node_label(NodeValue::default);
    g.set_default_edge_label(EdgeValue::default);
    g
}

fn is_acyclic(g: &Graph<NodeValue, EdgeValue, GraphValue>) -> bool {
    let mut in_degree: std::collections::HashMap<String, usize> = g
        .node_ids()
        .into_iter()
        .map(|id| {
            let d = g.in_edges(&id, None).len();
            (id, d)
        })
        .collect();
    let mut queue: Vec<String> = in_degree
        .iter()
        .filter(|&(_, &d)| d == 0)
        .map(|(id, _)| id.clone())
        .collect();
    let mut seen = 0usize;
    while let Some(v) = queue.pop() {
        seen += 1;
        for e in g.out_edges(&v, None) {
            let d = in_degree.get_mut(&e.w).unwrap();
            *d -= 1;
            if *d == 0 {
                queue.push(e.w.clone());
            }
        }
    }
    seen == g.node_count()
}

#[test]
fn breaks_a_triangle_by_reversing_one_edge() {
    let mut g = new_graph();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("c", "a");

    acyclic::run(&mut g);

    assert!(is_acyclic(&g));
    assert_eq!(g.edge_count(), 3);
    let reversed: Vec<_> = g
        .edge_keys()
        .into_iter()
        .filter(|e| g.edge_by_key(e).unwrap().reversed)
        .collect();
    assert_eq!(reversed.len(), 1);
}

#[test]
fn undo_restores_the_original_orientation() {
    let mut g = new_graph();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("c", "a");

    acyclic::run(&mut g);
    acyclic::undo(&mut g);

    assert!(g.has_edge("a", "b", None));
    assert!(g.has_edge("b", "c", None));
    assert!(g.has_edge("c", "a", None));
    for e in g.edges() {
        let label = g.edge_by_key(e).unwrap();
        assert!(!label.reversed);
        assert!(label.forward_name.is_none());
    }
}

#[test]
fn reverse_points_flips_only_reversed_polylines() {
    let mut g = new_graph();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("c", "a");
    acyclic::run(&mut g);

    let mut p0 = selkie::Point::default();
    p0.y = 1.0;
    let mut p1 = selkie::Point::default();
    p1.y = 2.0;
    g.for_each_edge_mut(|_e, label| {
        label.points = vec![p0, p1];
    });

    acyclic::reverse_points(&mut g);

    g.for_each_edge(|_e, label| {
        if label.reversed {
            assert_eq!(label.points[0].y, 2.0);
        } else {
            assert_eq!(label.points[0].y, 1.0);
        }
    });
}

#[test]
fn self_loops_are_stashed_for_emit() {
    let mut g = new_graph();
    g.set_edge("a", "a");
    g.set_edge("a", "b");

    acyclic::run(&mut g);

    assert!(!g.has_edge("a", "a", None));
    assert_eq!(g.graph().self_loops.len(), 1);
    assert_eq!(g.graph().self_loops[0].node, "a");
}

#[test]
fn greedy_fas_output_breaks_all_cycles() {
    let mut g = new_graph();
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("c", "a");
    g.set_edge("c", "d");
    g.set_edge("d", "b");

    let fas = greedy_fas::greedy_fas(&g);
    assert!(!fas.is_empty());
    for e in &fas {
        g.remove_edge_key(e);
    }
    assert!(is_acyclic(&g));
}

#[test]
fn duplicate_removal_keeps_the_unreversed_copy() {
    let mut g = new_graph();
    g.set_edge_named(
        "a",
        "b",
        Some("fwd"),
        Some(EdgeValue {
            e: Some("e0".to_string()),
            ..Default::default()
        }),
    );
    g.set_edge_named(
        "a",
        "b",
        Some("rev1"),
        Some(EdgeValue {
            e: Some("e0".to_string()),
            reversed: true,
            ..Default::default()
        }),
    );

    acyclic::remove_duplicate_edges(&mut g);

    assert_eq!(g.edge_count(), 1);
    assert!(g.has_edge("a", "b", Some("fwd")));
}
