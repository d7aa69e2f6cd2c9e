use selkie::graphlib::{Graph, GraphOptions};
use selkie::{EdgeValue, Error, GraphValue, NodeValue, PrefRank, rank};

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

fn gansner_graph() -> Graph<NodeValue, EdgeValue, GraphValue> {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c", "d", "h"]);
    g.set_path(&["a", "e", "g", "h"]);
    g.set_path(&["a", "f", "g"]);
    g
}

fn assert_respects_minlen(g: &Graph<NodeValue, EdgeValue, GraphValue>) {
    for e in g.edges() {
        let v_rank = g.node(&e.v).unwrap().rank.unwrap();
        let w_rank = g.node(&e.w).unwrap().rank.unwrap();
        let minlen = g.edge_by_key(e).unwrap().minlen as i32;
        assert!(
            w_rank - v_rank >= minlen,
            "edge {} -> {} violates minlen {}: {} - {}",
            e.v,
            e.w,
            minlen,
            w_rank,
            v_rank
        );
    }
}

#[test]
fn simplex_ranking_respects_minlen() {
    let mut g = gansner_graph();
    rank::rank(&mut g).unwrap();
    assert_respects_minlen(&g);
}

#[test]
fn tight_tree_only_ranking_respects_minlen() {
    let mut g = gansner_graph();
    g.graph_mut().use_simplex = false;
    rank::rank(&mut g).unwrap();
    assert_respects_minlen(&g);
}

#[test]
fn a_single_node_gets_rank_zero() {
    let mut g = new_graph();
    g.set_node("a", NodeValue::default());
    rank::rank(&mut g).unwrap();
    assert_eq!(g.node("a").unwrap().rank, Some(0));
}

#[test]
fn every_component_starts_at_rank_zero() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_path(&["x", "y"]);
    rank::rank(&mut g).unwrap();

    assert_eq!(g.node("a").unwrap().rank, Some(0));
    assert_eq!(g.node("x").unwrap().rank, Some(0));
    assert_respects_minlen(&g);
}

#[test]
fn respects_larger_minlen_values() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge_with_label(
        "a",
        "c",
        EdgeValue {
            minlen: 5,
            ..Default::default()
        },
    );
    rank::rank(&mut g).unwrap();
    assert_respects_minlen(&g);
    let span = g.node("c").unwrap().rank.unwrap() - g.node("a").unwrap().rank.unwrap();
    assert!(span >= 5);
}

#[test]
fn a_cycle_is_a_fatal_error() {
    let mut g = new_graph();
    g.set_edge("a", "b");
    g.set_edge("b", "a");
    let err = rank::rank(&mut g).unwrap_err();
    assert!(matches!(err, Error::NotAcyclic));
}

#[test]
fn integer_rank_classes_collapse_to_one_rank() {
    let mut g = new_graph();
    g.set_node("a", NodeValue::default());
    g.set_node(
        "b",
        NodeValue {
            pref_rank: Some(PrefRank::Same(3)),
            ..Default::default()
        },
    );
    g.set_node("c", NodeValue::default());
    g.set_node(
        "d",
        NodeValue {
            pref_rank: Some(PrefRank::Same(3)),
            ..Default::default()
        },
    );
    g.set_edge("a", "b");
    g.set_edge("a", "c");
    g.set_edge("c", "d");

    rank::rank(&mut g).unwrap();
    assert_eq!(g.node("b").unwrap().rank, g.node("d").unwrap().rank);
}

#[test]
fn min_constraint_ranks_no_later_than_any_node() {
    let mut g = new_graph();
    g.set_node(
        "m",
        NodeValue {
            pref_rank: Some(PrefRank::Min),
            ..Default::default()
        },
    );
    for id in ["a", "b", "c"] {
        g.set_node(id, NodeValue::default());
    }
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("a", "m");

    rank::rank(&mut g).unwrap();
    let m = g.node("m").unwrap().rank.unwrap();
    for id in ["a", "b", "c"] {
        assert!(m <= g.node(id).unwrap().rank.unwrap());
    }
}

#[test]
fn max_constraint_ranks_no_earlier_than_any_node() {
    let mut g = new_graph();
    g.set_node(
        "m",
        NodeValue {
            pref_rank: Some(PrefRank::Max),
            ..Default::default()
        },
    );
    for id in ["a", "b", "c"] {
        g.set_node(id, NodeValue::default());
    }
    g.set_edge("a", "b");
    g.set_edge("b", "c");
    g.set_edge("m", "c");

    rank::rank(&mut g).unwrap();
    let m = g.node("m").unwrap().rank.unwrap();
    for id in ["a", "b", "c"] {
        assert!(m >= g.node(id).unwrap().rank.unwrap());
    }
}

#[test]
fn members_of_a_rank_class_keep_their_incident_edges_ranked() {
    // Edges into and out of a collapsed class still constrain the class rank.
    let mut g = new_graph();
    g.set_node("top", NodeValue::default());
    for id in ["u", "v"] {
        g.set_node(
            id,
            NodeValue {
                pref_rank: Some(PrefRank::Same(0)),
                ..Default::default()
            },
        );
    }
    g.set_node("bottom", NodeValue::default());
    g.set_edge("top", "u");
    g.set_edge("v", "bottom");

    rank::rank(&mut g).unwrap();
    let class_rank = g.node("u").unwrap().rank.unwrap();
    assert_eq!(g.node("v").unwrap().rank, Some(class_rank));
    assert!(g.node("top").unwrap().rank.unwrap() < class_rank);
    assert!(g.node("bottom").unwrap().rank.unwrap() > class_rank);
}
