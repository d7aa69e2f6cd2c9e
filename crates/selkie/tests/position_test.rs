use selkie::graphlib::{Graph, GraphOptions};
use selkie::{EdgeValue, GraphValue, NodeValue, position};

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

fn placed_node(rank: i32, order: usize, width: f64, height: f64) -> NodeValue {
    NodeValue {
        rank: Some(rank),
        order: Some(order),
        width,
        height,
        ..Default::default()
    }
}

fn two_parallel_chains() -> Graph<NodeValue, EdgeValue, GraphValue> {
    let mut g = new_graph();
    g.set_node("a", placed_node(0, 0, 20.0, 10.0));
    g.set_node("b", placed_node(0, 1, 20.0, 10.0));
    g.set_node("c", placed_node(1, 0, 20.0, 10.0));
    g.set_node("d", placed_node(1, 1, 20.0, 10.0));
    g.set_edge("a", "c");
    g.set_edge("b", "d");
    g
}

#[test]
fn ranks_stack_vertically_with_ranksep_gaps() {
    let mut g = two_parallel_chains();
    position::position(&mut g);

    let ranksep = g.graph().ranksep;
    let a = g.node("a").unwrap();
    let c = g.node("c").unwrap();
    assert_eq!(a.y, Some(5.0));
    assert_eq!(c.y, Some(10.0 + ranksep + 5.0));
}

#[test]
fn rank_mates_respect_node_separation() {
    let mut g = two_parallel_chains();
    position::position(&mut g);

    let nodesep = g.graph().nodesep;
    let a_x = g.node("a").unwrap().x.unwrap();
    let b_x = g.node("b").unwrap().x.unwrap();
    assert!(
        (b_x - a_x).abs() >= 20.0 + nodesep - 1e-9,
        "a and b are {} apart",
        (b_x - a_x).abs()
    );
}

#[test]
fn universalsep_overrides_the_separation_formula() {
    let mut g = two_parallel_chains();
    g.graph_mut().universalsep = Some(5.0);
    position::position(&mut g);

    let a_x = g.node("a").unwrap().x.unwrap();
    let b_x = g.node("b").unwrap().x.unwrap();
    assert!((b_x - a_x).abs() >= 5.0 - 1e-9);
    assert!((b_x - a_x).abs() < 70.0);
}

#[test]
fn every_positioned_node_carries_all_four_alignments() {
    let mut g = two_parallel_chains();
    position::position(&mut g);

    g.for_each_node(|id, node| {
        for (name, value) in [
            ("ul", node.ul),
            ("ur", node.ur),
            ("dl", node.dl),
            ("dr", node.dr),
        ] {
            let value = value.unwrap_or(f64::NAN);
            assert!(value.is_finite(), "node {id} alignment {name} is {value}");
        }
    });
}

#[test]
fn dummy_neighbors_use_edge_separation() {
    let mut g = new_graph();
    g.set_node("a", placed_node(0, 0, 20.0, 10.0));
    g.set_node(
        "_d",
        NodeValue {
            dummy: true,
            ..placed_node(0, 1, 0.0, 0.0)
        },
    );
    g.set_node("b", placed_node(1, 0, 20.0, 10.0));
    g.set_node("c", placed_node(1, 1, 20.0, 10.0));
    g.set_edge("a", "b");
    g.set_edge("_d", "c");
    position::position(&mut g);

    let edgesep = g.graph().edgesep;
    let a_x = g.node("a").unwrap().x.unwrap();
    let d_x = g.node("_d").unwrap().x.unwrap();
    assert!((d_x - a_x).abs() >= 10.0 + edgesep - 1e-9);
}

#[test]
fn a_lone_chain_is_a_straight_line() {
    let mut g = new_graph();
    g.set_node("a", placed_node(0, 0, 10.0, 10.0));
    g.set_node("b", placed_node(1, 0, 10.0, 10.0));
    g.set_node("c", placed_node(2, 0, 10.0, 10.0));
    g.set_path(&["a", "b", "c"]);
    position::position(&mut g);

    let a_x = g.node("a").unwrap().x.unwrap();
    let b_x = g.node("b").unwrap().x.unwrap();
    let c_x = g.node("c").unwrap().x.unwrap();
    assert!((a_x - b_x).abs() < 1e-9);
    assert!((b_x - c_x).abs() < 1e-9);
}
