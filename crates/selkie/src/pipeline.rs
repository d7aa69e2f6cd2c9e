//! The layout pipeline.
//!
//! `layout` builds a fresh working graph from the input, runs the stages in
//! order, and emits a new output graph. Stages are strictly sequential and a
//! failing stage aborts the run with no partial result. The build stage doubles
//! every edge's minlen while the working ranksep is halved (reserving a label
//! rank between layers); both live only on the working graph, so the caller's
//! configuration is untouched on every exit path.

use crate::error::{Error, Result};
use crate::graphlib::{Graph, GraphOptions};
use crate::{
    EdgeValue, GraphValue, LayoutConfig, NodeValue, acyclic, coordinate_system, normalize, order,
    position, rank, util,
};

pub fn layout(
    input: &Graph<NodeValue, EdgeValue, GraphValue>,
    config: &LayoutConfig,
) -> Result<Graph<NodeValue, EdgeValue, GraphValue>> {
    let debug = config.debug_level;

    let mut g = timed(debug, "build", || build(input, config))?;
    probe(debug, &g, "build");

    timed(debug, "acyclic", || acyclic::run(&mut g));
    if !input.is_directed() {
        acyclic::remove_duplicate_edges(&mut g);
    }
    probe(debug, &g, "acyclic");

    timed(debug, "rank", || rank::rank(&mut g))?;
    probe(debug, &g, "rank");

    timed(debug, "normalize", || normalize::run(&mut g));
    probe(debug, &g, "normalize");

    timed(debug, "order", || order::order(&mut g));

    coordinate_system::adjust(&mut g);
    timed(debug, "position", || position::position(&mut g));

    timed(debug, "denormalize", || normalize::undo(&mut g));
    coordinate_system::undo(&mut g);
    translate(&mut g);

    timed(debug, "fixup", || acyclic::reverse_points(&mut g));
    timed(debug, "unacyclic", || acyclic::undo(&mut g));

    let out = timed(debug, "emit", || emit(&g, input));
    Ok(out)
}

fn timed<T>(debug: u8, name: &str, f: impl FnOnce() -> T) -> T {
    if debug >= 1 { util::time(name, f) } else { f() }
}

fn probe(debug: u8, g: &Graph<NodeValue, EdgeValue, GraphValue>, stage: &str) {
    if debug >= 2 {
        util::stage_probe(g, stage);
    }
}

/// Constructs the working graph: validated copies of the input's nodes and
/// edges, with undirected edges mirrored into both directions, self state
/// cleared, original-edge ids assigned, and minlen doubled.
fn build(
    input: &Graph<NodeValue, EdgeValue, GraphValue>,
    config: &LayoutConfig,
) -> Result<Graph<NodeValue, EdgeValue, GraphValue>> {
    validate(input)?;

    let mut g: Graph<NodeValue, EdgeValue, GraphValue> = Graph::new(GraphOptions {
        directed: true,
        multigraph: true,
        compound: input.is_compound(),
    });
    let mut value = GraphValue::from_config(config);
    value.ranksep = config.ranksep / 2.0;
    g.set_graph(value);

    input.for_each_node(|id, node| {
        let mut node = node.clone();
        node.rank = None;
        node.order = None;
        node.dummy = false;
        node.edge = None;
        node.index = None;
        node.x = None;
        node.y = None;
        node.ul = None;
        node.ur = None;
        node.dl = None;
        node.dr = None;
        g.set_node(id, node);
    });

    let mut next_e = 0usize;
    input.for_each_edge(|key, label| {
        let mut label = label.clone();
        label.points.clear();
        label.reversed = false;
        label.forward_name = None;
        label.e = Some(format!("e{next_e}"));
        next_e += 1;
        label.minlen = label.minlen.max(1) * 2;

        g.set_edge_named(
            key.v.clone(),
            key.w.clone(),
            key.name.clone(),
            Some(label.clone()),
        );
        if !input.is_directed() && key.v != key.w {
            // Both orientations, sharing the original id; cycle breaking picks
            // one and the duplicate pass drops the other.
            g.set_edge_named(key.w.clone(), key.v.clone(), key.name.clone(), Some(label));
        }
    });

    if input.is_compound() {
        for id in input.node_ids() {
            if let Some(parent) = input.parent(&id) {
                g.set_parent(id.clone(), parent.to_string());
            }
        }
    }

    Ok(g)
}

fn validate(input: &Graph<NodeValue, EdgeValue, GraphValue>) -> Result<()> {
    let mut problem: Option<String> = None;

    input.for_each_node(|id, node| {
        if problem.is_some() {
            return;
        }
        for (what, value) in [("width", node.width), ("height", node.height)] {
            if !value.is_finite() || value < 0.0 {
                problem = Some(format!("node {id:?} has invalid {what} {value}"));
                return;
            }
        }
    });
    input.for_each_edge(|key, label| {
        if problem.is_some() {
            return;
        }
        if label.minlen < 1 {
            problem = Some(format!(
                "edge {} -> {} has minlen {} (must be >= 1)",
                key.v, key.w, label.minlen
            ));
            return;
        }
        for (what, value) in [("width", label.width), ("height", label.height)] {
            if !value.is_finite() || value < 0.0 {
                problem = Some(format!(
                    "edge {} -> {} has invalid {what} {value}",
                    key.v, key.w
                ));
                return;
            }
        }
    });

    match problem {
        Some(message) => Err(Error::InvalidInput { message }),
        None => Ok(()),
    }
}

/// Shifts the drawing so the minimum x/y is 0. Runs after the rankdir undo,
/// where only the rank axis can have gone negative; the cross-axis alignment
/// offsets were already normalized during positioning.
fn translate(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    g.for_each_node(|_id, node| {
        if let (Some(x), Some(y)) = (node.x, node.y) {
            min_x = min_x.min(x - node.width / 2.0);
            min_y = min_y.min(y - node.height / 2.0);
        }
    });
    g.for_each_edge(|_e, label| {
        for p in &label.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
        }
    });

    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }
    g.for_each_node_mut(|_id, node| {
        if let Some(x) = node.x {
            node.x = Some(x - min_x);
        }
        if let Some(y) = node.y {
            node.y = Some(y - min_y);
        }
    });
    g.for_each_edge_mut(|_e, label| {
        for p in &mut label.points {
            p.x -= min_x;
            p.y -= min_y;
        }
    });
}

/// Packages the finished working graph into the output: original edge identity
/// restored, internal ids dropped, minlen and ranksep back at caller scale,
/// self-loops re-attached, cluster boxes computed.
fn emit(
    g: &Graph<NodeValue, EdgeValue, GraphValue>,
    input: &Graph<NodeValue, EdgeValue, GraphValue>,
) -> Graph<NodeValue, EdgeValue, GraphValue> {
    let mut out: Graph<NodeValue, EdgeValue, GraphValue> = Graph::new(GraphOptions {
        directed: input.is_directed(),
        multigraph: input.is_multigraph(),
        compound: input.is_compound(),
    });
    let mut value = g.graph().clone();
    value.ranksep *= 2.0;
    value.self_loops.clear();
    out.set_graph(value);

    g.for_each_node(|id, node| {
        let mut node = node.clone();
        node.rank = node.rank.map(|rank| rank.div_euclid(2));
        out.set_node(id, node);
    });
    if input.is_compound() {
        for id in g.node_ids() {
            if let Some(parent) = g.parent(&id) {
                out.set_parent(id.clone(), parent.to_string());
            }
        }
    }

    g.for_each_edge(|key, label| {
        let mut label = label.clone();
        label.e = None;
        label.minlen = (label.minlen / 2).max(1);
        out.set_edge_named(key.v.clone(), key.w.clone(), key.name.clone(), Some(label));
    });

    for self_loop in &g.graph().self_loops {
        let mut value = self_loop.value.clone();
        value.e = None;
        value.points.clear();
        value.minlen = (value.minlen / 2).max(1);
        out.set_edge_named(
            self_loop.node.clone(),
            self_loop.node.clone(),
            self_loop.name.clone(),
            Some(value),
        );
    }

    cluster_boxes(&mut out);
    out
}

/// Writes each cluster's enclosing box, deepest clusters first so nested boxes
/// feed their parents.
fn cluster_boxes(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    if !g.is_compound() {
        return;
    }

    let mut clusters: Vec<(usize, String)> = Vec::new();
    for id in g.node_ids() {
        if g.children(&id).is_empty() {
            continue;
        }
        let mut depth = 0usize;
        let mut cursor = id.clone();
        while let Some(parent) = g.parent(&cursor) {
            depth += 1;
            cursor = parent.to_string();
        }
        clusters.push((depth, id));
    }
    clusters.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, cluster) in clusters {
        let children: Vec<String> = g
            .children(&cluster)
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut left = f64::INFINITY;
        let mut right = f64::NEG_INFINITY;
        let mut top = f64::INFINITY;
        let mut bottom = f64::NEG_INFINITY;
        for child in &children {
            let Some(node) = g.node(child) else {
                continue;
            };
            let (Some(x), Some(y)) = (node.x, node.y) else {
                continue;
            };
            left = left.min(x - node.width / 2.0);
            right = right.max(x + node.width / 2.0);
            top = top.min(y - node.height / 2.0);
            bottom = bottom.max(y + node.height / 2.0);
        }
        if !left.is_finite() || !right.is_finite() {
            continue;
        }

        if let Some(node) = g.node_mut(&cluster) {
            node.width = right - left;
            node.height = bottom - top;
            node.x = Some((left + right) / 2.0);
            node.y = Some((top + bottom) / 2.0);
        }
    }
}
