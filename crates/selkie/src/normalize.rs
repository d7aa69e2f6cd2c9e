//! Long-edge normalization and its undo.
//!
//! After ranking, an edge spanning more than one rank is replaced by a chain of
//! rank-adjacent dummy nodes. Every dummy carries the edge's label box (so the
//! label keeps its space through ordering and positioning) and an inline record
//! of the original edge. The chain's first and last dummy are marked `index`
//! 0/1 and become the edge's polyline; a lone dummy only reserves space.

use crate::graphlib::{EdgeKey, Graph};
use crate::{EdgeValue, GraphValue, NodeValue, OrigEdge, Point};

pub fn run(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    for e in g.edge_keys() {
        normalize_edge(g, e);
    }
}

fn normalize_edge(g: &mut Graph<NodeValue, EdgeValue, GraphValue>, e: EdgeKey) {
    let v_rank = g.node(&e.v).and_then(|n| n.rank).unwrap_or(0);
    let w_rank = g.node(&e.w).and_then(|n| n.rank).unwrap_or(0);
    if w_rank - v_rank <= 1 {
        return;
    }
    let Some(mut label) = g.edge_by_key(&e).cloned() else {
        return;
    };
    g.remove_edge_key(&e);

    label.points.clear();
    let orig = OrigEdge {
        id: label.e.clone().unwrap_or_default(),
        source: e.v.clone(),
        target: e.w.clone(),
        name: e.name.clone(),
        attrs: label.clone(),
    };

    let count = (w_rank - v_rank - 1) as usize;
    let mut prev = e.v.clone();
    for (i, rank) in (v_rank + 1..w_rank).enumerate() {
        let index = if count < 2 {
            None
        } else if i == 0 {
            Some(0)
        } else if i == count - 1 {
            Some(1)
        } else {
            None
        };

        let dummy = add_dummy_node(
            g,
            NodeValue {
                width: label.width,
                height: label.height,
                rank: Some(rank),
                dummy: true,
                edge: Some(orig.clone()),
                index,
                ..Default::default()
            },
        );

        g.set_edge_named(
            prev.clone(),
            dummy.clone(),
            e.name.clone(),
            Some(EdgeValue::default()),
        );
        prev = dummy;
    }
    g.set_edge_named(prev, e.w.clone(), e.name.clone(), Some(EdgeValue::default()));
}

fn add_dummy_node(g: &mut Graph<NodeValue, EdgeValue, GraphValue>, label: NodeValue) -> String {
    let id = crate::util::unused_node_id(g, "_d");
    g.set_node(id.clone(), label);
    id
}

/// Denormalization: re-creates each subdivided edge, writes the polyline points
/// contributed by the marked dummies, and deletes every dummy.
pub fn undo(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    for v in g.node_ids() {
        let Some(node) = g.node(&v) else {
            continue;
        };
        if !node.dummy {
            continue;
        }
        let node = node.clone();

        if let Some(orig) = &node.edge {
            if !g.has_edge(&orig.source, &orig.target, orig.name.as_deref()) {
                g.set_edge_named(
                    orig.source.clone(),
                    orig.target.clone(),
                    orig.name.clone(),
                    Some(orig.attrs.clone()),
                );
            }

            if let Some(index) = node.index {
                let point = Point {
                    x: node.x.unwrap_or(0.0),
                    y: node.y.unwrap_or(0.0),
                    ul: node.ul.unwrap_or(0.0),
                    ur: node.ur.unwrap_or(0.0),
                    dl: node.dl.unwrap_or(0.0),
                    dr: node.dr.unwrap_or(0.0),
                };
                if let Some(label) = g.edge_mut(&orig.source, &orig.target, orig.name.as_deref()) {
                    if index < label.points.len() {
                        label.points[index] = point;
                    } else {
                        label.points.push(point);
                    }
                }
            }
        }

        g.remove_node(&v);
    }
}
