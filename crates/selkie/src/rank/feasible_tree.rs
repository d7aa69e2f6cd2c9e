//! Tight spanning tree construction over the current ranking.
//!
//! Starting from an arbitrary root, repeatedly add the non-tree edge with
//! minimum slack that touches the tree and shift the joining node so the edge
//! becomes tight. Callers collapse multi-edges (`util::simplify`) first.

use super::tree::{TreeEdgeValue, TreeNodeValue};
use super::util::slack;
use crate::graphlib::{EdgeKey, Graph, GraphOptions};
use crate::{EdgeValue, GraphValue, NodeValue};

pub fn feasible_tree(
    g: &mut Graph<NodeValue, EdgeValue, GraphValue>,
) -> Graph<TreeNodeValue, TreeEdgeValue, ()> {
    let mut t: Graph<TreeNodeValue, TreeEdgeValue, ()> = Graph::new(GraphOptions {
        directed: false,
        multigraph: false,
        compound: false,
    });

    let Some(start) = g.nodes().next().map(|id| id.to_string()) else {
        return t;
    };
    t.set_node(start, TreeNodeValue::default());
    let size = g.node_count();

    while t.node_count() < size {
        let mut best: Option<(i32, EdgeKey, bool)> = None;
        for e in g.edges() {
            let in_v = t.has_node(&e.v);
            let in_w = t.has_node(&e.w);
            if in_v == in_w {
                continue;
            }
            let s = slack(g, e);
            if best.as_ref().is_none_or(|(best_slack, _, _)| s < *best_slack) {
                // When the tail is already in the tree the head is joining.
                best = Some((s, e.clone(), in_v));
            }
        }

        let Some((s, e, head_joins)) = best else {
            // Ranking runs per weakly-connected component, so this only fires
            // on a graph that was never connected; start a new root.
            let Some(next) = g.nodes().find(|v| !t.has_node(v)).map(|id| id.to_string()) else {
                break;
            };
            t.set_node(next, TreeNodeValue::default());
            continue;
        };

        // Move the joining endpoint so the edge's slack becomes zero.
        let joining = if head_joins { &e.w } else { &e.v };
        if let Some(node) = g.node_mut(joining) {
            let base = node.rank.unwrap_or(0);
            node.rank = Some(if head_joins { base - s } else { base + s });
        }
        t.set_node(joining.clone(), TreeNodeValue::default());
        t.set_edge(e.v.clone(), e.w.clone());
    }

    t
}
