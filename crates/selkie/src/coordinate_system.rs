//! Coordinate system adjustment.
//!
//! Positioning always works top-to-bottom. For LR/RL layouts the label boxes
//! are swapped before positioning and the axes swapped back afterwards; BT/RL
//! additionally reflect the rank axis. The per-alignment offsets (`ul`..`dr`)
//! always describe the cross axis and survive the transforms unchanged.

use crate::graphlib::Graph;
use crate::{EdgeValue, GraphValue, NodeValue, RankDir};

pub fn adjust(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    match g.graph().rankdir {
        RankDir::LR | RankDir::RL => swap_width_height(g),
        RankDir::TB | RankDir::BT => {}
    }
}

pub fn undo(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    match g.graph().rankdir {
        RankDir::BT | RankDir::RL => reverse_y(g),
        RankDir::TB | RankDir::LR => {}
    }

    match g.graph().rankdir {
        RankDir::LR | RankDir::RL => {
            swap_xy(g);
            swap_width_height(g);
        }
        RankDir::TB | RankDir::BT => {}
    }
}

fn swap_width_height(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    g.for_each_node_mut(|_id, node| {
        (node.width, node.height) = (node.height, node.width);
    });
    g.for_each_edge_mut(|_e, label| {
        (label.width, label.height) = (label.height, label.width);
    });
}

fn reverse_y(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    g.for_each_node_mut(|_id, node| {
        if let Some(y) = node.y {
            node.y = Some(-y);
        }
    });
    g.for_each_edge_mut(|_e, label| {
        for p in &mut label.points {
            p.y = -p.y;
        }
    });
}

fn swap_xy(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) {
    g.for_each_node_mut(|_id, node| {
        if let (Some(x), Some(y)) = (node.x, node.y) {
            node.x = Some(y);
            node.y = Some(x);
        }
    });
    g.for_each_edge_mut(|_e, label| {
        for p in &mut label.points {
            (p.x, p.y) = (p.y, p.x);
        }
    });
}
