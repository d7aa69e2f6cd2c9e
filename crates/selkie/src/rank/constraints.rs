//! Rank-constraint reduction.
//!
//! Nodes sharing a `pref_rank` class collapse into a single compound node so
//! the ranker sees one vertex per class. "min"/"max" classes additionally pin
//! themselves to the extremes with zero-length anchor edges. Compounds are
//! internal to the rank stage: `expand_ranks` broadcasts their final rank to
//! the members and the reduced graph is discarded.

use crate::error::{Error, Result};
use crate::graphlib::{Graph, GraphOptions};
use crate::{EdgeValue, GraphValue, NodeValue, PrefRank};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Clone)]
pub struct RankGroup {
    pub id: String,
    pub kind: PrefRank,
    pub members: Vec<String>,
}

#[derive(Debug)]
pub struct Reduction {
    pub graph: Graph<NodeValue, EdgeValue, GraphValue>,
    pub groups: Vec<RankGroup>,
}

/// Builds the reduced graph, or `None` when no node carries a constraint.
pub fn combine_ranks(g: &Graph<NodeValue, EdgeValue, GraphValue>) -> Option<Reduction> {
    let mut same: Vec<(i32, Vec<String>)> = Vec::new();
    let mut min_members: Vec<String> = Vec::new();
    let mut max_members: Vec<String> = Vec::new();

    g.for_each_node(|id, node| match node.pref_rank {
        Some(PrefRank::Same(k)) => match same.iter_mut().find(|(key, _)| *key == k) {
            Some((_, members)) => members.push(id.to_string()),
            None => same.push((k, vec![id.to_string()])),
        },
        Some(PrefRank::Min) => min_members.push(id.to_string()),
        Some(PrefRank::Max) => max_members.push(id.to_string()),
        None => {}
    });

    if same.is_empty() && min_members.is_empty() && max_members.is_empty() {
        return None;
    }

    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut fresh_id = |prefix: &str| -> String {
        for i in 0usize.. {
            let candidate = format!("{prefix}{i}");
            if !g.has_node(&candidate) && taken.insert(candidate.clone()) {
                return candidate;
            }
        }
        unreachable!()
    };

    let mut groups: Vec<RankGroup> = Vec::new();
    let mut compound_of: FxHashMap<String, String> = FxHashMap::default();
    for (k, members) in same {
        let id = fresh_id("_rc");
        for m in &members {
            compound_of.insert(m.clone(), id.clone());
        }
        groups.push(RankGroup {
            id,
            kind: PrefRank::Same(k),
            members,
        });
    }
    let min_compound = (!min_members.is_empty()).then(|| {
        let id = fresh_id("_rmin");
        for m in &min_members {
            compound_of.insert(m.clone(), id.clone());
        }
        groups.push(RankGroup {
            id: id.clone(),
            kind: PrefRank::Min,
            members: min_members.clone(),
        });
        id
    });
    let max_compound = (!max_members.is_empty()).then(|| {
        let id = fresh_id("_rmax");
        for m in &max_members {
            compound_of.insert(m.clone(), id.clone());
        }
        groups.push(RankGroup {
            id: id.clone(),
            kind: PrefRank::Max,
            members: max_members.clone(),
        });
        id
    });

    let min_set: FxHashSet<&String> = min_members.iter().collect();
    let max_set: FxHashSet<&String> = max_members.iter().collect();

    let mut reduced: Graph<NodeValue, EdgeValue, GraphValue> = Graph::new(GraphOptions {
        directed: true,
        multigraph: true,
        compound: false,
    });
    reduced.set_graph(g.graph().clone());

    // Nodes in insertion order; a compound appears where its first member did.
    g.for_each_node(|id, node| {
        match compound_of.get(id) {
            Some(compound) => {
                reduced.ensure_node(compound.clone());
            }
            None => {
                reduced.set_node(id, node.clone());
            }
        };
    });

    let map_end = |id: &str| -> String {
        compound_of
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    };

    let mut next_edge = 0usize;
    for e in g.edges() {
        let Some(label) = g.edge_by_key(e) else {
            continue;
        };
        let mut label = label.clone();
        // The main pass may already have flipped this edge; the reduction's own
        // cycle-breaking run owns the flag from here.
        label.reversed = false;
        label.forward_name = None;

        let (src, dst) = if min_set.contains(&e.w) {
            // In-edges of a "min" member leave the compound instead.
            (
                min_compound.clone().unwrap_or_else(|| map_end(&e.w)),
                map_end(&e.v),
            )
        } else if max_set.contains(&e.v) {
            // Out-edges of a "max" member enter the compound instead.
            (
                map_end(&e.w),
                max_compound.clone().unwrap_or_else(|| map_end(&e.v)),
            )
        } else {
            (map_end(&e.v), map_end(&e.w))
        };

        if src == dst {
            continue;
        }
        reduced.set_edge_named(src, dst, Some(format!("c{next_edge}")), Some(label));
        next_edge += 1;
    }

    // Zero-length anchors pin the extremes: "min" precedes every node,
    // "max" follows every node.
    if let Some(min_c) = &min_compound {
        for id in reduced.node_ids() {
            if &id == min_c {
                continue;
            }
            reduced.set_edge_named(
                min_c.clone(),
                id,
                Some(format!("z{next_edge}")),
                Some(EdgeValue {
                    minlen: 0,
                    ..Default::default()
                }),
            );
            next_edge += 1;
        }
    }
    if let Some(max_c) = &max_compound {
        for id in reduced.node_ids() {
            if &id == max_c {
                continue;
            }
            reduced.set_edge_named(
                id,
                max_c.clone(),
                Some(format!("z{next_edge}")),
                Some(EdgeValue {
                    minlen: 0,
                    ..Default::default()
                }),
            );
            next_edge += 1;
        }
    }

    Some(Reduction {
        graph: reduced,
        groups,
    })
}

/// Fails when the reduction's cycle-breaking pass had to reverse an edge
/// touching a min/max compound: such a reversal silently breaks the extreme
/// constraint instead of honoring it.
pub fn check_feasible(reduction: &Reduction) -> Result<()> {
    let pinned: FxHashSet<&str> = reduction
        .groups
        .iter()
        .filter(|group| matches!(group.kind, PrefRank::Min | PrefRank::Max))
        .map(|group| group.id.as_str())
        .collect();
    if pinned.is_empty() {
        return Ok(());
    }

    for e in reduction.graph.edges() {
        let Some(label) = reduction.graph.edge_by_key(e) else {
            continue;
        };
        if !label.reversed {
            continue;
        }
        if pinned.contains(e.v.as_str()) || pinned.contains(e.w.as_str()) {
            return Err(Error::RankConstraintInfeasible {
                message: format!("cycle through rank constraint at {} -> {}", e.v, e.w),
            });
        }
    }
    Ok(())
}

/// Copies ranks from the reduced graph back onto the full working graph.
pub fn expand_ranks(
    g: &mut Graph<NodeValue, EdgeValue, GraphValue>,
    reduction: &Reduction,
) {
    for group in &reduction.groups {
        let Some(rank) = reduction.graph.node(&group.id).and_then(|n| n.rank) else {
            continue;
        };
        for member in &group.members {
            if let Some(node) = g.node_mut(member) {
                node.rank = Some(rank);
            }
        }
    }

    for v in g.node_ids() {
        let Some(rank) = reduction.graph.node(&v).and_then(|n| n.rank) else {
            continue;
        };
        if let Some(node) = g.node_mut(&v) {
            node.rank = Some(rank);
        }
    }
}
