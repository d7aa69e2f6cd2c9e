//! Rank assignment.
//!
//! The goal is an integer labeling `rank: V -> Z` minimizing total edge length
//! subject to `rank(w) - rank(v) >= minlen(v, w)`. Constraint classes
//! (`pref_rank`) are collapsed first, then every weakly-connected component
//! gets an initial feasible ranking, a tight spanning tree, and (when enabled)
//! a network-simplex refinement.

pub mod constraints;
pub mod feasible_tree;
pub mod init_rank;
pub mod network_simplex;
pub mod tree;
pub mod util;

use crate::error::Result;
use crate::graphlib::{Graph, alg};
use crate::{EdgeValue, GraphValue, NodeValue, acyclic};
use rustc_hash::FxHashSet;

pub fn rank(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) -> Result<()> {
    let Some(mut reduction) = constraints::combine_ranks(g) else {
        return assign_ranks(g);
    };

    // Redirection can introduce cycles; break them again before ranking.
    acyclic::run(&mut reduction.graph);
    constraints::check_feasible(&reduction)?;
    assign_ranks(&mut reduction.graph)?;
    constraints::expand_ranks(g, &reduction);
    Ok(())
}

/// Ranks `g` in place: initial feasible ranking, then per-component
/// refinement and a shift to min rank 0.
fn assign_ranks(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) -> Result<()> {
    init_rank::init_rank(g)?;

    let use_simplex = g.graph().use_simplex;
    for component in alg::components(g) {
        let members: FxHashSet<&str> = component.iter().map(|id| id.as_str()).collect();
        let filtered = g.filter_nodes(|id, _| members.contains(id));
        let mut sub = crate::util::simplify(&filtered);

        let mut t = feasible_tree::feasible_tree(&mut sub);
        if use_simplex {
            network_simplex::refine(&mut t, &mut sub)?;
        }
        util::normalize_component(&mut sub);

        for v in sub.node_ids() {
            let rank = sub.node(&v).and_then(|n| n.rank);
            if let (Some(rank), Some(label)) = (rank, g.node_mut(&v)) {
                label.rank = Some(rank);
            }
        }
    }

    Ok(())
}
