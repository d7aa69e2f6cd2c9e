//! Initial feasible ranking.
//!
//! Kahn-style topological assignment driven by a decrease-key priority queue
//! on unresolved in-degree. Valid but not tight; the spanning tree and simplex
//! passes compact it afterwards.

use crate::error::{Error, Result};
use crate::graphlib::{Graph, PriorityQueue};
use crate::{EdgeValue, GraphValue, NodeValue};
use rustc_hash::FxHashMap;

pub fn init_rank(g: &mut Graph<NodeValue, EdgeValue, GraphValue>) -> Result<()> {
    let mut pq = PriorityQueue::new();
    for v in g.node_ids() {
        let in_degree = g.in_edges(&v, None).len() as i64;
        pq.add(v, in_degree);
    }

    let mut min_rank: FxHashMap<String, i32> = FxHashMap::default();

    while let Some(v) = pq.min().map(str::to_string) {
        if pq.priority(&v).unwrap_or(0) > 0 {
            return Err(Error::NotAcyclic);
        }
        pq.remove_min();

        let rank = min_rank.get(&v).copied().unwrap_or(0);
        if let Some(node) = g.node_mut(&v) {
            node.rank = Some(rank);
        }

        for e in g.out_edges(&v, None) {
            let minlen = g.edge_by_key(&e).map(|label| label.minlen).unwrap_or(1) as i32;
            let entry = min_rank.entry(e.w.clone()).or_insert(0);
            *entry = (*entry).max(rank + minlen);
            if let Some(priority) = pq.priority(&e.w) {
                pq.decrease(&e.w, priority - 1);
            }
        }
    }

    Ok(())
}
