//! Greedy feedback arc set selection (Eades–Lin–Smyth).
//!
//! Nodes are kept in buckets indexed by out-degree minus in-degree; sinks and
//! sources drain first, then the node with the highest degree difference is
//! removed and its surviving in-edges become feedback edges. Entries are
//! deleted lazily: a popped entry is discarded when the node is gone or has
//! since moved to another bucket.

use crate::graphlib::{EdgeKey, Graph};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let ids = g.node_ids();
    let n = ids.len();
    let ix_of: FxHashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(ix, id)| (id.as_str(), ix))
        .collect();

    // Collapse parallel edges; adjacency keeps first-occurrence order so the
    // selection is deterministic.
    let mut out_edges: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    let mut in_edges: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    let mut in_w: Vec<i64> = vec![0; n];
    let mut out_w: Vec<i64> = vec![0; n];
    let mut max_in: i64 = 0;
    let mut max_out: i64 = 0;

    for e in g.edges() {
        if e.v == e.w {
            continue;
        }
        let (Some(&v_ix), Some(&w_ix)) = (ix_of.get(e.v.as_str()), ix_of.get(e.w.as_str())) else {
            continue;
        };
        match out_edges[v_ix].iter_mut().find(|(to, _)| *to == w_ix) {
            Some((_, weight)) => *weight += 1,
            None => out_edges[v_ix].push((w_ix, 1)),
        }
        match in_edges[w_ix].iter_mut().find(|(from, _)| *from == v_ix) {
            Some((_, weight)) => *weight += 1,
            None => in_edges[w_ix].push((v_ix, 1)),
        }
        out_w[v_ix] += 1;
        in_w[w_ix] += 1;
        max_out = max_out.max(out_w[v_ix]);
        max_in = max_in.max(in_w[w_ix]);
    }

    let bucket_len = (max_out + max_in + 3).max(3) as usize;
    let zero_idx = max_in + 1;
    let mut buckets: Vec<VecDeque<usize>> = (0..bucket_len).map(|_| VecDeque::new()).collect();
    let mut bucket_of: Vec<Option<usize>> = vec![None; n];
    let mut alive: Vec<bool> = vec![true; n];
    let mut remaining = n;

    let assign_bucket = |ix: usize,
                         in_w: &[i64],
                         out_w: &[i64],
                         buckets: &mut [VecDeque<usize>],
                         bucket_of: &mut [Option<usize>]| {
        let bucket = if out_w[ix] == 0 {
            0
        } else if in_w[ix] == 0 {
            buckets.len() - 1
        } else {
            (out_w[ix] - in_w[ix] + zero_idx).clamp(0, (buckets.len() - 1) as i64) as usize
        };
        bucket_of[ix] = Some(bucket);
        buckets[bucket].push_back(ix);
    };

    for ix in 0..n {
        assign_bucket(ix, &in_w, &out_w, &mut buckets, &mut bucket_of);
    }

    // Pops the next entry of `bucket` that still belongs to it.
    fn pop_bucket(
        buckets: &mut [VecDeque<usize>],
        bucket: usize,
        alive: &[bool],
        bucket_of: &[Option<usize>],
    ) -> Option<usize> {
        while let Some(ix) = buckets[bucket].pop_front() {
            if alive[ix] && bucket_of[ix] == Some(bucket) {
                return Some(ix);
            }
        }
        None
    }

    let mut feedback: Vec<(usize, usize)> = Vec::new();

    let mut remove_node = |ix: usize,
                           alive: &mut [bool],
                           remaining: &mut usize,
                           in_w: &mut [i64],
                           out_w: &mut [i64],
                           buckets: &mut [VecDeque<usize>],
                           bucket_of: &mut [Option<usize>],
                           collect_feedback: bool| {
        alive[ix] = false;
        *remaining -= 1;
        for &(from, weight) in &in_edges[ix] {
            if !alive[from] {
                continue;
            }
            if collect_feedback {
                feedback.push((from, ix));
            }
            out_w[from] -= weight;
            assign_bucket(from, in_w, out_w, buckets, bucket_of);
        }
        for &(to, weight) in &out_edges[ix] {
            if !alive[to] {
                continue;
            }
            in_w[to] -= weight;
            assign_bucket(to, in_w, out_w, buckets, bucket_of);
        }
    };

    while remaining > 0 {
        while let Some(ix) = pop_bucket(&mut buckets, 0, &alive, &bucket_of) {
            remove_node(
                ix,
                &mut alive,
                &mut remaining,
                &mut in_w,
                &mut out_w,
                &mut buckets,
                &mut bucket_of,
                false,
            );
        }
        let last = bucket_len - 1;
        while let Some(ix) = pop_bucket(&mut buckets, last, &alive, &bucket_of) {
            remove_node(
                ix,
                &mut alive,
                &mut remaining,
                &mut in_w,
                &mut out_w,
                &mut buckets,
                &mut bucket_of,
                false,
            );
        }
        if remaining == 0 {
            break;
        }

        let mut picked: Option<usize> = None;
        for bucket in (1..last).rev() {
            if let Some(ix) = pop_bucket(&mut buckets, bucket, &alive, &bucket_of) {
                picked = Some(ix);
                break;
            }
        }
        let Some(ix) = picked else {
            // Every live node is mid-reassignment; fall back to insertion order.
            let Some(ix) = alive.iter().position(|&a| a) else {
                break;
            };
            remove_node(
                ix,
                &mut alive,
                &mut remaining,
                &mut in_w,
                &mut out_w,
                &mut buckets,
                &mut bucket_of,
                false,
            );
            continue;
        };
        remove_node(
            ix,
            &mut alive,
            &mut remaining,
            &mut in_w,
            &mut out_w,
            &mut buckets,
            &mut bucket_of,
            true,
        );
    }

    // Expand the collapsed pairs back to concrete edges of the input graph.
    let mut out: Vec<EdgeKey> = Vec::new();
    for (v_ix, w_ix) in feedback {
        out.extend(g.out_edges(&ids[v_ix], Some(ids[w_ix].as_str())));
    }
    out
}
