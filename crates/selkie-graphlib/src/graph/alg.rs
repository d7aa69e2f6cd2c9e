//! Traversal helpers shared by the layout pipeline.

use super::Graph;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Weakly connected components, in node discovery order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.node_ids() {
        if !seen.insert(start.clone()) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            comp.push(v.clone());
            for n in g.successors(&v) {
                if seen.insert(n.to_string()) {
                    queue.push_back(n.to_string());
                }
            }
            for n in g.predecessors(&v) {
                if seen.insert(n.to_string()) {
                    queue.push_back(n.to_string());
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Preorder DFS from `roots`, following neighbors. Later roots only contribute
/// nodes not already visited.
pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut out: Vec<String> = Vec::new();

    for root in roots {
        if visited.contains(*root) || !g.has_node(root) {
            continue;
        }
        let mut stack: Vec<String> = vec![root.to_string()];
        while let Some(v) = stack.pop() {
            if !visited.insert(v.clone()) {
                continue;
            }
            out.push(v.clone());
            let mut next: Vec<String> = g
                .neighbors(&v)
                .into_iter()
                .filter(|w| !visited.contains(*w))
                .map(|w| w.to_string())
                .collect();
            // Reverse so the first neighbor is popped first.
            next.reverse();
            stack.extend(next);
        }
    }

    out
}

/// Postorder DFS from `roots`, following neighbors.
pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let mut out: Vec<String> = Vec::new();

    for root in roots {
        if visited.contains(*root) || !g.has_node(root) {
            continue;
        }
        // (node, expanded) frames: a node is emitted when popped the second time.
        let mut stack: Vec<(String, bool)> = vec![(root.to_string(), false)];
        visited.insert(root.to_string());
        while let Some((v, expanded)) = stack.pop() {
            if expanded {
                out.push(v);
                continue;
            }
            stack.push((v.clone(), true));
            let mut next: Vec<String> = Vec::new();
            for w in g.neighbors(&v) {
                if !visited.contains(w) {
                    visited.insert(w.to_string());
                    next.push(w.to_string());
                }
            }
            next.reverse();
            for w in next {
                stack.push((w, false));
            }
        }
    }

    out
}
