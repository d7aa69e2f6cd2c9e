//! The graph container.

mod edge_key;
mod entries;
mod options;

pub mod alg;

pub use edge_key::EdgeKey;
pub use options::GraphOptions;

use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;

type FxHashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,

    graph_label: G,
    default_node_label: Box<dyn Fn() -> N + Send + Sync>,
    default_edge_label: Box<dyn Fn() -> E + Send + Sync>,

    // Append-only arenas; a removed entry leaves a `None` tombstone so the
    // surviving indices remain stable.
    nodes: Vec<Option<NodeEntry<N>>>,
    node_index: FxHashMap<String, usize>,
    live_nodes: usize,

    edges: Vec<Option<EdgeEntry<E>>>,
    edge_index: FxHashMap<EdgeKey, usize>,
    live_edges: usize,

    // Per-node incident edge lists, in edge insertion order.
    out_adj: Vec<Vec<usize>>,
    in_adj: Vec<Vec<usize>>,

    parent: FxHashMap<String, String>,
    children: FxHashMap<String, Vec<String>>,
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            default_node_label: Box::new(N::default),
            default_edge_label: Box::new(E::default),
            nodes: Vec::new(),
            node_index: FxHashMap::default(),
            live_nodes: 0,
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
            live_edges: 0,
            out_adj: Vec::new(),
            in_adj: Vec::new(),
            parent: FxHashMap::default(),
            children: FxHashMap::default(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Box::new(f);
        self
    }

    // ----- nodes -----

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(id.as_str()) {
            if let Some(entry) = self.nodes[ix].as_mut() {
                entry.label = label;
            }
            return self;
        }
        let ix = self.nodes.len();
        self.nodes.push(Some(NodeEntry {
            id: id.clone(),
            label,
        }));
        self.node_index.insert(id, ix);
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        self.live_nodes += 1;
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(id.as_str()) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        let &ix = self.node_index.get(id)?;
        self.nodes[ix].as_ref().map(|entry| &entry.label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        let &ix = self.node_index.get(id)?;
        self.nodes[ix].as_mut().map(|entry| &mut entry.label)
    }

    pub fn node_count(&self) -> usize {
        self.live_nodes
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter_map(|slot| slot.as_ref())
            .map(|entry| entry.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes().map(|id| id.to_string()).collect()
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(ix) = self.node_index.remove(id) else {
            return false;
        };

        let mut incident: Vec<usize> = Vec::new();
        incident.extend(self.out_adj[ix].iter().copied());
        for &e_ix in &self.in_adj[ix] {
            if !incident.contains(&e_ix) {
                incident.push(e_ix);
            }
        }
        for e_ix in incident {
            self.remove_edge_ix(e_ix);
        }

        self.nodes[ix] = None;
        self.live_nodes -= 1;

        if let Some(parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent.as_str()) {
                siblings.retain(|c| c != id);
            }
        }
        if let Some(orphans) = self.children.remove(id) {
            for child in orphans {
                self.parent.remove(child.as_str());
            }
        }

        true
    }

    // ----- edges -----

    fn canonical_ends(&self, v: String, w: String) -> (String, String) {
        if !self.options.directed && w < v {
            (w, v)
        } else {
            (v, w)
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let (v, w) = self.canonical_ends(v.into(), w.into());
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        let name = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };
        let key = EdgeKey { v, w, name };

        if let Some(&ix) = self.edge_index.get(&key) {
            if let Some(label) = label {
                if let Some(entry) = self.edges[ix].as_mut() {
                    entry.label = label;
                }
            }
            return self;
        }

        let v_ix = self.node_index[key.v.as_str()];
        let w_ix = self.node_index[key.w.as_str()];
        let ix = self.edges.len();
        self.edges.push(Some(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        }));
        self.edge_index.insert(key, ix);
        self.out_adj[v_ix].push(ix);
        self.in_adj[w_ix].push(ix);
        self.live_edges += 1;
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    fn edge_ix(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        let (v, w) = if !self.options.directed && w < v {
            (w, v)
        } else {
            (v, w)
        };
        let name = if self.options.multigraph { name } else { None };
        self.edge_index.get(&EdgeKeyView { v, w, name }).copied()
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_ix(v, w, name).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let ix = self.edge_ix(v, w, name)?;
        self.edges[ix].as_ref().map(|entry| &entry.label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let ix = self.edge_ix(v, w, name)?;
        self.edges[ix].as_mut().map(|entry| &mut entry.label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w, key.name.as_deref())
    }

    pub fn edge_mut_by_key(&mut self, key: &EdgeKey) -> Option<&mut E> {
        self.edge_mut(&key.v, &key.w, key.name.as_deref())
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let Some(ix) = self.edge_ix(v, w, name) else {
            return false;
        };
        self.remove_edge_ix(ix);
        true
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> bool {
        self.remove_edge(&key.v, &key.w, key.name.as_deref())
    }

    fn remove_edge_ix(&mut self, ix: usize) {
        let Some(entry) = self.edges[ix].take() else {
            return;
        };
        self.edge_index.remove(&entry.key);
        self.out_adj[entry.v_ix].retain(|&e| e != ix);
        self.in_adj[entry.w_ix].retain(|&e| e != ix);
        self.live_edges -= 1;
    }

    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges
            .iter()
            .filter_map(|slot| slot.as_ref())
            .map(|entry| &entry.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges().cloned().collect()
    }

    /// Edges leaving `v`. For undirected graphs this is every incident edge.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        self.directed_edges(v, w, true)
    }

    /// Edges entering `v`. For undirected graphs this is every incident edge.
    pub fn in_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        self.directed_edges(v, w, false)
    }

    fn directed_edges(&self, v: &str, other: Option<&str>, outgoing: bool) -> Vec<EdgeKey> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        if !self.options.directed {
            return self
                .incident_edge_ixs(ix)
                .into_iter()
                .filter_map(|e_ix| self.edges[e_ix].as_ref())
                .filter(|entry| {
                    other.is_none_or(|o| {
                        let far = if entry.key.v == v {
                            entry.key.w.as_str()
                        } else {
                            entry.key.v.as_str()
                        };
                        far == o
                    })
                })
                .map(|entry| entry.key.clone())
                .collect();
        }

        let adj = if outgoing {
            &self.out_adj[ix]
        } else {
            &self.in_adj[ix]
        };
        adj.iter()
            .filter_map(|&e_ix| self.edges[e_ix].as_ref())
            .filter(|entry| {
                other.is_none_or(|o| {
                    let far = if outgoing {
                        entry.key.w.as_str()
                    } else {
                        entry.key.v.as_str()
                    };
                    far == o
                })
            })
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Every edge incident to `v`, regardless of direction.
    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        self.incident_edge_ixs(ix)
            .into_iter()
            .filter_map(|e_ix| self.edges[e_ix].as_ref())
            .map(|entry| entry.key.clone())
            .collect()
    }

    fn incident_edge_ixs(&self, ix: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self.out_adj[ix].clone();
        for &e_ix in &self.in_adj[ix] {
            if !out.contains(&e_ix) {
                out.push(e_ix);
            }
        }
        out
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        self.out_adj[ix]
            .iter()
            .filter_map(|&e_ix| self.edges[e_ix].as_ref())
            .map(|entry| entry.key.w.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        self.in_adj[ix]
            .iter()
            .filter_map(|&e_ix| self.edges[e_ix].as_ref())
            .map(|entry| entry.key.v.as_str())
            .collect()
    }

    /// Adjacent nodes, deduplicated, in first-seen edge order.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let Some(&ix) = self.node_index.get(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::new();
        for e_ix in self.incident_edge_ixs(ix) {
            let Some(entry) = self.edges[e_ix].as_ref() else {
                continue;
            };
            let far = if entry.key.v == v {
                entry.key.w.as_str()
            } else {
                entry.key.v.as_str()
            };
            if !out.contains(&far) {
                out.push(far);
            }
        }
        out
    }

    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(ix, slot)| slot.as_ref().map(|entry| (ix, entry)))
            .filter(|(ix, _)| self.in_adj[*ix].is_empty())
            .map(|(_, entry)| entry.id.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(ix, slot)| slot.as_ref().map(|entry| (ix, entry)))
            .filter(|(ix, _)| self.out_adj[*ix].is_empty())
            .map(|(_, entry)| entry.id.as_str())
            .collect()
    }

    // ----- bulk traversal -----

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for entry in self.nodes.iter().filter_map(|slot| slot.as_ref()) {
            f(&entry.id, &entry.label);
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for entry in self.nodes.iter_mut().filter_map(|slot| slot.as_mut()) {
            f(&entry.id, &mut entry.label);
        }
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for entry in self.edges.iter().filter_map(|slot| slot.as_ref()) {
            f(&entry.key, &entry.label);
        }
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&EdgeKey, &mut E),
    {
        for entry in self.edges.iter_mut().filter_map(|slot| slot.as_mut()) {
            f(&entry.key, &mut entry.label);
        }
    }

    // ----- compound support -----

    pub fn set_parent(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        if !self.options.compound {
            return self;
        }
        let child = child.into();
        let parent = parent.into();
        self.ensure_node(child.clone());
        self.ensure_node(parent.clone());
        if let Some(prev) = self.parent.insert(child.clone(), parent.clone()) {
            if let Some(siblings) = self.children.get_mut(prev.as_str()) {
                siblings.retain(|c| c != &child);
            }
        }
        let entry = self.children.entry(parent).or_default();
        if !entry.contains(&child) {
            entry.push(child);
        }
        self
    }

    pub fn parent(&self, child: &str) -> Option<&str> {
        self.parent.get(child).map(|p| p.as_str())
    }

    pub fn children(&self, parent: &str) -> Vec<&str> {
        self.children
            .get(parent)
            .map(|c| c.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn children_root(&self) -> Vec<&str> {
        if !self.options.compound {
            return self.nodes().collect();
        }
        self.nodes()
            .filter(|id| !self.parent.contains_key(*id))
            .collect()
    }

    // ----- derived graphs -----

    /// A copy containing the nodes matching `pred` and the edges induced by them.
    /// Parent links among surviving nodes are preserved; default-label closures
    /// are reset to `Default`.
    pub fn filter_nodes(&self, mut pred: impl FnMut(&str, &N) -> bool) -> Self
    where
        N: Clone,
        E: Clone,
        G: Clone,
    {
        let mut out: Self = Graph::new(self.options);
        out.set_graph(self.graph_label.clone());

        for entry in self.nodes.iter().filter_map(|slot| slot.as_ref()) {
            if pred(&entry.id, &entry.label) {
                out.set_node(entry.id.clone(), entry.label.clone());
            }
        }
        for entry in self.edges.iter().filter_map(|slot| slot.as_ref()) {
            if out.has_node(&entry.key.v) && out.has_node(&entry.key.w) {
                out.set_edge_named(
                    entry.key.v.clone(),
                    entry.key.w.clone(),
                    entry.key.name.clone(),
                    Some(entry.label.clone()),
                );
            }
        }
        if self.options.compound {
            for id in self.nodes() {
                let Some(parent) = self.parent(id) else {
                    continue;
                };
                if out.has_node(id) && out.has_node(parent) {
                    out.set_parent(id, parent);
                }
            }
        }
        out
    }

    pub fn copy(&self) -> Self
    where
        N: Clone,
        E: Clone,
        G: Clone,
    {
        self.filter_nodes(|_, _| true)
    }
}

impl<N, E, G> std::fmt::Debug for Graph<N, E, G>
where
    N: Default + std::fmt::Debug + 'static,
    E: Default + std::fmt::Debug + 'static,
    G: Default + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("label", &self.graph_label)
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish()
    }
}
