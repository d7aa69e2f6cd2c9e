//! Internal arena entries for [`Graph`](super::Graph).

use super::EdgeKey;

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry<N> {
    pub(crate) id: String,
    pub(crate) label: N,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeEntry<E> {
    pub(crate) key: EdgeKey,
    pub(crate) v_ix: usize,
    pub(crate) w_ix: usize,
    pub(crate) label: E,
}
