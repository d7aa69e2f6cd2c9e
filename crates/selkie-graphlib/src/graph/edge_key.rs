//! Edge identity.
//!
//! Edges are identified by their endpoints plus an optional `name`, which is only
//! meaningful for multigraphs. Undirected graphs canonicalize endpoint order on
//! insertion so `(v, w)` and `(w, v)` refer to the same edge.

use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
    pub name: Option<String>,
}

impl EdgeKey {
    pub fn new(
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
    ) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
            name: name.map(Into::into),
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w && self.name == other.name
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.v.hash(state);
        self.w.hash(state);
        self.name.hash(state);
    }
}

/// Borrowed view of an [`EdgeKey`] so lookups don't have to allocate.
#[derive(Clone, Copy, Hash)]
pub(crate) struct EdgeKeyView<'a> {
    pub(crate) v: &'a str,
    pub(crate) w: &'a str,
    pub(crate) name: Option<&'a str>,
}

impl hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'_> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w && key.name.as_deref() == self.name
    }
}
