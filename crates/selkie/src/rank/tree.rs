//! Label types for the tight spanning tree.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeNodeValue {
    pub low: i32,
    pub lim: i32,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeEdgeValue {
    pub cutvalue: f64,
}
