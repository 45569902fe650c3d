//! Contains logic for mapping between the flat span representation and the span tree.
//!
//!     Formatting and every transform work on a tree: each node is a run of text or a span
//!     holding child nodes. [`flat_to_nested`] builds the tree from a document and
//!     [`nested_to_flat`] rebuilds a document from a (possibly transformed) tree.

pub mod flat_to_nested;
pub mod nested_to_flat;
pub mod node;

pub use flat_to_nested::to_tree;
pub use nested_to_flat::to_document;
pub use node::{top_down, Node, Transformer};
