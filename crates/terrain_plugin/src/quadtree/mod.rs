//! Fixed-depth quadtree over one surface tile, plus per-frame selection.

pub(crate) mod node;
pub(crate) mod selection;
pub(crate) mod tree;

pub use node::{Node, NodeId};
pub use selection::{SelectedNode, Selection};
pub use tree::{num_lods_for_tile, QuadTree};
