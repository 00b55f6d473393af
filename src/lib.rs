// Public library interface for squarify-rs
// The debug-layout tool uses the same modules to lay out scanned directories.

pub mod error;
pub mod layout;
pub mod tree;

pub use error::{LayoutError, Result};
pub use layout::geometry::{Direction, Rectangle};
pub use layout::{compute_layout, try_compute_layout};
pub use tree::nested::Nested;
pub use tree::node::{InternalNode, LazyNode, LeafNode, Node};
pub use tree::Weighted;
