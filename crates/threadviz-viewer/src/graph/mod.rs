pub mod model;
pub mod tree;

pub use model::{LayoutEdge, LayoutNode, ThreadLayout};
pub use tree::layout_thread;
