use threadviz_core::ThreadNode;

/// A thread node with its computed position. Borrowed from the tree it
/// was laid out from and discarded with the layout.
#[derive(Debug, Clone)]
pub struct LayoutNode<'t> {
    pub parent: Option<usize>,
    pub depth: usize,
    pub data: &'t ThreadNode,
    pub x: f64,
    pub y: f64,
}

impl LayoutNode<'_> {
    pub fn has_children(&self) -> bool {
        !self.data.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutEdge {
    pub source: usize,
    pub target: usize,
}

impl LayoutEdge {
    pub fn touches(&self, index: usize) -> bool {
        self.source == index || self.target == index
    }
}

/// Nodes in pre-order (root first), one edge per non-root node.
#[derive(Debug, Clone)]
pub struct ThreadLayout<'t> {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<LayoutNode<'t>>,
    pub edges: Vec<LayoutEdge>,
}

impl<'t> ThreadLayout<'t> {
    pub fn root(&self) -> &LayoutNode<'t> {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> Option<&LayoutNode<'t>> {
        self.nodes.get(index)
    }

    pub fn incident_edges(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.touches(index))
            .map(|(i, _)| i)
    }
}
