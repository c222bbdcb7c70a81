//! The fixed tree and graph the traversal engines walk.
//!
//! Both structures are immutable and carry the 2-D layout renderers use to
//! place nodes.

use serde::Serialize;

pub type NodeId = usize;

/// Position of a node on a 600x260 canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeLayout {
    pub id: NodeId,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TreeNode {
    left: Option<NodeId>,
    right: Option<NodeId>,
}

const TREE_NODES: [TreeNode; 7] = [
    TreeNode {
        left: Some(2),
        right: Some(3),
    },
    TreeNode {
        left: Some(4),
        right: Some(5),
    },
    TreeNode {
        left: Some(6),
        right: Some(7),
    },
    TreeNode {
        left: None,
        right: None,
    },
    TreeNode {
        left: None,
        right: None,
    },
    TreeNode {
        left: None,
        right: None,
    },
    TreeNode {
        left: None,
        right: None,
    },
];

const TREE_LAYOUT: [NodeLayout; 7] = [
    NodeLayout { id: 1, x: 300, y: 40 },
    NodeLayout { id: 2, x: 180, y: 120 },
    NodeLayout { id: 3, x: 420, y: 120 },
    NodeLayout { id: 4, x: 120, y: 220 },
    NodeLayout { id: 5, x: 240, y: 220 },
    NodeLayout { id: 6, x: 360, y: 220 },
    NodeLayout { id: 7, x: 480, y: 220 },
];

/// Seven-node complete binary tree with ids 1 to 7.
#[derive(Debug, Clone, Copy)]
pub struct StaticTree {
    nodes: &'static [TreeNode],
    layout: &'static [NodeLayout],
}

impl StaticTree {
    pub fn standard() -> Self {
        Self {
            nodes: &TREE_NODES,
            layout: &TREE_LAYOUT,
        }
    }

    pub fn root(&self) -> NodeId {
        1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        1..=self.nodes.len()
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.right)
    }

    /// Parent-child pairs, parents first.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.ids()
            .flat_map(|id| {
                [self.left(id), self.right(id)]
                    .into_iter()
                    .flatten()
                    .map(move |child| (id, child))
            })
            .collect()
    }

    pub fn layout(&self) -> &'static [NodeLayout] {
        self.layout
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        id.checked_sub(1).and_then(|index| self.nodes.get(index))
    }
}

const GRAPH_ADJACENCY: [&[NodeId]; 5] = [&[2, 4], &[1, 3], &[2, 5], &[1, 5], &[3, 4]];

const GRAPH_LAYOUT: [NodeLayout; 5] = [
    NodeLayout { id: 1, x: 100, y: 100 },
    NodeLayout { id: 2, x: 300, y: 50 },
    NodeLayout { id: 3, x: 500, y: 100 },
    NodeLayout { id: 4, x: 200, y: 200 },
    NodeLayout { id: 5, x: 400, y: 200 },
];

/// Five-node undirected graph with ids 1 to 5.
#[derive(Debug, Clone, Copy)]
pub struct StaticGraph {
    adjacency: &'static [&'static [NodeId]],
    layout: &'static [NodeLayout],
}

impl StaticGraph {
    pub fn standard() -> Self {
        Self {
            adjacency: &GRAPH_ADJACENCY,
            layout: &GRAPH_LAYOUT,
        }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        1..=self.adjacency.len()
    }

    /// Neighbours of `id` in adjacency-list order.
    pub fn neighbours(&self, id: NodeId) -> &'static [NodeId] {
        id.checked_sub(1)
            .and_then(|index| self.adjacency.get(index).copied())
            .unwrap_or(&[])
    }

    /// Each undirected edge once, as `(low, high)`.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.ids()
            .flat_map(|id| {
                self.neighbours(id)
                    .iter()
                    .filter(move |other| **other > id)
                    .map(move |other| (id, *other))
            })
            .collect()
    }

    pub fn layout(&self) -> &'static [NodeLayout] {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_children_match_heap_layout() {
        let tree = StaticTree::standard();
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.left(1), Some(2));
        assert_eq!(tree.right(3), Some(7));
        assert_eq!(tree.left(4), None);
        assert_eq!(tree.left(99), None);
        assert_eq!(
            tree.edges(),
            vec![(1, 2), (1, 3), (2, 4), (2, 5), (3, 6), (3, 7)]
        );
    }

    #[test]
    fn graph_is_undirected() {
        let graph = StaticGraph::standard();
        for id in graph.ids() {
            for other in graph.neighbours(id) {
                assert!(graph.neighbours(*other).contains(&id));
            }
        }
        assert_eq!(graph.edges(), vec![(1, 2), (1, 4), (2, 3), (3, 5), (4, 5)]);
        assert!(graph.neighbours(0).is_empty());
    }
}
