use std::collections::VecDeque;

use super::{Engine, Outcome, Step};
use crate::{
    counters::CounterDelta,
    scene::VisualState,
    timeline::Pace,
    topology::{NodeId, StaticTree},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOrder {
    Preorder,
    Inorder,
    Postorder,
    LevelOrder,
}

/// Visit order of `order` over `tree`, starting at the root.
pub fn visit_order(tree: &StaticTree, order: TreeOrder) -> Vec<NodeId> {
    let mut visited = Vec::with_capacity(tree.len());
    match order {
        TreeOrder::Preorder => preorder(tree, Some(tree.root()), &mut visited),
        TreeOrder::Inorder => inorder(tree, Some(tree.root()), &mut visited),
        TreeOrder::Postorder => postorder(tree, Some(tree.root()), &mut visited),
        TreeOrder::LevelOrder => {
            let mut queue = VecDeque::from([tree.root()]);
            while let Some(id) = queue.pop_front() {
                visited.push(id);
                queue.extend(tree.left(id));
                queue.extend(tree.right(id));
            }
        }
    }
    visited
}

fn preorder(tree: &StaticTree, id: Option<NodeId>, out: &mut Vec<NodeId>) {
    if let Some(id) = id {
        out.push(id);
        preorder(tree, tree.left(id), out);
        preorder(tree, tree.right(id), out);
    }
}

fn inorder(tree: &StaticTree, id: Option<NodeId>, out: &mut Vec<NodeId>) {
    if let Some(id) = id {
        inorder(tree, tree.left(id), out);
        out.push(id);
        inorder(tree, tree.right(id), out);
    }
}

fn postorder(tree: &StaticTree, id: Option<NodeId>, out: &mut Vec<NodeId>) {
    if let Some(id) = id {
        postorder(tree, tree.left(id), out);
        postorder(tree, tree.right(id), out);
        out.push(id);
    }
}

/// Highlights one node at a time in visit order. Earlier nodes fall back to
/// the default colour; the visited set is not accumulated.
#[derive(Debug)]
pub struct TreeTraversal {
    order: Vec<NodeId>,
    cursor: usize,
}

impl TreeTraversal {
    pub fn new(order: TreeOrder) -> Self {
        Self {
            order: visit_order(&StaticTree::standard(), order),
            cursor: 0,
        }
    }
}

impl Iterator for TreeTraversal {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let id = *self.order.get(self.cursor)?;
        self.cursor += 1;
        Some(Step::new(
            VisualState::tree().visited([id]),
            CounterDelta::NONE,
            Pace::Double,
        ))
    }
}

impl Engine for TreeTraversal {
    fn finish(&mut self) -> Outcome {
        Outcome::Traversal {
            order: std::mem::take(&mut self.order),
        }
    }
}
