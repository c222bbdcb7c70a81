use std::collections::{BTreeSet, VecDeque};

use super::{Engine, Outcome, Step};
use crate::{
    counters::CounterDelta,
    scene::VisualState,
    timeline::Pace,
    topology::{NodeId, StaticGraph},
};

/// Both walks start here.
pub const START_NODE: NodeId = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphWalk {
    Bfs,
    Dfs,
}

/// Visited set plus the order nodes entered it.
#[derive(Debug, Default)]
struct Visits {
    seen: BTreeSet<NodeId>,
    order: Vec<NodeId>,
}

impl Visits {
    fn contains(&self, node: NodeId) -> bool {
        self.seen.contains(&node)
    }

    fn mark(&mut self, node: NodeId) {
        if self.seen.insert(node) {
            self.order.push(node);
        }
    }

    /// Frame with every node visited so far highlighted.
    fn step(&self, pace: Pace) -> Step {
        Step::new(
            VisualState::graph().visited(self.order.iter().copied()),
            CounterDelta::NONE,
            pace,
        )
    }
}

/// Breadth-first walk. A node may sit in the queue more than once; repeats
/// are skipped when dequeued.
#[derive(Debug)]
pub struct BreadthFirst {
    graph: StaticGraph,
    queue: VecDeque<NodeId>,
    visits: Visits,
}

impl BreadthFirst {
    pub fn new() -> Self {
        Self {
            graph: StaticGraph::standard(),
            queue: VecDeque::from([START_NODE]),
            visits: Visits::default(),
        }
    }
}

impl Default for BreadthFirst {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for BreadthFirst {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        while let Some(node) = self.queue.pop_front() {
            if self.visits.contains(node) {
                continue;
            }
            self.visits.mark(node);
            for neighbour in self.graph.neighbours(node) {
                if !self.visits.contains(*neighbour) {
                    self.queue.push_back(*neighbour);
                }
            }
            return Some(self.visits.step(Pace::Double));
        }
        None
    }
}

impl Engine for BreadthFirst {
    fn finish(&mut self) -> Outcome {
        Outcome::Traversal {
            order: std::mem::take(&mut self.visits.order),
        }
    }
}

/// Pre-order depth-first walk over an explicit stack of
/// `(node, next neighbour index)` frames.
#[derive(Debug)]
pub struct DepthFirst {
    graph: StaticGraph,
    stack: Vec<(NodeId, usize)>,
    visits: Visits,
    pace: Pace,
    started: bool,
}

impl DepthFirst {
    /// `pace` applies to every entry step; [`Pace::Immediate`] gives the
    /// legacy unpaced walk.
    pub fn new(pace: Pace) -> Self {
        Self {
            graph: StaticGraph::standard(),
            stack: Vec::new(),
            visits: Visits::default(),
            pace,
            started: false,
        }
    }

    fn enter(&mut self, node: NodeId) -> Step {
        self.visits.mark(node);
        self.stack.push((node, 0));
        self.visits.step(self.pace)
    }
}

impl Iterator for DepthFirst {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if !self.started {
            self.started = true;
            return Some(self.enter(START_NODE));
        }

        loop {
            let (node, cursor) = self.stack.last_mut()?;
            match self.graph.neighbours(*node).get(*cursor) {
                Some(&neighbour) => {
                    *cursor += 1;
                    if !self.visits.contains(neighbour) {
                        return Some(self.enter(neighbour));
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl Engine for DepthFirst {
    fn finish(&mut self) -> Outcome {
        Outcome::Traversal {
            order: std::mem::take(&mut self.visits.order),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::testing::drain, scene::Role};

    #[test]
    fn bfs_visits_by_distance() {
        let (steps, outcome) = drain(BreadthFirst::new());
        assert_eq!(
            outcome,
            Outcome::Traversal {
                order: vec![1, 2, 4, 3, 5]
            }
        );
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|step| step.pace == Pace::Double));
    }

    #[test]
    fn visited_set_accumulates() {
        let (steps, _) = drain(BreadthFirst::new());
        let sizes: Vec<_> = steps
            .iter()
            .map(|step| step.state.tagged(Role::Visited).len())
            .collect();
        assert_eq!(sizes, vec![1, 2, 3, 4, 5]);
        assert_eq!(steps[2].state.tagged(Role::Visited), vec![1, 2, 4]);
    }

    #[test]
    fn dfs_follows_preorder_recursion() {
        let (steps, outcome) = drain(DepthFirst::new(Pace::Immediate));
        assert_eq!(
            outcome,
            Outcome::Traversal {
                order: vec![1, 2, 3, 5, 4]
            }
        );
        assert_eq!(steps.len(), 5);
        assert!(steps.iter().all(|step| step.pace == Pace::Immediate));
        assert_eq!(steps[3].state.tagged(Role::Visited), vec![1, 2, 3, 5]);
    }

    #[test]
    fn paced_dfs_keeps_the_same_order() {
        let (steps, outcome) = drain(DepthFirst::new(Pace::Double));
        assert!(steps.iter().all(|step| step.pace == Pace::Double));
        assert_eq!(
            outcome,
            Outcome::Traversal {
                order: vec![1, 2, 3, 5, 4]
            }
        );
    }
}
