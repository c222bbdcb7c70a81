//! Stepwise algorithm engines.
//!
//! Every engine is a lazy state machine yielding one [`Step`] per visible
//! change. Producing a step is the only place an engine mutates its working
//! copy, so the driver in [`runner`](crate::runner) owns every suspension and
//! cancellation point and an engine can be abandoned between any two steps.

pub mod graph;
pub mod search;
pub mod sorting;
pub mod tree;

use serde::Serialize;

use crate::{
    catalog::AlgorithmId,
    config::CompatConfig,
    counters::CounterDelta,
    scene::VisualState,
    timeline::Pace,
    topology::NodeId,
};

pub use graph::{BreadthFirst, DepthFirst, GraphWalk};
pub use search::{BinarySearch, LinearSearch, SearchKind, SearchOutcome};
pub use sorting::{BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, SortKind};
pub use tree::{TreeOrder, TreeTraversal};

/// One visible change: the frame to draw, the counter increments that go
/// with it and how long to hold it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub state: VisualState,
    pub delta: CounterDelta,
    pub pace: Pace,
}

impl Step {
    pub fn new(state: VisualState, delta: CounterDelta, pace: Pace) -> Self {
        Self { state, delta, pace }
    }

    pub(crate) fn compare<const N: usize>(values: &[u32], indices: [usize; N]) -> Self {
        Self::new(
            VisualState::bars(values).comparing(indices),
            CounterDelta::COMPARISON,
            Pace::Single,
        )
    }

    pub(crate) fn swap<const N: usize>(values: &[u32], indices: [usize; N]) -> Self {
        Self::new(
            VisualState::bars(values).swapping(indices),
            CounterDelta::SWAP,
            Pace::Single,
        )
    }

    /// Every bar tagged as sorted; closes a completed sort.
    pub(crate) fn sorted(values: &[u32]) -> Self {
        Self::new(
            VisualState::bars(values).visited(0..values.len()),
            CounterDelta::NONE,
            Pace::Immediate,
        )
    }
}

/// What an engine leaves behind once it has run out of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The fully sorted working copy, to be published as canonical.
    Sorted { values: Vec<u32> },
    Search(SearchOutcome),
    /// Node ids in the order they were highlighted.
    Traversal { order: Vec<NodeId> },
}

/// A stepwise algorithm.
pub trait Engine: Iterator<Item = Step> + Send {
    /// Consumes the engine's result. Only meaningful once `next` has
    /// returned `None`; a cancelled run never calls it.
    fn finish(&mut self) -> Outcome;
}

/// Engine family and variant for an [`AlgorithmId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmKind {
    Sort(SortKind),
    Search(SearchKind),
    Tree(TreeOrder),
    Graph(GraphWalk),
}

impl From<AlgorithmId> for AlgorithmKind {
    fn from(id: AlgorithmId) -> Self {
        match id {
            AlgorithmId::Bubble => AlgorithmKind::Sort(SortKind::Bubble),
            AlgorithmId::Selection => AlgorithmKind::Sort(SortKind::Selection),
            AlgorithmId::Insertion => AlgorithmKind::Sort(SortKind::Insertion),
            AlgorithmId::Merge => AlgorithmKind::Sort(SortKind::Merge),
            AlgorithmId::Quick => AlgorithmKind::Sort(SortKind::Quick),
            AlgorithmId::Heap => AlgorithmKind::Sort(SortKind::Heap),
            AlgorithmId::Linear => AlgorithmKind::Search(SearchKind::Linear),
            AlgorithmId::Binary => AlgorithmKind::Search(SearchKind::Binary),
            AlgorithmId::Preorder => AlgorithmKind::Tree(TreeOrder::Preorder),
            AlgorithmId::Inorder => AlgorithmKind::Tree(TreeOrder::Inorder),
            AlgorithmId::Postorder => AlgorithmKind::Tree(TreeOrder::Postorder),
            AlgorithmId::LevelOrder => AlgorithmKind::Tree(TreeOrder::LevelOrder),
            AlgorithmId::Bfs => AlgorithmKind::Graph(GraphWalk::Bfs),
            AlgorithmId::Dfs => AlgorithmKind::Graph(GraphWalk::Dfs),
        }
    }
}

pub fn sorter(kind: SortKind, values: Vec<u32>, compat: &CompatConfig) -> Box<dyn Engine> {
    match kind {
        SortKind::Bubble => Box::new(BubbleSort::new(values)),
        SortKind::Selection => Box::new(SelectionSort::new(values)),
        SortKind::Insertion => Box::new(InsertionSort::new(values)),
        SortKind::Merge => Box::new(MergeSort::new(values)),
        SortKind::Quick => Box::new(QuickSort::new(values)),
        SortKind::Heap => Box::new(HeapSort::new(values, compat.count_heapify_comparisons)),
    }
}

pub fn searcher(kind: SearchKind, values: Vec<u32>, target: i64) -> Box<dyn Engine> {
    match kind {
        SearchKind::Linear => Box::new(LinearSearch::new(values, target)),
        SearchKind::Binary => Box::new(BinarySearch::new(values, target)),
    }
}

pub fn tree_walker(order: TreeOrder) -> Box<dyn Engine> {
    Box::new(TreeTraversal::new(order))
}

pub fn graph_walker(walk: GraphWalk, compat: &CompatConfig) -> Box<dyn Engine> {
    match walk {
        GraphWalk::Bfs => Box::new(BreadthFirst::new()),
        GraphWalk::Dfs => {
            let pace = if compat.pace_dfs {
                Pace::Double
            } else {
                Pace::Immediate
            };
            Box::new(DepthFirst::new(pace))
        }
    }
}
