//! The six sorting engines.
//!
//! Counting policies mirror the classic classroom versions of each algorithm:
//! bubble sort never exits early, insertion sort counts a shift as one
//! comparison and one swap, merge sort counts every placement as a swap, and
//! heap sort only counts sift comparisons when asked to.

use super::{Engine, Outcome, Step};
use crate::{counters::CounterDelta, scene::VisualState, timeline::Pace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

/// Emits the closing all-sorted frame exactly once.
fn completion(values: &[u32], finished: &mut bool) -> Option<Step> {
    if *finished {
        return None;
    }
    *finished = true;
    Some(Step::sorted(values))
}

fn sorted_outcome(values: &mut Vec<u32>) -> Outcome {
    Outcome::Sorted {
        values: std::mem::take(values),
    }
}

#[derive(Debug)]
pub struct BubbleSort {
    values: Vec<u32>,
    pass: usize,
    index: usize,
    swap_pending: bool,
    finished: bool,
}

impl BubbleSort {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            pass: 0,
            index: 0,
            swap_pending: false,
            finished: false,
        }
    }
}

impl Iterator for BubbleSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.swap_pending {
            self.swap_pending = false;
            let index = self.index;
            self.values.swap(index, index + 1);
            self.index += 1;
            return Some(Step::swap(&self.values, [index, index + 1]));
        }

        let len = self.values.len();
        while self.pass < len {
            let index = self.index;
            if index + self.pass + 1 < len {
                let step = Step::compare(&self.values, [index, index + 1]);
                if self.values[index] > self.values[index + 1] {
                    self.swap_pending = true;
                } else {
                    self.index += 1;
                }
                return Some(step);
            }
            self.pass += 1;
            self.index = 0;
        }

        completion(&self.values, &mut self.finished)
    }
}

impl Engine for BubbleSort {
    fn finish(&mut self) -> Outcome {
        sorted_outcome(&mut self.values)
    }
}

#[derive(Debug)]
pub struct SelectionSort {
    values: Vec<u32>,
    start: usize,
    probe: usize,
    min: usize,
    finished: bool,
}

impl SelectionSort {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            start: 0,
            probe: 1,
            min: 0,
            finished: false,
        }
    }
}

impl Iterator for SelectionSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let len = self.values.len();
        while self.start < len {
            if self.probe < len {
                // The current minimum is shown even when it does not move.
                let step = Step::compare(&self.values, [self.min, self.probe]);
                if self.values[self.probe] < self.values[self.min] {
                    self.min = self.probe;
                }
                self.probe += 1;
                return Some(step);
            }

            let (start, min) = (self.start, self.min);
            self.start += 1;
            self.probe = self.start + 1;
            self.min = self.start;
            if min != start {
                self.values.swap(start, min);
                return Some(Step::swap(&self.values, [start, min]));
            }
        }

        completion(&self.values, &mut self.finished)
    }
}

impl Engine for SelectionSort {
    fn finish(&mut self) -> Outcome {
        sorted_outcome(&mut self.values)
    }
}

#[derive(Debug, Clone, Copy)]
struct Insertion {
    key: u32,
    hole: usize,
}

#[derive(Debug)]
pub struct InsertionSort {
    values: Vec<u32>,
    next: usize,
    active: Option<Insertion>,
    finished: bool,
}

impl InsertionSort {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            next: 1,
            active: None,
            finished: false,
        }
    }
}

impl Iterator for InsertionSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.active {
                Some(Insertion { key, hole }) => {
                    if hole > 0 && self.values[hole - 1] > key {
                        // The key is held aside, so the shifted value shows twice.
                        self.values[hole] = self.values[hole - 1];
                        self.active = Some(Insertion {
                            key,
                            hole: hole - 1,
                        });
                        return Some(Step::new(
                            VisualState::bars(&self.values).comparing([hole - 1, hole]),
                            CounterDelta::SHIFT,
                            Pace::Single,
                        ));
                    }

                    self.values[hole] = key;
                    self.active = None;
                    return Some(Step::new(
                        VisualState::bars(&self.values),
                        CounterDelta::NONE,
                        Pace::Single,
                    ));
                }
                None => {
                    if self.next >= self.values.len() {
                        return completion(&self.values, &mut self.finished);
                    }
                    let hole = self.next;
                    self.active = Some(Insertion {
                        key: self.values[hole],
                        hole,
                    });
                    self.next += 1;
                }
            }
        }
    }
}

impl Engine for InsertionSort {
    fn finish(&mut self) -> Outcome {
        sorted_outcome(&mut self.values)
    }
}

/// Pending unit of recursive merge sort work.
#[derive(Debug, Clone, Copy)]
enum MergeTask {
    Split { low: usize, high: usize },
    Merge { low: usize, mid: usize, high: usize },
}

/// An in-progress merge of `values[low..=mid]` and `values[mid+1..=high]`.
#[derive(Debug)]
struct MergeRun {
    left: Vec<u32>,
    right: Vec<u32>,
    left_index: usize,
    right_index: usize,
    slot: usize,
    compared: bool,
}

impl MergeRun {
    fn new(values: &[u32], low: usize, mid: usize, high: usize) -> Self {
        Self {
            left: values[low..=mid].to_vec(),
            right: values[mid + 1..=high].to_vec(),
            left_index: 0,
            right_index: 0,
            slot: low,
            compared: false,
        }
    }

    fn advance(&mut self, values: &mut [u32]) -> Option<Step> {
        let left_open = self.left_index < self.left.len();
        let right_open = self.right_index < self.right.len();

        if left_open && right_open && !self.compared {
            self.compared = true;
            return Some(Step::new(
                VisualState::bars(values).comparing([self.slot]),
                CounterDelta::COMPARISON,
                Pace::Single,
            ));
        }
        self.compared = false;

        let take_left = if left_open && right_open {
            self.left[self.left_index] <= self.right[self.right_index]
        } else if left_open || right_open {
            left_open
        } else {
            return None;
        };

        values[self.slot] = if take_left {
            self.left_index += 1;
            self.left[self.left_index - 1]
        } else {
            self.right_index += 1;
            self.right[self.right_index - 1]
        };

        let step = Step::swap(values, [self.slot]);
        self.slot += 1;
        Some(step)
    }
}

/// Top-down merge sort driven by an explicit task stack.
#[derive(Debug)]
pub struct MergeSort {
    values: Vec<u32>,
    tasks: Vec<MergeTask>,
    active: Option<MergeRun>,
    finished: bool,
}

impl MergeSort {
    pub fn new(values: Vec<u32>) -> Self {
        let tasks = if values.len() > 1 {
            vec![MergeTask::Split {
                low: 0,
                high: values.len() - 1,
            }]
        } else {
            Vec::new()
        };
        Self {
            values,
            tasks,
            active: None,
            finished: false,
        }
    }
}

impl Iterator for MergeSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(run) = self.active.as_mut() {
                if let Some(step) = run.advance(&mut self.values) {
                    return Some(step);
                }
                self.active = None;
                continue;
            }

            match self.tasks.pop() {
                Some(MergeTask::Split { low, high }) => {
                    if low < high {
                        let mid = low + (high - low) / 2;
                        // Pushed in reverse so the left half is handled first.
                        self.tasks.push(MergeTask::Merge { low, mid, high });
                        self.tasks.push(MergeTask::Split {
                            low: mid + 1,
                            high,
                        });
                        self.tasks.push(MergeTask::Split { low, high: mid });
                    }
                }
                Some(MergeTask::Merge { low, mid, high }) => {
                    self.active = Some(MergeRun::new(&self.values, low, mid, high));
                }
                None => return completion(&self.values, &mut self.finished),
            }
        }
    }
}

impl Engine for MergeSort {
    fn finish(&mut self) -> Outcome {
        sorted_outcome(&mut self.values)
    }
}

/// Lomuto partition of `values[low..=high]` around `values[high]`.
#[derive(Debug)]
struct Partition {
    low: usize,
    high: usize,
    pivot: u32,
    store: usize,
    scan: usize,
    swap_pending: bool,
}

/// Quick sort driven by an explicit stack of inclusive ranges.
#[derive(Debug)]
pub struct QuickSort {
    values: Vec<u32>,
    ranges: Vec<(usize, usize)>,
    active: Option<Partition>,
    finished: bool,
}

impl QuickSort {
    pub fn new(values: Vec<u32>) -> Self {
        let ranges = if values.len() > 1 {
            vec![(0, values.len() - 1)]
        } else {
            Vec::new()
        };
        Self {
            values,
            ranges,
            active: None,
            finished: false,
        }
    }
}

impl Iterator for QuickSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(part) = self.active.as_mut() {
                let high = part.high;

                if part.swap_pending {
                    part.swap_pending = false;
                    let (store, scan) = (part.store, part.scan);
                    // Swaps even when `store == scan`; it still counts.
                    self.values.swap(store, scan);
                    part.store += 1;
                    part.scan += 1;
                    return Some(Step::swap(&self.values, [store, scan]));
                }

                if part.scan < high {
                    let scan = part.scan;
                    if self.values[scan] < part.pivot {
                        part.swap_pending = true;
                    } else {
                        part.scan += 1;
                    }
                    return Some(Step::compare(&self.values, [scan, high]));
                }

                let (low, store) = (part.low, part.store);
                self.active = None;
                self.values.swap(store, high);
                self.ranges.push((store + 1, high));
                if store > low {
                    self.ranges.push((low, store - 1));
                }
                return Some(Step::swap(&self.values, [store, high]));
            }

            match self.ranges.pop() {
                Some((low, high)) => {
                    if low < high {
                        self.active = Some(Partition {
                            low,
                            high,
                            pivot: self.values[high],
                            store: low,
                            scan: low,
                            swap_pending: false,
                        });
                    }
                }
                None => return completion(&self.values, &mut self.finished),
            }
        }
    }
}

impl Engine for QuickSort {
    fn finish(&mut self) -> Outcome {
        sorted_outcome(&mut self.values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiftStage {
    Left,
    Right,
    Settle,
}

/// One level of a max-heap sift-down over `values[..size]`.
#[derive(Debug, Clone, Copy)]
struct Sift {
    node: usize,
    size: usize,
    largest: usize,
    stage: SiftStage,
}

impl Sift {
    fn new(node: usize, size: usize) -> Self {
        Self {
            node,
            size,
            largest: node,
            stage: SiftStage::Left,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum HeapPhase {
    /// Next node to sift while building the heap, counting down to zero.
    Build(Option<usize>),
    /// Last index of the unsorted region.
    Extract(usize),
}

#[derive(Debug)]
pub struct HeapSort {
    values: Vec<u32>,
    phase: HeapPhase,
    sift: Option<Sift>,
    count_comparisons: bool,
    finished: bool,
}

impl HeapSort {
    /// With `count_comparisons` set, each child comparison inside a sift
    /// becomes a visible, counted step.
    pub fn new(values: Vec<u32>, count_comparisons: bool) -> Self {
        let phase = HeapPhase::Build((values.len() / 2).checked_sub(1));
        Self {
            values,
            phase,
            sift: None,
            count_comparisons,
            finished: false,
        }
    }

    fn advance_sift(&mut self, mut sift: Sift) -> Option<Step> {
        match sift.stage {
            SiftStage::Left | SiftStage::Right => {
                let (offset, stage) = if sift.stage == SiftStage::Left {
                    (1, SiftStage::Right)
                } else {
                    (2, SiftStage::Settle)
                };
                let child = 2 * sift.node + offset;
                sift.stage = stage;

                let mut step = None;
                if child < sift.size {
                    if self.count_comparisons {
                        step = Some(Step::compare(&self.values, [sift.largest, child]));
                    }
                    if self.values[child] > self.values[sift.largest] {
                        sift.largest = child;
                    }
                }
                self.sift = Some(sift);
                step
            }
            SiftStage::Settle => {
                if sift.largest == sift.node {
                    self.sift = None;
                    return None;
                }
                self.values.swap(sift.node, sift.largest);
                self.sift = Some(Sift::new(sift.largest, sift.size));
                Some(Step::swap(&self.values, [sift.node, sift.largest]))
            }
        }
    }
}

impl Iterator for HeapSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let len = self.values.len();
        loop {
            if let Some(sift) = self.sift {
                if let Some(step) = self.advance_sift(sift) {
                    return Some(step);
                }
                continue;
            }

            match self.phase {
                HeapPhase::Build(Some(node)) => {
                    self.sift = Some(Sift::new(node, len));
                    self.phase = HeapPhase::Build(node.checked_sub(1));
                }
                HeapPhase::Build(None) => {
                    self.phase = HeapPhase::Extract(len.saturating_sub(1));
                }
                HeapPhase::Extract(end) if end > 0 => {
                    self.values.swap(0, end);
                    self.sift = Some(Sift::new(0, end));
                    self.phase = HeapPhase::Extract(end - 1);
                    return Some(Step::swap(&self.values, [0, end]));
                }
                HeapPhase::Extract(_) => return completion(&self.values, &mut self.finished),
            }
        }
    }
}

impl Engine for HeapSort {
    fn finish(&mut self) -> Outcome {
        sorted_outcome(&mut self.values)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        config::CompatConfig,
        counters::RunCounters,
        engine::{
            sorter,
            testing::{drain, totals},
        },
        scene::Role,
    };

    const ALL: [SortKind; 6] = [
        SortKind::Bubble,
        SortKind::Selection,
        SortKind::Insertion,
        SortKind::Merge,
        SortKind::Quick,
        SortKind::Heap,
    ];

    fn counts(engine: impl Engine) -> RunCounters {
        let (steps, _) = drain(engine);
        totals(&steps)
    }

    fn sorted_values(kind: SortKind, values: Vec<u32>) -> Vec<u32> {
        let mut engine = sorter(kind, values, &CompatConfig::default());
        engine.by_ref().for_each(drop);
        match engine.finish() {
            Outcome::Sorted { values } => values,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn bubble_sort_never_exits_early() {
        assert_eq!(
            counts(BubbleSort::new(vec![5, 4, 3, 2, 1])),
            RunCounters {
                comparisons: 10,
                swaps: 10
            }
        );
        assert_eq!(
            counts(BubbleSort::new(vec![1, 2, 3, 4, 5])),
            RunCounters {
                comparisons: 10,
                swaps: 0
            }
        );
    }

    #[test]
    fn bubble_sort_tags_compare_then_swap() {
        let (steps, _) = drain(BubbleSort::new(vec![2, 1]));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].state.tagged(Role::Comparing), vec![0, 1]);
        assert_eq!(steps[0].state.values(), Some(&[2, 1][..]));
        assert_eq!(steps[1].state.tagged(Role::Swapping), vec![0, 1]);
        assert_eq!(steps[1].state.values(), Some(&[1, 2][..]));
        assert_eq!(steps[2].state.tagged(Role::Visited), vec![0, 1]);
        assert_eq!(steps[2].pace, Pace::Immediate);
    }

    #[test]
    fn selection_sort_compares_every_probe() {
        assert_eq!(
            counts(SelectionSort::new(vec![5, 4, 3, 2, 1])),
            RunCounters {
                comparisons: 10,
                swaps: 2
            }
        );

        let (steps, _) = drain(SelectionSort::new(vec![3, 1, 2]));
        let compared: Vec<_> = steps
            .iter()
            .map(|step| step.state.tagged(Role::Comparing))
            .filter(|tagged| !tagged.is_empty())
            .collect();
        assert_eq!(compared, vec![vec![0, 1], vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn insertion_sort_counts_shifts_as_both() {
        assert_eq!(
            counts(InsertionSort::new(vec![5, 4, 3, 2, 1])),
            RunCounters {
                comparisons: 10,
                swaps: 10
            }
        );
        assert_eq!(
            counts(InsertionSort::new(vec![1, 2, 3])),
            RunCounters::default()
        );
    }

    #[test]
    fn insertion_sort_shows_key_placement() {
        let (steps, _) = drain(InsertionSort::new(vec![2, 1]));
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].state.values(), Some(&[2, 2][..]));
        assert!(steps[1].state.is_plain());
        assert_eq!(steps[1].state.values(), Some(&[1, 2][..]));
        assert_eq!(steps[1].pace, Pace::Single);
    }

    #[test]
    fn merge_sort_counts_every_placement() {
        assert_eq!(
            counts(MergeSort::new(vec![5, 4, 3, 2, 1])),
            RunCounters {
                comparisons: 5,
                swaps: 12
            }
        );
    }

    #[test]
    fn merge_sort_prefers_left_on_ties() {
        let (steps, outcome) = drain(MergeSort::new(vec![7, 7]));
        assert_eq!(totals(&steps), RunCounters {
            comparisons: 1,
            swaps: 2
        });
        assert_eq!(outcome, Outcome::Sorted { values: vec![7, 7] });
    }

    #[test]
    fn quick_sort_counts_lomuto_swaps() {
        assert_eq!(
            counts(QuickSort::new(vec![5, 4, 3, 2, 1])),
            RunCounters {
                comparisons: 10,
                swaps: 8
            }
        );
    }

    #[test]
    fn heap_sort_skips_sift_comparisons_by_default() {
        assert_eq!(
            counts(HeapSort::new(vec![1, 2, 3], false)),
            RunCounters {
                comparisons: 0,
                swaps: 4
            }
        );
        assert_eq!(
            counts(HeapSort::new(vec![1, 2, 3], true)),
            RunCounters {
                comparisons: 3,
                swaps: 4
            }
        );
    }

    #[test]
    fn handles_empty_and_single_inputs() {
        for kind in ALL {
            assert_eq!(sorted_values(kind, Vec::new()), Vec::<u32>::new());
            assert_eq!(sorted_values(kind, vec![9]), vec![9]);

            let mut engine = sorter(kind, vec![9], &CompatConfig::default());
            let step = engine.next().expect("closing frame");
            assert_eq!(step.state.tagged(Role::Visited), vec![0]);
            assert!(engine.next().is_none());
        }
    }

    #[test]
    fn closing_frame_marks_everything_sorted() {
        for kind in ALL {
            let engine = sorter(kind, vec![4, 1, 3, 2], &CompatConfig::default());
            let steps: Vec<Step> = engine.collect();
            let last = steps.last().expect("at least one step");
            assert_eq!(last.state.tagged(Role::Visited), vec![0, 1, 2, 3]);
            assert_eq!(last.state.values(), Some(&[1, 2, 3, 4][..]));
        }
    }

    proptest! {
        #[test]
        fn prop_sorts_to_a_permutation(
            values in prop::collection::vec(1u32..=100, 1..40),
            kind_index in 0usize..6,
        ) {
            let kind = ALL[kind_index];
            let result = sorted_values(kind, values.clone());

            let mut expected = values;
            expected.sort_unstable();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn prop_counters_never_decrease(values in prop::collection::vec(1u32..=100, 0..30)) {
            for kind in ALL {
                let mut counters = RunCounters::default();
                for step in sorter(kind, values.clone(), &CompatConfig::default()) {
                    let before = counters;
                    counters.apply(step.delta);
                    prop_assert!(counters.comparisons >= before.comparisons);
                    prop_assert!(counters.swaps >= before.swaps);
                }
            }
        }
    }
}
