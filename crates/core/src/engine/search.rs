use std::cmp::Ordering;

use serde::Serialize;

use super::{Engine, Outcome, Step};
use crate::{counters::CounterDelta, scene::VisualState, timeline::Pace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Linear,
    Binary,
}

/// Terminal result of a search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub target: i64,
    /// Index of the hit within `values`.
    pub found: Option<usize>,
    /// The sequence that was searched. For binary search this is the locally
    /// sorted copy, not the canonical dataset.
    pub values: Vec<u32>,
}

impl SearchOutcome {
    /// User-facing message for the result.
    pub fn message(&self) -> String {
        match self.found {
            Some(index) => format!("Found {} at index {index}", self.target),
            None => format!("{} not found", self.target),
        }
    }
}

fn hit(values: &[u32], index: usize) -> Step {
    Step::new(
        VisualState::bars(values).visited([index]),
        CounterDelta::NONE,
        Pace::Immediate,
    )
}

fn probe(values: &[u32], index: usize) -> Step {
    Step::new(
        VisualState::bars(values).comparing([index]),
        CounterDelta::COMPARISON,
        Pace::Single,
    )
}

/// Scans left to right. The equality test for a probe happens on the call
/// after the probe was shown, so a stop during the wait never reveals a hit.
#[derive(Debug)]
pub struct LinearSearch {
    values: Vec<u32>,
    target: i64,
    cursor: usize,
    pending: Option<usize>,
    found: Option<usize>,
    done: bool,
}

impl LinearSearch {
    pub fn new(values: Vec<u32>, target: i64) -> Self {
        Self {
            values,
            target,
            cursor: 0,
            pending: None,
            found: None,
            done: false,
        }
    }
}

impl Iterator for LinearSearch {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }

        if let Some(index) = self.pending.take() {
            if i64::from(self.values[index]) == self.target {
                self.found = Some(index);
                self.done = true;
                return Some(hit(&self.values, index));
            }
        }

        if self.cursor < self.values.len() {
            let index = self.cursor;
            self.cursor += 1;
            self.pending = Some(index);
            return Some(probe(&self.values, index));
        }

        self.done = true;
        None
    }
}

impl Engine for LinearSearch {
    fn finish(&mut self) -> Outcome {
        Outcome::Search(SearchOutcome {
            target: self.target,
            found: self.found,
            values: std::mem::take(&mut self.values),
        })
    }
}

/// Midpoint search over a sorted copy of the input.
#[derive(Debug)]
pub struct BinarySearch {
    values: Vec<u32>,
    target: i64,
    low: usize,
    /// Exclusive upper bound of the live range.
    high: usize,
    pending: Option<usize>,
    shown: bool,
    found: Option<usize>,
    done: bool,
}

impl BinarySearch {
    pub fn new(mut values: Vec<u32>, target: i64) -> Self {
        values.sort_unstable();
        let high = values.len();
        Self {
            values,
            target,
            low: 0,
            high,
            pending: None,
            shown: false,
            found: None,
            done: false,
        }
    }
}

impl Iterator for BinarySearch {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }

        if !self.shown {
            self.shown = true;
            return Some(Step::new(
                VisualState::bars(&self.values),
                CounterDelta::NONE,
                Pace::Immediate,
            ));
        }

        if let Some(mid) = self.pending.take() {
            match i64::from(self.values[mid]).cmp(&self.target) {
                Ordering::Equal => {
                    self.found = Some(mid);
                    self.done = true;
                    return Some(hit(&self.values, mid));
                }
                Ordering::Less => self.low = mid + 1,
                Ordering::Greater => self.high = mid,
            }
        }

        if self.low < self.high {
            // floor((l + r) / 2) over the inclusive range [low, high - 1].
            let mid = self.low + (self.high - 1 - self.low) / 2;
            self.pending = Some(mid);
            return Some(probe(&self.values, mid));
        }

        self.done = true;
        None
    }
}

impl Engine for BinarySearch {
    fn finish(&mut self) -> Outcome {
        Outcome::Search(SearchOutcome {
            target: self.target,
            found: self.found,
            values: std::mem::take(&mut self.values),
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        engine::testing::{drain, totals},
        scene::Role,
    };

    fn search(outcome: Outcome) -> SearchOutcome {
        match outcome {
            Outcome::Search(result) => result,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn linear_search_stops_at_first_hit() {
        let (steps, outcome) = drain(LinearSearch::new(vec![4, 8, 8, 1], 8));
        let result = search(outcome);

        assert_eq!(result.found, Some(1));
        assert_eq!(result.message(), "Found 8 at index 1");
        assert_eq!(totals(&steps).comparisons, 2);
        assert_eq!(steps.last().unwrap().state.tagged(Role::Visited), vec![1]);
    }

    #[test]
    fn linear_search_exhausts_on_miss() {
        let (steps, outcome) = drain(LinearSearch::new(vec![4, 8, 1], 5));
        let result = search(outcome);

        assert_eq!(result.found, None);
        assert_eq!(result.message(), "5 not found");
        assert_eq!(steps.len(), 3);
        assert_eq!(totals(&steps).comparisons, 3);
    }

    #[test]
    fn binary_search_shows_sorted_copy_first() {
        let (steps, outcome) = drain(BinarySearch::new(vec![9, 3, 7, 1, 5], 7));
        let result = search(outcome);

        assert!(steps[0].state.is_plain());
        assert_eq!(steps[0].state.values(), Some(&[1, 3, 5, 7, 9][..]));
        assert_eq!(steps[0].pace, Pace::Immediate);
        // mid 2 (5 < 7), then mid 3 (hit).
        assert_eq!(steps[1].state.tagged(Role::Comparing), vec![2]);
        assert_eq!(steps[2].state.tagged(Role::Comparing), vec![3]);
        assert_eq!(result.found, Some(3));
        assert_eq!(totals(&steps).comparisons, 2);
    }

    #[test]
    fn binary_search_reports_miss_on_empty_range() {
        let (steps, outcome) = drain(BinarySearch::new(vec![2, 4, 6], 1));
        let result = search(outcome);
        assert_eq!(result.found, None);
        assert_eq!(totals(&steps).comparisons, 2);

        let (_, outcome) = drain(BinarySearch::new(Vec::new(), 1));
        assert_eq!(search(outcome).found, None);
    }

    proptest! {
        #[test]
        fn prop_binary_search_agrees_with_sorted_copy(
            values in prop::collection::vec(1u32..=100, 1..50),
            target in -5i64..110,
        ) {
            let (_, outcome) = drain(BinarySearch::new(values.clone(), target));
            let result = search(outcome);

            let mut sorted = values;
            sorted.sort_unstable();
            prop_assert_eq!(&result.values, &sorted);
            match result.found {
                Some(index) => prop_assert_eq!(i64::from(sorted[index]), target),
                None => prop_assert!(!sorted.iter().any(|value| i64::from(*value) == target)),
            }
        }
    }
}
