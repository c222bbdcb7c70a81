use serde::{Deserialize, Serialize};

/// Comparison and swap totals for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub comparisons: u64,
    pub swaps: u64,
}

impl RunCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds a step's delta. Returns `true` when anything changed.
    pub fn apply(&mut self, delta: CounterDelta) -> bool {
        self.comparisons += u64::from(delta.comparisons);
        self.swaps += u64::from(delta.swaps);
        !delta.is_empty()
    }
}

/// Counter increments carried by a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDelta {
    pub comparisons: u32,
    pub swaps: u32,
}

impl CounterDelta {
    pub const NONE: Self = Self {
        comparisons: 0,
        swaps: 0,
    };
    pub const COMPARISON: Self = Self {
        comparisons: 1,
        swaps: 0,
    };
    pub const SWAP: Self = Self {
        comparisons: 0,
        swaps: 1,
    };
    /// An insertion-sort shift counts as both.
    pub const SHIFT: Self = Self {
        comparisons: 1,
        swaps: 1,
    };

    pub fn is_empty(self) -> bool {
        self.comparisons == 0 && self.swaps == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_deltas_and_resets() {
        let mut counters = RunCounters::default();
        assert!(counters.apply(CounterDelta::COMPARISON));
        assert!(counters.apply(CounterDelta::SHIFT));
        assert!(!counters.apply(CounterDelta::NONE));
        assert_eq!(
            counters,
            RunCounters {
                comparisons: 2,
                swaps: 1
            }
        );

        counters.reset();
        assert_eq!(counters, RunCounters::default());
    }
}
