use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use crate::{catalog::AlgorithmDescriptor, counters::RunCounters};

/// User-facing collaborator: shows counters and messages and answers the
/// search-target prompt.
pub trait Ui: Send {
    /// Pushed after every counter change and after a reset.
    fn report_counters(&mut self, counters: RunCounters);

    /// Asks for the value a search should look for. `None` aborts the start.
    fn request_search_target(&mut self) -> Option<i64>;

    /// Shows the terminal outcome of a search.
    fn notify_result(&mut self, message: &str);

    fn algorithm_selected(&mut self, _descriptor: &AlgorithmDescriptor) {}
}

#[derive(Debug, Default)]
struct ScriptedState {
    targets: VecDeque<Option<i64>>,
    counters: Vec<RunCounters>,
    messages: Vec<String>,
    selected: Vec<&'static str>,
}

/// Ui answering prompts from a queue and recording everything it is shown.
///
/// Clones share one record, so a test can keep a handle after moving the Ui
/// into a runner.
#[derive(Debug, Default, Clone)]
pub struct ScriptedUi {
    state: Arc<Mutex<ScriptedState>>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer for the next search prompt.
    pub fn push_target(&self, target: Option<i64>) {
        if let Ok(mut state) = self.state.lock() {
            state.targets.push_back(target);
        }
    }

    pub fn counters(&self) -> Vec<RunCounters> {
        self.state
            .lock()
            .map(|state| state.counters.clone())
            .unwrap_or_default()
    }

    pub fn last_counters(&self) -> Option<RunCounters> {
        self.counters().last().copied()
    }

    pub fn messages(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.messages.clone())
            .unwrap_or_default()
    }

    /// Names of the algorithms announced through `algorithm_selected`.
    pub fn selected(&self) -> Vec<&'static str> {
        self.state
            .lock()
            .map(|state| state.selected.clone())
            .unwrap_or_default()
    }
}

impl Ui for ScriptedUi {
    fn report_counters(&mut self, counters: RunCounters) {
        if let Ok(mut state) = self.state.lock() {
            state.counters.push(counters);
        }
    }

    fn request_search_target(&mut self) -> Option<i64> {
        self.state
            .lock()
            .ok()
            .and_then(|mut state| state.targets.pop_front())
            .flatten()
    }

    fn notify_result(&mut self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.messages.push(message.to_string());
        }
    }

    fn algorithm_selected(&mut self, descriptor: &AlgorithmDescriptor) {
        if let Ok(mut state) = self.state.lock() {
            state.selected.push(descriptor.name);
        }
    }
}
