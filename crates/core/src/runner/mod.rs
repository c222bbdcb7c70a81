use std::{
    fmt,
    str::FromStr,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::{
    cancel::CancellationToken,
    catalog::{AlgorithmDescriptor, AlgorithmId, Catalog, Category},
    config::{self, AppConfig},
    counters::RunCounters,
    dataset::{Dataset, DatasetGenerator},
    engine::{self, AlgorithmKind, Engine, Outcome},
    render::Renderer,
    scene::VisualState,
    timeline::{Pace, SpeedControl, StepClock},
    ui::Ui,
    Result, VisualiserError,
};

/// How a call to [`AlgorithmRunner::start`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The engine ran out of steps and its result was published.
    Completed,
    /// The token was observed set; state stays as last drawn.
    Cancelled,
    /// Start was requested with nothing selected.
    NoActiveAlgorithm,
    /// The search prompt was declined; nothing happened.
    SearchTargetMissing,
}

/// User command entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectCategory(Category),
    SelectAlgorithm(AlgorithmId),
    Start,
    Stop,
    Reset,
    SetSize(usize),
    SetSpeed(u32),
    Regenerate,
}

impl Command {
    /// Whether applying the command invalidates an in-flight run.
    pub fn cancels_run(&self) -> bool {
        matches!(
            self,
            Command::SelectAlgorithm(_)
                | Command::Start
                | Command::Stop
                | Command::Reset
                | Command::SetSize(_)
                | Command::Regenerate
        )
    }
}

impl FromStr for Command {
    type Err = VisualiserError;

    /// Parses commands such as `select bubble`, `size 30` or `stop`.
    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| VisualiserError::InvalidCommand("empty command".to_string()))?
            .to_ascii_lowercase();
        let argument = words.next();
        let required = |what: &str| {
            argument.ok_or_else(|| VisualiserError::InvalidCommand(format!("`{verb}` needs {what}")))
        };

        let command = match verb.as_str() {
            "category" | "cat" => Command::SelectCategory(required("a category")?.parse()?),
            "select" | "algo" | "algorithm" => {
                Command::SelectAlgorithm(required("an algorithm")?.parse()?)
            }
            "start" | "run" => Command::Start,
            "stop" => Command::Stop,
            "reset" => Command::Reset,
            "size" => Command::SetSize(required("a size")?.parse().map_err(|_| {
                VisualiserError::InvalidCommand(format!("`{}` is not a size", s.trim()))
            })?),
            "speed" => Command::SetSpeed(required("a speed")?.parse().map_err(|_| {
                VisualiserError::InvalidCommand(format!("`{}` is not a speed", s.trim()))
            })?),
            "generate" | "regenerate" | "new" => Command::Regenerate,
            other => {
                return Err(VisualiserError::InvalidCommand(format!(
                    "unknown command `{other}`"
                )))
            }
        };
        Ok(command)
    }
}

/// Cloneable remote control for a runner that may be busy on another thread.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    token: CancellationToken,
    speed: SpeedControl,
    stops: Arc<AtomicU64>,
}

impl RunnerHandle {
    /// Cancels the in-flight run at its next check, and any start queued
    /// with an earlier [`stop_epoch`](Self::stop_epoch).
    pub fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.token.signal();
    }

    /// Number of stops issued through handles so far. Stamp a queued start
    /// with it and pass it to [`AlgorithmRunner::start_from`].
    pub fn stop_epoch(&self) -> u64 {
        self.stops.load(Ordering::SeqCst)
    }

    /// Changes the speed; the next wait of a running engine picks it up.
    pub fn set_speed(&self, speed: u32) -> Result<()> {
        config::validate_speed(speed)?;
        self.speed.set(speed);
        Ok(())
    }

    pub fn speed(&self) -> u32 {
        self.speed.get()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_set()
    }
}

/// Orchestrates runs for one session: owns the dataset, counters and
/// collaborators, builds the engine for the active algorithm and drives it.
pub struct AlgorithmRunner {
    config: AppConfig,
    catalog: Catalog,
    category: Option<Category>,
    active: Option<&'static AlgorithmDescriptor>,
    dataset: Dataset,
    size: usize,
    generator: DatasetGenerator,
    counters: RunCounters,
    token: CancellationToken,
    stops: Arc<AtomicU64>,
    clock: StepClock,
    renderer: Box<dyn Renderer>,
    ui: Box<dyn Ui>,
}

impl AlgorithmRunner {
    /// Runner whose clock sleeps the driving thread for real.
    pub fn new(config: AppConfig, renderer: impl Renderer + 'static, ui: impl Ui + 'static) -> Self {
        let clock = StepClock::realtime(SpeedControl::new(config.playback.speed));
        Self::with_clock(config, clock, renderer, ui)
    }

    /// Runner driven by a caller-supplied clock. The clock's speed is set to
    /// the configured speed. A first dataset is generated and drawn.
    pub fn with_clock(
        config: AppConfig,
        clock: StepClock,
        renderer: impl Renderer + 'static,
        ui: impl Ui + 'static,
    ) -> Self {
        clock.speed().set(config.playback.speed);
        let mut runner = Self {
            size: config.dataset.size,
            generator: DatasetGenerator::new(config.dataset.seed),
            config,
            catalog: Catalog::new(),
            category: None,
            active: None,
            dataset: Dataset::default(),
            counters: RunCounters::default(),
            token: CancellationToken::new(),
            stops: Arc::default(),
            clock,
            renderer: Box::new(renderer),
            ui: Box::new(ui),
        };
        runner.generate();
        runner
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn active(&self) -> Option<&'static AlgorithmDescriptor> {
        self.active
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn counters(&self) -> RunCounters {
        self.counters
    }

    pub fn speed(&self) -> u32 {
        self.clock.speed().get()
    }

    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle {
            token: self.token.clone(),
            speed: self.clock.speed().clone(),
            stops: self.stops.clone(),
        }
    }

    /// Lists a category's algorithms in display order.
    pub fn select_category(&mut self, category: Category) -> Vec<&'static AlgorithmDescriptor> {
        self.category = Some(category);
        self.catalog.in_category(category)
    }

    /// Makes `id` the active algorithm and switches the surface to match.
    /// Sorting and searching get a fresh dataset.
    pub fn select(&mut self, id: AlgorithmId) {
        self.token.signal();
        let descriptor = self.catalog.get(id);
        self.category = Some(descriptor.category);
        self.active = Some(descriptor);
        self.ui.algorithm_selected(descriptor);
        debug!(algorithm = %id, category = %descriptor.category, "algorithm selected");

        if descriptor.category.uses_dataset() {
            self.generate();
        } else {
            self.redraw_plain();
        }
    }

    /// Runs the active algorithm to completion or cancellation, blocking the
    /// calling thread for the paced waits.
    pub fn start(&mut self) -> RunStatus {
        self.begin(None)
    }

    /// Like [`start`](Self::start), but returns [`RunStatus::Cancelled`]
    /// without drawing when a handle stopped the runner after `epoch` was
    /// read from [`RunnerHandle::stop_epoch`].
    pub fn start_from(&mut self, epoch: u64) -> RunStatus {
        self.begin(Some(epoch))
    }

    fn begin(&mut self, epoch: Option<u64>) -> RunStatus {
        let Some(descriptor) = self.active else {
            debug!("start ignored: no algorithm selected");
            return RunStatus::NoActiveAlgorithm;
        };
        self.token.reset();
        // Read after the reset: a stop racing with it either leaves the
        // token set or has already moved the epoch.
        if let Some(epoch) = epoch {
            let current = self.stops.load(Ordering::SeqCst);
            if current != epoch {
                debug!(epoch, current, "queued start dropped: stopped since");
                return RunStatus::Cancelled;
            }
        }

        let engine = match AlgorithmKind::from(descriptor.id) {
            AlgorithmKind::Sort(kind) => {
                engine::sorter(kind, self.dataset.working_copy(), &self.config.compat)
            }
            AlgorithmKind::Search(kind) => {
                let Some(target) = self.ui.request_search_target() else {
                    debug!("start aborted: no search target");
                    return RunStatus::SearchTargetMissing;
                };
                engine::searcher(kind, self.dataset.working_copy(), target)
            }
            AlgorithmKind::Tree(order) => engine::tree_walker(order),
            AlgorithmKind::Graph(walk) => engine::graph_walker(walk, &self.config.compat),
        };

        info!(algorithm = %descriptor.id, size = self.dataset.len(), "run started");
        match self.drive(engine) {
            Some(outcome) => {
                self.conclude(outcome);
                info!(
                    algorithm = %descriptor.id,
                    comparisons = self.counters.comparisons,
                    swaps = self.counters.swaps,
                    "run completed"
                );
                RunStatus::Completed
            }
            None => {
                info!(algorithm = %descriptor.id, "run cancelled");
                RunStatus::Cancelled
            }
        }
    }

    pub fn stop(&self) {
        self.token.signal();
    }

    /// Cancels any run, restores the last generated values and zeroes the
    /// counters.
    pub fn reset(&mut self) {
        self.token.signal();
        self.dataset.restore();
        self.counters.reset();
        self.ui.report_counters(self.counters);
        self.redraw_plain();
    }

    pub fn set_size(&mut self, size: usize) -> Result<()> {
        config::validate_size(size)?;
        self.size = size;
        self.generate();
        Ok(())
    }

    pub fn regenerate(&mut self) {
        self.generate();
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<()> {
        config::validate_speed(speed)?;
        self.clock.speed().set(speed);
        Ok(())
    }

    /// Replaces the dataset with explicit values, as a generation would.
    pub fn load_dataset(&mut self, values: Vec<u32>) -> Result<()> {
        config::validate_size(values.len())?;
        self.token.signal();
        self.size = values.len();
        self.dataset = Dataset::from_values(values);
        self.after_new_dataset();
        Ok(())
    }

    /// Dispatches a user command. Only [`Command::Start`] yields a status.
    pub fn apply(&mut self, command: Command) -> Result<Option<RunStatus>> {
        trace!(?command, "applying command");
        match command {
            Command::SelectCategory(category) => {
                self.select_category(category);
            }
            Command::SelectAlgorithm(id) => self.select(id),
            Command::Start => return Ok(Some(self.start())),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::SetSize(size) => self.set_size(size)?,
            Command::SetSpeed(speed) => self.set_speed(speed)?,
            Command::Regenerate => self.regenerate(),
        }
        Ok(None)
    }

    fn generate(&mut self) {
        self.token.signal();
        self.dataset = self.generator.generate(self.size);
        self.after_new_dataset();
    }

    fn after_new_dataset(&mut self) {
        self.counters.reset();
        self.ui.report_counters(self.counters);
        self.renderer.draw(&VisualState::bars(self.dataset.canonical()));
    }

    fn redraw_plain(&mut self) {
        let state = match self.active.map(|descriptor| descriptor.category) {
            Some(Category::Tree) => VisualState::tree(),
            Some(Category::Graph) => VisualState::graph(),
            _ => VisualState::bars(self.dataset.canonical()),
        };
        self.renderer.draw(&state);
    }

    /// Driver loop. Returns the engine's outcome, or `None` once the token
    /// is observed set. Counter deltas are applied together with the frame
    /// that shows them.
    fn drive(&mut self, mut engine: Box<dyn Engine>) -> Option<Outcome> {
        loop {
            if self.token.is_set() {
                return None;
            }
            let Some(step) = engine.next() else {
                break;
            };
            if self.token.is_set() {
                return None;
            }

            if self.counters.apply(step.delta) {
                self.ui.report_counters(self.counters);
            }
            self.renderer.draw(&step.state);
            if step.pace != Pace::Immediate {
                let waited = self.clock.wait_for(step.pace);
                trace!(?waited, "step held");
            }
        }
        Some(engine.finish())
    }

    fn conclude(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Sorted { values } => self.dataset.publish(values),
            Outcome::Search(result) => {
                debug!(search_target = result.target, found = ?result.found, "search finished");
                self.ui.notify_result(&result.message());
            }
            Outcome::Traversal { order } => debug!(?order, "traversal finished"),
        }
    }
}

impl fmt::Debug for AlgorithmRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRunner")
            .field("active", &self.active.map(|descriptor| descriptor.id))
            .field("size", &self.size)
            .field("counters", &self.counters)
            .field("cancelled", &self.token.is_set())
            .field("clock", &self.clock)
            .finish()
    }
}
