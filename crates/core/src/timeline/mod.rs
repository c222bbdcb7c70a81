use std::{
    fmt,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::config::MAX_SPEED;

/// Milliseconds subtracted from to turn a slider value into a step delay.
const DELAY_CEILING_MS: u64 = 105;

/// How many clock units a step waits after it has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pace {
    /// Drawn and immediately followed by the next step.
    Immediate,
    Single,
    Double,
}

impl Pace {
    pub fn multiplier(self) -> u32 {
        match self {
            Pace::Immediate => 0,
            Pace::Single => 1,
            Pace::Double => 2,
        }
    }
}

/// Shared, externally mutable playback speed.
///
/// Cloning yields another handle onto the same value, so a control thread can
/// re-pace a run that is executing elsewhere.
#[derive(Debug, Clone)]
pub struct SpeedControl {
    value: Arc<AtomicU32>,
}

impl SpeedControl {
    pub fn new(speed: u32) -> Self {
        Self {
            value: Arc::new(AtomicU32::new(speed.clamp(1, MAX_SPEED))),
        }
    }

    pub fn get(&self) -> u32 {
        self.value.load(Ordering::SeqCst)
    }

    /// Stores a new slider value, clamped to `1..=100`.
    pub fn set(&self, speed: u32) {
        self.value.store(speed.clamp(1, MAX_SPEED), Ordering::SeqCst);
    }

    /// Duration of one clock unit at the current speed. Larger speeds give
    /// shorter delays: 100 maps to 5 ms, 1 maps to 104 ms.
    pub fn unit(&self) -> Duration {
        Duration::from_millis(DELAY_CEILING_MS - u64::from(self.get()))
    }
}

impl Default for SpeedControl {
    fn default() -> Self {
        Self::new(crate::config::PlaybackConfig::default().speed)
    }
}

/// Blocking primitive used by [`StepClock`] to suspend the driver.
pub trait Sleeper: Send {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps the current thread for real.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

type SleepHook = Box<dyn FnMut(usize) + Send>;

/// Sleeper that records every requested duration instead of blocking.
///
/// An optional hook runs after each recorded sleep with the zero-based index
/// of that sleep; tests use it to stop a run or change the speed at an exact
/// step.
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    log: Arc<Mutex<Vec<Duration>>>,
    hook: Arc<Mutex<Option<SleepHook>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(hook: impl FnMut(usize) + Send + 'static) -> Self {
        let sleeper = Self::new();
        if let Ok(mut slot) = sleeper.hook.lock() {
            *slot = Some(Box::new(hook));
        }
        sleeper
    }

    /// Durations requested so far, including zero-length waits.
    pub fn recorded(&self) -> Vec<Duration> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Durations requested so far, ignoring zero-length waits.
    pub fn paced(&self) -> Vec<Duration> {
        self.recorded()
            .into_iter()
            .filter(|duration| !duration.is_zero())
            .collect()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        let index = match self.log.lock() {
            Ok(mut log) => {
                log.push(duration);
                log.len() - 1
            }
            Err(_) => return,
        };
        if let Ok(mut hook) = self.hook.lock() {
            if let Some(hook) = hook.as_mut() {
                hook(index);
            }
        }
    }
}

impl fmt::Debug for RecordingSleeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSleeper")
            .field("sleeps", &self.recorded().len())
            .finish()
    }
}

/// Cooperative delay every engine step goes through.
pub struct StepClock {
    speed: SpeedControl,
    sleeper: Box<dyn Sleeper>,
    waits: u64,
}

impl StepClock {
    pub fn new(speed: SpeedControl, sleeper: impl Sleeper + 'static) -> Self {
        Self {
            speed,
            sleeper: Box::new(sleeper),
            waits: 0,
        }
    }

    /// Clock that really sleeps the calling thread.
    pub fn realtime(speed: SpeedControl) -> Self {
        Self::new(speed, ThreadSleeper)
    }

    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    /// Number of waits performed since the clock was created.
    pub fn waits(&self) -> u64 {
        self.waits
    }

    /// Suspends for `multiplier` units of the speed read at call time and
    /// returns the duration that was requested.
    pub fn wait(&mut self, multiplier: u32) -> Duration {
        let duration = self.speed.unit() * multiplier;
        self.waits += 1;
        self.sleeper.sleep(duration);
        duration
    }

    pub fn wait_for(&mut self, pace: Pace) -> Duration {
        self.wait(pace.multiplier())
    }
}

impl fmt::Debug for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepClock")
            .field("speed", &self.speed.get())
            .field("waits", &self.waits)
            .finish()
    }
}
