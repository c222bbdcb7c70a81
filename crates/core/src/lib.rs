//! Core library for the Algorithm Visualiser.
//!
//! Sorting, searching and traversal algorithms are written as lazy engines
//! that yield one [`Step`] per visible change. An [`AlgorithmRunner`] drives
//! the active engine, paces it with a [`StepClock`], stops it through a
//! [`CancellationToken`] and routes frames to a [`Renderer`] and counters to
//! a [`Ui`].

pub mod cancel;
pub mod catalog;
pub mod config;
pub mod counters;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod render;
pub mod runner;
pub mod scene;
pub mod timeline;
pub mod topology;
pub mod ui;

pub use cancel::CancellationToken;
pub use catalog::{AlgorithmDescriptor, AlgorithmId, Catalog, Category};
pub use config::{AppConfig, CompatConfig, DatasetConfig, PlaybackConfig};
pub use counters::{CounterDelta, RunCounters};
pub use dataset::{Dataset, DatasetGenerator};
pub use engine::{Engine, Outcome, SearchOutcome, Step};
pub use error::{Result, VisualiserError};
pub use render::{encode_frame, RecordingRenderer, Renderer};
pub use runner::{AlgorithmRunner, Command, RunStatus, RunnerHandle};
pub use scene::{Geometry, Role, Surface, VisualState};
pub use timeline::{Pace, RecordingSleeper, Sleeper, SpeedControl, StepClock, ThreadSleeper};
pub use topology::{NodeId, NodeLayout, StaticGraph, StaticTree};
pub use ui::{ScriptedUi, Ui};
