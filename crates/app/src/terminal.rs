//! Terminal implementations of the renderer and UI collaborators.

use std::{
    io::{self, BufRead, Write},
    sync::{Arc, Mutex},
};

use algo_visualiser_core::{
    encode_frame, AlgorithmDescriptor, Renderer, Role, RunCounters, Surface, Ui, VisualState,
};
use clap::ValueEnum;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human readable line per frame.
    Text,
    /// One JSON object per frame.
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Text => Box::new(TextRenderer::new(io::stdout())),
            OutputFormat::Json => Box::new(JsonRenderer::new(io::stdout())),
        }
    }
}

fn marked(label: impl std::fmt::Display, role: Role) -> String {
    match role {
        Role::Default => format!(" {label} "),
        Role::Comparing => format!("<{label}>"),
        Role::Swapping => format!("{{{label}}}"),
        Role::Visited => format!("[{label}]"),
    }
}

/// One-line rendering: `<v>` comparing, `{v}` swapping, `[v]` sorted or
/// visited.
pub fn format_state(state: &VisualState) -> String {
    let label = match &state.surface {
        Surface::Bars { .. } => "bars",
        Surface::Tree => "tree",
        Surface::Graph => "graph",
    };
    let mut line = format!("{label:<6}");
    for item in state.surface.items() {
        let role = state.role_of(item);
        match &state.surface {
            Surface::Bars { values } => line.push_str(&marked(values[item], role)),
            Surface::Tree | Surface::Graph => line.push_str(&marked(item, role)),
        }
    }
    line.trim_end().to_string()
}

/// Prints each frame as a line of text.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn draw(&mut self, state: &VisualState) {
        if let Err(err) = writeln!(self.out, "{}", format_state(state)) {
            tracing::warn!(%err, "failed to write frame");
        }
    }
}

/// Prints each frame as a JSON object.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> Renderer for JsonRenderer<W> {
    fn draw(&mut self, state: &VisualState) {
        let written = encode_frame(state)
            .and_then(|line| writeln!(self.out, "{line}").map_err(Into::into));
        if let Err(err) = written {
            tracing::warn!(%err, "failed to write frame");
        }
    }
}

/// Where search targets come from.
#[derive(Debug, Clone)]
pub enum TargetSource {
    /// Prompt on stdin for every search.
    Prompt,
    /// Answer from a shared slot; each answer is used once.
    Slot(Arc<Mutex<Option<i64>>>),
}

/// Console UI: prints counters and results, answers the target prompt.
#[derive(Debug)]
pub struct ConsoleUi {
    format: OutputFormat,
    targets: TargetSource,
}

impl ConsoleUi {
    pub fn new(format: OutputFormat, targets: TargetSource) -> Self {
        Self { format, targets }
    }

    fn emit(&self, text: String, value: serde_json::Value) {
        match self.format {
            OutputFormat::Text => println!("{text}"),
            OutputFormat::Json => println!("{value}"),
        }
    }
}

fn prompt_target() -> Option<i64> {
    eprint!("Enter the number to search: ");
    let _ = io::stderr().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => parse_target(&line),
    }
}

/// Parses a target answer. Blank input declines the prompt; anything that
/// is not a whole number aborts the search too.
pub fn parse_target(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse() {
        Ok(target) => Some(target),
        Err(_) => {
            tracing::warn!(
                input = trimmed,
                "search aborted: target is not a whole number"
            );
            None
        }
    }
}

impl Ui for ConsoleUi {
    fn report_counters(&mut self, counters: RunCounters) {
        self.emit(
            format!(
                "      comparisons: {}  swaps: {}",
                counters.comparisons, counters.swaps
            ),
            json!({ "counters": counters }),
        );
    }

    fn request_search_target(&mut self) -> Option<i64> {
        match &self.targets {
            TargetSource::Prompt => prompt_target(),
            TargetSource::Slot(slot) => slot.lock().ok().and_then(|mut slot| slot.take()),
        }
    }

    fn notify_result(&mut self, message: &str) {
        self.emit(message.to_string(), json!({ "result": message }));
    }

    fn algorithm_selected(&mut self, descriptor: &AlgorithmDescriptor) {
        self.emit(
            format!(
                "{} ({}) time {} space {}\n  {}",
                descriptor.name,
                descriptor.category,
                descriptor.time,
                descriptor.space,
                descriptor.explanation
            ),
            json!({ "selected": descriptor }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bars_with_role_markers() {
        let state = VisualState::bars(&[5, 3, 8, 1])
            .comparing([0])
            .swapping([1])
            .visited([3]);
        assert_eq!(format_state(&state), "bars  <5>{3} 8 [1]");
    }

    #[test]
    fn formats_static_surfaces() {
        let state = VisualState::tree().visited([2]);
        assert_eq!(format_state(&state), "tree   1 [2] 3  4  5  6  7");

        let state = VisualState::graph().visited([1, 4]);
        assert_eq!(format_state(&state), "graph [1] 2  3 [4] 5");
    }

    #[test]
    fn json_renderer_writes_one_object_per_frame() {
        let mut out = Vec::new();
        {
            let mut renderer = JsonRenderer::new(&mut out);
            renderer.draw(&VisualState::bars(&[2, 1]).swapping([0, 1]));
            renderer.draw(&VisualState::tree());
        }
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["frame"]["surface"]["values"], json!([2, 1]));
        assert_eq!(first["frame"]["roles"]["1"], "swapping");
        assert!(first.get("geometry").is_none());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["geometry"]["nodes"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn parses_target_answers() {
        assert_eq!(parse_target(" 42\n"), Some(42));
        assert_eq!(parse_target("-3"), Some(-3));
        assert_eq!(parse_target("\n"), None);
        assert_eq!(parse_target("forty"), None);
    }

    #[test]
    fn slot_targets_are_used_once() {
        let slot = Arc::new(Mutex::new(Some(7)));
        let mut ui = ConsoleUi::new(OutputFormat::Json, TargetSource::Slot(slot.clone()));
        assert_eq!(ui.request_search_target(), Some(7));
        assert_eq!(ui.request_search_target(), None);
        assert!(slot.lock().unwrap().is_none());
    }
}
