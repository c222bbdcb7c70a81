use serde::Serialize;

use crate::{
    scene::{Geometry, VisualState},
    Result,
};

/// Rendering backend abstraction.
///
/// Every call is a full redraw of the given state; implementations do not
/// need to diff against the previous frame.
pub trait Renderer: Send {
    fn draw(&mut self, state: &VisualState);
}

/// Renderer that keeps every frame it was asked to draw. Headless runs and
/// tests inspect the recorded frames afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    frames: Vec<VisualState>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn frames(&self) -> &[VisualState] {
        &self.frames
    }

    pub fn last(&self) -> Option<&VisualState> {
        self.frames.last()
    }

}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, state: &VisualState) {
        self.frames.push(state.clone());
    }
}

/// Shares a renderer between the runner and its owner, so frames can be
/// inspected while the runner keeps drawing.
impl<R: Renderer> Renderer for std::sync::Arc<std::sync::Mutex<R>> {
    fn draw(&mut self, state: &VisualState) {
        if let Ok(mut inner) = self.lock() {
            inner.draw(state);
        }
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn draw(&mut self, state: &VisualState) {
        (**self).draw(state);
    }
}

#[derive(Serialize)]
struct EncodedFrame<'a> {
    frame: &'a VisualState,
    #[serde(skip_serializing_if = "Option::is_none")]
    geometry: Option<Geometry>,
}

/// One JSON object for `state`. Tree and graph frames also carry the node
/// layout and edges so a consumer can draw them without its own copy.
pub fn encode_frame(state: &VisualState) -> Result<String> {
    let encoded = EncodedFrame {
        frame: state,
        geometry: state.surface.geometry(),
    };
    Ok(serde_json::to_string(&encoded)?)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn records_frames_through_shared_and_boxed_handles() {
        let shared = Arc::new(Mutex::new(RecordingRenderer::new()));
        let mut boxed: Box<dyn Renderer> = Box::new(shared.clone());

        boxed.draw(&VisualState::bars(&[1, 2]).comparing([0]));
        boxed.draw(&VisualState::graph());

        let recorded = shared.lock().unwrap();
        assert_eq!(recorded.frames().len(), 2);
        assert_eq!(recorded.last(), Some(&VisualState::graph()));
    }

    #[test]
    fn encoded_tree_frames_carry_geometry() {
        let line = encode_frame(&VisualState::tree().visited([4])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["frame"]["surface"]["kind"], "tree");
        assert_eq!(value["frame"]["roles"]["4"], "visited");
        assert_eq!(value["geometry"]["nodes"].as_array().unwrap().len(), 7);
        assert_eq!(value["geometry"]["nodes"][0]["id"], 1);
        assert_eq!(value["geometry"]["edges"][0], serde_json::json!([1, 2]));
    }

    #[test]
    fn encoded_bar_frames_have_no_geometry() {
        let line = encode_frame(&VisualState::bars(&[3, 1])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["frame"]["surface"]["values"], serde_json::json!([3, 1]));
        assert!(value.get("geometry").is_none());
    }
}
