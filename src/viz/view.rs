//! Explicit "recompute and redraw" for interactive front ends.
//!
//! [`ChartView::refresh`] is called on every frame with the current state and
//! surface size; it re-renders only when one of them changed since the last
//! render and otherwise hands back the cached frame.

use anyhow::Result;

use super::layout::ChartSpec;
use super::render_rgb;
use super::types::RgbFrame;
use crate::models::{CropList, DataRecord};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq)]
struct RenderKey {
    data: Vec<DataRecord>,
    crops: CropList,
    title: String,
    y_axis: String,
    width: u32,
    height: u32,
}

#[derive(Debug, Default)]
pub struct ChartView {
    key: Option<RenderKey>,
    frame: Option<RgbFrame>,
    generation: u64,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumped on every actual render; lets callers know when to re-upload a texture.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Last rendered frame, if any.
    pub fn frame(&self) -> Option<&RgbFrame> {
        self.frame.as_ref()
    }

    /// Drop the cache so the next refresh redraws unconditionally.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Redraw if the table, crops, captions or surface size changed.
    /// Returns `None` for an empty table (caller shows a placeholder).
    pub fn refresh(&mut self, state: &AppState, width: u32, height: u32) -> Result<Option<&RgbFrame>> {
        if state.data.is_empty() {
            self.key = None;
            self.frame = None;
            return Ok(None);
        }

        let spec = ChartSpec::from_state(state);
        let key = RenderKey {
            data: state.data.clone(),
            crops: state.crops.clone(),
            title: spec.title.clone(),
            y_axis: spec.y_axis.clone(),
            width,
            height,
        };
        if self.key.as_ref() != Some(&key) || self.frame.is_none() {
            log::debug!("chart redraw at {width}x{height}");
            self.frame = render_rgb(&spec, width, height)?;
            self.key = Some(key);
            self.generation += 1;
        }
        Ok(self.frame.as_ref())
    }
}
