//! Scripted gesture scenarios.

use anyhow::Result;
use glide_sheet::{ContentEdge, Visibility};
use serde::Deserialize;
use std::path::Path;

/// Sequence of host events and assertions replayed against one sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// First frame committed
    Paint,
    Open,
    Close,
    Tick {
        frames: u32,
    },
    Wait {
        ms: u64,
    },
    /// Run frames until the current animation settles
    Settle,
    Scroll {
        scroll_top: f32,
        client_height: f32,
        scroll_height: f32,
    },
    DragStart,
    Drag {
        offset_y: f32,
    },
    DragEnd {
        offset_y: f32,
        #[serde(default)]
        velocity_y: f32,
    },
    Resize {
        height: f32,
    },
    BackdropPress,
    AssertOffset {
        value: f32,
        #[serde(default)]
        tolerance: f32,
    },
    AssertDragAllowed {
        value: bool,
    },
    AssertEdge {
        value: ContentEdge,
    },
    AssertTarget {
        value: Visibility,
    },
}

impl ScenarioStep {
    /// Name used for this step in reports
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Paint => "paint",
            ScenarioStep::Open => "open",
            ScenarioStep::Close => "close",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Settle => "settle",
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::DragStart => "drag_start",
            ScenarioStep::Drag { .. } => "drag",
            ScenarioStep::DragEnd { .. } => "drag_end",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::BackdropPress => "backdrop_press",
            ScenarioStep::AssertOffset { .. } => "assert_offset",
            ScenarioStep::AssertDragAllowed { .. } => "assert_drag_allowed",
            ScenarioStep::AssertEdge { .. } => "assert_edge",
            ScenarioStep::AssertTarget { .. } => "assert_target",
        }
    }
}
