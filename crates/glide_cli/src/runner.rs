//! Scenario runner that replays scripted host events against a sheet.

use crate::assert::{
    evaluate_assert_drag_allowed, evaluate_assert_edge, evaluate_assert_offset,
    evaluate_assert_target, AssertionResult,
};
use crate::report::{SheetReport, TransitionRecord};
use crate::scenario::{Scenario, ScenarioStep};
use anyhow::{bail, Result};
use glide_core::events::event_types;
use glide_core::{Event, EventData, Size};
use glide_sheet::{targets, ContentScroller, SharedDimensions, Sheet, SheetConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Configuration for a deterministic headless run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Logical viewport width.
    pub width: f32,
    /// Measured sheet height.
    pub height: f32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
    /// Frames a `settle` step may run before failing.
    pub settle_frame_limit: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 400.0,
            tick_ms: 16,
            settle_frame_limit: 600,
        }
    }
}

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: SheetReport },
    Failed { report: SheetReport },
}

impl RunOutcome {
    pub fn report(&self) -> &SheetReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Inner content stand-in that counts rewinds.
struct ScriptedContent {
    rewinds: Arc<AtomicU64>,
}

impl ContentScroller for ScriptedContent {
    fn scroll_to_top(&mut self) {
        self.rewinds.fetch_add(1, Ordering::SeqCst);
    }
}

/// Execute scenario JSON.
pub fn run_scenario(input: &str, config: SheetConfig, run_cfg: RunConfig) -> Result<RunOutcome> {
    let scenario = Scenario::from_json(input)?;
    run_loaded_scenario(&scenario, config, run_cfg)
}

/// Execute a pre-loaded scenario.
pub fn run_loaded_scenario(
    scenario: &Scenario,
    config: SheetConfig,
    run_cfg: RunConfig,
) -> Result<RunOutcome> {
    if run_cfg.tick_ms == 0 {
        bail!("tick_ms must be > 0");
    }
    if !(run_cfg.height.is_finite() && run_cfg.height >= 0.0) {
        bail!("sheet height must be a non-negative number");
    }

    let mut run = HeadlessSheet::mount(config, run_cfg);

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {step_index}: {}", step.name());
        if let AssertionResult::Failed { message, .. } = run.apply(step) {
            let report = SheetReport::failed(step.name(), step_index, message, run.report());
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: run.report(),
    })
}

/// A mounted sheet plus the scripted host around it.
struct HeadlessSheet {
    sheet: Sheet,
    dims: SharedDimensions,
    rewinds: Arc<AtomicU64>,
    run_cfg: RunConfig,
    elapsed_frames: u64,
    elapsed_ms: u64,
    transitions: Vec<TransitionRecord>,
}

impl HeadlessSheet {
    fn mount(config: SheetConfig, run_cfg: RunConfig) -> Self {
        let dims = SharedDimensions::new(Size::new(run_cfg.width, run_cfg.height));
        let rewinds = Arc::new(AtomicU64::new(0));
        let sheet = glide_sheet::sheet()
            .name("scenario")
            .config(config)
            .content(ScriptedContent {
                rewinds: rewinds.clone(),
            })
            .mount(dims.clone());

        Self {
            sheet,
            dims,
            rewinds,
            run_cfg,
            elapsed_frames: 0,
            elapsed_ms: 0,
            transitions: Vec::new(),
        }
    }

    fn apply(&mut self, step: &ScenarioStep) -> AssertionResult {
        match step {
            ScenarioStep::Paint => self.sheet.paint_committed(),
            ScenarioStep::Open => self.sheet.open(),
            ScenarioStep::Close => self.sheet.close(),
            ScenarioStep::Tick { frames } => {
                for _ in 0..*frames {
                    self.frame(self.run_cfg.tick_ms);
                }
            }
            ScenarioStep::Wait { ms } => {
                let mut remaining_ms = *ms;
                for _ in 0..wait_frames(*ms, self.run_cfg.tick_ms) {
                    let step_ms = remaining_ms.min(self.run_cfg.tick_ms);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    self.frame(step_ms);
                }
            }
            ScenarioStep::Settle => return self.settle(),
            ScenarioStep::Scroll {
                scroll_top,
                client_height,
                scroll_height,
            } => {
                self.dispatch(Event::scroll(
                    targets::CONTENT,
                    *scroll_top,
                    *client_height,
                    *scroll_height,
                ));
            }
            ScenarioStep::DragStart => self.dispatch(Event::drag_start(targets::SURFACE)),
            ScenarioStep::Drag { offset_y } => {
                self.dispatch(Event::drag(targets::SURFACE, *offset_y))
            }
            ScenarioStep::DragEnd {
                offset_y,
                velocity_y,
            } => self.dispatch(Event::drag_end(targets::SURFACE, *offset_y, *velocity_y)),
            ScenarioStep::Resize { height } => {
                self.dims.set_height(*height);
                self.dispatch(Event::resize(targets::SURFACE, self.run_cfg.width, *height));
            }
            ScenarioStep::BackdropPress => self.dispatch(Event::new(
                event_types::POINTER_UP,
                targets::BACKDROP,
                EventData::None,
            )),
            ScenarioStep::AssertOffset { value, tolerance } => {
                return evaluate_assert_offset(*value, *tolerance, &self.sheet.state())
            }
            ScenarioStep::AssertDragAllowed { value } => {
                return evaluate_assert_drag_allowed(*value, &self.sheet.state())
            }
            ScenarioStep::AssertEdge { value } => {
                return evaluate_assert_edge(*value, &self.sheet.state())
            }
            ScenarioStep::AssertTarget { value } => {
                return evaluate_assert_target(*value, &self.sheet.state())
            }
        }
        AssertionResult::Passed
    }

    fn dispatch(&mut self, event: Event) {
        let event = event.with_timestamp(self.elapsed_ms);
        if !self.sheet.handle_event(&event) {
            tracing::warn!("sheet ignored event type {}", event.event_type);
        }
    }

    fn frame(&mut self, ms: u64) {
        self.elapsed_frames = self.elapsed_frames.saturating_add(1);
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);

        for event in self.sheet.tick(ms as f32 / 1000.0) {
            tracing::info!("frame {}: {:?}", self.elapsed_frames, event);
            self.transitions.push(TransitionRecord {
                frame: self.elapsed_frames,
                event,
            });
        }
    }

    fn settle(&mut self) -> AssertionResult {
        for _ in 0..self.run_cfg.settle_frame_limit {
            if !self.sheet.is_animating() {
                return AssertionResult::Passed;
            }
            self.frame(self.run_cfg.tick_ms);
        }

        if self.sheet.is_animating() {
            return AssertionResult::Failed {
                code: "not_settled".to_string(),
                message: format!(
                    "still animating at offset {} after {} frames",
                    self.sheet.offset(),
                    self.run_cfg.settle_frame_limit
                ),
            };
        }
        AssertionResult::Passed
    }

    fn report(&self) -> SheetReport {
        SheetReport::passed(
            self.elapsed_frames,
            self.elapsed_ms,
            self.transitions.clone(),
            self.rewinds.load(Ordering::SeqCst),
            self.sheet.state(),
        )
    }
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}
