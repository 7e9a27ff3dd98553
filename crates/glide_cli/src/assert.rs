//! Assertion helpers for scenario steps.

use glide_sheet::{ContentEdge, SheetState, Visibility};

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_offset(expected: f32, tolerance: f32, state: &SheetState) -> AssertionResult {
    let tolerance = tolerance.max(0.0);
    if (state.offset - expected).abs() <= tolerance {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "offset_mismatch".to_string(),
            message: format!(
                "expected offset {expected} (±{tolerance}), got {}",
                state.offset
            ),
        }
    }
}

pub fn evaluate_assert_drag_allowed(expected: bool, state: &SheetState) -> AssertionResult {
    if state.drag_allowed == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "drag_allowed_mismatch".to_string(),
            message: format!(
                "expected drag_allowed={expected}, got {} (edge={:?}, scrollable={})",
                state.drag_allowed, state.content_edge, state.is_scrollable
            ),
        }
    }
}

pub fn evaluate_assert_edge(expected: ContentEdge, state: &SheetState) -> AssertionResult {
    if state.content_edge == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "edge_mismatch".to_string(),
            message: format!(
                "expected content edge {expected:?}, got {:?}",
                state.content_edge
            ),
        }
    }
}

pub fn evaluate_assert_target(expected: Visibility, state: &SheetState) -> AssertionResult {
    if state.animation_target == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "target_mismatch".to_string(),
            message: format!(
                "expected target {expected:?}, got {:?}",
                state.animation_target
            ),
        }
    }
}
