//! Replayable erase scripts.
//!
//! A script is a JSON document holding the starting scene and an ordered list
//! of steps:
//!
//! ```json
//! {
//!   "shapes": [{ "x": 5, "y": 5, "width": 10, "height": 10 }],
//!   "steps": [
//!     { "op": "erase", "x": 5, "y": 5 },
//!     { "op": "pointer", "event": "mousedown", "x": 2, "y": 2 },
//!     { "op": "pointer", "event": "mouseup", "x": 2, "y": 2 },
//!     { "op": "end" }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use canvas::config::{ConfigError, EraserConfig};
use canvas::engine::{Action, EngineCore};
use canvas::eraser::{EraseError, Phase};
use canvas::geometry::Point;
use canvas::scene::ShapeId;
use canvas::stroke::StrokeStyle;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("step {step}: {source}")]
    Erase {
        step: usize,
        #[source]
        source: EraseError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShapeSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A pre-existing stroke in the starting scene.
#[derive(Debug, Clone, Deserialize)]
pub struct LineSpec {
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    /// Hit-test at `(x, y)` and toggle the erase gesture.
    Erase {
        x: f64,
        y: f64,
        #[serde(default)]
        prefix: Option<String>,
    },
    /// Raw pointer event, e.g. `mousedown`.
    Pointer { event: String, x: f64, y: f64 },
    /// Force the running gesture to finish.
    End,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub shapes: Vec<ShapeSpec>,
    #[serde(default)]
    pub lines: Vec<LineSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `ReplayError::Json` on malformed input.
    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// How a replay treats rejected erase requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnReject {
    /// Stop with `ReplayError::Erase`.
    #[default]
    Abort,
    /// Record the rejection and keep going.
    Continue,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub actions: Vec<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub container: ShapeId,
    pub members: Vec<ShapeId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub groups: Vec<GroupReport>,
    pub selection: Vec<ShapeId>,
    pub phase: Phase,
}

/// Build the scene and run every step through a fresh engine.
///
/// `prefix` overrides the configured group prefix for every erase step that
/// does not name its own.
///
/// # Errors
///
/// Returns `ReplayError::Erase` for a rejected erase when `on_reject` is `Abort`.
pub fn replay(
    script: &Script,
    config: EraserConfig,
    prefix: Option<&str>,
    on_reject: OnReject,
) -> Result<ReplayReport, ReplayError> {
    let mut core = EngineCore::with_config(config);
    for s in &script.shapes {
        core.add_shape(s.x, s.y, s.width, s.height);
    }
    for l in &script.lines {
        core.add_line(StrokeStyle { draggable: true, ..StrokeStyle::default() }, &l.points);
    }
    info!(shapes = core.board.scene.len(), steps = script.steps.len(), "replay started");

    let mut steps = Vec::with_capacity(script.steps.len());
    for (index, step) in script.steps.iter().enumerate() {
        let step_no = index + 1;
        let mut report = StepReport { step: step_no, actions: Vec::new(), rejected: None };
        match step {
            Step::Erase { x, y, prefix: own } => {
                let prefix = own.as_deref().or(prefix);
                match core.erase(Point::new(*x, *y), prefix) {
                    Ok(actions) => report.actions = actions,
                    Err(err) if on_reject == OnReject::Continue => {
                        warn!(step = step_no, error = %err, "erase rejected");
                        report.rejected = Some(err.to_string());
                    }
                    Err(source) => return Err(ReplayError::Erase { step: step_no, source }),
                }
            }
            Step::Pointer { event, x, y } => report.actions = core.handle_raw(event, *x, *y),
            Step::End => report.actions = core.end_gesture(),
        }
        steps.push(report);
    }

    let groups = core
        .board
        .groups
        .names()
        .into_iter()
        .filter_map(|name| core.group(name))
        .map(|g| GroupReport { name: g.name.clone(), container: g.container, members: g.children.clone() })
        .collect();

    Ok(ReplayReport { steps, groups, selection: core.selection().to_vec(), phase: core.phase() })
}

/// Plain-text rendering of a report, one line per action.
#[must_use]
pub fn render_text(report: &ReplayReport) -> String {
    let mut lines = Vec::new();
    for step in &report.steps {
        if let Some(reason) = &step.rejected {
            lines.push(format!("step {}: rejected: {reason}", step.step));
            continue;
        }
        lines.extend(step.actions.iter().map(|action| format!("step {}: {action:?}", step.step)));
    }
    for group in &report.groups {
        lines.push(format!("group {} (container {}): {:?}", group.name, group.container, group.members));
    }
    lines.push(format!("selection: {:?}", report.selection));
    lines.push(format!("phase: {:?}", report.phase));
    lines.join("\n")
}
