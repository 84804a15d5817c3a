//! Eraser configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;

use crate::consts::ERASER_GROUP;
use crate::eraser::OutsideRangePolicy;
use crate::stroke::{LineCap, LineJoin, StrokeStyle};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Parse { var: &'static str, message: String },
}

/// Tunables for the erase gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct EraserConfig {
    /// Prefix for synthesized group names.
    pub group_prefix: String,
    /// Brush applied to every erase stroke.
    pub stroke: StrokeStyle,
    /// What to do when a drag leaves the selection range.
    pub outside_range: OutsideRangePolicy,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            group_prefix: ERASER_GROUP.to_owned(),
            stroke: StrokeStyle::default(),
            outside_range: OutsideRangePolicy::default(),
        }
    }
}

impl EraserConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `ERASER_GROUP_PREFIX`: default `ERASER_GROUP`
    /// - `ERASER_STROKE_COLOR`: default `blue`
    /// - `ERASER_STROKE_WIDTH`: positive number, default 15
    /// - `ERASER_LINE_CAP`: `butt`, `round` (default) or `square`
    /// - `ERASER_LINE_JOIN`: `miter`, `round` (default) or `bevel`
    /// - `ERASER_OUTSIDE_POLICY`: `ignore` (default) or `finish_line`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let group_prefix = non_blank(env_var("ERASER_GROUP_PREFIX")?).unwrap_or(defaults.group_prefix);

        let stroke = StrokeStyle {
            stroke: non_blank(env_var("ERASER_STROKE_COLOR")?).unwrap_or(defaults.stroke.stroke),
            stroke_width: parse_width(env_var("ERASER_STROKE_WIDTH")?.as_deref())?
                .unwrap_or(defaults.stroke.stroke_width),
            draggable: false,
            line_cap: parse_line_cap(env_var("ERASER_LINE_CAP")?.as_deref())?,
            line_join: parse_line_join(env_var("ERASER_LINE_JOIN")?.as_deref())?,
        };
        let outside_range = parse_outside_policy(env_var("ERASER_OUTSIDE_POLICY")?.as_deref())?;

        Ok(Self { group_prefix, stroke, outside_range })
    }
}

/// Unset is `None`; a set but non-UTF-8 value is an error.
fn env_var(var: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(var) {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::Parse {
            var,
            message: format!("value is not valid UTF-8: {}", raw.to_string_lossy()),
        }),
    }
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_width(raw: Option<&str>) -> Result<Option<f64>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(w) if w.is_finite() && w > 0.0 => Ok(Some(w)),
        Ok(w) => Err(ConfigError::Parse {
            var: "ERASER_STROKE_WIDTH",
            message: format!("width must be positive, got {w}"),
        }),
        Err(e) => Err(ConfigError::Parse { var: "ERASER_STROKE_WIDTH", message: e.to_string() }),
    }
}

fn parse_line_cap(raw: Option<&str>) -> Result<LineCap, ConfigError> {
    let Some(raw) = raw else {
        return Ok(LineCap::default());
    };
    LineCap::parse(raw).ok_or_else(|| ConfigError::Parse {
        var: "ERASER_LINE_CAP",
        message: format!("unknown line cap '{raw}' (expected 'butt', 'round' or 'square')"),
    })
}

fn parse_line_join(raw: Option<&str>) -> Result<LineJoin, ConfigError> {
    let Some(raw) = raw else {
        return Ok(LineJoin::default());
    };
    LineJoin::parse(raw).ok_or_else(|| ConfigError::Parse {
        var: "ERASER_LINE_JOIN",
        message: format!("unknown line join '{raw}' (expected 'miter', 'round' or 'bevel')"),
    })
}

fn parse_outside_policy(raw: Option<&str>) -> Result<OutsideRangePolicy, ConfigError> {
    match raw.unwrap_or("ignore") {
        "ignore" => Ok(OutsideRangePolicy::Ignore),
        "finish_line" => Ok(OutsideRangePolicy::FinishLine),
        other => Err(ConfigError::Parse {
            var: "ERASER_OUTSIDE_POLICY",
            message: format!("unsupported policy '{other}' (expected 'ignore' or 'finish_line')"),
        }),
    }
}
