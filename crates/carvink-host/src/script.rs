//! Recorded event scripts: one JSON object per line, either a canvas event
//! or a host directive.

use crate::error::{HostError, HostResult};
use carvink_core::{CanvasEvent, CanvasSession, DrawingMode, PersistSink};
use kurbo::Rect;
use serde::Deserialize;
use std::path::Path;

/// Host-side change applied between events.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    SetMode { mode: DrawingMode },
    SetActiveLayer { name: String },
    SetBounds { x: f64, y: f64, width: f64, height: f64 },
}

impl Directive {
    pub fn apply<S: PersistSink>(&self, session: &mut CanvasSession<S>) {
        match self {
            Directive::SetMode { mode } => session.set_mode(*mode),
            Directive::SetActiveLayer { name } => session.set_active_layer(name),
            Directive::SetBounds {
                x,
                y,
                width,
                height,
            } => session.set_canvas_bounds(Rect::new(*x, *y, x + width, y + height)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptLine {
    Directive(Directive),
    Event(CanvasEvent),
}

/// Parse a script. Blank lines and lines starting with `#` are skipped.
pub fn parse_script(source: &str, path: &Path) -> HostResult<Vec<ScriptLine>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| HostError::Script {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}
