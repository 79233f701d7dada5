//! Drawing modes and the tools behind them.

mod pen;

pub use pen::{FinishOutcome, PathBuilder, PenStep};

use serde::{Deserialize, Serialize};

/// Interaction mode, chosen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    /// Pointer selects, drags and reshapes existing paths.
    #[default]
    Select,
    /// Pointer draws new freehand paths.
    Pen,
}

impl DrawingMode {
    pub fn is_pen(self) -> bool {
        self == DrawingMode::Pen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&DrawingMode::Pen).unwrap(), "\"pen\"");
        let mode: DrawingMode = serde_json::from_str("\"select\"").unwrap();
        assert_eq!(mode, DrawingMode::Select);
        assert!(serde_json::from_str::<DrawingMode>("\"eraser\"").is_err());
    }
}
