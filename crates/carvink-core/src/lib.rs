//! Carvink Core Library
//!
//! Editing state machine for a freehand vector drawing surface: path
//! construction, hit-test driven selection, layer constraints and
//! persistence of the drawn document.

pub mod canvas;
pub mod config;
pub mod hit_test;
pub mod input;
pub mod layers;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use canvas::{CanvasDocument, DEFAULT_LAYER_NAME, ImportError, Layer};
pub use config::{CanvasConfig, ConfigError};
pub use hit_test::{HitOptions, HitResult, HitTester};
pub use input::{CanvasEvent, PointerState, to_canvas_point};
pub use layers::{ConstraintOutcome, LayerCoordinator, LayerRoles};
pub use selection::{SelectionKind, SelectionManager};
pub use session::CanvasSession;
pub use shapes::{Path, PathId, PathStyle, Segment, SerializableColor, StrokeCap};
pub use storage::{
    FileSink, MemorySink, PersistPayload, PersistSink, StorageError, StorageResult,
};
pub use tools::{DrawingMode, FinishOutcome, PathBuilder, PenStep};
