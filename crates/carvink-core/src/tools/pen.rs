//! Freehand path construction.

use crate::canvas::CanvasDocument;
use crate::shapes::{Path, PathId, PathStyle};
use kurbo::Point;

/// Result of feeding one pointer move to the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenStep {
    /// The point was far enough from the path and became a new segment.
    Appended,
    /// The pointer came back to the start and the path was finished early.
    Finished(FinishOutcome),
    /// The point was too close to the existing geometry, or nothing is being drawn.
    Ignored,
}

/// Result of finishing a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishOutcome {
    /// Long enough: the loop was closed exactly on its first point.
    Closed(PathId),
    /// Too short: the path was removed from the document.
    Discarded,
    /// No path was under construction.
    Idle,
}

/// Builds freehand paths from sampled pointer positions.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    /// Path under construction, if any.
    drawing: Option<PathId>,
    /// Most recently started path; deselected when the next one starts.
    last_path: Option<PathId>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path currently being drawn.
    pub fn current(&self) -> Option<PathId> {
        self.drawing
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing.is_some()
    }

    /// Start a new fully selected path in `layer` with one segment at `point`.
    pub fn start(
        &mut self,
        document: &mut CanvasDocument,
        layer: &str,
        point: Point,
        style: PathStyle,
    ) -> PathId {
        if let Some(previous) = self.last_path.take().and_then(|id| document.find_path_mut(id)) {
            previous.set_selected(false);
        }

        let mut path = Path::new(style);
        path.set_fully_selected(true);
        path.add(point);
        let id = document.ensure_layer(layer).add_path(path);
        log::debug!("Started path {id} in layer {layer:?}");

        self.drawing = Some(id);
        self.last_path = Some(id);
        id
    }

    /// Feed a pointer move.
    ///
    /// A point is appended when it lies farther than `resolution` from every
    /// point of the path drawn so far. A point within `resolution` of the
    /// first segment finishes the path once it has more than
    /// `minimum_points` segments.
    pub fn extend(
        &mut self,
        document: &mut CanvasDocument,
        point: Point,
        resolution: f64,
        minimum_points: usize,
    ) -> PenStep {
        let Some(id) = self.drawing else {
            return PenStep::Ignored;
        };
        let Some(path) = document.find_path_mut(id) else {
            self.drawing = None;
            return PenStep::Ignored;
        };
        let (Some(nearest), Some(first)) = (path.nearest_point(point), path.first_point()) else {
            return PenStep::Ignored;
        };

        if nearest.distance(point) > resolution {
            path.add(point);
            PenStep::Appended
        } else if first.distance(point) < resolution && path.len() > minimum_points {
            log::debug!("Path {id} returned to its start");
            PenStep::Finished(self.finish(document, minimum_points))
        } else {
            PenStep::Ignored
        }
    }

    /// Finish the path under construction: close it when it has more than
    /// `minimum_points` segments, discard it otherwise.
    pub fn finish(&mut self, document: &mut CanvasDocument, minimum_points: usize) -> FinishOutcome {
        let Some(id) = self.drawing.take() else {
            return FinishOutcome::Idle;
        };
        let Some(path) = document.find_path_mut(id) else {
            return FinishOutcome::Idle;
        };

        if path.len() > minimum_points {
            path.close();
            log::debug!("Closed path {id} with {} segments", path.len());
            FinishOutcome::Closed(id)
        } else {
            log::debug!("Discarded path {id} with {} segments", path.len());
            document.remove_path(id);
            FinishOutcome::Discarded
        }
    }
}
