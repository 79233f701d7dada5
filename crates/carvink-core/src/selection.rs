//! Selection model: which geometry is selected and how move/delete act on it.

use crate::canvas::CanvasDocument;
use crate::hit_test::HitResult;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// How the current selection responds to move and delete.
///
/// A stroke click never survives as its own kind: it inserts a vertex and
/// becomes a [`SelectionKind::Segment`] selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    #[default]
    None,
    /// Whole paths.
    Fill,
    /// Individual vertices.
    Segment,
}

/// Tracks the active selection kind and applies selection operations to a
/// document.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    kind: SelectionKind,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> SelectionKind {
        self.kind
    }

    /// Apply a click that hit something.
    ///
    /// Without `additive`, prior selection is cleared first. A stroke hit
    /// inserts a new vertex at `pointer` after the hit segment and selects it.
    pub fn select_hit(
        &mut self,
        document: &mut CanvasDocument,
        hit: HitResult,
        pointer: Point,
        additive: bool,
    ) -> SelectionKind {
        if !additive {
            document.deselect_all();
        }
        let Some(path) = document.find_path_mut(hit.path()) else {
            log::debug!("Hit path {} no longer exists", hit.path());
            return self.kind;
        };

        self.kind = match hit {
            HitResult::Fill { .. } => {
                path.set_fully_selected(true);
                SelectionKind::Fill
            }
            HitResult::Segment { index, .. } => {
                path.select_segment(index);
                SelectionKind::Segment
            }
            HitResult::Stroke { location, .. } => {
                let index = path.insert(location.index + 1, pointer);
                path.select_segment(index);
                log::debug!("Inserted segment {index} into path {}", path.id());
                SelectionKind::Segment
            }
        };
        self.kind
    }

    /// Clear every selection flag in the document.
    pub fn deselect_all(&mut self, document: &mut CanvasDocument) {
        document.deselect_all();
        self.kind = SelectionKind::None;
    }

    /// Move the selection by `delta`, returning how many paths changed.
    pub fn move_selection(&self, document: &mut CanvasDocument, delta: Vec2) -> usize {
        let mut moved = 0;
        match self.kind {
            SelectionKind::None => {}
            SelectionKind::Fill => {
                for path in document.paths_mut().filter(|p| p.is_selected()) {
                    path.translate(delta);
                    moved += 1;
                }
            }
            SelectionKind::Segment => {
                for path in document.paths_mut().filter(|p| p.selected_segment_count() > 0) {
                    path.translate_selected_segments(delta);
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Delete the selection, returning how many paths or segments went away.
    ///
    /// Under segment selection, a path left with fewer than `minimum_points`
    /// segments is removed as a whole.
    pub fn delete_selection(&mut self, document: &mut CanvasDocument, minimum_points: usize) -> usize {
        let removed = match self.kind {
            SelectionKind::None => return 0,
            SelectionKind::Fill => {
                let ids = document.selected_paths();
                for id in &ids {
                    document.remove_path(*id);
                }
                ids.len()
            }
            SelectionKind::Segment => {
                let mut removed = 0;
                let mut degenerate = Vec::new();
                for path in document.paths_mut().filter(|p| p.selected_segment_count() > 0) {
                    removed += path.remove_selected_segments();
                    if path.len() < minimum_points {
                        degenerate.push(path.id());
                    }
                }
                for id in degenerate {
                    log::debug!("Removing path {id} left below {minimum_points} segments");
                    document.remove_path(id);
                }
                removed
            }
        };
        log::debug!("Deleted {removed} items under {:?} selection", self.kind);
        self.kind = SelectionKind::None;
        removed
    }
}
