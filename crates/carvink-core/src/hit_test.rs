//! Hit testing against the document.

use crate::canvas::CanvasDocument;
use crate::shapes::{CurveLocation, Path, PathId};
use kurbo::Point;

/// Default hit tolerance for the single-layer surface.
pub const DEFAULT_HIT_TOLERANCE: f64 = 5.0;
/// Default hit tolerance for the layered surface.
pub const LAYERED_HIT_TOLERANCE: f64 = 3.0;

/// What part of a path was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    /// The filled interior.
    Fill { path: PathId },
    /// A vertex.
    Segment { path: PathId, index: usize },
    /// The outline between vertices.
    Stroke {
        path: PathId,
        location: CurveLocation,
    },
}

impl HitResult {
    pub fn path(&self) -> PathId {
        match *self {
            HitResult::Fill { path }
            | HitResult::Segment { path, .. }
            | HitResult::Stroke { path, .. } => path,
        }
    }
}

/// Which hit kinds to consider, and how far from the geometry a point may be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOptions {
    pub tolerance: f64,
    pub segments: bool,
    pub stroke: bool,
    pub fill: bool,
}

impl HitOptions {
    /// All hit kinds enabled.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            segments: true,
            stroke: true,
            fill: true,
        }
    }
}

impl Default for HitOptions {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_TOLERANCE)
    }
}

/// Hit tester with fixed options.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitTester {
    pub options: HitOptions,
}

impl HitTester {
    pub fn new(options: HitOptions) -> Self {
        Self { options }
    }

    /// Find the frontmost hit at `point` (canvas-local), across all layers.
    ///
    /// Per path, vertices win over the outline and the outline wins over the
    /// interior.
    pub fn hit_test(&self, document: &CanvasDocument, point: Point) -> Option<HitResult> {
        document
            .layers
            .iter()
            .rev()
            .flat_map(|layer| layer.paths.iter().rev())
            .find_map(|path| self.hit_path(path, point))
    }

    fn hit_path(&self, path: &Path, point: Point) -> Option<HitResult> {
        let tolerance = self.options.tolerance;

        if self.options.segments {
            if let Some(index) = path
                .points()
                .position(|p| p.distance(point) <= tolerance)
            {
                return Some(HitResult::Segment {
                    path: path.id(),
                    index,
                });
            }
        }

        if self.options.stroke && path.style.stroke_color.is_some() && path.len() > 1 {
            let reach = tolerance + path.style.stroke_width / 2.0;
            if let Some(location) = path.nearest_location(point) {
                if location.distance <= reach {
                    return Some(HitResult::Stroke {
                        path: path.id(),
                        location,
                    });
                }
            }
        }

        if self.options.fill && path.style.fill_color.is_some() && path.contains(point) {
            return Some(HitResult::Fill { path: path.id() });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::PathStyle;

    fn square(doc: &mut CanvasDocument, layer: &str, x: f64, y: f64) -> PathId {
        let path = Path::from_points(
            [
                Point::new(x, y),
                Point::new(x + 20.0, y),
                Point::new(x + 20.0, y + 20.0),
                Point::new(x, y + 20.0),
                Point::new(x, y),
            ],
            PathStyle::default(),
        );
        doc.ensure_layer(layer).add_path(path)
    }

    #[test]
    fn test_segment_hit() {
        let mut doc = CanvasDocument::new();
        let id = square(&mut doc, "a", 0.0, 0.0);
        let hit = HitTester::default().hit_test(&doc, Point::new(21.0, 1.0));
        assert_eq!(hit, Some(HitResult::Segment { path: id, index: 1 }));
    }

    #[test]
    fn test_stroke_hit() {
        let mut doc = CanvasDocument::new();
        let id = square(&mut doc, "a", 0.0, 0.0);
        match HitTester::default().hit_test(&doc, Point::new(10.0, -2.0)) {
            Some(HitResult::Stroke { path, location }) => {
                assert_eq!(path, id);
                assert_eq!(location.index, 0);
                assert!((location.t - 0.5).abs() < 1e-9);
            }
            other => panic!("expected stroke hit, got {other:?}"),
        }
    }

    #[test]
    fn test_fill_hit() {
        let mut doc = CanvasDocument::new();
        let id = square(&mut doc, "a", 0.0, 0.0);
        let hit = HitTester::default().hit_test(&doc, Point::new(10.0, 10.0));
        assert_eq!(hit, Some(HitResult::Fill { path: id }));
    }

    #[test]
    fn test_no_hit() {
        let mut doc = CanvasDocument::new();
        square(&mut doc, "a", 0.0, 0.0);
        assert!(HitTester::default().hit_test(&doc, Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn test_front_layer_wins() {
        let mut doc = CanvasDocument::new();
        square(&mut doc, "back", 0.0, 0.0);
        let front = square(&mut doc, "front", 5.0, 5.0);
        let hit = HitTester::default().hit_test(&doc, Point::new(12.0, 12.0));
        assert_eq!(hit.map(|h| h.path()), Some(front));
    }

    #[test]
    fn test_disabled_kinds() {
        let mut doc = CanvasDocument::new();
        square(&mut doc, "a", 0.0, 0.0);
        let options = HitOptions {
            segments: false,
            stroke: false,
            ..HitOptions::new(5.0)
        };
        let hit = HitTester::new(options).hit_test(&doc, Point::new(1.0, 1.0));
        assert!(matches!(hit, Some(HitResult::Fill { .. })));
    }

    #[test]
    fn test_unfilled_path_has_no_interior() {
        let mut doc = CanvasDocument::new();
        let id = square(&mut doc, "a", 0.0, 0.0);
        doc.find_path_mut(id).unwrap().style.fill_color = None;
        assert!(HitTester::default().hit_test(&doc, Point::new(10.0, 10.0)).is_none());
    }
}
