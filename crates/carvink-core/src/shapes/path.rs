//! Freehand path made of point segments.

use super::{PathId, PathStyle};
use kurbo::{Affine, BezPath, Line, ParamCurve, ParamCurveNearest, Point, Rect, Shape as _, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accuracy passed to kurbo nearest-point queries (exact for lines).
const NEAREST_ACCURACY: f64 = 1e-9;

/// A single point on a path.
///
/// Segment selection is independent from the owning path's own flag, which
/// is what allows a single vertex to be dragged or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Point", into = "Point")]
pub struct Segment {
    pub point: Point,
    pub selected: bool,
}

impl Segment {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            selected: false,
        }
    }
}

impl From<Point> for Segment {
    fn from(point: Point) -> Self {
        Self::new(point)
    }
}

impl From<Segment> for Point {
    fn from(segment: Segment) -> Self {
        segment.point
    }
}

/// A location on a path's outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveLocation {
    /// Index of the curve, i.e. the segment the curve starts at.
    pub index: usize,
    /// Parameter along the curve in `0.0..=1.0`.
    pub t: f64,
    /// The located point.
    pub point: Point,
    /// Distance from the query point.
    pub distance: f64,
}

impl CurveLocation {
    /// Position along the segment list as a fractional index.
    pub fn fractional_index(&self) -> f64 {
        self.index as f64 + self.t
    }
}

/// A freehand path: ordered segments plus style and selection state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: PathId,
    /// Segments in drawing order.
    pub segments: Vec<Segment>,
    /// Style properties.
    pub style: PathStyle,
    /// Whole-path selection flag.
    #[serde(skip)]
    selected: bool,
    /// All segments are shown as selected and new segments join the selection.
    #[serde(skip)]
    fully_selected: bool,
}

impl Path {
    /// Create a new empty path.
    pub fn new(style: PathStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            segments: Vec::new(),
            style,
            selected: false,
            fully_selected: false,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: impl IntoIterator<Item = Point>, style: PathStyle) -> Self {
        let mut path = Self::new(style);
        path.segments = points.into_iter().map(Segment::new).collect();
        path
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment points in order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.point)
    }

    pub fn first_point(&self) -> Option<Point> {
        self.segments.first().map(|s| s.point)
    }

    pub fn last_point(&self) -> Option<Point> {
        self.segments.last().map(|s| s.point)
    }

    /// Append a segment, returning its index.
    pub fn add(&mut self, point: Point) -> usize {
        let mut segment = Segment::new(point);
        segment.selected = self.fully_selected;
        self.segments.push(segment);
        self.segments.len() - 1
    }

    /// Insert a segment before `index` (clamped to the end), returning its index.
    pub fn insert(&mut self, index: usize, point: Point) -> usize {
        let index = index.min(self.segments.len());
        self.segments.insert(index, Segment::new(point));
        index
    }

    /// Remove a segment by index.
    pub fn remove_segment(&mut self, index: usize) -> Option<Segment> {
        (index < self.segments.len()).then(|| self.segments.remove(index))
    }

    /// Remove all selected segments, returning how many were removed.
    pub fn remove_selected_segments(&mut self) -> usize {
        let before = self.segments.len();
        self.segments.retain(|s| !s.selected);
        before - self.segments.len()
    }

    /// Close the loop exactly by repeating the first point.
    pub fn close(&mut self) {
        if let Some(first) = self.first_point() {
            self.add(first);
        }
    }

    /// Whether the last segment coincides with the first.
    pub fn is_closed(&self) -> bool {
        self.segments.len() > 1 && self.first_point() == self.last_point()
    }

    /// Whether the path participates in the selection, either as a whole or
    /// through any of its segments.
    pub fn is_selected(&self) -> bool {
        self.selected || self.segments.iter().any(|s| s.selected)
    }

    pub fn is_fully_selected(&self) -> bool {
        self.fully_selected
    }

    /// Set the whole-path selection flag. Deselecting also clears segments.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        if !selected {
            self.fully_selected = false;
            for segment in &mut self.segments {
                segment.selected = false;
            }
        }
    }

    /// Select or deselect the path together with all of its segments.
    pub fn set_fully_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.fully_selected = selected;
        for segment in &mut self.segments {
            segment.selected = selected;
        }
    }

    /// Select a single segment, leaving the path flag untouched.
    pub fn select_segment(&mut self, index: usize) -> bool {
        match self.segments.get_mut(index) {
            Some(segment) => {
                segment.selected = true;
                true
            }
            None => false,
        }
    }

    pub fn selected_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.selected).count()
    }

    /// Center of the bounding box.
    pub fn position(&self) -> Point {
        self.bounds().center()
    }

    /// Move the whole path by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        self.transform(Affine::translate(delta));
    }

    /// Move only the selected segments by `delta`.
    pub fn translate_selected_segments(&mut self, delta: Vec2) {
        for segment in self.segments.iter_mut().filter(|s| s.selected) {
            segment.point += delta;
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        for segment in &mut self.segments {
            segment.point = affine * segment.point;
        }
    }

    pub fn bounds(&self) -> Rect {
        let mut points = self.points();
        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p))
    }

    /// Curves between consecutive segments.
    fn curves(&self) -> impl Iterator<Item = Line> + '_ {
        self.segments
            .windows(2)
            .map(|w| Line::new(w[0].point, w[1].point))
    }

    /// Nearest location on the outline to `point`.
    ///
    /// A single-segment path has no curves; its only point is returned with
    /// index 0.
    pub fn nearest_location(&self, point: Point) -> Option<CurveLocation> {
        if self.segments.len() == 1 {
            let only = self.segments[0].point;
            return Some(CurveLocation {
                index: 0,
                t: 0.0,
                point: only,
                distance: only.distance(point),
            });
        }

        self.curves()
            .enumerate()
            .map(|(index, line)| {
                let nearest = line.nearest(point, NEAREST_ACCURACY);
                CurveLocation {
                    index,
                    t: nearest.t,
                    point: line.eval(nearest.t),
                    distance: nearest.distance_sq.sqrt(),
                }
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Nearest point on the outline to `point`.
    pub fn nearest_point(&self, point: Point) -> Option<Point> {
        self.nearest_location(point).map(|loc| loc.point)
    }

    /// Vertices of the area the path encloses: consecutive duplicates and the
    /// closing segment are dropped.
    pub fn polygon(&self) -> Vec<Point> {
        let mut polygon: Vec<Point> = Vec::with_capacity(self.segments.len());
        for point in self.points() {
            if polygon.last() != Some(&point) {
                polygon.push(point);
            }
        }
        while polygon.len() > 1 && polygon.first() == polygon.last() {
            polygon.pop();
        }
        polygon
    }

    /// Outline as a bezier path (open unless the last point repeats the first).
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.points();
        if let Some(first) = points.next() {
            path.move_to(first);
            for point in points {
                path.line_to(point);
            }
        }
        path
    }

    /// Implicitly closed outline used for fill queries.
    fn fill_path(&self) -> BezPath {
        let polygon = self.polygon();
        let mut path = BezPath::new();
        if polygon.len() < 3 {
            return path;
        }
        path.move_to(polygon[0]);
        for &point in &polygon[1..] {
            path.line_to(point);
        }
        path.close_path();
        path
    }

    /// Whether `point` is inside the filled area (nonzero winding).
    pub fn contains(&self, point: Point) -> bool {
        self.fill_path().contains(point)
    }

    /// Unsigned enclosed area.
    pub fn area(&self) -> f64 {
        self.fill_path().area().abs()
    }
}
