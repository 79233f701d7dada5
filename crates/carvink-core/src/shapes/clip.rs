//! Polygon clipping through csgrs sketches.
//!
//! Outlines are handed to [`Sketch::polygon`] as drawn, so self-crossing
//! freehand strokes are resolved by the boolean engine instead of being
//! assumed simple.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use kurbo::{BezPath, Point, Shape};

/// Pieces below this fraction of the input area are boolean residue.
const RESIDUE_RATIO: f64 = 1e-6;

/// How a subject outline relates to a clip region.
#[derive(Debug, Clone, PartialEq)]
pub enum Clipped {
    /// The subject lies inside the region already.
    Inside,
    /// Nothing of the subject lies inside the region.
    Outside,
    /// Outer rings of the intersection, one per disjoint piece.
    Pieces(Vec<Vec<Point>>),
}

/// Intersect `subject` with `clip`. Both are closed outlines given without
/// the repeated closing point.
pub fn clip_polygon(subject: &[Point], clip: &[Point]) -> Clipped {
    if subject.len() < 3 || clip.len() < 3 {
        return Clipped::Outside;
    }
    let residue = RESIDUE_RATIO * ring_area(subject).max(ring_area(clip));
    let subject = sketch(subject);
    let clip = sketch(clip);

    let pieces = rings(&subject.intersection(&clip), residue);
    if pieces.is_empty() {
        return Clipped::Outside;
    }
    if rings(&subject.difference(&clip), residue).is_empty() {
        return Clipped::Inside;
    }
    Clipped::Pieces(pieces)
}

fn sketch(points: &[Point]) -> Sketch<()> {
    let coords: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
    Sketch::polygon(&coords, None)
}

fn rings(sketch: &Sketch<()>, residue: f64) -> Vec<Vec<Point>> {
    let polygons = sketch.to_multipolygon();
    let mut rings = Vec::with_capacity(polygons.0.len());
    for polygon in &polygons.0 {
        if !polygon.interiors().is_empty() {
            log::debug!("Dropping {} holes from clipped piece", polygon.interiors().len());
        }
        let mut ring: Vec<Point> = polygon
            .exterior()
            .0
            .iter()
            .map(|c| Point::new(c.x, c.y))
            .collect();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() >= 3 && ring_area(&ring) > residue {
            rings.push(ring);
        }
    }
    rings
}

/// Unsigned area of a closed outline. Lobes of a self-crossing outline
/// may cancel.
fn ring_area(ring: &[Point]) -> f64 {
    let mut path = BezPath::new();
    let mut points = ring.iter();
    if let Some(first) = points.next() {
        path.move_to(*first);
        for point in points {
            path.line_to(*point);
        }
        path.close_path();
    }
    path.area().abs()
}
