//! Canvas document: named layers owning paths.

use crate::shapes::{Path, PathId, PathStyle, SerializableColor, StrokeCap};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Name of the implicit layer used by the single-layer surface.
pub const DEFAULT_LAYER_NAME: &str = "default";

/// A named, ordered container of paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name, unique within a document.
    pub name: String,
    /// Paths back to front.
    #[serde(default)]
    pub paths: Vec<Path>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paths: Vec::new(),
        }
    }

    /// Add a path on top, returning its id.
    pub fn add_path(&mut self, path: Path) -> PathId {
        let id = path.id();
        self.paths.push(path);
        id
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|p| p.id() == id)
    }

    pub fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.iter_mut().find(|p| p.id() == id)
    }

    pub fn remove_path(&mut self, id: PathId) -> Option<Path> {
        let index = self.paths.iter().position(|p| p.id() == id)?;
        Some(self.paths.remove(index))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Errors raised while importing foreign document formats.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Unexpected document shape: {0}")]
    UnexpectedShape(&'static str),
}

/// The full drawn artifact: an ordered sequence of layers, bottom to top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Borrowed view that serializes like a document but skips empty layers.
#[derive(Serialize)]
struct PrunedDocument<'a> {
    layers: Vec<&'a Layer>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layer(name).is_some()
    }

    /// Get a layer by name, creating it on top if it does not exist yet.
    pub fn ensure_layer(&mut self, name: &str) -> &mut Layer {
        let index = match self.layers.iter().position(|l| l.name == name) {
            Some(index) => index,
            None => {
                log::debug!("Creating layer {name:?}");
                self.layers.push(Layer::new(name));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    /// All paths, bottom layer first.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.layers.iter().flat_map(|l| l.paths.iter())
    }

    pub fn paths_mut(&mut self) -> impl Iterator<Item = &mut Path> {
        self.layers.iter_mut().flat_map(|l| l.paths.iter_mut())
    }

    pub fn find_path(&self, id: PathId) -> Option<&Path> {
        self.layers.iter().find_map(|l| l.path(id))
    }

    pub fn find_path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.layers.iter_mut().find_map(|l| l.path_mut(id))
    }

    /// Name of the layer holding a path.
    pub fn layer_of(&self, id: PathId) -> Option<&str> {
        self.layers
            .iter()
            .find(|l| l.path(id).is_some())
            .map(|l| l.name.as_str())
    }

    pub fn remove_path(&mut self, id: PathId) -> Option<Path> {
        self.layers.iter_mut().find_map(|l| l.remove_path(id))
    }

    /// Ids of every path taking part in the selection.
    pub fn selected_paths(&self) -> Vec<PathId> {
        self.paths()
            .filter(|p| p.is_selected())
            .map(Path::id)
            .collect()
    }

    /// Clear path and segment selection everywhere.
    pub fn deselect_all(&mut self) {
        for path in self.paths_mut().filter(|p| p.is_selected()) {
            path.set_selected(false);
        }
    }

    pub fn path_count(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.path_count() == 0
    }

    /// Remove layers without paths, returning how many were removed.
    pub fn prune_empty_layers(&mut self) -> usize {
        let before = self.layers.len();
        self.layers.retain(|l| !l.is_empty());
        before - self.layers.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the document to JSON, leaving out empty layers.
    pub fn to_json_pruned(&self) -> Result<String, serde_json::Error> {
        let view = PrunedDocument {
            layers: self.layers.iter().filter(|l| !l.is_empty()).collect(),
        };
        serde_json::to_string(&view)
    }

    /// Deserialize a document from JSON.
    ///
    /// A layer repeating an earlier name is folded into that layer, keeping
    /// the path order of the input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let loaded: Self = serde_json::from_str(json)?;
        Ok(loaded.merge_duplicate_layers())
    }

    fn merge_duplicate_layers(self) -> Self {
        let mut doc = Self::new();
        for layer in self.layers {
            if doc.has_layer(&layer.name) {
                log::warn!("Merging repeated layer {:?}", layer.name);
            }
            doc.ensure_layer(&layer.name).paths.extend(layer.paths);
        }
        doc
    }

    /// Import a paper.js `project.exportJSON()` payload.
    ///
    /// Layers keep their names (unnamed layers go to [`DEFAULT_LAYER_NAME`]),
    /// compound paths and groups are flattened, and curve handles are
    /// dropped. Items that are not paths are skipped.
    pub fn from_paper_json(json: &str) -> Result<Self, ImportError> {
        let data: Value = serde_json::from_str(json)?;
        let items = data
            .as_array()
            .ok_or(ImportError::UnexpectedShape("expected an array of layers"))?;

        let mut doc = Self::new();
        for item in items {
            let Some((kind, props)) = paper_item(item) else {
                continue;
            };
            if kind == "Layer" {
                let name = props
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(DEFAULT_LAYER_NAME);
                let layer = doc.ensure_layer(name);
                collect_paper_paths(props.get("children"), &mut layer.paths);
            } else {
                let layer = doc.ensure_layer(DEFAULT_LAYER_NAME);
                collect_paper_paths(Some(item), &mut layer.paths);
            }
        }

        Ok(doc)
    }
}

/// Split a paper.js `["Kind", {props}]` pair.
fn paper_item(item: &Value) -> Option<(&str, &serde_json::Map<String, Value>)> {
    let pair = item.as_array()?;
    let kind = pair.first()?.as_str()?;
    let props = pair.get(1)?.as_object()?;
    Some((kind, props))
}

/// Collect paths from a paper.js item or list of items.
fn collect_paper_paths(items: Option<&Value>, out: &mut Vec<Path>) {
    let Some(items) = items else { return };

    if let Some((kind, props)) = paper_item(items) {
        match kind {
            "Path" => {
                if let Some(path) = paper_path(props) {
                    out.push(path);
                }
            }
            "CompoundPath" | "Group" => collect_paper_paths(props.get("children"), out),
            _ => log::debug!("Skipping paper item {kind:?}"),
        }
        return;
    }

    if let Some(list) = items.as_array() {
        for item in list {
            collect_paper_paths(Some(item), out);
        }
    }
}

fn paper_path(props: &serde_json::Map<String, Value>) -> Option<Path> {
    let points: Vec<Point> = props
        .get("segments")?
        .as_array()?
        .iter()
        .filter_map(paper_segment_point)
        .collect();
    if points.is_empty() {
        return None;
    }

    let style = PathStyle {
        fill_color: props.get("fillColor").and_then(paper_color),
        stroke_color: props.get("strokeColor").and_then(paper_color),
        stroke_width: props
            .get("strokeWidth")
            .and_then(Value::as_f64)
            .unwrap_or(1.0),
        stroke_cap: match props.get("strokeCap").and_then(Value::as_str) {
            Some("round") => StrokeCap::Round,
            Some("square") => StrokeCap::Square,
            _ => StrokeCap::Butt,
        },
    };

    let mut path = Path::from_points(points, style);
    let closed = props
        .get("closed")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if closed && !path.is_closed() {
        path.close();
    }
    Some(path)
}

/// A segment is `[x, y]` or `[[x, y], handleIn, handleOut]`.
fn paper_segment_point(segment: &Value) -> Option<Point> {
    let parts = segment.as_array()?;
    let coords = match parts.first()? {
        Value::Array(point) => point,
        _ => parts,
    };
    let x = coords.first()?.as_f64()?;
    let y = coords.get(1)?.as_f64()?;
    Some(Point::new(x, y))
}

/// Colors are `[r, g, b(, a)]` in 0..1, optionally prefixed by a type tag.
fn paper_color(color: &Value) -> Option<SerializableColor> {
    if let Some(hex) = color.as_str() {
        return SerializableColor::parse_css(hex);
    }
    let parts = color.as_array()?;
    let (tag, channels) = match parts.first()?.as_str() {
        Some(tag) => (tag, &parts[1..]),
        None => ("rgb", &parts[..]),
    };
    let channels: Vec<f64> = channels.iter().filter_map(Value::as_f64).collect();
    match (tag, channels.as_slice()) {
        ("gray", [g]) => Some(SerializableColor::from_unit_rgba(*g, *g, *g, 1.0)),
        ("gray", [g, a]) => Some(SerializableColor::from_unit_rgba(*g, *g, *g, *a)),
        ("rgb", [r, g, b]) => Some(SerializableColor::from_unit_rgba(*r, *g, *b, 1.0)),
        ("rgb", [r, g, b, a]) => Some(SerializableColor::from_unit_rgba(*r, *g, *b, *a)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::DEFAULT_FILL_COLOR;

    fn triangle() -> Path {
        Path::from_points(
            [
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 8.0),
                Point::new(0.0, 0.0),
            ],
            PathStyle::default(),
        )
    }

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
        assert!(doc.layers.is_empty());
    }

    #[test]
    fn test_ensure_layer_is_idempotent() {
        let mut doc = CanvasDocument::new();
        doc.ensure_layer("pumpkin").add_path(triangle());
        doc.ensure_layer("pumpkin");
        doc.ensure_layer("carving");

        assert_eq!(doc.layer_names(), vec!["pumpkin", "carving"]);
        assert_eq!(doc.layer("pumpkin").unwrap().len(), 1);
    }

    #[test]
    fn test_find_and_remove_path() {
        let mut doc = CanvasDocument::new();
        let id = doc.ensure_layer("a").add_path(triangle());
        doc.ensure_layer("b").add_path(triangle());

        assert_eq!(doc.layer_of(id), Some("a"));
        assert!(doc.find_path_mut(id).is_some());
        assert!(doc.remove_path(id).is_some());
        assert!(doc.find_path(id).is_none());
        assert_eq!(doc.path_count(), 1);
    }

    #[test]
    fn test_deselect_all() {
        let mut doc = CanvasDocument::new();
        let layer = doc.ensure_layer(DEFAULT_LAYER_NAME);
        let a = layer.add_path(triangle());
        let b = layer.add_path(triangle());
        doc.find_path_mut(a).unwrap().set_fully_selected(true);
        doc.find_path_mut(b).unwrap().select_segment(1);
        assert_eq!(doc.selected_paths().len(), 2);

        doc.deselect_all();
        assert!(doc.selected_paths().is_empty());
    }

    #[test]
    fn test_prune_empty_layers() {
        let mut doc = CanvasDocument::new();
        doc.ensure_layer("empty");
        doc.ensure_layer("full").add_path(triangle());

        assert_eq!(doc.prune_empty_layers(), 1);
        assert_eq!(doc.layer_names(), vec!["full"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = CanvasDocument::new();
        doc.ensure_layer("pumpkin").add_path(triangle());
        doc.ensure_layer("carving");

        let json = doc.to_json().unwrap();
        let loaded = CanvasDocument::from_json(&json).unwrap();

        assert_eq!(loaded.layer_names(), vec!["pumpkin", "carving"]);
        let original: Vec<Point> = doc.paths().flat_map(Path::points).collect();
        let restored: Vec<Point> = loaded.paths().flat_map(Path::points).collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_from_json_merges_repeated_layers() {
        let mut first = triangle();
        first.translate(kurbo::Vec2::new(10.0, 0.0));
        let second = triangle();
        let json = serde_json::json!({
            "layers": [
                {"name": "pumpkin", "paths": [first]},
                {"name": "carving", "paths": []},
                {"name": "pumpkin", "paths": [second]},
            ]
        })
        .to_string();

        let doc = CanvasDocument::from_json(&json).unwrap();
        assert_eq!(doc.layer_names(), vec!["pumpkin", "carving"]);
        let pumpkin = doc.layer("pumpkin").unwrap();
        assert_eq!(pumpkin.len(), 2);
        assert_eq!(pumpkin.paths[0].points().next(), Some(Point::new(10.0, 0.0)));
        assert_eq!(pumpkin.paths[1].points().next(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_pruned_json_skips_empty_layers() {
        let mut doc = CanvasDocument::new();
        doc.ensure_layer("carving");
        doc.ensure_layer("pumpkin").add_path(triangle());

        let loaded = CanvasDocument::from_json(&doc.to_json_pruned().unwrap()).unwrap();
        assert_eq!(loaded.layer_names(), vec!["pumpkin"]);
        // The live document keeps its scaffolding.
        assert!(doc.has_layer("carving"));
    }

    #[test]
    fn test_from_paper_json() {
        let json = r#"[
            ["Layer", {"applyMatrix": true, "name": "pumpkin", "children": [
                ["Path", {"applyMatrix": true,
                          "segments": [[0, 0], [10, 0], [[10, 10], [0, 0], [0, 0]]],
                          "closed": true,
                          "fillColor": [0.97647, 0.45098, 0.08627],
                          "strokeColor": ["rgb", 0, 0, 0, 0.5],
                          "strokeWidth": 2,
                          "strokeCap": "round"}],
                ["CompoundPath", {"children": [
                    ["Path", {"segments": [[1, 1], [2, 2], [3, 1]]}]
                ]}],
                ["PointText", {"content": "hi"}]
            ]}],
            ["Layer", {"children": []}]
        ]"#;

        let doc = CanvasDocument::from_paper_json(json).unwrap();
        assert_eq!(doc.layer_names(), vec!["pumpkin", DEFAULT_LAYER_NAME]);

        let pumpkin = doc.layer("pumpkin").unwrap();
        assert_eq!(pumpkin.len(), 2);

        let outline = &pumpkin.paths[0];
        assert_eq!(outline.len(), 4);
        assert!(outline.is_closed());
        assert_eq!(outline.style.fill_color, Some(DEFAULT_FILL_COLOR));
        assert_eq!(
            outline.style.stroke_color,
            Some(SerializableColor::new(0, 0, 0, 128))
        );
        assert_eq!(outline.style.stroke_cap, StrokeCap::Round);

        let inner = &pumpkin.paths[1];
        assert_eq!(inner.len(), 3);
        assert_eq!(inner.style.fill_color, None);
        assert!((inner.style.stroke_width - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_paper_json_rejects_non_array() {
        let result = CanvasDocument::from_paper_json(r#"{"layers": []}"#);
        assert!(matches!(result, Err(ImportError::UnexpectedShape(_))));
        assert!(matches!(
            CanvasDocument::from_paper_json("not json"),
            Err(ImportError::InvalidJson(_))
        ));
    }
}
