//! Editing session: owns the document and routes input events to the pen,
//! selection and layer rules according to the current mode.

use crate::canvas::{CanvasDocument, DEFAULT_LAYER_NAME};
use crate::config::CanvasConfig;
use crate::hit_test::{HitOptions, HitResult, HitTester};
use crate::input::{CanvasEvent, PointerState, is_delete_key, to_canvas_point};
use crate::layers::{ConstraintOutcome, LayerCoordinator};
use crate::selection::{SelectionKind, SelectionManager};
use crate::storage::{PersistPayload, PersistSink, StorageResult, export_document, import_document};
use crate::tools::{DrawingMode, FinishOutcome, PathBuilder, PenStep};
use kurbo::{Point, Rect};

/// One mounted drawing surface.
pub struct CanvasSession<S: PersistSink> {
    document: CanvasDocument,
    config: CanvasConfig,
    pointer: PointerState,
    pen: PathBuilder,
    selection: SelectionManager,
    /// Layer receiving new paths.
    active_layer: String,
    /// Reserved-layer rules, present on the layered surface only.
    layers: Option<LayerCoordinator>,
    /// Bounding box of the canvas element in viewport coordinates.
    canvas_bounds: Rect,
    sink: S,
}

impl<S: PersistSink> CanvasSession<S> {
    /// Mount a session, loading `drawingContent` when present.
    pub fn mount(config: CanvasConfig, sink: S) -> StorageResult<Self> {
        let mut document = match config.drawing_content.as_deref() {
            Some(content) if !content.trim().is_empty() => import_document(content)?,
            _ => CanvasDocument::new(),
        };

        let layers = config.layers.clone().map(LayerCoordinator::new);
        if let Some(coordinator) = &layers {
            coordinator.ensure_layers(&mut document);
        }

        let active_layer = match (&config.active_layer, &layers) {
            (Some(name), _) => name.clone(),
            (None, Some(coordinator)) => coordinator.roles().base.clone(),
            (None, None) => DEFAULT_LAYER_NAME.to_string(),
        };
        if layers.is_some() {
            document.ensure_layer(&active_layer);
        }

        log::info!(
            "Mounted canvas with {} layers and {} paths, active layer {active_layer:?}",
            document.layers.len(),
            document.path_count()
        );

        Ok(Self {
            document,
            config,
            pointer: PointerState::new(),
            pen: PathBuilder::new(),
            selection: SelectionManager::new(),
            active_layer,
            layers,
            canvas_bounds: Rect::ZERO,
            sink,
        })
    }

    /// Dispatch one host event.
    pub fn handle_event(&mut self, event: CanvasEvent) -> StorageResult<()> {
        match event {
            CanvasEvent::Press { x, y } => self.press(self.canvas_point(x, y)),
            CanvasEvent::Move { x, y } => self.pointer_move(self.canvas_point(x, y)),
            CanvasEvent::Release { x, y } => {
                self.release(self.canvas_point(x, y));
            }
            CanvasEvent::KeyDown { key, shift } => self.key_down(&key, shift),
            CanvasEvent::KeyUp { shift, .. } => self.key_up(shift),
            CanvasEvent::Persist => {
                self.persist()?;
            }
        }
        Ok(())
    }

    fn canvas_point(&self, x: f64, y: f64) -> Point {
        to_canvas_point(Point::new(x, y), self.canvas_bounds)
    }

    /// Pointer pressed at a canvas-local point.
    pub fn press(&mut self, point: Point) {
        self.pointer.press(point);

        match self.config.drawing_mode {
            DrawingMode::Pen => {
                if self.pen.is_drawing() {
                    self.pen.finish(&mut self.document, self.config.minimum_points_per_path);
                }
                if self.is_locked(&self.active_layer) {
                    log::warn!("Layer {:?} is locked against drawing", self.active_layer);
                    return;
                }
                self.pen.start(
                    &mut self.document,
                    &self.active_layer,
                    point,
                    self.config.path_style(),
                );
            }
            DrawingMode::Select => match self.hit_test(point) {
                Some(hit) => {
                    self.selection.select_hit(
                        &mut self.document,
                        hit,
                        self.pointer.last,
                        self.pointer.multi_select,
                    );
                }
                None => self.selection.deselect_all(&mut self.document),
            },
        }
    }

    /// Pointer moved; ignored unless pressed.
    pub fn pointer_move(&mut self, point: Point) {
        if !self.pointer.pressed {
            return;
        }
        self.pointer.advance(point);

        match self.config.drawing_mode {
            DrawingMode::Pen => {
                let step = self.pen.extend(
                    &mut self.document,
                    point,
                    self.config.draw_resolution,
                    self.config.minimum_points_per_path,
                );
                if let PenStep::Finished(_) = step {
                    self.pointer.pressed = false;
                }
            }
            DrawingMode::Select => {
                self.selection.move_selection(&mut self.document, self.pointer.delta());
            }
        }
    }

    /// Pointer released. Finishes any path still being drawn, then runs the
    /// constraint step on the layered surface.
    pub fn release(&mut self, point: Point) -> Option<ConstraintOutcome> {
        self.pointer.release(point);

        if let FinishOutcome::Closed(id) =
            self.pen.finish(&mut self.document, self.config.minimum_points_per_path)
        {
            log::debug!("Finished path {id} on release");
        }

        self.layers
            .as_ref()
            .map(|layers| layers.apply_constraint(&mut self.document, &self.active_layer))
    }

    pub fn key_down(&mut self, key: &str, shift: bool) {
        self.pointer.multi_select = shift;
        if is_delete_key(key) {
            self.selection
                .delete_selection(&mut self.document, self.config.minimum_points_per_path);
        }
    }

    pub fn key_up(&mut self, shift: bool) {
        self.pointer.multi_select = shift;
    }

    /// Export the document and push it to the sink.
    pub fn persist(&mut self) -> StorageResult<PersistPayload> {
        let payload = export_document(&self.document)?;
        self.sink.push(&self.config.persist_event_name, &payload)?;
        log::info!(
            "Pushed {:?} with {} paths",
            self.config.persist_event_name,
            self.document.path_count()
        );
        Ok(payload)
    }

    /// Apply a refreshed host configuration. Content and layer roles are
    /// read only at mount.
    pub fn update_config(&mut self, config: CanvasConfig) {
        if let Some(layer) = &config.active_layer {
            if *layer != self.active_layer {
                self.set_active_layer(layer);
            }
        }
        let drawing_content = self.config.drawing_content.take();
        let layers = self.config.layers.take();
        self.config = CanvasConfig {
            drawing_content,
            layers,
            ..config
        };
    }

    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.config.drawing_mode = mode;
    }

    /// Switch the layer receiving new paths, creating it if needed.
    pub fn set_active_layer(&mut self, name: &str) {
        self.document.ensure_layer(name);
        self.active_layer = name.to_string();
        self.config.active_layer = Some(self.active_layer.clone());
        log::debug!("Active layer is now {name:?}");
    }

    /// Record where the canvas element currently sits in the viewport.
    pub fn set_canvas_bounds(&mut self, bounds: Rect) {
        self.canvas_bounds = bounds;
    }

    /// Whether new paths are blocked on `layer`.
    pub fn is_locked(&self, layer: &str) -> bool {
        self.layers
            .as_ref()
            .is_some_and(|layers| layers.is_locked(&self.document, layer))
    }

    pub fn hit_test(&self, point: Point) -> Option<HitResult> {
        HitTester::new(HitOptions::new(self.config.hit_tolerance())).hit_test(&self.document, point)
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn mode(&self) -> DrawingMode {
        self.config.drawing_mode
    }

    pub fn active_layer(&self) -> &str {
        &self.active_layer
    }

    pub fn selection_kind(&self) -> SelectionKind {
        self.selection.kind()
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_drawing()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
