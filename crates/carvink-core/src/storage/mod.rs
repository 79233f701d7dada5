//! Persistence bridge: document export/import and outbound persist sinks.

mod file;
mod memory;

pub use file::FileSink;
pub use memory::MemorySink;

use crate::canvas::CanvasDocument;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Drawing not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Body of the outbound persist event: `{ "drawing": "<serialized document>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistPayload {
    pub drawing: String,
}

impl PersistPayload {
    /// Parse the carried drawing back into a document.
    pub fn document(&self) -> StorageResult<CanvasDocument> {
        import_document(&self.drawing)
    }
}

/// Receiver of persist events.
///
/// Implementations can deliver payloads to memory, the filesystem, or a
/// host transport.
pub trait PersistSink {
    /// Deliver one persisted drawing under `event_name`.
    fn push(&mut self, event_name: &str, payload: &PersistPayload) -> StorageResult<()>;
}

impl<S: PersistSink + ?Sized> PersistSink for Box<S> {
    fn push(&mut self, event_name: &str, payload: &PersistPayload) -> StorageResult<()> {
        (**self).push(event_name, payload)
    }
}

/// Serialize a document for persisting, leaving out empty layers.
pub fn export_document(document: &CanvasDocument) -> StorageResult<PersistPayload> {
    let drawing = document
        .to_json_pruned()
        .map_err(|e| StorageError::Serialization(e.to_string()))?;
    Ok(PersistPayload { drawing })
}

/// Parse serialized drawing content.
pub fn import_document(content: &str) -> StorageResult<CanvasDocument> {
    CanvasDocument::from_json(content).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Path, PathStyle};
    use kurbo::Point;

    fn document() -> CanvasDocument {
        let mut doc = CanvasDocument::new();
        doc.ensure_layer("empty");
        doc.ensure_layer("shapes").add_path(Path::from_points(
            [Point::new(1.5, 2.0), Point::new(10.0, 2.0), Point::new(10.0, 12.25)],
            PathStyle::default(),
        ));
        doc
    }

    #[test]
    fn test_export_prunes_without_touching_document() {
        let doc = document();
        let payload = export_document(&doc).unwrap();

        let exported = payload.document().unwrap();
        assert_eq!(exported.layer_names(), vec!["shapes"]);
        assert_eq!(doc.layer_names(), vec!["empty", "shapes"]);
    }

    #[test]
    fn test_round_trip_keeps_geometry() {
        let doc = document();
        let exported = export_document(&doc).unwrap().document().unwrap();

        let original: Vec<Point> = doc.paths().flat_map(|p| p.points()).collect();
        let restored: Vec<Point> = exported.paths().flat_map(|p| p.points()).collect();
        assert_eq!(original, restored);
        assert_eq!(exported.path_count(), 1);
    }

    #[test]
    fn test_payload_shape() {
        let payload = PersistPayload {
            drawing: "{}".to_string(),
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"drawing":"{}"}"#);
    }

    #[test]
    fn test_import_rejects_malformed_content() {
        assert!(matches!(
            import_document("{not json"),
            Err(StorageError::Serialization(_))
        ));
    }
}
