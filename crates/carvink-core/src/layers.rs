//! Reserved layers of the carving surface: a base silhouette, a free
//! decoration layer and a constrained layer clipped to the silhouette.

use crate::canvas::CanvasDocument;
use crate::config::ConfigError;
use crate::shapes::{Clipped, Path, clip_polygon};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_LAYER: &str = "pumpkin";
pub const DEFAULT_DECORATION_LAYER: &str = "decoration";
pub const DEFAULT_CONSTRAINED_LAYER: &str = "carving";

/// Names of the reserved layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerRoles {
    /// Silhouette; locked against new drawing once it holds a shape.
    pub base: String,
    /// Unrestricted drawing.
    pub decoration: String,
    /// Content clipped to the first shape of the base layer.
    pub constrained: String,
}

impl Default for LayerRoles {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_LAYER.to_string(),
            decoration: DEFAULT_DECORATION_LAYER.to_string(),
            constrained: DEFAULT_CONSTRAINED_LAYER.to_string(),
        }
    }
}

impl LayerRoles {
    /// Names bottom to top.
    pub fn names(&self) -> [&str; 3] {
        [self.base.as_str(), self.decoration.as_str(), self.constrained.as_str()]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = self.names();
        if names.iter().any(|name| name.is_empty()) {
            return Err(ConfigError::Invalid {
                field: "layers",
                reason: "layer names must not be empty".to_string(),
            });
        }
        if names[0] == names[1] || names[0] == names[2] || names[1] == names[2] {
            return Err(ConfigError::Invalid {
                field: "layers",
                reason: format!("layer names must be distinct, got {names:?}"),
            });
        }
        Ok(())
    }
}

/// Result of the post-release constraint step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOutcome {
    /// The active layer is not the constrained one.
    Inactive,
    /// A layer is missing or the base layer has nothing to clip against.
    Skipped,
    Applied {
        /// Paths replaced by their intersection with the silhouette.
        clipped: usize,
        /// Paths entirely outside the silhouette.
        removed: usize,
        /// Paths already inside the silhouette.
        unchanged: usize,
    },
}

/// Applies the reserved-layer rules to a document.
#[derive(Debug, Clone, Default)]
pub struct LayerCoordinator {
    roles: LayerRoles,
}

impl LayerCoordinator {
    pub fn new(roles: LayerRoles) -> Self {
        Self { roles }
    }

    pub fn roles(&self) -> &LayerRoles {
        &self.roles
    }

    /// Create any reserved layer that does not exist yet.
    pub fn ensure_layers(&self, document: &mut CanvasDocument) {
        for name in self.roles.names() {
            document.ensure_layer(name);
        }
    }

    /// Whether new paths may not be drawn into `layer`.
    pub fn is_locked(&self, document: &CanvasDocument, layer: &str) -> bool {
        layer == self.roles.base && document.layer(layer).is_some_and(|l| !l.is_empty())
    }

    /// Clip every path of the constrained layer to the first path of the base
    /// layer, when the constrained layer is `active`.
    ///
    /// Each path is replaced in place by the pieces of the intersection, which
    /// keep its style. Paths outside the silhouette disappear.
    pub fn apply_constraint(&self, document: &mut CanvasDocument, active: &str) -> ConstraintOutcome {
        if active != self.roles.constrained {
            return ConstraintOutcome::Inactive;
        }
        let Some(silhouette) = document
            .layer(&self.roles.base)
            .and_then(|l| l.paths.first())
            .map(Path::polygon)
        else {
            log::warn!("Skipping constraint: base layer {:?} has no shape", self.roles.base);
            return ConstraintOutcome::Skipped;
        };
        let Some(layer) = document.layer_mut(&self.roles.constrained) else {
            log::warn!("Skipping constraint: layer {:?} is missing", self.roles.constrained);
            return ConstraintOutcome::Skipped;
        };

        let (mut clipped, mut removed, mut unchanged) = (0, 0, 0);
        let mut paths = Vec::with_capacity(layer.paths.len());
        for path in std::mem::take(&mut layer.paths) {
            match clip_polygon(&path.polygon(), &silhouette) {
                Clipped::Outside => removed += 1,
                Clipped::Inside => {
                    unchanged += 1;
                    paths.push(path);
                }
                Clipped::Pieces(pieces) => {
                    clipped += 1;
                    for piece in pieces {
                        let mut replacement = Path::from_points(piece, path.style.clone());
                        replacement.close();
                        paths.push(replacement);
                    }
                }
            }
        }
        layer.paths = paths;

        log::debug!("Constraint step: {clipped} clipped, {removed} removed, {unchanged} unchanged");
        ConstraintOutcome::Applied {
            clipped,
            removed,
            unchanged,
        }
    }
}
