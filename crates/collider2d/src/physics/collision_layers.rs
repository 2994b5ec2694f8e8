//! Collision layer system for filtering collision detection
//!
//! Layers are named and registered at runtime. Each registered name gets one
//! bit of a 32-bit [`LayerMask`]. Two colliders are tested against each other
//! only when their masks share at least one layer.

use std::ops::{BitOr, BitOrAssign};

use super::error::ColliderError;

/// Name of the layer colliders join when no layers are supplied
pub const DEFAULT_LAYER: &str = "default";

/// Index of a registered layer (bit position in a [`LayerMask`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u8);

impl LayerId {
    /// The always-present default layer
    pub const DEFAULT: LayerId = LayerId(0);

    /// Bit index of this layer
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Set of layers packed into a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(u32);

impl LayerMask {
    /// No collision layer
    pub const NONE: LayerMask = LayerMask(0);

    /// All collision layers
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Mask containing a single layer
    pub fn from_layer(layer: LayerId) -> Self {
        Self(1 << layer.0)
    }

    /// Raw bits
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Whether `layer` is part of this mask
    pub fn contains(self, layer: LayerId) -> bool {
        self.0 & (1 << layer.0) != 0
    }

    /// Whether the two masks share any layer
    ///
    /// # Example
    /// ```
    /// use collider2d::physics::{LayerMask, LayerRegistry};
    ///
    /// let mut registry = LayerRegistry::new();
    /// let player = registry.register("player").unwrap();
    /// let enemy = registry.register("enemy").unwrap();
    ///
    /// let a = LayerMask::from_layer(player) | LayerMask::from_layer(enemy);
    /// let b = LayerMask::from_layer(enemy);
    /// assert!(a.overlaps(b));
    /// ```
    pub fn overlaps(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no layer is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[LayerId]) -> Self {
        layers.iter().fold(Self::NONE, |acc, &layer| acc | Self::from_layer(layer))
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: LayerMask) {
        self.0 |= rhs.0;
    }
}

/// Maps layer names to layer ids
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    names: Vec<String>,
}

impl LayerRegistry {
    /// Number of layers a mask can hold
    pub const MAX_LAYERS: usize = 32;

    /// Create a registry holding only [`DEFAULT_LAYER`]
    pub fn new() -> Self {
        Self {
            names: vec![DEFAULT_LAYER.to_string()],
        }
    }

    /// Register a layer, returning its id. Registering an existing name
    /// returns the existing id.
    pub fn register(&mut self, name: &str) -> Result<LayerId, ColliderError> {
        if name.is_empty() {
            return Err(ColliderError::InvalidArgument("layer name cannot be empty".to_string()));
        }
        if let Some(id) = self.id(name) {
            return Ok(id);
        }
        if self.names.len() >= Self::MAX_LAYERS {
            return Err(ColliderError::InvalidArgument(format!(
                "cannot register layer '{name}': limit of {} layers reached",
                Self::MAX_LAYERS
            )));
        }

        let id = u8::try_from(self.names.len())
            .map_err(|_| ColliderError::InvalidArgument("layer index overflow".to_string()))?;
        self.names.push(name.to_string());
        Ok(LayerId(id))
    }

    /// Look up a layer by name
    pub fn id(&self, name: &str) -> Option<LayerId> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|index| u8::try_from(index).ok())
            .map(LayerId)
    }

    /// Name of a registered layer
    pub fn name(&self, id: LayerId) -> Option<&str> {
        self.names.get(usize::from(id.0)).map(String::as_str)
    }

    /// Resolve a set of names into a mask; fails on the first unknown name
    pub fn resolve<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<LayerMask, ColliderError> {
        names.into_iter().try_fold(LayerMask::NONE, |mask, name| {
            self.id(name)
                .map(|id| mask | LayerMask::from_layer(id))
                .ok_or_else(|| ColliderError::UnknownLayer(name.to_string()))
        })
    }

    /// Iterate over registered layer names in id order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of registered layers (including the default layer)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: the default layer is permanent
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
