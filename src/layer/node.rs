//! Layer types: LayerId, LayerRole, LayerData.

use std::fmt;

use slotmap::new_key_type;

use crate::registry::{ConsumerKind, ContainerKind, ZIndexKind};

new_key_type! {
    /// Unique identifier for a layer in a [`StackTree`](super::StackTree).
    pub struct LayerId;
}

/// What a layer does with the baseline it inherits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Allocates a priority and publishes a new baseline to its subtree.
    Container(ContainerKind),
    /// Allocates a priority; its subtree sees the baseline it inherited.
    Consumer(ConsumerKind),
    /// Not a floating element. Passes its inherited baseline through.
    Inert,
}

impl LayerRole {
    /// The allocator kind, if this layer allocates at all.
    pub fn kind(self) -> Option<ZIndexKind> {
        match self {
            LayerRole::Container(kind) => Some(kind.into()),
            LayerRole::Consumer(kind) => Some(kind.into()),
            LayerRole::Inert => None,
        }
    }
}

impl fmt::Display for LayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{kind}"),
            None => f.write_str("inert"),
        }
    }
}

/// Data associated with a single layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerData {
    /// Free-form label for diagnostics (e.g. "settings-modal").
    pub label: String,
    pub role: LayerRole,
    /// Explicit z-index supplied by the element, overriding allocation.
    pub z_index: Option<u32>,
}

impl LayerData {
    pub fn new(label: impl Into<String>, role: LayerRole) -> Self {
        Self {
            label: label.into(),
            role,
            z_index: None,
        }
    }

    pub fn container(label: impl Into<String>, kind: ContainerKind) -> Self {
        Self::new(label, LayerRole::Container(kind))
    }

    pub fn consumer(label: impl Into<String>, kind: ConsumerKind) -> Self {
        Self::new(label, LayerRole::Consumer(kind))
    }

    pub fn inert(label: impl Into<String>) -> Self {
        Self::new(label, LayerRole::Inert)
    }

    /// Set an explicit z-index (builder).
    pub fn with_z_index(mut self, z_index: u32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}
