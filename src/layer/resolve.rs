//! Priority resolution over a [`StackTree`].
//!
//! Each root is walked depth-first with an explicit stack of
//! `(layer, inherited baseline)` pairs. A container pushes its children with
//! the baseline it publishes; consumers and inert layers push theirs with the
//! baseline they were given. Popping a frame is leaving that scope, so a
//! published baseline is visible to exactly one subtree.

use slotmap::SecondaryMap;

use crate::allocate::{Allocator, Baseline};

use super::node::{LayerData, LayerId};
use super::tree::StackTree;

/// Resolved stacking information for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLayer {
    /// Baseline published by the nearest enclosing container (0 if none).
    pub inherited: Baseline,
    /// Render priority; `None` for inert layers.
    pub priority: Option<u64>,
    /// Baseline handed to this layer's children, for containers only.
    pub published: Option<Baseline>,
}

impl ResolvedLayer {
    /// The baseline this layer's children inherit.
    pub fn scope_for_children(&self) -> Baseline {
        self.published.unwrap_or(self.inherited)
    }
}

/// Resolved priorities for every layer of a tree.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    layers: SecondaryMap<LayerId, ResolvedLayer>,
}

impl Resolution {
    pub fn get(&self, id: LayerId) -> Option<&ResolvedLayer> {
        self.layers.get(id)
    }

    /// Render priority of a layer, `None` if inert or unknown.
    pub fn priority(&self, id: LayerId) -> Option<u64> {
        self.layers.get(id).and_then(|layer| layer.priority)
    }

    /// Highest priority allocated anywhere in the tree.
    pub fn max_priority(&self) -> Option<u64> {
        self.layers.values().filter_map(|layer| layer.priority).max()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

fn resolve_layer(allocator: &Allocator, data: &LayerData, inherited: Baseline) -> ResolvedLayer {
    match data.role.kind() {
        Some(kind) => {
            let allocation = allocator.allocate_custom(kind, inherited, data.z_index);
            ResolvedLayer {
                inherited,
                priority: Some(allocation.priority()),
                published: allocation.child_baseline(),
            }
        }
        None => ResolvedLayer {
            inherited,
            priority: None,
            published: None,
        },
    }
}

impl StackTree {
    /// Resolve every layer in the tree.
    pub fn resolve(&self, allocator: &Allocator) -> Resolution {
        let mut layers = SecondaryMap::new();
        for &root in self.roots() {
            let mut stack = vec![(root, Baseline::ROOT)];
            while let Some((id, inherited)) = stack.pop() {
                let Some(data) = self.nodes.get(id) else {
                    continue;
                };
                let resolved = resolve_layer(allocator, data, inherited);
                tracing::trace!(
                    label = %data.label,
                    role = %data.role,
                    inherited = inherited.value(),
                    priority = ?resolved.priority,
                    "resolved layer"
                );
                let scope = resolved.scope_for_children();
                stack.extend(self.children(id).iter().rev().map(|&child| (child, scope)));
                layers.insert(id, resolved);
            }
        }
        Resolution { layers }
    }

    /// Resolve a single layer from its ancestor chain alone.
    ///
    /// Returns `None` if the layer does not exist.
    pub fn resolve_one(&self, id: LayerId, allocator: &Allocator) -> Option<ResolvedLayer> {
        let data = self.nodes.get(id)?;
        let inherited = self
            .ancestors(id)
            .into_iter()
            .rev()
            .filter_map(|ancestor| self.nodes.get(ancestor))
            .fold(Baseline::ROOT, |baseline, ancestor| {
                resolve_layer(allocator, ancestor, baseline).scope_for_children()
            });
        Some(resolve_layer(allocator, data, inherited))
    }

    /// Render priority of a single layer, `None` if inert or unknown.
    pub fn priority_of(&self, id: LayerId, allocator: &Allocator) -> Option<u64> {
        self.resolve_one(id, allocator)?.priority
    }
}
