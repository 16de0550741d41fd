//! StackTree: a forest of layers where each root opens its own baseline scope.
//!
//! Structure edits are validated before anything is written, so a rejected
//! edit leaves the forest exactly as it was. The forest is acyclic at all
//! times, which the resolver and every ancestor walk rely on to terminate.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{LayerData, LayerId};

/// Children of a layer that has none (or is unknown).
const NO_NESTED_LAYERS: &[LayerId] = &[];

/// Rejected structure edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("layer {0:?} is not in this tree")]
    UnknownLayer(LayerId),
    #[error("cannot nest layer {layer:?} inside its own subtree at {parent:?}")]
    Cycle { layer: LayerId, parent: LayerId },
}

/// Layers nested inside one another, any number of independent roots.
///
/// A root starts at baseline 0 and whatever its containers publish stays
/// inside its subtree. Links live in secondary maps beside the arena so a
/// removed subtree takes its scope with it in O(subtree size).
#[derive(Debug, Clone)]
pub struct StackTree {
    pub(crate) nodes: SlotMap<LayerId, LayerData>,
    nested: SecondaryMap<LayerId, Vec<LayerId>>,
    enclosing: SecondaryMap<LayerId, LayerId>,
    roots: Vec<LayerId>,
}

impl StackTree {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            nested: SecondaryMap::new(),
            enclosing: SecondaryMap::new(),
            roots: Vec::new(),
        }
    }

    /// Add a layer as a new root, i.e. a fresh scope starting at baseline 0.
    pub fn insert(&mut self, data: LayerData) -> LayerId {
        let id = self.nodes.insert(data);
        self.nested.insert(id, Vec::new());
        self.roots.push(id);
        id
    }

    /// Nest a new layer as the last child of `parent`, inside its scope.
    pub fn insert_child(&mut self, parent: LayerId, data: LayerData) -> Result<LayerId, TreeError> {
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownLayer(parent));
        }
        let id = self.nodes.insert(data);
        self.nested.insert(id, Vec::new());
        self.link(id, parent);
        Ok(id)
    }

    /// Remove a layer together with everything nested inside it.
    ///
    /// Returns the removed layer's data, or `None` for an unknown id.
    pub fn remove(&mut self, id: LayerId) -> Option<LayerData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut pending = vec![id];
        let mut removed = None;
        while let Some(current) = pending.pop() {
            pending.extend(self.nested.remove(current).unwrap_or_default());
            self.enclosing.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed = data;
            }
        }
        removed
    }

    /// Move `layer` and its subtree into `new_parent`'s scope.
    ///
    /// Rejects unknown ids and any move that would nest a layer inside
    /// itself; the tree is untouched on error.
    pub fn reparent(&mut self, layer: LayerId, new_parent: LayerId) -> Result<(), TreeError> {
        for id in [layer, new_parent] {
            if !self.nodes.contains_key(id) {
                return Err(TreeError::UnknownLayer(id));
            }
        }
        if new_parent == layer || self.ancestors(new_parent).contains(&layer) {
            return Err(TreeError::Cycle {
                layer,
                parent: new_parent,
            });
        }

        self.detach(layer);
        self.link(layer, new_parent);
        Ok(())
    }

    /// Lift `layer` and its subtree out to a fresh root scope.
    ///
    /// A layer that is already a root stays where it is.
    pub fn make_root(&mut self, layer: LayerId) -> Result<(), TreeError> {
        if !self.nodes.contains_key(layer) {
            return Err(TreeError::UnknownLayer(layer));
        }
        if self.enclosing.contains_key(layer) {
            self.detach(layer);
            self.roots.push(layer);
        }
        Ok(())
    }

    /// Both ids must already be validated.
    fn link(&mut self, id: LayerId, parent: LayerId) {
        self.enclosing.insert(id, parent);
        if let Some(siblings) = self.nested.get_mut(parent) {
            siblings.push(id);
        }
    }

    /// Unlink `id` from its parent's children or from the root list.
    fn detach(&mut self, id: LayerId) {
        match self.enclosing.remove(id) {
            Some(parent) => {
                if let Some(siblings) = self.nested.get_mut(parent) {
                    siblings.retain(|&child| child != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }
    }

    /// The layer whose scope `id` sits in, if any.
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.enclosing.get(id).copied()
    }

    /// Layers directly nested in `id`, in insertion order.
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        self.nested
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(NO_NESTED_LAYERS)
    }

    /// Independent root scopes, in insertion order.
    pub fn roots(&self) -> &[LayerId] {
        &self.roots
    }

    /// The chain of enclosing layers, nearest first, ending at the root.
    ///
    /// This is exactly the chain whose published baselines `id` can observe.
    pub fn ancestors(&self, id: LayerId) -> Vec<LayerId> {
        std::iter::successors(self.parent(id), |&layer| self.parent(layer)).collect()
    }

    pub fn get(&self, id: LayerId) -> Option<&LayerData> {
        self.nodes.get(id)
    }

    /// Mutable layer data; role and z-index edits take effect on the next resolve.
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut LayerData> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.nodes.contains_key(id)
    }

    /// `start` and everything nested in it, outer layers before inner ones.
    pub fn walk_depth_first(&self, start: LayerId) -> Vec<LayerId> {
        let mut order = Vec::new();
        let mut pending = vec![start];
        while let Some(current) = pending.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            order.push(current);
            pending.extend(self.children(current).iter().rev().copied());
        }
        order
    }
}

impl Default for StackTree {
    fn default() -> Self {
        Self::new()
    }
}
