//! ZIndexScope: explicit baseline threading through a construction call chain.
//!
//! A scope is a small `Copy` value. Entering a container returns a *new*
//! scope for that container's children and leaves the current one untouched,
//! so sibling subtrees never observe each other's baselines.

use crate::registry::{ConsumerKind, ContainerKind};

use super::allocator::{Allocator, Baseline};

/// The baseline visible at one position of a tree under construction.
#[derive(Debug, Clone, Copy)]
pub struct ZIndexScope<'a> {
    allocator: &'a Allocator,
    baseline: Baseline,
}

impl<'a> ZIndexScope<'a> {
    /// Scope at the root of a tree (baseline 0).
    pub fn root(allocator: &'a Allocator) -> Self {
        Self::with_baseline(allocator, Baseline::ROOT)
    }

    /// Scope resuming from a baseline computed elsewhere.
    pub fn with_baseline(allocator: &'a Allocator, baseline: Baseline) -> Self {
        Self {
            allocator,
            baseline,
        }
    }

    /// The inherited baseline at this position.
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn allocator(&self) -> &'a Allocator {
        self.allocator
    }

    /// Enter a container: returns its priority and the scope for its children.
    pub fn enter(&self, kind: ContainerKind) -> (u64, ZIndexScope<'a>) {
        let (priority, child) = self.allocator.container(kind, self.baseline);
        (priority, Self::with_baseline(self.allocator, child))
    }

    /// Priority for a consumer rendered at this position.
    pub fn consume(&self, kind: ConsumerKind) -> u64 {
        self.allocator.consumer(kind, self.baseline)
    }
}
