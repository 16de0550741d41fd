//! # stackorder
//!
//! Collision-free z-index allocation for floating UI elements (modals,
//! drawers, popovers, dropdowns, tooltips) nested inside one another to any
//! depth.
//!
//! Every floating element declares a kind. *Container* kinds can host further
//! floating elements; *consumer* kinds are leaves. A container renders at
//! `baseline + 1000 + offset` and publishes that value as the baseline for its
//! subtree; a consumer renders at `baseline + offset`. Nesting therefore always
//! paints deeper elements above shallower ones.
//!
//! ## Core Systems
//!
//! - **[`registry`]**: closed kind sets, the offset table, TOML overrides
//! - **[`allocate`]**: the allocator and explicit scope threading
//! - **[`layer`]**: slotmap-backed layer forest with whole-tree resolution
//!
//! ```
//! use stackorder::{Allocator, ConsumerKind, ContainerKind, ZIndexScope};
//!
//! let allocator = Allocator::standard();
//! let root = ZIndexScope::root(&allocator);
//! let (modal_z, inside_modal) = root.enter(ContainerKind::Modal);
//! let select_z = inside_modal.consume(ConsumerKind::SelectLike);
//! assert!(select_z > modal_z);
//! ```

pub mod allocate;
pub mod layer;
pub mod registry;

pub use allocate::{allocate, Allocation, Allocator, Baseline, ZIndexScope};
pub use layer::{LayerData, LayerId, LayerRole, Resolution, ResolvedLayer, StackTree, TreeError};
pub use registry::{
    ConsumerKind, ContainerKind, OffsetRegistry, RegistryConfig, RegistryError, ZIndexKind,
    LEVEL_INCREMENT,
};
