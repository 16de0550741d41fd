//! Offset registry: closed kind sets and their per-kind offsets.

pub mod config;
pub mod kind;
pub mod table;

pub use config::RegistryConfig;
pub use kind::{ConsumerKind, ContainerKind, ZIndexKind};
pub use table::{OffsetRegistry, OffsetRegistryBuilder, RegistryError, LEVEL_INCREMENT};
