//! TOML overrides for the offset registry.
//!
//! ```toml
//! [containers]
//! popover = 80
//!
//! [consumers]
//! select-like = 40
//! ```
//!
//! Kinds left out keep their standard offsets. Unknown kinds and unknown
//! tables are rejected when the file is parsed.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::kind::{ConsumerKind, ContainerKind};
use super::table::{OffsetRegistry, RegistryError};

/// Partial offset overrides, keyed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub containers: BTreeMap<ContainerKind, u32>,
    pub consumers: BTreeMap<ConsumerKind, u32>,
}

impl RegistryConfig {
    /// Parse overrides from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply the overrides on top of the standard registry and validate.
    pub fn build(&self) -> Result<OffsetRegistry, RegistryError> {
        tracing::debug!(
            containers = self.containers.len(),
            consumers = self.consumers.len(),
            "applying registry overrides"
        );
        let builder = self
            .containers
            .iter()
            .fold(OffsetRegistry::builder(), |b, (&kind, &offset)| {
                b.container(kind, offset)
            });
        self.consumers
            .iter()
            .fold(builder, |b, (&kind, &offset)| b.consumer(kind, offset))
            .build()
    }
}

impl OffsetRegistry {
    /// Parse TOML overrides and build the resulting registry.
    pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
        RegistryConfig::from_toml_str(text)?.build()
    }
}
