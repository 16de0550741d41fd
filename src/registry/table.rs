//! OffsetRegistry: immutable kind -> offset tables, plus a validating builder.

use super::kind::{ConsumerKind, ContainerKind, ZIndexKind};

/// Fixed step added for every nesting level of containers.
///
/// Every registered offset must stay strictly below this so a deeper element
/// can never sort beneath a shallower one.
pub const LEVEL_INCREMENT: u32 = 1000;

/// Errors raised while defining a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown z-index kind: {0}")]
    UnknownKind(String),
    #[error("offset {offset} for {kind} must be below the level increment {limit}")]
    OffsetOutOfRange {
        kind: ZIndexKind,
        offset: u32,
        limit: u32,
    },
    #[error("consumer kinds {first} and {second} share offset {offset}")]
    DuplicateConsumerOffset {
        first: ConsumerKind,
        second: ConsumerKind,
        offset: u32,
    },
    #[error("invalid registry config: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// ---------------------------------------------------------------------------
// OffsetRegistry
// ---------------------------------------------------------------------------

/// Read-only lookup from every kind to its base offset.
///
/// Indexed by kind discriminant, so lookups are total and never fail. The
/// only ways to obtain one are [`OffsetRegistry::standard`] and a validated
/// [`OffsetRegistryBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetRegistry {
    containers: [u32; ContainerKind::COUNT],
    consumers: [u32; ConsumerKind::COUNT],
}

impl OffsetRegistry {
    /// The registry built from each kind's `base_offset()`.
    pub fn standard() -> Self {
        Self {
            containers: ContainerKind::ALL.map(ContainerKind::base_offset),
            consumers: ConsumerKind::ALL.map(ConsumerKind::base_offset),
        }
    }

    /// Start from the standard offsets and override some of them.
    pub fn builder() -> OffsetRegistryBuilder {
        OffsetRegistryBuilder {
            registry: Self::standard(),
        }
    }

    /// Offset for a container kind.
    pub fn container_offset(&self, kind: ContainerKind) -> u32 {
        self.containers[kind.index()]
    }

    /// Offset for a consumer kind.
    pub fn consumer_offset(&self, kind: ConsumerKind) -> u32 {
        self.consumers[kind.index()]
    }

    /// Offset for either kind.
    pub fn offset_for(&self, kind: ZIndexKind) -> u32 {
        match kind {
            ZIndexKind::Container(kind) => self.container_offset(kind),
            ZIndexKind::Consumer(kind) => self.consumer_offset(kind),
        }
    }

    /// All container kinds with their offsets, in declaration order.
    pub fn containers(&self) -> impl Iterator<Item = (ContainerKind, u32)> + '_ {
        ContainerKind::ALL
            .into_iter()
            .map(|kind| (kind, self.container_offset(kind)))
    }

    /// All consumer kinds with their offsets, in declaration order.
    pub fn consumers(&self) -> impl Iterator<Item = (ConsumerKind, u32)> + '_ {
        ConsumerKind::ALL
            .into_iter()
            .map(|kind| (kind, self.consumer_offset(kind)))
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let containers = self.containers().map(|(k, o)| (ZIndexKind::from(k), o));
        let consumers = self.consumers().map(|(k, o)| (ZIndexKind::from(k), o));
        for (kind, offset) in containers.chain(consumers) {
            if offset >= LEVEL_INCREMENT {
                return Err(RegistryError::OffsetOutOfRange {
                    kind,
                    offset,
                    limit: LEVEL_INCREMENT,
                });
            }
        }

        for (i, first) in ConsumerKind::ALL.into_iter().enumerate() {
            for second in ConsumerKind::ALL.into_iter().skip(i + 1) {
                let offset = self.consumer_offset(first);
                if offset == self.consumer_offset(second) {
                    return Err(RegistryError::DuplicateConsumerOffset {
                        first,
                        second,
                        offset,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for OffsetRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects offset overrides; nothing is checked until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct OffsetRegistryBuilder {
    registry: OffsetRegistry,
}

impl OffsetRegistryBuilder {
    /// Override one container offset (builder).
    pub fn container(mut self, kind: ContainerKind, offset: u32) -> Self {
        self.registry.containers[kind.index()] = offset;
        self
    }

    /// Override one consumer offset (builder).
    pub fn consumer(mut self, kind: ConsumerKind, offset: u32) -> Self {
        self.registry.consumers[kind.index()] = offset;
        self
    }

    /// Validate and freeze the registry.
    pub fn build(self) -> Result<OffsetRegistry, RegistryError> {
        self.registry.validate()?;
        tracing::debug!(registry = ?self.registry, "offset registry built");
        Ok(self.registry)
    }
}
