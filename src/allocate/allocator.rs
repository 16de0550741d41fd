//! Allocator: turns (kind, inherited baseline) into an [`Allocation`].
//!
//! A container renders at `inherited + LEVEL_INCREMENT + offset` and hands
//! that same value down as the baseline for everything nested inside it. A
//! consumer renders at `inherited + offset` and publishes nothing. The
//! computation reads only its two arguments and the (immutable) registry.

use std::fmt;

use crate::registry::{ConsumerKind, ContainerKind, OffsetRegistry, ZIndexKind, LEVEL_INCREMENT};

// ---------------------------------------------------------------------------
// Baseline
// ---------------------------------------------------------------------------

/// Stacking priority inherited from the nearest enclosing container.
///
/// Stored as `u64` but only constructible from a `u32`: each nesting level
/// adds less than `2 * LEVEL_INCREMENT`, so starting from any accepted value
/// the sum stays below `u64::MAX` for more than 9 * 10^15 levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Baseline(u64);

impl Baseline {
    /// Baseline of an element with no enclosing container.
    pub const ROOT: Baseline = Baseline(0);

    /// Largest baseline accepted from outside the allocator.
    pub const MAX_ACCEPTED: Baseline = Baseline(u32::MAX as u64);

    pub const fn new(value: u32) -> Self {
        Self(value as u64)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u32> for Baseline {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

/// Result of allocating one render position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allocation {
    /// A container renders at `priority` and publishes `child_baseline`.
    Container { priority: u64, child_baseline: Baseline },
    /// A consumer renders at `priority` and publishes nothing.
    Consumer { priority: u64 },
}

impl Allocation {
    /// The priority the calling element renders at.
    pub fn priority(self) -> u64 {
        match self {
            Allocation::Container { priority, .. } | Allocation::Consumer { priority } => priority,
        }
    }

    /// The baseline to hand to descendants, for containers only.
    pub fn child_baseline(self) -> Option<Baseline> {
        match self {
            Allocation::Container { child_baseline, .. } => Some(child_baseline),
            Allocation::Consumer { .. } => None,
        }
    }
}

/// Baseline published by a container with `offset`.
fn nest(inherited: Baseline, offset: u32) -> Baseline {
    Baseline(inherited.0 + u64::from(LEVEL_INCREMENT) + u64::from(offset))
}

/// Priority of a consumer with `offset`.
fn place(inherited: Baseline, offset: u32) -> u64 {
    inherited.0 + u64::from(offset)
}

fn allocate_with_offset(kind: ZIndexKind, offset: u32, inherited: Baseline) -> Allocation {
    match kind {
        ZIndexKind::Container(_) => {
            let child = nest(inherited, offset);
            Allocation::Container {
                priority: child.0,
                child_baseline: child,
            }
        }
        ZIndexKind::Consumer(_) => Allocation::Consumer {
            priority: place(inherited, offset),
        },
    }
}

/// Allocate against the standard offsets.
///
/// ```
/// use stackorder::{allocate, Baseline, ConsumerKind, ContainerKind};
///
/// let modal = allocate(ContainerKind::Modal, Baseline::ROOT);
/// assert_eq!(modal.priority(), 1000);
///
/// let inner = modal.child_baseline().unwrap();
/// assert_eq!(allocate(ConsumerKind::SelectLike, inner).priority(), 1050);
/// ```
pub fn allocate(kind: impl Into<ZIndexKind>, inherited: Baseline) -> Allocation {
    let kind = kind.into();
    let offset = match kind {
        ZIndexKind::Container(kind) => kind.base_offset(),
        ZIndexKind::Consumer(kind) => kind.base_offset(),
    };
    allocate_with_offset(kind, offset, inherited)
}

// ---------------------------------------------------------------------------
// Allocator
// ---------------------------------------------------------------------------

/// Allocates priorities against a specific [`OffsetRegistry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocator {
    registry: OffsetRegistry,
}

impl Allocator {
    pub fn new(registry: OffsetRegistry) -> Self {
        Self { registry }
    }

    /// Allocator over the standard registry.
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &OffsetRegistry {
        &self.registry
    }

    /// Allocate one render position.
    pub fn allocate(&self, kind: impl Into<ZIndexKind>, inherited: Baseline) -> Allocation {
        let kind = kind.into();
        allocate_with_offset(kind, self.registry.offset_for(kind), inherited)
    }

    /// Container allocation as `(priority, child_baseline)`.
    pub fn container(&self, kind: ContainerKind, inherited: Baseline) -> (u64, Baseline) {
        let child = nest(inherited, self.registry.container_offset(kind));
        (child.value(), child)
    }

    /// Consumer priority.
    pub fn consumer(&self, kind: ConsumerKind, inherited: Baseline) -> u64 {
        place(inherited, self.registry.consumer_offset(kind))
    }

    /// Allocate, honouring an explicit z-index when the element carries one.
    ///
    /// With `Some(z)` the element renders at `z`, and a container also
    /// publishes `z` to its descendants. `None` is plain [`allocate`](Self::allocate).
    pub fn allocate_custom(
        &self,
        kind: impl Into<ZIndexKind>,
        inherited: Baseline,
        custom: Option<u32>,
    ) -> Allocation {
        let kind = kind.into();
        let Some(z) = custom else {
            return self.allocate(kind, inherited);
        };
        let z = Baseline::new(z);
        if z < inherited {
            tracing::warn!(
                %kind,
                z_index = z.value(),
                baseline = inherited.value(),
                "custom z-index is below the enclosing container and will paint beneath it"
            );
        }
        match kind {
            ZIndexKind::Container(_) => Allocation::Container {
                priority: z.value(),
                child_baseline: z,
            },
            ZIndexKind::Consumer(_) => Allocation::Consumer { priority: z.value() },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    fn registry_with(container: (ContainerKind, u32), consumer: (ConsumerKind, u32)) -> Allocator {
        let registry = OffsetRegistry::builder()
            .container(container.0, container.1)
            .consumer(consumer.0, consumer.1)
            .build()
            .unwrap();
        Allocator::new(registry)
    }

    #[test]
    fn consumer_at_root_is_its_offset() {
        let allocator = registry_with((ContainerKind::Modal, 0), (ConsumerKind::Tooltip, 7));
        let allocation = allocator.allocate(ConsumerKind::Tooltip, Baseline::ROOT);
        assert_eq!(allocation, Allocation::Consumer { priority: 7 });
        assert_eq!(allocation.child_baseline(), None);
    }

    #[test]
    fn container_priority_equals_child_baseline() {
        let allocator = registry_with((ContainerKind::Drawer, 50), (ConsumerKind::Tooltip, 7));
        let allocation = allocator.allocate(ContainerKind::Drawer, Baseline::ROOT);
        assert_eq!(
            allocation,
            Allocation::Container {
                priority: 1050,
                child_baseline: Baseline::new(1050),
            }
        );
        let nested = allocator.allocate(ConsumerKind::Tooltip, Baseline::new(1050));
        assert_eq!(nested.priority(), 1057);
    }

    #[test]
    fn free_function_matches_standard_allocator() {
        let allocator = Allocator::standard();
        for baseline in [0, 1, 1070, 42_000].map(Baseline::new) {
            for kind in ContainerKind::ALL {
                assert_eq!(allocate(kind, baseline), allocator.allocate(kind, baseline));
            }
            for kind in ConsumerKind::ALL {
                assert_eq!(allocate(kind, baseline), allocator.allocate(kind, baseline));
            }
        }
    }

    #[test]
    fn typed_helpers_agree_with_allocate() {
        let allocator = Allocator::standard();
        let inherited = Baseline::new(2140);
        for kind in ContainerKind::ALL {
            let (priority, child) = allocator.container(kind, inherited);
            let allocation = allocator.allocate(kind, inherited);
            assert_eq!(allocation.priority(), priority);
            assert_eq!(allocation.child_baseline(), Some(child));
        }
        for kind in ConsumerKind::ALL {
            assert_eq!(
                allocator.consumer(kind, inherited),
                allocator.allocate(kind, inherited).priority()
            );
        }
    }

    #[test]
    fn child_baseline_strictly_increases() {
        let allocator = Allocator::standard();
        for kind in ContainerKind::ALL {
            let inherited = Baseline::new(3000);
            let (_, child) = allocator.container(kind, inherited);
            assert!(child > inherited);
        }
    }

    #[test]
    fn nesting_stays_ordered_at_largest_accepted_baseline() {
        let allocator = Allocator::standard();
        for kind in ContainerKind::ALL {
            let (_, child) = allocator.container(kind, Baseline::MAX_ACCEPTED);
            let (_, grandchild) = allocator.container(kind, child);
            assert!(child > Baseline::MAX_ACCEPTED);
            assert!(grandchild > child);
            assert_eq!(
                grandchild.value() - child.value(),
                u64::from(LEVEL_INCREMENT + kind.base_offset())
            );
        }

        let (_, inside) = allocator.container(ContainerKind::Modal, Baseline::MAX_ACCEPTED);
        let menu = allocator.consumer(ConsumerKind::Menu, inside);
        let tooltip = allocator.consumer(ConsumerKind::Tooltip, inside);
        assert_ne!(menu, tooltip);
        assert_eq!(tooltip - menu, 5);
        assert_eq!(menu, u64::from(u32::MAX) + 1000 + 65);
    }

    #[test]
    fn baseline_from_u32() {
        assert_eq!(Baseline::from(u32::MAX), Baseline::MAX_ACCEPTED);
        assert_eq!(Baseline::MAX_ACCEPTED.value(), 4_294_967_295);
    }

    #[test]
    fn custom_none_falls_through() {
        let allocator = Allocator::standard();
        let inherited = Baseline::new(1000);
        assert_eq!(
            allocator.allocate_custom(ContainerKind::Tour, inherited, None),
            allocator.allocate(ContainerKind::Tour, inherited)
        );
    }

    #[test]
    fn custom_container_publishes_custom_value() {
        let allocator = Allocator::standard();
        let allocation = allocator.allocate_custom(ContainerKind::Modal, Baseline::ROOT, Some(2500));
        assert_eq!(allocation.priority(), 2500);
        assert_eq!(allocation.child_baseline(), Some(Baseline::new(2500)));
    }

    #[test]
    fn custom_consumer_ignores_baseline() {
        let allocator = Allocator::standard();
        let allocation = allocator.allocate_custom(ConsumerKind::Dropdown, Baseline::new(4000), Some(12));
        assert_eq!(allocation, Allocation::Consumer { priority: 12 });
    }

    /// Collects formatted log output from a scoped subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.text())
    }

    #[test]
    fn custom_below_baseline_is_kept_and_warned() {
        let allocator = Allocator::standard();
        let (allocation, logs) = with_captured_logs(|| {
            allocator.allocate_custom(ContainerKind::Popover, Baseline::new(1000), Some(10))
        });
        assert_eq!(
            allocation,
            Allocation::Container {
                priority: 10,
                child_baseline: Baseline::new(10),
            }
        );
        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("will paint beneath it"), "logs: {logs}");
        assert!(logs.contains("baseline=1000"), "logs: {logs}");
    }

    #[test]
    fn custom_at_or_above_baseline_is_silent() {
        let allocator = Allocator::standard();
        let (allocation, logs) = with_captured_logs(|| {
            allocator.allocate_custom(ConsumerKind::Menu, Baseline::new(1000), Some(1000))
        });
        assert_eq!(allocation.priority(), 1000);
        assert!(logs.is_empty(), "logs: {logs}");
    }

    #[test]
    fn baseline_display() {
        assert_eq!(Baseline::new(1070).to_string(), "1070");
        assert_eq!(Baseline::default(), Baseline::ROOT);
    }
}
