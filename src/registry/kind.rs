//! Closed kind sets: ContainerKind, ConsumerKind, ZIndexKind.
//!
//! Each kind carries its standard base offset through an exhaustive `match`,
//! so a new variant without an offset is a compile error rather than a
//! silent default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::table::RegistryError;

// ---------------------------------------------------------------------------
// ContainerKind
// ---------------------------------------------------------------------------

/// A floating element that can host further floating elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    Modal,
    Drawer,
    Popover,
    Popconfirm,
    Tour,
}

impl ContainerKind {
    /// Every container kind, in declaration order.
    pub const ALL: [ContainerKind; 5] = [
        ContainerKind::Modal,
        ContainerKind::Drawer,
        ContainerKind::Popover,
        ContainerKind::Popconfirm,
        ContainerKind::Tour,
    ];

    /// Number of container kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Offset added on top of the per-level increment in the standard registry.
    pub const fn base_offset(self) -> u32 {
        match self {
            ContainerKind::Modal | ContainerKind::Drawer => 0,
            ContainerKind::Popover | ContainerKind::Popconfirm | ContainerKind::Tour => 70,
        }
    }

    /// Stable kebab-case name, as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            ContainerKind::Modal => "modal",
            ContainerKind::Drawer => "drawer",
            ContainerKind::Popover => "popover",
            ContainerKind::Popconfirm => "popconfirm",
            ContainerKind::Tour => "tour",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RegistryError::UnknownKind(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ConsumerKind
// ---------------------------------------------------------------------------

/// A leaf floating element: renders at a priority, hosts nothing further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsumerKind {
    SelectLike,
    Dropdown,
    DatePicker,
    Menu,
    ImagePreview,
    Tooltip,
}

impl ConsumerKind {
    /// Every consumer kind, in declaration order.
    pub const ALL: [ConsumerKind; 6] = [
        ConsumerKind::SelectLike,
        ConsumerKind::Dropdown,
        ConsumerKind::DatePicker,
        ConsumerKind::Menu,
        ConsumerKind::ImagePreview,
        ConsumerKind::Tooltip,
    ];

    /// Number of consumer kinds.
    pub const COUNT: usize = Self::ALL.len();

    /// Offset added to the inherited baseline in the standard registry.
    ///
    /// Values are pairwise distinct so siblings of different kinds never tie.
    pub const fn base_offset(self) -> u32 {
        match self {
            ConsumerKind::ImagePreview => 1,
            ConsumerKind::SelectLike => 50,
            ConsumerKind::DatePicker => 55,
            ConsumerKind::Dropdown => 60,
            ConsumerKind::Menu => 65,
            ConsumerKind::Tooltip => 70,
        }
    }

    /// Stable kebab-case name, as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            ConsumerKind::SelectLike => "select-like",
            ConsumerKind::Dropdown => "dropdown",
            ConsumerKind::DatePicker => "date-picker",
            ConsumerKind::Menu => "menu",
            ConsumerKind::ImagePreview => "image-preview",
            ConsumerKind::Tooltip => "tooltip",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConsumerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConsumerKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| RegistryError::UnknownKind(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// ZIndexKind
// ---------------------------------------------------------------------------

/// Either kind of floating element, as passed to the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZIndexKind {
    Container(ContainerKind),
    Consumer(ConsumerKind),
}

impl ZIndexKind {
    /// Whether this kind publishes a baseline to its descendants.
    pub fn is_container(self) -> bool {
        matches!(self, ZIndexKind::Container(_))
    }

    /// Stable kebab-case name of the underlying kind.
    pub fn name(self) -> &'static str {
        match self {
            ZIndexKind::Container(kind) => kind.name(),
            ZIndexKind::Consumer(kind) => kind.name(),
        }
    }
}

impl From<ContainerKind> for ZIndexKind {
    fn from(kind: ContainerKind) -> Self {
        ZIndexKind::Container(kind)
    }
}

impl From<ConsumerKind> for ZIndexKind {
    fn from(kind: ConsumerKind) -> Self {
        ZIndexKind::Consumer(kind)
    }
}

impl fmt::Display for ZIndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Container names are tried first; the two name sets do not overlap.
impl FromStr for ZIndexKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ContainerKind>()
            .map(ZIndexKind::Container)
            .or_else(|_| s.parse::<ConsumerKind>().map(ZIndexKind::Consumer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_arrays_match_discriminants() {
        for (i, kind) in ContainerKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        for (i, kind) in ConsumerKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn standard_consumer_offsets_are_unique() {
        let mut offsets: Vec<u32> = ConsumerKind::ALL.iter().map(|k| k.base_offset()).collect();
        offsets.sort_unstable();
        offsets.dedup();
        assert_eq!(offsets.len(), ConsumerKind::COUNT);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for kind in ContainerKind::ALL {
            assert_eq!(kind.name().parse::<ContainerKind>().unwrap(), kind);
        }
        for kind in ConsumerKind::ALL {
            assert_eq!(kind.name().parse::<ConsumerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn name_sets_are_disjoint() {
        for container in ContainerKind::ALL {
            assert!(container.name().parse::<ConsumerKind>().is_err());
        }
    }

    #[test]
    fn zindex_kind_parses_either_set() {
        assert_eq!(
            "drawer".parse::<ZIndexKind>().unwrap(),
            ZIndexKind::Container(ContainerKind::Drawer)
        );
        assert_eq!(
            "date-picker".parse::<ZIndexKind>().unwrap(),
            ZIndexKind::Consumer(ConsumerKind::DatePicker)
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "sidebar".parse::<ZIndexKind>().unwrap_err();
        assert!(matches!(err, RegistryError::UnknownKind(ref name) if name == "sidebar"));
    }

    #[test]
    fn display_uses_kebab_name() {
        assert_eq!(ConsumerKind::SelectLike.to_string(), "select-like");
        assert_eq!(ZIndexKind::from(ContainerKind::Popconfirm).to_string(), "popconfirm");
    }

    #[test]
    fn is_container() {
        assert!(ZIndexKind::from(ContainerKind::Modal).is_container());
        assert!(!ZIndexKind::from(ConsumerKind::Menu).is_container());
    }
}
