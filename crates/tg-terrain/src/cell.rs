//! Per-tile static properties.

use std::fmt;
use std::ops::BitOr;

/// Set of terrain hazard flags.  Stored as a bitmask.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainFlags(u8);

impl TerrainFlags {
    pub const NONE:     TerrainFlags = TerrainFlags(0);
    pub const WATER:    TerrainFlags = TerrainFlags(1 << 0);
    pub const SPIKE:    TerrainFlags = TerrainFlags(1 << 1);
    pub const SLIPPERY: TerrainFlags = TerrainFlags(1 << 2);

    const NAMED: [(TerrainFlags, &'static str); 3] = [
        (TerrainFlags::WATER, "water"),
        (TerrainFlags::SPIKE, "spike"),
        (TerrainFlags::SLIPPERY, "slippery"),
    ];

    #[inline]
    pub fn contains(self, other: TerrainFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: TerrainFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse a `|`-separated list such as `"water|slippery"`.  The empty
    /// string parses to [`TerrainFlags::NONE`].
    pub fn parse(s: &str) -> Option<TerrainFlags> {
        let mut flags = TerrainFlags::NONE;
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let (flag, _) = Self::NAMED.iter().find(|(_, name)| *name == part)?;
            flags.insert(*flag);
        }
        Some(flags)
    }
}

impl BitOr for TerrainFlags {
    type Output = TerrainFlags;
    #[inline]
    fn bitor(self, rhs: TerrainFlags) -> TerrainFlags {
        TerrainFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for TerrainFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, name) in Self::NAMED {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Static properties of one baked tile.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCell {
    pub walkable: bool,
    /// Traversal cost multiplier, always `>= 0`.  Default: 1.
    pub cost: f32,
    pub flags: TerrainFlags,
}

impl TerrainCell {
    /// Plain walkable ground with unit cost.
    pub const fn ground() -> Self {
        Self { walkable: true, cost: 1.0, flags: TerrainFlags::NONE }
    }

    /// An unwalkable wall tile.
    pub const fn wall() -> Self {
        Self { walkable: false, cost: 1.0, flags: TerrainFlags::NONE }
    }

    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_flags(mut self, flags: TerrainFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl Default for TerrainCell {
    fn default() -> Self {
        Self::ground()
    }
}
