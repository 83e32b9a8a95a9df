//! Block state ids from the 1.16.5 global palette.
//!
//! The chunk palette is the identity map over `0..=255`, so a palette index
//! is the global block state id itself.

pub const AIR: u8 = 0;
/// `minecraft:grass_block[snowy=false]`.
pub const GRASS_BLOCK: u8 = 9;
pub const DIRT: u8 = 10;
pub const BEDROCK: u8 = 33;

/// Block ids used by the flat spawn region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatWorldBlocks {
    pub air: u8,
    pub bedrock: u8,
    pub dirt: u8,
    pub grass_block: u8,
}

impl Default for FlatWorldBlocks {
    fn default() -> Self {
        Self {
            air: AIR,
            bedrock: BEDROCK,
            dirt: DIRT,
            grass_block: GRASS_BLOCK,
        }
    }
}
