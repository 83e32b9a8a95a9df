//! Flat world chunk generator.
//!
//! Layers of the lowest section:
//! - Y = 0: Bedrock
//! - Y = 1-3: Dirt
//! - Y = 4: Grass Block
//! - Y = 5+: Air

use crate::block::FlatWorldBlocks;
use crate::chunk::{ChunkColumn, ChunkSection};

/// Height of the walkable surface.
pub const SURFACE_Y: usize = 5;

/// Generate a flat chunk column at the given chunk coordinates.
pub fn generate_flat_chunk(x: i32, z: i32, blocks: &FlatWorldBlocks) -> ChunkColumn {
    let mut section = ChunkSection::new_single(blocks.air);

    for x in 0..16 {
        for z in 0..16 {
            section.set_block(x, 0, z, blocks.bedrock);
            for y in 1..SURFACE_Y - 1 {
                section.set_block(x, y, z, blocks.dirt);
            }
            section.set_block(x, SURFACE_Y - 1, z, blocks.grass_block);
        }
    }

    ChunkColumn::new(x, z, section)
}
