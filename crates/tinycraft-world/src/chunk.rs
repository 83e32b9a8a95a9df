//! Chunk section and column data structures.

/// Blocks in one 16×16×16 section.
pub const SECTION_VOLUME: usize = 4096;

/// Biome cells per column (4×4×4 cells over 256 blocks of height).
pub const BIOME_CELLS: usize = 1024;

/// `minecraft:the_void`.
pub const VOID_BIOME: i32 = 127;

/// A 16×16×16 section. Each block is a one-byte global state id.
#[derive(Clone)]
pub struct ChunkSection {
    /// Stored in YZX order: `y*256 + z*16 + x`.
    pub blocks: [u8; SECTION_VOLUME],
}

/// A chunk column with only its lowest section populated.
#[derive(Clone)]
pub struct ChunkColumn {
    pub x: i32,
    pub z: i32,
    pub section: ChunkSection,
    pub biomes: [i32; BIOME_CELLS],
}

impl ChunkSection {
    /// Create a section filled entirely with one block.
    pub fn new_single(state: u8) -> Self {
        Self {
            blocks: [state; SECTION_VOLUME],
        }
    }

    /// `x`, `y`, `z` must each be in `[0, 15]`.
    pub fn set_block(&mut self, x: usize, y: usize, z: usize, state: u8) {
        debug_assert!(x < 16 && y < 16 && z < 16);
        self.blocks[Self::index(x, y, z)] = state;
    }

    pub fn get_block(&self, x: usize, y: usize, z: usize) -> u8 {
        self.blocks[Self::index(x, y, z)]
    }

    /// Number of non-air blocks, as reported in the section header.
    pub fn block_count(&self) -> i16 {
        self.blocks.iter().filter(|&&b| b != crate::block::AIR).count() as i16
    }

    /// Highest non-air block in the `(x, z)` column plus one, 0 when empty.
    pub fn column_height(&self, x: usize, z: usize) -> u16 {
        (0..16)
            .rev()
            .find(|&y| self.get_block(x, y, z) != crate::block::AIR)
            .map_or(0, |y| y as u16 + 1)
    }

    fn index(x: usize, y: usize, z: usize) -> usize {
        (y * 16 + z) * 16 + x
    }
}

impl ChunkColumn {
    pub fn new(x: i32, z: i32, section: ChunkSection) -> Self {
        Self {
            x,
            z,
            section,
            biomes: [VOID_BIOME; BIOME_CELLS],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_section() {
        let sec = ChunkSection::new_single(1);
        assert_eq!(sec.get_block(0, 0, 0), 1);
        assert_eq!(sec.get_block(15, 15, 15), 1);
        assert_eq!(sec.block_count(), 4096);
    }

    #[test]
    fn set_get_roundtrip() {
        let mut sec = ChunkSection::new_single(0);
        sec.set_block(5, 10, 3, 33);
        assert_eq!(sec.get_block(5, 10, 3), 33);
        assert_eq!(sec.get_block(0, 0, 0), 0);
        assert_eq!(sec.block_count(), 1);
    }

    #[test]
    fn yzx_ordering() {
        let mut sec = ChunkSection::new_single(0);
        sec.set_block(1, 2, 3, 99);
        // (y*16 + z)*16 + x = (2*16 + 3)*16 + 1 = 561
        assert_eq!(sec.blocks[561], 99);
    }

    #[test]
    fn column_height() {
        let mut sec = ChunkSection::new_single(0);
        assert_eq!(sec.column_height(0, 0), 0);
        sec.set_block(0, 4, 0, 9);
        assert_eq!(sec.column_height(0, 0), 5);
        assert_eq!(sec.column_height(1, 0), 0);
    }

    #[test]
    fn column_defaults_to_void_biome() {
        let col = ChunkColumn::new(0, 0, ChunkSection::new_single(0));
        assert!(col.biomes.iter().all(|&b| b == VOID_BIOME));
    }
}
