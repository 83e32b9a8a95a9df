//! Chunk column serialization to the Java 1.16.5 network format.

use bytes::{BufMut, Bytes, BytesMut};
use tinycraft_nbt::{NbtCompound, NbtError, NbtRoot, NbtTag};
use tinycraft_proto::codec::ProtoEncode;
use tinycraft_proto::packets::ChunkData;
use tinycraft_proto::types::VarInt;

use crate::chunk::{ChunkColumn, ChunkSection, SECTION_VOLUME};

/// One byte per block, so the palette can cover every id below 256.
pub const BITS_PER_BLOCK: u8 = 8;

/// Entries in the identity palette.
pub const PALETTE_LEN: usize = 256;

/// Longs holding the packed block array.
pub const DATA_LONGS: usize = SECTION_VOLUME * BITS_PER_BLOCK as usize / 64;

const HEIGHTMAP_BITS: usize = 9;
const HEIGHTMAP_PER_LONG: usize = 64 / HEIGHTMAP_BITS;

/// Serialize a full chunk column to a ChunkData packet.
pub fn serialize_chunk_column(column: &ChunkColumn) -> Result<ChunkData, NbtError> {
    let mut data = BytesMut::new();
    serialize_section(&mut data, &column.section);

    Ok(ChunkData {
        chunk_x: column.x,
        chunk_z: column.z,
        primary_bit_mask: 0b1,
        heightmaps: heightmap_nbt(&column.section)?,
        biomes: column.biomes.to_vec(),
        data: data.freeze(),
    })
}

/// Serialize a single section: block count, bits per block, palette, packed data.
pub fn serialize_section(buf: &mut impl BufMut, section: &ChunkSection) {
    buf.put_i16(section.block_count());
    buf.put_u8(BITS_PER_BLOCK);

    VarInt(PALETTE_LEN as i32).proto_encode(buf);
    for state in 0..PALETTE_LEN as i32 {
        VarInt(state).proto_encode(buf);
    }

    VarInt(DATA_LONGS as i32).proto_encode(buf);
    for word in section.blocks.chunks_exact(8) {
        let packed = word
            .iter()
            .enumerate()
            .fold(0u64, |acc, (slot, &state)| acc | (state as u64) << (slot * 8));
        buf.put_u64(packed);
    }
}

/// Pack 256 column heights, 9 bits each, entries not spanning longs.
pub fn pack_heightmap(heights: &[u16; 256]) -> Vec<i64> {
    let mut longs = vec![0i64; heights.len().div_ceil(HEIGHTMAP_PER_LONG)];
    for (i, &height) in heights.iter().enumerate() {
        let shift = (i % HEIGHTMAP_PER_LONG) * HEIGHTMAP_BITS;
        longs[i / HEIGHTMAP_PER_LONG] |= ((height as i64) & 0x1FF) << shift;
    }
    longs
}

/// `MOTION_BLOCKING` heightmap for the section, encoded as a root compound.
pub fn heightmap_nbt(section: &ChunkSection) -> Result<Bytes, NbtError> {
    let mut heights = [0u16; 256];
    for z in 0..16 {
        for x in 0..16 {
            heights[z * 16 + x] = section.column_height(x, z);
        }
    }
    let mut root = NbtCompound::new();
    root.insert(
        "MOTION_BLOCKING",
        NbtTag::LongArray(pack_heightmap(&heights)),
    );
    tinycraft_nbt::to_bytes(&NbtRoot::unnamed(root))
}
