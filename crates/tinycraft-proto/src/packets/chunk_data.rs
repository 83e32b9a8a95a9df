//! ChunkData (0x20): Server → Client.
//!
//! Always sent as a full chunk column. Heightmaps arrive pre-encoded as NBT
//! and section data as the already packed byte array.

use bytes::{BufMut, Bytes};

use super::id;
use crate::codec::{Packet, ProtoEncode};
use crate::types::VarInt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkData {
    pub chunk_x: i32,
    pub chunk_z: i32,
    /// One bit per 16-block-high section that is present in `data`.
    pub primary_bit_mask: i32,
    pub heightmaps: Bytes,
    /// 1024 biome ids (4×4×4 cells).
    pub biomes: Vec<i32>,
    pub data: Bytes,
}

impl Packet for ChunkData {
    const ID: i32 = id::clientbound::CHUNK_DATA;
}

impl ProtoEncode for ChunkData {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.chunk_x);
        buf.put_i32(self.chunk_z);
        buf.put_u8(1); // full chunk
        VarInt(self.primary_bit_mask).proto_encode(buf);
        buf.put_slice(&self.heightmaps);
        VarInt(self.biomes.len() as i32).proto_encode(buf);
        for biome in &self.biomes {
            VarInt(*biome).proto_encode(buf);
        }
        VarInt(self.data.len() as i32).proto_encode(buf);
        buf.put_slice(&self.data);
        VarInt(0).proto_encode(buf); // no block entities
    }
}
