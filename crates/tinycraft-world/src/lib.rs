//! Static world content: the flat spawn region and the JoinGame registries.

pub mod block;
pub mod chunk;
pub mod dimension;
pub mod flat_generator;
pub mod serializer;

use tinycraft_nbt::NbtError;
use tinycraft_proto::packets::ChunkData;
use tinycraft_proto::types::Vec3d;

use crate::block::FlatWorldBlocks;

/// Chunks sent to every player on join, in send order.
pub const SPAWN_CHUNKS: [(i32, i32); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

/// Where players appear, standing on the grass layer.
pub const SPAWN_POSITION: Vec3d = Vec3d {
    x: 0.0,
    y: flat_generator::SURFACE_Y as f64,
    z: 0.0,
};

/// Build the ChunkData packets for the spawn region.
pub fn spawn_region() -> Result<Vec<ChunkData>, NbtError> {
    let blocks = FlatWorldBlocks::default();
    SPAWN_CHUNKS
        .iter()
        .map(|&(x, z)| {
            serializer::serialize_chunk_column(&flat_generator::generate_flat_chunk(x, z, &blocks))
        })
        .collect()
}
