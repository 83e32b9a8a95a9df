//! Join payloads that never change: the JoinGame registries and the framed
//! spawn chunks. Built once at startup and shared by every connection.

use bytes::Bytes;
use tinycraft_proto::framer::encode_frame;
use tinycraft_world::dimension::join_game_nbt;
use tinycraft_world::spawn_region;
use tracing::debug;

use crate::error::WorldError;

pub struct SpawnWorld {
    pub dimension_codec: Bytes,
    pub dimension: Bytes,
    /// ChunkData frames in send order.
    pub chunk_frames: Vec<Bytes>,
}

impl SpawnWorld {
    pub fn build() -> Result<Self, WorldError> {
        let (dimension_codec, dimension) = join_game_nbt()?;
        let chunk_frames = spawn_region()?
            .iter()
            .map(encode_frame)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            codec_bytes = dimension_codec.len(),
            chunks = chunk_frames.len(),
            chunk_bytes = chunk_frames.first().map_or(0, Bytes::len),
            "spawn world ready"
        );
        Ok(Self {
            dimension_codec,
            dimension,
            chunk_frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinycraft_proto::codec::{Packet, ProtoDecode};
    use tinycraft_proto::framer::{decode_frame, packet_len, MAX_PACKET_SIZE};
    use tinycraft_proto::packets::id::clientbound::CHUNK_DATA;
    use tinycraft_proto::packets::{
        ChatMessage, EntityAnimation, EntityMetadata, EntityRotation, JoinGame, LoginSuccess,
        PlayerPositionAndLook, Pong, Pose, SpawnPlayer, StatusResponse,
    };
    use tinycraft_proto::types::{Angle, EntityUuid, VarInt, Vec3d};
    use tinycraft_world::SPAWN_POSITION;

    use crate::config::ServerSection;
    use crate::registry::MAX_PLAYERS;
    use crate::status::{build_status, load_favicon};

    fn framed<P: Packet>(packet: &P) -> (i32, Bytes, usize) {
        (P::ID, encode_frame(packet).unwrap(), packet_len(packet))
    }

    #[test]
    fn chunk_frames_fit_packet_buffer() {
        let world = SpawnWorld::build().unwrap();
        assert_eq!(world.chunk_frames.len(), 4);
        for frame in &world.chunk_frames {
            let mut frame = frame.clone();
            let (id, payload) = decode_frame(&mut frame).unwrap();
            assert_eq!(id, CHUNK_DATA);
            assert!(payload.len() + 1 <= MAX_PACKET_SIZE);
        }
    }

    #[test]
    fn registries_are_nbt_compounds() {
        let world = SpawnWorld::build().unwrap();
        // TAG_Compound with an empty root name
        assert_eq!(&world.dimension_codec[..3], &[0x0A, 0x00, 0x00]);
        assert_eq!(world.dimension[0], 0x0A);
    }

    #[test]
    fn length_prefix_covers_id_and_payload_for_every_clientbound_packet() {
        let world = SpawnWorld::build().unwrap();
        let server = ServerSection::default();
        let favicon = load_favicon(&server).unwrap();
        let roster = [(0, "Alice".to_string()), (4, "ABCDEFGHIJKLMNOP".to_string())];
        let status = build_status(&server, Some(favicon.as_str()), &roster);

        let frames = [
            framed(&JoinGame::creative_overworld(
                0,
                MAX_PLAYERS as i32,
                world.dimension_codec.clone(),
                world.dimension.clone(),
            )),
            framed(&LoginSuccess {
                uuid: EntityUuid(0),
                username: "Alice".into(),
            }),
            framed(&ChatMessage::from_player("Alice", "hello", EntityUuid(0))),
            framed(&SpawnPlayer {
                entity_id: 4,
                uuid: EntityUuid(4),
                position: Vec3d::new(0.5, 4.0, -3.25),
                yaw: Angle(64),
                pitch: Angle(250),
            }),
            framed(&EntityRotation {
                entity_id: 4,
                yaw: Angle(1),
                pitch: Angle(2),
                on_ground: true,
            }),
            framed(&EntityAnimation {
                entity_id: 4,
                animation: EntityAnimation::SWING_OFFHAND,
            }),
            framed(&EntityMetadata {
                entity_id: 4,
                pose: Pose::Sneaking,
            }),
            framed(&PlayerPositionAndLook::spawn(SPAWN_POSITION)),
            framed(&StatusResponse::from_status(&status).unwrap()),
            framed(&Pong { payload: -7 }),
        ];

        for (id, frame, body_len) in frames {
            let mut rest = frame.clone();
            let prefix = VarInt::proto_decode(&mut rest).unwrap().0 as usize;
            assert_eq!(prefix, body_len, "length prefix of packet {id:#04x}");
            assert_eq!(rest.len(), body_len, "body of packet {id:#04x}");
            assert!(body_len <= MAX_PACKET_SIZE);

            let (decoded_id, payload) = decode_frame(&mut frame.clone()).unwrap();
            assert_eq!(decoded_id, id);
            assert_eq!(VarInt(id).encoded_len() + payload.len(), body_len);
        }
    }
}
