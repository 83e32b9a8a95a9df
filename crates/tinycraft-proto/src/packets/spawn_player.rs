//! SpawnPlayer (0x04): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{Angle, EntityUuid, VarInt, Vec3d};

/// Makes another player visible. The target must already be in the
/// receiver's tab list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlayer {
    pub entity_id: i32,
    pub uuid: EntityUuid,
    pub position: Vec3d,
    pub yaw: Angle,
    pub pitch: Angle,
}

impl Packet for SpawnPlayer {
    const ID: i32 = id::clientbound::SPAWN_PLAYER;
}

impl ProtoEncode for SpawnPlayer {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_id).proto_encode(buf);
        self.uuid.proto_encode(buf);
        self.position.proto_encode(buf);
        self.yaw.proto_encode(buf);
        self.pitch.proto_encode(buf);
    }
}

impl ProtoDecode for SpawnPlayer {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            entity_id: VarInt::proto_decode(buf)?.0,
            uuid: EntityUuid::proto_decode(buf)?,
            position: Vec3d::proto_decode(buf)?,
            yaw: Angle::proto_decode(buf)?,
            pitch: Angle::proto_decode(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip() {
        let pkt = SpawnPlayer {
            entity_id: 4,
            uuid: EntityUuid(4),
            position: Vec3d::new(0.0, 5.0, 0.0),
            yaw: Angle(64),
            pitch: Angle(0),
        };
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf.len(), 1 + 16 + 24 + 2);
        let decoded = SpawnPlayer::proto_decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, pkt);
    }
}
