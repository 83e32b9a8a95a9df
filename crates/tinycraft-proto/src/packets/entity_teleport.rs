//! EntityTeleport (0x56): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_bool, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{Angle, VarInt, Vec3d};

/// Absolute move of an entity. Used for every player movement update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityTeleport {
    pub entity_id: i32,
    pub position: Vec3d,
    pub yaw: Angle,
    pub pitch: Angle,
    pub on_ground: bool,
}

impl Packet for EntityTeleport {
    const ID: i32 = id::clientbound::ENTITY_TELEPORT;
}

impl ProtoEncode for EntityTeleport {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_id).proto_encode(buf);
        self.position.proto_encode(buf);
        self.yaw.proto_encode(buf);
        self.pitch.proto_encode(buf);
        buf.put_u8(self.on_ground as u8);
    }
}

impl ProtoDecode for EntityTeleport {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            entity_id: VarInt::proto_decode(buf)?.0,
            position: Vec3d::proto_decode(buf)?,
            yaw: Angle::proto_decode(buf)?,
            pitch: Angle::proto_decode(buf)?,
            on_ground: read_bool(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::encode_frame;

    #[test]
    fn frame_length() {
        let pkt = EntityTeleport {
            entity_id: 1,
            position: Vec3d::new(1.0, 2.0, 3.0),
            yaw: Angle(10),
            pitch: Angle(20),
            on_ground: true,
        };
        let frame = encode_frame(&pkt).unwrap();
        // id + entity id + xyz + yaw + pitch + on_ground
        assert_eq!(frame[0] as usize, 1 + 1 + 24 + 1 + 1 + 1);
        assert_eq!(frame.len(), 1 + frame[0] as usize);
        assert_eq!(frame[1], 0x56);
    }
}
