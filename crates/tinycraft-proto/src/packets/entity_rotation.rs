//! EntityRotation (0x29): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_bool, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{Angle, VarInt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRotation {
    pub entity_id: i32,
    pub yaw: Angle,
    pub pitch: Angle,
    pub on_ground: bool,
}

impl Packet for EntityRotation {
    const ID: i32 = id::clientbound::ENTITY_ROTATION;
}

impl ProtoEncode for EntityRotation {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_id).proto_encode(buf);
        self.yaw.proto_encode(buf);
        self.pitch.proto_encode(buf);
        buf.put_u8(self.on_ground as u8);
    }
}

impl ProtoDecode for EntityRotation {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            entity_id: VarInt::proto_decode(buf)?.0,
            yaw: Angle::proto_decode(buf)?,
            pitch: Angle::proto_decode(buf)?,
            on_ground: read_bool(buf)?,
        })
    }
}
