//! EntityHeadLook (0x3A): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{Angle, VarInt};

/// Head yaw is tracked separately from body yaw; sent alongside every
/// movement and rotation update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityHeadLook {
    pub entity_id: i32,
    pub head_yaw: Angle,
}

impl Packet for EntityHeadLook {
    const ID: i32 = id::clientbound::ENTITY_HEAD_LOOK;
}

impl ProtoEncode for EntityHeadLook {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_id).proto_encode(buf);
        self.head_yaw.proto_encode(buf);
    }
}

impl ProtoDecode for EntityHeadLook {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            entity_id: VarInt::proto_decode(buf)?.0,
            head_yaw: Angle::proto_decode(buf)?,
        })
    }
}
