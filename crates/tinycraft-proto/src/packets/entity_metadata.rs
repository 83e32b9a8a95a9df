//! EntityMetadata (0x44): Server → Client.
//!
//! Only the pose entry is ever sent: index 6, type 18 (Pose), followed by the
//! 0xFF terminator.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_u8, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::VarInt;

const POSE_INDEX: u8 = 6;
const POSE_TYPE: i32 = 18;
const END_OF_METADATA: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Pose {
    Standing = 0,
    FallFlying = 1,
    Sleeping = 2,
    Swimming = 3,
    SpinAttack = 4,
    Sneaking = 5,
    Dying = 6,
}

impl Pose {
    fn from_i32(v: i32) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::Standing),
            1 => Ok(Self::FallFlying),
            2 => Ok(Self::Sleeping),
            3 => Ok(Self::Swimming),
            4 => Ok(Self::SpinAttack),
            5 => Ok(Self::Sneaking),
            6 => Ok(Self::Dying),
            _ => Err(ProtoError::InvalidData(format!("unknown pose: {v}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMetadata {
    pub entity_id: i32,
    pub pose: Pose,
}

impl Packet for EntityMetadata {
    const ID: i32 = id::clientbound::ENTITY_METADATA;
}

impl ProtoEncode for EntityMetadata {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_id).proto_encode(buf);
        buf.put_u8(POSE_INDEX);
        VarInt(POSE_TYPE).proto_encode(buf);
        VarInt(self.pose as i32).proto_encode(buf);
        buf.put_u8(END_OF_METADATA);
    }
}

impl ProtoDecode for EntityMetadata {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let entity_id = VarInt::proto_decode(buf)?.0;
        let index = read_u8(buf)?;
        let kind = VarInt::proto_decode(buf)?.0;
        if index != POSE_INDEX || kind != POSE_TYPE {
            return Err(ProtoError::InvalidData(format!(
                "unsupported metadata entry {index} of type {kind}"
            )));
        }
        let pose = Pose::from_i32(VarInt::proto_decode(buf)?.0)?;
        if read_u8(buf)? != END_OF_METADATA {
            return Err(ProtoError::InvalidData("missing metadata terminator".into()));
        }
        Ok(Self { entity_id, pose })
    }
}
