//! PlayerPositionAndLook (0x34): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_f32, read_u8, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::{VarInt, Vec3d};

/// Places the client in the world. The client answers with a teleport
/// confirm carrying `teleport_id`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPositionAndLook {
    pub position: Vec3d,
    pub yaw: f32,
    pub pitch: f32,
    /// Bit set of relative fields; 0 means all absolute.
    pub flags: u8,
    pub teleport_id: i32,
}

impl PlayerPositionAndLook {
    /// Teleport id used for the spawn placement.
    pub const SPAWN_TELEPORT_ID: i32 = 0x55;

    pub fn spawn(position: Vec3d) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            flags: 0,
            teleport_id: Self::SPAWN_TELEPORT_ID,
        }
    }
}

impl Packet for PlayerPositionAndLook {
    const ID: i32 = id::clientbound::PLAYER_POSITION_AND_LOOK;
}

impl ProtoEncode for PlayerPositionAndLook {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.position.proto_encode(buf);
        buf.put_f32(self.yaw);
        buf.put_f32(self.pitch);
        buf.put_u8(self.flags);
        VarInt(self.teleport_id).proto_encode(buf);
    }
}

impl ProtoDecode for PlayerPositionAndLook {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            position: Vec3d::proto_decode(buf)?,
            yaw: read_f32(buf)?,
            pitch: read_f32(buf)?,
            flags: read_u8(buf)?,
            teleport_id: VarInt::proto_decode(buf)?.0,
        })
    }
}
