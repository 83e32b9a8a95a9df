//! ServerDifficulty (0x0D): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_bool, read_u8, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerDifficulty {
    /// 0 peaceful, 1 easy, 2 normal, 3 hard.
    pub difficulty: u8,
    pub locked: bool,
}

impl ServerDifficulty {
    pub const PEACEFUL_LOCKED: Self = Self {
        difficulty: 0,
        locked: true,
    };
}

impl Packet for ServerDifficulty {
    const ID: i32 = id::clientbound::SERVER_DIFFICULTY;
}

impl ProtoEncode for ServerDifficulty {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.difficulty);
        buf.put_u8(self.locked as u8);
    }
}

impl ProtoDecode for ServerDifficulty {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            difficulty: read_u8(buf)?,
            locked: read_bool(buf)?,
        })
    }
}
