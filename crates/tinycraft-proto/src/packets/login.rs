//! Login state packets: LoginStart (0x00, C→S) and LoginSuccess (0x02, S→C).

use bytes::{Buf, BufMut};

use super::{expect_packet_id, id};
use crate::codec::{read_string, write_string, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::EntityUuid;

/// Longest username the protocol allows, in bytes.
pub const MAX_USERNAME_LEN: usize = 16;

/// First packet of the Login state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginStart {
    pub username: String,
}

impl Packet for LoginStart {
    const ID: i32 = id::serverbound::LOGIN_START;
}

impl ProtoEncode for LoginStart {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.username);
    }
}

impl ProtoDecode for LoginStart {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let username = read_string(buf)?;
        if username.is_empty() || username.len() > MAX_USERNAME_LEN {
            return Err(ProtoError::InvalidUsername {
                len: username.len(),
                max: MAX_USERNAME_LEN,
            });
        }
        Ok(Self { username })
    }
}

/// Inbound packets of the Login state. Offline mode only knows LoginStart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginPacket {
    Start(LoginStart),
}

impl LoginPacket {
    pub fn from_frame(packet_id: i32, payload: &mut impl Buf) -> Result<Self, ProtoError> {
        expect_packet_id("login", id::serverbound::LOGIN_START, packet_id)?;
        Ok(Self::Start(LoginStart::proto_decode(payload)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSuccess {
    pub uuid: EntityUuid,
    pub username: String,
}

impl Packet for LoginSuccess {
    const ID: i32 = id::clientbound::LOGIN_SUCCESS;
}

impl ProtoEncode for LoginSuccess {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        self.uuid.proto_encode(buf);
        write_string(buf, &self.username);
    }
}

impl ProtoDecode for LoginSuccess {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            uuid: EntityUuid::proto_decode(buf)?,
            username: read_string(buf)?,
        })
    }
}
