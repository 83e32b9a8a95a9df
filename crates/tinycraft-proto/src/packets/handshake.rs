//! Handshake (0x00): Client → Server, Handshake state.

use bytes::{Buf, BufMut};

use super::{expect_packet_id, id, PROTOCOL_VERSION};
use crate::codec::{read_string, read_u16, write_string, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::state::NextState;
use crate::types::VarInt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub protocol_version: i32,
    /// Hostname the client dialed. Not used by the server.
    pub server_address: String,
    pub server_port: u16,
    pub next_state: NextState,
}

impl Handshake {
    /// Decode the first frame of a connection and check it can be served.
    pub fn from_frame(packet_id: i32, payload: &mut impl Buf) -> Result<Self, ProtoError> {
        expect_packet_id("handshake", id::serverbound::HANDSHAKE, packet_id)?;
        let handshake = Self::proto_decode(payload)?;
        handshake.validate()?;
        Ok(handshake)
    }

    pub fn validate(&self) -> Result<(), ProtoError> {
        if self.protocol_version != PROTOCOL_VERSION {
            return Err(ProtoError::ProtocolVersionMismatch {
                expected: PROTOCOL_VERSION,
                got: self.protocol_version,
            });
        }
        Ok(())
    }
}

impl Packet for Handshake {
    const ID: i32 = id::serverbound::HANDSHAKE;
}

impl ProtoEncode for Handshake {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.protocol_version).proto_encode(buf);
        write_string(buf, &self.server_address);
        buf.put_u16(self.server_port);
        VarInt(self.next_state as i32).proto_encode(buf);
    }
}

impl ProtoDecode for Handshake {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let protocol_version = VarInt::proto_decode(buf)?.0;
        let server_address = read_string(buf)?;
        let server_port = read_u16(buf)?;
        let next_state = NextState::from_i32(VarInt::proto_decode(buf)?.0)?;
        Ok(Self {
            protocol_version,
            server_address,
            server_port,
            next_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn raw_handshake(version: i32, next_state: i32) -> BytesMut {
        let mut buf = BytesMut::new();
        VarInt(version).proto_encode(&mut buf);
        write_string(&mut buf, "localhost");
        buf.put_u16(25565);
        VarInt(next_state).proto_encode(&mut buf);
        buf
    }

    #[test]
    fn accepts_login_handshake() {
        let mut buf = raw_handshake(754, 2).freeze();
        let hs = Handshake::from_frame(0x00, &mut buf).unwrap();
        assert_eq!(hs.protocol_version, 754);
        assert_eq!(hs.server_address, "localhost");
        assert_eq!(hs.server_port, 25565);
        assert_eq!(hs.next_state, NextState::Login);
    }

    #[test]
    fn accepts_status_handshake() {
        let mut buf = raw_handshake(754, 1).freeze();
        let hs = Handshake::from_frame(0x00, &mut buf).unwrap();
        assert_eq!(hs.next_state, NextState::Status);
    }

    #[test]
    fn rejects_other_protocol_version() {
        let mut buf = raw_handshake(999, 2).freeze();
        assert!(matches!(
            Handshake::from_frame(0x00, &mut buf),
            Err(ProtoError::ProtocolVersionMismatch {
                expected: 754,
                got: 999
            })
        ));
    }

    #[test]
    fn rejects_unknown_next_state() {
        let mut buf = raw_handshake(754, 5).freeze();
        assert!(matches!(
            Handshake::from_frame(0x00, &mut buf),
            Err(ProtoError::InvalidNextState(5))
        ));
    }

    #[test]
    fn rejects_wrong_packet_id() {
        let mut buf = raw_handshake(754, 2).freeze();
        assert!(matches!(
            Handshake::from_frame(0xFE, &mut buf),
            Err(ProtoError::UnexpectedPacket { got: 0xFE, .. })
        ));
    }

    #[test]
    fn encode_matches_raw_layout() {
        let hs = Handshake {
            protocol_version: 754,
            server_address: "localhost".into(),
            server_port: 25565,
            next_state: NextState::Login,
        };
        let mut buf = BytesMut::new();
        hs.proto_encode(&mut buf);
        assert_eq!(buf, raw_handshake(754, 2));
    }
}
