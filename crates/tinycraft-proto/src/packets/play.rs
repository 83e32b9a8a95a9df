//! Serverbound Play state packets.
//!
//! A frame is decoded into [`ServerboundPlay`] in one step; the caller then
//! matches on the variant. Ids this server does not handle become
//! [`ServerboundPlay::Unknown`] and their payload is dropped with the frame.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::id::serverbound as sb;
use crate::codec::{
    read_bool, read_f32, read_f64, read_i64, read_string, write_string, ProtoDecode, ProtoEncode,
};
use crate::error::ProtoError;
use crate::framer::MAX_PACKET_SIZE;
use crate::types::VarInt;

/// Entity action ids carried by [`ServerboundPlay::EntityAction`].
pub mod entity_action {
    pub const START_SNEAKING: i32 = 0;
    pub const STOP_SNEAKING: i32 = 1;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerboundPlay {
    TeleportConfirm {
        teleport_id: i32,
    },
    ChatMessage {
        message: String,
    },
    KeepAlive {
        id: i64,
    },
    PlayerPosition {
        x: f64,
        y: f64,
        z: f64,
        on_ground: bool,
    },
    PlayerPositionAndRotation {
        x: f64,
        y: f64,
        z: f64,
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    PlayerRotation {
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    EntityAction {
        entity_id: i32,
        action: i32,
        jump_boost: i32,
    },
    Animation {
        hand: i32,
    },
    Unknown {
        id: i32,
        len: usize,
    },
}

impl ServerboundPlay {
    /// Decode the body of one Play frame.
    pub fn from_frame(packet_id: i32, payload: &mut impl Buf) -> Result<Self, ProtoError> {
        let packet = match packet_id {
            sb::TELEPORT_CONFIRM => Self::TeleportConfirm {
                teleport_id: VarInt::proto_decode(payload)?.0,
            },
            sb::CHAT_MESSAGE => Self::ChatMessage {
                message: read_string(payload)?,
            },
            sb::KEEP_ALIVE => Self::KeepAlive {
                id: read_i64(payload)?,
            },
            sb::PLAYER_POSITION => Self::PlayerPosition {
                x: read_f64(payload)?,
                y: read_f64(payload)?,
                z: read_f64(payload)?,
                on_ground: read_bool(payload)?,
            },
            sb::PLAYER_POSITION_AND_ROTATION => Self::PlayerPositionAndRotation {
                x: read_f64(payload)?,
                y: read_f64(payload)?,
                z: read_f64(payload)?,
                yaw: read_f32(payload)?,
                pitch: read_f32(payload)?,
                on_ground: read_bool(payload)?,
            },
            sb::PLAYER_ROTATION => Self::PlayerRotation {
                yaw: read_f32(payload)?,
                pitch: read_f32(payload)?,
                on_ground: read_bool(payload)?,
            },
            sb::ENTITY_ACTION => Self::EntityAction {
                entity_id: VarInt::proto_decode(payload)?.0,
                action: VarInt::proto_decode(payload)?.0,
                jump_boost: VarInt::proto_decode(payload)?.0,
            },
            sb::ANIMATION => Self::Animation {
                hand: VarInt::proto_decode(payload)?.0,
            },
            id => {
                let len = payload.remaining();
                payload.advance(len);
                Self::Unknown { id, len }
            }
        };
        Ok(packet)
    }

    /// Packet id of this variant.
    pub fn packet_id(&self) -> i32 {
        match self {
            Self::TeleportConfirm { .. } => sb::TELEPORT_CONFIRM,
            Self::ChatMessage { .. } => sb::CHAT_MESSAGE,
            Self::KeepAlive { .. } => sb::KEEP_ALIVE,
            Self::PlayerPosition { .. } => sb::PLAYER_POSITION,
            Self::PlayerPositionAndRotation { .. } => sb::PLAYER_POSITION_AND_ROTATION,
            Self::PlayerRotation { .. } => sb::PLAYER_ROTATION,
            Self::EntityAction { .. } => sb::ENTITY_ACTION,
            Self::Animation { .. } => sb::ANIMATION,
            Self::Unknown { id, .. } => *id,
        }
    }

    /// Encode as a complete frame, the way a client would send it.
    pub fn encode_frame(&self) -> Result<Bytes, ProtoError> {
        let mut body = BytesMut::new();
        VarInt(self.packet_id()).proto_encode(&mut body);
        self.proto_encode(&mut body);
        if body.len() > MAX_PACKET_SIZE {
            return Err(ProtoError::PacketTooLarge {
                size: body.len(),
                max: MAX_PACKET_SIZE,
            });
        }
        let mut frame = BytesMut::new();
        VarInt(body.len() as i32).proto_encode(&mut frame);
        frame.put_slice(&body);
        Ok(frame.freeze())
    }
}

impl ProtoEncode for ServerboundPlay {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            Self::TeleportConfirm { teleport_id } => VarInt(*teleport_id).proto_encode(buf),
            Self::ChatMessage { message } => write_string(buf, message),
            Self::KeepAlive { id } => buf.put_i64(*id),
            Self::PlayerPosition { x, y, z, on_ground } => {
                buf.put_f64(*x);
                buf.put_f64(*y);
                buf.put_f64(*z);
                buf.put_u8(*on_ground as u8);
            }
            Self::PlayerPositionAndRotation {
                x,
                y,
                z,
                yaw,
                pitch,
                on_ground,
            } => {
                buf.put_f64(*x);
                buf.put_f64(*y);
                buf.put_f64(*z);
                buf.put_f32(*yaw);
                buf.put_f32(*pitch);
                buf.put_u8(*on_ground as u8);
            }
            Self::PlayerRotation {
                yaw,
                pitch,
                on_ground,
            } => {
                buf.put_f32(*yaw);
                buf.put_f32(*pitch);
                buf.put_u8(*on_ground as u8);
            }
            Self::EntityAction {
                entity_id,
                action,
                jump_boost,
            } => {
                VarInt(*entity_id).proto_encode(buf);
                VarInt(*action).proto_encode(buf);
                VarInt(*jump_boost).proto_encode(buf);
            }
            Self::Animation { hand } => VarInt(*hand).proto_encode(buf),
            Self::Unknown { len, .. } => buf.put_bytes(0, *len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::decode_frame;

    fn roundtrip(packet: ServerboundPlay) {
        let mut frame = packet.encode_frame().unwrap();
        let (id, mut payload) = decode_frame(&mut frame).unwrap();
        let decoded = ServerboundPlay::from_frame(id, &mut payload).unwrap();
        assert_eq!(decoded, packet);
        assert!(!payload.has_remaining());
    }

    #[test]
    fn decode_handled_packets() {
        roundtrip(ServerboundPlay::TeleportConfirm { teleport_id: 0x55 });
        roundtrip(ServerboundPlay::ChatMessage {
            message: "hello there".into(),
        });
        roundtrip(ServerboundPlay::PlayerPositionAndRotation {
            x: 1.5,
            y: 5.0,
            z: -3.25,
            yaw: 90.0,
            pitch: -10.0,
            on_ground: true,
        });
        roundtrip(ServerboundPlay::EntityAction {
            entity_id: 2,
            action: entity_action::START_SNEAKING,
            jump_boost: 0,
        });
    }

    #[test]
    fn position_reads_ieee_doubles() {
        let mut payload = BytesMut::new();
        payload.put_f64(0.5);
        payload.put_f64(5.0);
        payload.put_f64(-7.75);
        payload.put_u8(1);
        let decoded =
            ServerboundPlay::from_frame(sb::PLAYER_POSITION, &mut payload.freeze()).unwrap();
        assert_eq!(
            decoded,
            ServerboundPlay::PlayerPosition {
                x: 0.5,
                y: 5.0,
                z: -7.75,
                on_ground: true
            }
        );
    }

    #[test]
    fn unknown_id_consumes_payload() {
        let mut payload = Bytes::from_static(&[1, 2, 3, 4, 5]);
        let decoded = ServerboundPlay::from_frame(0x05, &mut payload).unwrap();
        assert_eq!(decoded, ServerboundPlay::Unknown { id: 0x05, len: 5 });
        assert!(payload.is_empty());
    }

    #[test]
    fn truncated_rotation_is_error() {
        let mut payload = Bytes::from_static(&[0, 0, 0, 0]);
        assert!(ServerboundPlay::from_frame(sb::PLAYER_ROTATION, &mut payload).is_err());
    }
}
