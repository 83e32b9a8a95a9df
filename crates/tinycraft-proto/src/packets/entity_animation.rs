//! EntityAnimation (0x05): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_u8, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::VarInt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityAnimation {
    pub entity_id: i32,
    pub animation: u8,
}

impl EntityAnimation {
    pub const SWING_MAIN_ARM: u8 = 0;
    pub const SWING_OFFHAND: u8 = 3;

    /// Map a serverbound hand (0 main, 1 off) to the swing animation.
    pub fn animation_for_hand(hand: i32) -> Option<u8> {
        match hand {
            0 => Some(Self::SWING_MAIN_ARM),
            1 => Some(Self::SWING_OFFHAND),
            _ => None,
        }
    }
}

impl Packet for EntityAnimation {
    const ID: i32 = id::clientbound::ENTITY_ANIMATION;
}

impl ProtoEncode for EntityAnimation {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_id).proto_encode(buf);
        buf.put_u8(self.animation);
    }
}

impl ProtoDecode for EntityAnimation {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            entity_id: VarInt::proto_decode(buf)?.0,
            animation: read_u8(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn hand_mapping() {
        assert_eq!(EntityAnimation::animation_for_hand(0), Some(0));
        assert_eq!(EntityAnimation::animation_for_hand(1), Some(3));
        assert_eq!(EntityAnimation::animation_for_hand(2), None);
    }

    #[test]
    fn layout() {
        let mut buf = BytesMut::new();
        EntityAnimation {
            entity_id: 1,
            animation: EntityAnimation::SWING_OFFHAND,
        }
        .proto_encode(&mut buf);
        assert_eq!(&buf[..], &[1, 3]);
    }
}
