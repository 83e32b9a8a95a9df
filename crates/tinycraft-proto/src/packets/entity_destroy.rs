//! EntityDestroy (0x36): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::VarInt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDestroy {
    pub entity_ids: Vec<i32>,
}

impl EntityDestroy {
    pub fn single(entity_id: i32) -> Self {
        Self {
            entity_ids: vec![entity_id],
        }
    }
}

impl Packet for EntityDestroy {
    const ID: i32 = id::clientbound::ENTITY_DESTROY;
}

impl ProtoEncode for EntityDestroy {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        VarInt(self.entity_ids.len() as i32).proto_encode(buf);
        for id in &self.entity_ids {
            VarInt(*id).proto_encode(buf);
        }
    }
}

impl ProtoDecode for EntityDestroy {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let count = VarInt::proto_decode(buf)?.0;
        if count < 0 {
            return Err(ProtoError::InvalidData(format!(
                "negative entity count: {count}"
            )));
        }
        let mut entity_ids = Vec::with_capacity((count as usize).min(buf.remaining()));
        for _ in 0..count {
            entity_ids.push(VarInt::proto_decode(buf)?.0);
        }
        Ok(Self { entity_ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::encode_frame;

    #[test]
    fn single_entity_frame() {
        let frame = encode_frame(&EntityDestroy::single(4)).unwrap();
        assert_eq!(&frame[..], &[3, 0x36, 1, 4]);
    }

    #[test]
    fn roundtrip() {
        let pkt = EntityDestroy {
            entity_ids: vec![0, 300],
        };
        let mut buf = bytes::BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(EntityDestroy::proto_decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
