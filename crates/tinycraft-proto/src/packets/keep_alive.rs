//! KeepAlive (0x1F): Server → Client.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{read_i64, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

/// Periodic liveness probe. The server sends its uptime in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive {
    pub id: i64,
}

impl Packet for KeepAlive {
    const ID: i32 = id::clientbound::KEEP_ALIVE;
}

impl ProtoEncode for KeepAlive {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i64(self.id);
    }
}

impl ProtoDecode for KeepAlive {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self { id: read_i64(buf)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::encode_frame;

    #[test]
    fn frame_layout() {
        let frame = encode_frame(&KeepAlive { id: 20 }).unwrap();
        assert_eq!(&frame[..], &[9, 0x1F, 0, 0, 0, 0, 0, 0, 0, 20]);
    }
}
