//! Outbound packet framing.
//!
//! A packet is built as `id ++ payload` inside a buffer of at most
//! [`MAX_PACKET_SIZE`] bytes, then prefixed with its VarInt length.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::codec::{Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::VarInt;

/// Capacity of one outbound packet (id + payload).
pub const MAX_PACKET_SIZE: usize = 6000;

/// Largest inbound frame accepted (the three-byte VarInt maximum).
pub const MAX_INBOUND_FRAME: usize = 2_097_151;

/// Bounded scratch buffer for a single outbound packet.
pub struct PacketBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl PacketBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Write the packet id followed by the packet's payload.
    pub fn write_packet<P: Packet>(&mut self, packet: &P) -> Result<(), ProtoError> {
        VarInt(P::ID).proto_encode(&mut self.buf);
        packet.proto_encode(&mut self.buf);
        self.check()
    }

    fn check(&self) -> Result<(), ProtoError> {
        if self.buf.len() > self.capacity {
            return Err(ProtoError::PacketTooLarge {
                size: self.buf.len(),
                max: self.capacity,
            });
        }
        Ok(())
    }

    /// Prefix the contents with their VarInt length and return the frame.
    pub fn into_frame(self) -> Result<Bytes, ProtoError> {
        self.check()?;
        let len = VarInt(self.buf.len() as i32);
        let mut frame = BytesMut::with_capacity(len.encoded_len() + self.buf.len());
        len.proto_encode(&mut frame);
        frame.put_slice(&self.buf);
        Ok(frame.freeze())
    }
}

/// Encode `packet` as one complete frame: `VarInt(len) ++ VarInt(id) ++ payload`.
pub fn encode_frame<P: Packet>(packet: &P) -> Result<Bytes, ProtoError> {
    encode_frame_with_capacity(packet, MAX_PACKET_SIZE)
}

pub fn encode_frame_with_capacity<P: Packet>(
    packet: &P,
    capacity: usize,
) -> Result<Bytes, ProtoError> {
    let mut buf = PacketBuffer::with_capacity(capacity);
    buf.write_packet(packet)?;
    buf.into_frame()
}

/// Size of `id ++ payload` for `packet`, without the length prefix.
pub fn packet_len<P: Packet>(packet: &P) -> usize {
    let mut buf = BytesMut::new();
    VarInt(P::ID).proto_encode(&mut buf);
    packet.proto_encode(&mut buf);
    buf.len()
}

/// Split one frame off the front of `buf`, returning `(packet_id, payload)`.
pub fn decode_frame(buf: &mut Bytes) -> Result<(i32, Bytes), ProtoError> {
    let len = VarInt::proto_decode(buf)?.0;
    if len < 0 {
        return Err(ProtoError::InvalidFrameLength(len));
    }
    let len = len as usize;
    if len > MAX_INBOUND_FRAME {
        return Err(ProtoError::FrameTooLarge {
            size: len,
            max: MAX_INBOUND_FRAME,
        });
    }
    crate::codec::ensure_remaining(buf, len)?;
    let mut body = buf.split_to(len);
    let id = VarInt::proto_decode(&mut body)?.0;
    Ok((id, body.copy_to_bytes(body.remaining())))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blob(Vec<u8>);

    impl ProtoEncode for Blob {
        fn proto_encode(&self, buf: &mut impl BufMut) {
            buf.put_slice(&self.0);
        }
    }

    impl Packet for Blob {
        const ID: i32 = 0x20;
    }

    #[test]
    fn frame_prefix_matches_body_length() {
        let frame = encode_frame(&Blob(vec![1, 2, 3])).unwrap();
        assert_eq!(&frame[..], &[4, 0x20, 1, 2, 3]);
    }

    #[test]
    fn frame_with_multibyte_prefix() {
        let frame = encode_frame(&Blob(vec![0xAA; 200])).unwrap();
        // 201 = 0xC9 0x01
        assert_eq!(&frame[..2], &[0xC9, 0x01]);
        assert_eq!(frame.len(), 2 + 201);
    }

    #[test]
    fn exactly_at_capacity_is_accepted() {
        let frame = encode_frame(&Blob(vec![0; MAX_PACKET_SIZE - 1])).unwrap();
        let mut frame = frame;
        let (id, payload) = decode_frame(&mut frame).unwrap();
        assert_eq!(id, 0x20);
        assert_eq!(payload.len(), MAX_PACKET_SIZE - 1);
    }

    #[test]
    fn over_capacity_is_rejected() {
        let err = encode_frame(&Blob(vec![0; MAX_PACKET_SIZE])).unwrap_err();
        assert!(matches!(
            err,
            ProtoError::PacketTooLarge {
                size: 6001,
                max: MAX_PACKET_SIZE
            }
        ));
    }

    #[test]
    fn packet_len_excludes_prefix() {
        assert_eq!(packet_len(&Blob(vec![9; 10])), 11);
    }

    #[test]
    fn decode_frame_consumes_exactly_one_frame() {
        let mut joined = BytesMut::new();
        joined.put_slice(&encode_frame(&Blob(vec![1])).unwrap());
        joined.put_slice(&encode_frame(&Blob(vec![2, 3])).unwrap());
        let mut joined = joined.freeze();
        let (_, first) = decode_frame(&mut joined).unwrap();
        assert_eq!(&first[..], &[1]);
        let (_, second) = decode_frame(&mut joined).unwrap();
        assert_eq!(&second[..], &[2, 3]);
        assert!(joined.is_empty());
    }

    #[test]
    fn decode_frame_truncated() {
        let mut buf = Bytes::from_static(&[0x05, 0x00, 0x01]);
        assert!(matches!(
            decode_frame(&mut buf),
            Err(ProtoError::BufferTooShort { .. })
        ));
    }
}
