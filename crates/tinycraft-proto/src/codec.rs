//! Protocol encoding/decoding traits and helpers.

use bytes::{Buf, BufMut, Bytes};

use crate::error::ProtoError;
use crate::types::VarInt;

/// Encode a value onto a buffer.
pub trait ProtoEncode {
    fn proto_encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait ProtoDecode: Sized {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// A packet body with a fixed packet id in its connection state.
pub trait Packet: ProtoEncode {
    const ID: i32;
}

/// Fail with `BufferTooShort` unless `needed` bytes remain.
pub fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), ProtoError> {
    if buf.remaining() < needed {
        return Err(ProtoError::BufferTooShort {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Write a protocol string (VarInt byte length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    write_string_bytes(buf, s.as_bytes());
}

/// Write raw string bytes with a VarInt length prefix.
pub fn write_string_bytes(buf: &mut impl BufMut, bytes: &[u8]) {
    VarInt(bytes.len() as i32).proto_encode(buf);
    buf.put_slice(bytes);
}

/// Read a protocol string as the exact bytes sent, without UTF-8 validation.
pub fn read_string_bytes(buf: &mut impl Buf) -> Result<Bytes, ProtoError> {
    let len = VarInt::proto_decode(buf)?.0;
    if len < 0 {
        return Err(ProtoError::InvalidData(format!("negative string length: {len}")));
    }
    let len = len as usize;
    ensure_remaining(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}

/// Read a protocol string, replacing invalid UTF-8 sequences.
pub fn read_string(buf: &mut impl Buf) -> Result<String, ProtoError> {
    let data = read_string_bytes(buf)?;
    Ok(String::from_utf8_lossy(&data).into_owned())
}

/// Number of bytes `write_string` produces for `s`.
pub fn string_len(s: &str) -> usize {
    VarInt(s.len() as i32).encoded_len() + s.len()
}

pub fn read_bool(buf: &mut impl Buf) -> Result<bool, ProtoError> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8() != 0)
}

pub fn read_u8(buf: &mut impl Buf) -> Result<u8, ProtoError> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8())
}

pub fn read_u16(buf: &mut impl Buf) -> Result<u16, ProtoError> {
    ensure_remaining(buf, 2)?;
    Ok(buf.get_u16())
}

pub fn read_i32(buf: &mut impl Buf) -> Result<i32, ProtoError> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_i32())
}

pub fn read_i64(buf: &mut impl Buf) -> Result<i64, ProtoError> {
    ensure_remaining(buf, 8)?;
    Ok(buf.get_i64())
}

pub fn read_f32(buf: &mut impl Buf) -> Result<f32, ProtoError> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_f32())
}

pub fn read_f64(buf: &mut impl Buf) -> Result<f64, ProtoError> {
    ensure_remaining(buf, 8)?;
    Ok(buf.get_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn string_roundtrip() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello, Java!");
        assert_eq!(buf[0], 12);
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "Hello, Java!");
    }

    #[test]
    fn string_empty() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "");
        assert_eq!(&buf[..], &[0x00]);
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn string_unicode_prefix_is_byte_length() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "日本語");
        assert_eq!(buf[0] as usize, "日本語".len());
        assert_eq!(buf.len(), string_len("日本語"));
        let result = read_string(&mut buf.freeze()).unwrap();
        assert_eq!(result, "日本語");
    }

    #[test]
    fn string_arbitrary_bytes_pass_through() {
        let raw: Vec<u8> = (0..=255u8).collect();
        let mut buf = BytesMut::new();
        write_string_bytes(&mut buf, &raw);
        // 256 needs a two byte prefix
        assert_eq!(&buf[..2], &[0x80, 0x02]);
        let mut frozen = buf.freeze();
        let result = read_string_bytes(&mut frozen).unwrap();
        assert_eq!(&result[..], &raw[..]);
        assert!(!frozen.has_remaining());
    }

    #[test]
    fn string_leaves_trailing_data() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "abc");
        buf.put_u8(0x7F);
        let mut frozen = buf.freeze();
        assert_eq!(read_string(&mut frozen).unwrap(), "abc");
        assert_eq!(frozen.remaining(), 1);
    }

    #[test]
    fn string_buffer_too_short() {
        let mut buf = BytesMut::new();
        write_string(&mut buf, "Hello");
        let truncated = buf.freeze().slice(..3);
        assert!(matches!(
            read_string(&mut truncated.clone()),
            Err(ProtoError::BufferTooShort {
                needed: 5,
                remaining: 2
            })
        ));
    }

    #[test]
    fn string_negative_length() {
        let mut buf = BytesMut::new();
        VarInt(-1).proto_encode(&mut buf);
        assert!(read_string(&mut buf.freeze()).is_err());
    }

    #[test]
    fn fixed_width_readers() {
        let mut buf = BytesMut::new();
        buf.put_u8(1);
        buf.put_u16(25565);
        buf.put_i32(-2);
        buf.put_i64(0x0102_0304_0506_0708);
        buf.put_f32(1.5);
        buf.put_f64(-0.25);
        let mut frozen = buf.freeze();
        assert!(read_bool(&mut frozen).unwrap());
        assert_eq!(read_u16(&mut frozen).unwrap(), 25565);
        assert_eq!(read_i32(&mut frozen).unwrap(), -2);
        assert_eq!(read_i64(&mut frozen).unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(read_f32(&mut frozen).unwrap(), 1.5);
        assert_eq!(read_f64(&mut frozen).unwrap(), -0.25);
        assert!(read_u8(&mut frozen).is_err());
    }
}
