//! NBT (Named Binary Tag) for Minecraft Java Edition.
//!
//! Only the big-endian Java layout is implemented: `u16` string lengths,
//! `i32` array lengths, big-endian numbers.

pub mod error;
mod io;
pub mod tag;

pub use error::NbtError;
pub use tag::{NbtCompound, NbtRoot, NbtTag};

use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Read a named root compound from a buffer.
pub fn read_nbt(buf: &mut impl Buf) -> Result<NbtRoot, NbtError> {
    io::read_nbt(buf)
}

/// Write a named root compound to a buffer.
pub fn write_nbt(buf: &mut impl BufMut, root: &NbtRoot) -> Result<(), NbtError> {
    io::write_nbt(buf, root)
}

/// Encode a root compound into a standalone byte blob.
pub fn to_bytes(root: &NbtRoot) -> Result<Bytes, NbtError> {
    let mut buf = BytesMut::new();
    write_nbt(&mut buf, root)?;
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(root: &NbtRoot) {
        let bytes = to_bytes(root).unwrap();
        let decoded = read_nbt(&mut bytes.clone()).unwrap();
        assert_eq!(decoded, *root);
    }

    fn single(name: &str, tag: NbtTag) -> NbtRoot {
        let mut c = NbtCompound::new();
        c.insert(name, tag);
        NbtRoot::unnamed(c)
    }

    #[test]
    fn empty_compound_bytes() {
        let bytes = to_bytes(&NbtRoot::unnamed(NbtCompound::new())).unwrap();
        assert_eq!(&bytes[..], &[0x0A, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn int_is_big_endian() {
        let bytes = to_bytes(&single("v", NbtTag::Int(1))).unwrap();
        assert_eq!(
            &bytes[..],
            &[0x0A, 0, 0, 0x03, 0, 1, b'v', 0, 0, 0, 1, 0x00]
        );
    }

    #[test]
    fn long_array_layout() {
        let bytes = to_bytes(&single("h", NbtTag::LongArray(vec![1, -1]))).unwrap();
        // root header (3) + tag header (1 + 2 + 1) + len (4) + 2 longs + end
        assert_eq!(bytes.len(), 3 + 4 + 4 + 16 + 1);
        assert_eq!(&bytes[7..11], &[0, 0, 0, 2]);
        assert_eq!(&bytes[11..19], &[0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn root_name() {
        roundtrip(&NbtRoot::new("hello world", NbtCompound::new()));
    }

    #[test]
    fn scalars() {
        roundtrip(&single("b", NbtTag::Byte(-42)));
        roundtrip(&single("s", NbtTag::Short(-1234)));
        roundtrip(&single("i", NbtTag::Int(100_000)));
        roundtrip(&single("l", NbtTag::Long(i64::MAX)));
        roundtrip(&single("f", NbtTag::Float(3.125)));
        roundtrip(&single("d", NbtTag::Double(std::f64::consts::PI)));
        roundtrip(&single("str", NbtTag::string("日本語")));
    }

    #[test]
    fn arrays() {
        roundtrip(&single("b", NbtTag::ByteArray(vec![1, -2, 3])));
        roundtrip(&single("i", NbtTag::IntArray(vec![100, -200, 300])));
        roundtrip(&single("l", NbtTag::LongArray(vec![i64::MIN, 0, i64::MAX])));
    }

    #[test]
    fn lists() {
        roundtrip(&single(
            "list",
            NbtTag::List(vec![NbtTag::Int(1), NbtTag::Int(2)]),
        ));
        roundtrip(&single("empty", NbtTag::List(vec![])));
    }

    #[test]
    fn nested_registry_shape() {
        let mut element = NbtCompound::new();
        element.insert("natural", NbtTag::bool(true));
        element.insert("height", NbtTag::Int(256));

        let mut entry = NbtCompound::new();
        entry.insert("name", NbtTag::string("minecraft:overworld"));
        entry.insert("id", NbtTag::Int(0));
        entry.insert("element", NbtTag::Compound(element));

        let mut registry = NbtCompound::new();
        registry.insert("type", NbtTag::string("minecraft:dimension_type"));
        registry.insert("value", NbtTag::List(vec![NbtTag::Compound(entry)]));

        let mut root = NbtCompound::new();
        root.insert("minecraft:dimension_type", NbtTag::Compound(registry));
        roundtrip(&NbtRoot::unnamed(root));
    }

    #[test]
    fn mixed_list_is_rejected() {
        let root = single("bad", NbtTag::List(vec![NbtTag::Int(1), NbtTag::Byte(1)]));
        assert!(matches!(to_bytes(&root), Err(NbtError::MixedList { expected: 3, got: 1 })));
    }

    #[test]
    fn empty_buffer_error() {
        let data = Bytes::new();
        assert!(matches!(
            read_nbt(&mut data.clone()),
            Err(NbtError::UnexpectedEof { needed: 1, remaining: 0 })
        ));
    }

    #[test]
    fn wrong_root_type_error() {
        let data = Bytes::from_static(&[1]);
        assert!(matches!(
            read_nbt(&mut data.clone()),
            Err(NbtError::ExpectedCompound { got: 1 })
        ));
    }

    #[test]
    fn oversized_string_is_rejected() {
        let long = "x".repeat(u16::MAX as usize + 1);
        assert!(matches!(
            to_bytes(&single("s", NbtTag::String(long))),
            Err(NbtError::StringTooLong { len: 65536 })
        ));
    }

    #[test]
    fn encoding_is_deterministic() {
        let root: NbtCompound = (0..32).map(|i| (format!("k{i}"), NbtTag::Int(i))).collect();
        let root = NbtRoot::unnamed(root);
        assert_eq!(to_bytes(&root).unwrap(), to_bytes(&root.clone()).unwrap());
        let decoded = read_nbt(&mut to_bytes(&root).unwrap()).unwrap();
        assert_eq!(decoded.compound.iter().next().map(|(n, _)| n), Some("k0"));
    }

    #[test]
    fn truncated_long_array_error() {
        let bytes = to_bytes(&single("h", NbtTag::LongArray(vec![1, 2]))).unwrap();
        let mut truncated = bytes.slice(..bytes.len() - 5);
        assert!(read_nbt(&mut truncated).is_err());
    }
}
