//! NBT value model.

use std::ops::Index;

/// Compound tag. Entries keep insertion order, so the same compound always
/// encodes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NbtCompound {
    entries: Vec<(String, NbtTag)>,
}

impl NbtCompound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing (in place) and returning any previous value.
    pub fn insert(&mut self, name: impl Into<String>, tag: NbtTag) -> Option<NbtTag> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, tag)),
            None => {
                self.entries.push((name, tag));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&NbtTag> {
        self.entries
            .iter()
            .find_map(|(n, tag)| (n == name).then_some(tag))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NbtTag)> {
        self.entries.iter().map(|(n, tag)| (n.as_str(), tag))
    }
}

impl Index<&str> for NbtCompound {
    type Output = NbtTag;

    /// Panics when `name` is absent, like `HashMap`'s index.
    fn index(&self, name: &str) -> &NbtTag {
        match self.get(name) {
            Some(tag) => tag,
            None => panic!("no NBT entry named {name:?}"),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, NbtTag)> for NbtCompound {
    fn from_iter<I: IntoIterator<Item = (K, NbtTag)>>(iter: I) -> Self {
        let mut compound = Self::new();
        for (name, tag) in iter {
            compound.insert(name, tag);
        }
        compound
    }
}

/// The root of an NBT blob. The 1.16 network format still writes the root
/// name; everything this server sends leaves it empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NbtRoot {
    pub name: String,
    pub compound: NbtCompound,
}

impl NbtRoot {
    pub fn new(name: impl Into<String>, compound: NbtCompound) -> Self {
        Self {
            name: name.into(),
            compound,
        }
    }

    pub fn unnamed(compound: NbtCompound) -> Self {
        Self::new("", compound)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NbtTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<NbtTag>),
    Compound(NbtCompound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl NbtTag {
    /// Wire type id, 1 through 12. TAG_End has no value form.
    pub fn tag_type_id(&self) -> u8 {
        match self {
            NbtTag::Byte(_) => 1,
            NbtTag::Short(_) => 2,
            NbtTag::Int(_) => 3,
            NbtTag::Long(_) => 4,
            NbtTag::Float(_) => 5,
            NbtTag::Double(_) => 6,
            NbtTag::ByteArray(_) => 7,
            NbtTag::String(_) => 8,
            NbtTag::List(_) => 9,
            NbtTag::Compound(_) => 10,
            NbtTag::IntArray(_) => 11,
            NbtTag::LongArray(_) => 12,
        }
    }

    /// Registry flags such as `natural` are bytes holding 0 or 1.
    pub fn bool(v: bool) -> Self {
        NbtTag::Byte(v as i8)
    }

    pub fn string(v: impl Into<String>) -> Self {
        NbtTag::String(v.into())
    }

    pub fn as_byte(&self) -> Option<i8> {
        if let NbtTag::Byte(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        if let NbtTag::Int(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let NbtTag::String(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_compound(&self) -> Option<&NbtCompound> {
        if let NbtTag::Compound(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[NbtTag]> {
        if let NbtTag::List(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        if let NbtTag::LongArray(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_keeps_insertion_order() {
        let mut c = NbtCompound::new();
        c.insert("zeta", NbtTag::Int(1));
        c.insert("alpha", NbtTag::Int(2));
        c.insert("mid", NbtTag::Int(3));
        let names: Vec<&str> = c.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut c: NbtCompound = [("a", NbtTag::Int(1)), ("b", NbtTag::Int(2))]
            .into_iter()
            .collect();
        assert_eq!(c.insert("a", NbtTag::Int(9)), Some(NbtTag::Int(1)));
        assert_eq!(c.len(), 2);
        assert_eq!(c.iter().next(), Some(("a", &NbtTag::Int(9))));
        assert_eq!(c["b"].as_int(), Some(2));
        assert!(c.get("missing").is_none());
    }

    #[test]
    fn wire_type_ids() {
        assert_eq!(NbtTag::Byte(0).tag_type_id(), 1);
        assert_eq!(NbtTag::String(String::new()).tag_type_id(), 8);
        assert_eq!(NbtTag::List(vec![]).tag_type_id(), 9);
        assert_eq!(NbtTag::Compound(NbtCompound::new()).tag_type_id(), 10);
        assert_eq!(NbtTag::LongArray(vec![]).tag_type_id(), 12);
    }

    #[test]
    fn helpers_and_accessors() {
        assert_eq!(NbtTag::bool(true), NbtTag::Byte(1));
        assert_eq!(NbtTag::bool(false).as_byte(), Some(0));
        assert_eq!(NbtTag::string("hello").as_string(), Some("hello"));
        assert_eq!(NbtTag::Int(5).as_string(), None);
        assert_eq!(NbtTag::LongArray(vec![1]).as_long_array(), Some(&[1i64][..]));
    }
}
