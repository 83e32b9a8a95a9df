//! NBT error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NbtError {
    #[error("NBT truncated: needed {needed} more bytes, {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("root tag must be TAG_Compound (10), got {got}")]
    ExpectedCompound { got: u8 },

    #[error("unknown tag type: {0}")]
    UnknownTagType(u8),

    #[error("NBT string is not valid UTF-8")]
    InvalidUtf8,

    #[error("NBT string of {len} bytes does not fit a u16 length")]
    StringTooLong { len: usize },

    #[error("compounds nested deeper than {limit}")]
    NestingTooDeep { limit: usize },

    #[error("negative length prefix: {0}")]
    NegativeLength(i32),

    #[error("list of tag type {expected} contains a tag of type {got}")]
    MixedList { expected: u8, got: u8 },
}
