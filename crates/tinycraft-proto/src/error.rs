//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("buffer too short: need {needed} more bytes, have {remaining}")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("VarInt encoding error: {0}")]
    VarInt(#[from] crate::types::VarIntError),

    #[error("protocol version mismatch: expected {expected}, got {got}")]
    ProtocolVersionMismatch { expected: i32, got: i32 },

    #[error("unexpected packet id 0x{got:02X} in {state} state (expected 0x{expected:02X})")]
    UnexpectedPacket {
        state: &'static str,
        expected: i32,
        got: i32,
    },

    #[error("invalid username length: {len} bytes (must be 1..={max})")]
    InvalidUsername { len: usize, max: usize },

    #[error("invalid next state: {0}")]
    InvalidNextState(i32),

    #[error("invalid transition from {from} on {event}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },

    #[error("packet too large: {size} bytes exceeds buffer capacity of {max}")]
    PacketTooLarge { size: usize, max: usize },

    #[error("frame too large: {size} bytes exceeds limit of {max}")]
    FrameTooLarge { size: usize, max: usize },

    #[error("invalid frame length: {0}")]
    InvalidFrameLength(i32),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
