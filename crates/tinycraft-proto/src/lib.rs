//! Minecraft Java Edition (protocol 754) types, framing and packet definitions.

pub mod codec;
pub mod error;
pub mod framer;
pub mod packets;
pub mod state;
pub mod types;
