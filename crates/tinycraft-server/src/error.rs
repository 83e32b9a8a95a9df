//! Server-side error types.

use thiserror::Error;
use tinycraft_nbt::NbtError;
use tinycraft_proto::error::ProtoError;

/// Why a connection task stopped.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Proto(#[from] ProtoError),

    #[error("connection closed by peer")]
    Closed,

    #[error("player registry is not running")]
    RegistryClosed,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid bind address {0}")]
    BadAddress(String),
}

/// Failure while precomputing the static world payloads.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("NBT encode error: {0}")]
    Nbt(#[from] NbtError),

    #[error("packet encode error: {0}")]
    Proto(#[from] ProtoError),
}
