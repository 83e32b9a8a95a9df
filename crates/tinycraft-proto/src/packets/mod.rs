//! Packet definitions for Java Edition protocol 754.
//!
//! Each connection state has its own id space. Clientbound packets implement
//! [`Packet`](crate::codec::Packet); inbound packets are decoded into one closed
//! enum per state.

pub mod chat_message;
pub mod chunk_data;
pub mod entity_animation;
pub mod entity_destroy;
pub mod entity_head_look;
pub mod entity_metadata;
pub mod entity_rotation;
pub mod entity_teleport;
pub mod handshake;
pub mod join_game;
pub mod keep_alive;
pub mod login;
pub mod play;
pub mod player_info;
pub mod player_position_look;
pub mod server_difficulty;
pub mod spawn_player;
pub mod status;

pub use chat_message::{ChatComponent, ChatMessage, ChatPosition};
pub use chunk_data::ChunkData;
pub use entity_animation::EntityAnimation;
pub use entity_destroy::EntityDestroy;
pub use entity_head_look::EntityHeadLook;
pub use entity_metadata::{EntityMetadata, Pose};
pub use entity_rotation::EntityRotation;
pub use entity_teleport::EntityTeleport;
pub use handshake::Handshake;
pub use join_game::JoinGame;
pub use keep_alive::KeepAlive;
pub use login::{LoginPacket, LoginStart, LoginSuccess, MAX_USERNAME_LEN};
pub use play::ServerboundPlay;
pub use player_info::{PlayerInfo, PlayerInfoEntry};
pub use player_position_look::PlayerPositionAndLook;
pub use server_difficulty::ServerDifficulty;
pub use spawn_player::SpawnPlayer;
pub use status::{
    PingRequest, Pong, ServerStatus, StatusDescription, StatusPacket, StatusPlayers,
    StatusRequest, StatusResponse, StatusSample, StatusVersion,
};

use crate::error::ProtoError;

/// Protocol version spoken by this server.
pub const PROTOCOL_VERSION: i32 = 754;

/// Game version string matching [`PROTOCOL_VERSION`].
pub const GAME_VERSION: &str = "1.16.5";

/// Packet IDs, grouped by direction.
pub mod id {
    /// Server → Client.
    pub mod clientbound {
        pub const STATUS_RESPONSE: i32 = 0x00;
        pub const PONG: i32 = 0x01;
        pub const LOGIN_SUCCESS: i32 = 0x02;
        pub const SPAWN_PLAYER: i32 = 0x04;
        pub const ENTITY_ANIMATION: i32 = 0x05;
        pub const SERVER_DIFFICULTY: i32 = 0x0D;
        pub const CHAT_MESSAGE: i32 = 0x0E;
        pub const KEEP_ALIVE: i32 = 0x1F;
        pub const CHUNK_DATA: i32 = 0x20;
        pub const JOIN_GAME: i32 = 0x24;
        pub const ENTITY_ROTATION: i32 = 0x29;
        pub const PLAYER_INFO: i32 = 0x32;
        pub const PLAYER_POSITION_AND_LOOK: i32 = 0x34;
        pub const ENTITY_DESTROY: i32 = 0x36;
        pub const ENTITY_HEAD_LOOK: i32 = 0x3A;
        pub const ENTITY_METADATA: i32 = 0x44;
        pub const ENTITY_TELEPORT: i32 = 0x56;
    }

    /// Client → Server.
    pub mod serverbound {
        pub const HANDSHAKE: i32 = 0x00;
        pub const STATUS_REQUEST: i32 = 0x00;
        pub const PING: i32 = 0x01;
        pub const LOGIN_START: i32 = 0x00;
        pub const TELEPORT_CONFIRM: i32 = 0x00;
        pub const CHAT_MESSAGE: i32 = 0x03;
        pub const KEEP_ALIVE: i32 = 0x10;
        pub const PLAYER_POSITION: i32 = 0x12;
        pub const PLAYER_POSITION_AND_ROTATION: i32 = 0x13;
        pub const PLAYER_ROTATION: i32 = 0x14;
        pub const ENTITY_ACTION: i32 = 0x1C;
        pub const ANIMATION: i32 = 0x2C;
    }
}

/// Fail with `UnexpectedPacket` unless `got == expected`.
pub fn expect_packet_id(state: &'static str, expected: i32, got: i32) -> Result<(), ProtoError> {
    if got != expected {
        return Err(ProtoError::UnexpectedPacket {
            state,
            expected,
            got,
        });
    }
    Ok(())
}
