//! JoinGame (0x24): Server → Client.
//!
//! The dimension codec and dimension are NBT compounds; they are carried here
//! already encoded so this crate does not depend on an NBT implementation.

use bytes::{BufMut, Bytes};

use super::id;
use crate::codec::{write_string, Packet, ProtoEncode};
use crate::types::VarInt;

#[derive(Debug, Clone, PartialEq)]
pub struct JoinGame {
    pub entity_id: i32,
    pub hardcore: bool,
    pub gamemode: u8,
    /// -1 when there is no previous gamemode.
    pub previous_gamemode: i8,
    pub world_names: Vec<String>,
    pub dimension_codec: Bytes,
    pub dimension: Bytes,
    pub world_name: String,
    pub hashed_seed: i64,
    pub max_players: i32,
    pub view_distance: i32,
    pub reduced_debug_info: bool,
    pub enable_respawn_screen: bool,
    pub is_debug: bool,
    pub is_flat: bool,
}

impl JoinGame {
    pub const OVERWORLD: &'static str = "minecraft:overworld";
    pub const GAMEMODE_CREATIVE: u8 = 1;

    /// Creative-mode join into a flat overworld.
    pub fn creative_overworld(
        entity_id: i32,
        max_players: i32,
        dimension_codec: Bytes,
        dimension: Bytes,
    ) -> Self {
        Self {
            entity_id,
            hardcore: false,
            gamemode: Self::GAMEMODE_CREATIVE,
            previous_gamemode: -1,
            world_names: vec![Self::OVERWORLD.to_string()],
            dimension_codec,
            dimension,
            world_name: Self::OVERWORLD.to_string(),
            hashed_seed: 0,
            max_players,
            view_distance: 12,
            reduced_debug_info: false,
            enable_respawn_screen: false,
            is_debug: false,
            is_flat: true,
        }
    }
}

impl Packet for JoinGame {
    const ID: i32 = id::clientbound::JOIN_GAME;
}

impl ProtoEncode for JoinGame {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.entity_id);
        buf.put_u8(self.hardcore as u8);
        buf.put_u8(self.gamemode);
        buf.put_i8(self.previous_gamemode);
        VarInt(self.world_names.len() as i32).proto_encode(buf);
        for name in &self.world_names {
            write_string(buf, name);
        }
        buf.put_slice(&self.dimension_codec);
        buf.put_slice(&self.dimension);
        write_string(buf, &self.world_name);
        buf.put_i64(self.hashed_seed);
        VarInt(self.max_players).proto_encode(buf);
        VarInt(self.view_distance).proto_encode(buf);
        buf.put_u8(self.reduced_debug_info as u8);
        buf.put_u8(self.enable_respawn_screen as u8);
        buf.put_u8(self.is_debug as u8);
        buf.put_u8(self.is_flat as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn layout_around_nbt_blobs() {
        let codec = Bytes::from_static(&[0x0A, 0x00, 0x00, 0x00]);
        let dim = Bytes::from_static(&[0x0A, 0x00, 0x00, 0x00]);
        let pkt = JoinGame::creative_overworld(2, 5, codec, dim);
        let mut buf = BytesMut::new();
        pkt.proto_encode(&mut buf);

        assert_eq!(&buf[..4], &[0, 0, 0, 2]);
        assert_eq!(&buf[4..7], &[0, 1, 0xFF]);
        assert_eq!(buf[7], 1);
        let name_len = JoinGame::OVERWORLD.len();
        assert_eq!(buf[8] as usize, name_len);
        assert_eq!(&buf[9..9 + name_len], JoinGame::OVERWORLD.as_bytes());
        let nbt_start = 9 + name_len;
        assert_eq!(&buf[nbt_start..nbt_start + 8], &[0x0A, 0, 0, 0, 0x0A, 0, 0, 0]);
        // max players, view distance, four flags
        assert_eq!(&buf[buf.len() - 6..], &[5, 12, 0, 0, 0, 1]);
    }
}
