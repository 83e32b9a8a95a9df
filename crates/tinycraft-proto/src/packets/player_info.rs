//! PlayerInfo (0x32): Server → Client.
//!
//! Maintains the client's tab list. A player must be listed here before a
//! spawn-player packet for it is accepted.

use bytes::{Buf, BufMut};

use super::id;
use crate::codec::{
    read_bool, read_string, string_len, write_string, Packet, ProtoDecode, ProtoEncode,
};
use crate::error::ProtoError;
use crate::types::{EntityUuid, VarInt};

const ACTION_ADD_PLAYER: i32 = 0;
const ACTION_REMOVE_PLAYER: i32 = 4;

const GAMEMODE_CREATIVE: i32 = 1;
const DEFAULT_PING_MS: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfoEntry {
    pub uuid: EntityUuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerInfo {
    AddPlayers(Vec<PlayerInfoEntry>),
    RemovePlayers(Vec<EntityUuid>),
}

impl PlayerInfo {
    /// Length of an add-players packet (id included, length prefix excluded)
    /// listing players with the given names: `3 + 21·N + Σ len`.
    ///
    /// Holds while the entry count and every name are shorter than 128 bytes.
    pub fn add_players_len<'a>(names: impl IntoIterator<Item = &'a str>) -> usize {
        names.into_iter().fold(3, |acc, name| acc + 21 + name.len())
    }

    /// Exact encoded length of this packet, id included.
    pub fn encoded_len(&self) -> usize {
        let body = match self {
            Self::AddPlayers(entries) => {
                VarInt(entries.len() as i32).encoded_len()
                    + entries
                        .iter()
                        .map(|e| EntityUuid::LEN + string_len(&e.name) + 4)
                        .sum::<usize>()
            }
            Self::RemovePlayers(uuids) => {
                VarInt(uuids.len() as i32).encoded_len() + uuids.len() * EntityUuid::LEN
            }
        };
        VarInt(id::clientbound::PLAYER_INFO).encoded_len() + 1 + body
    }
}

impl Packet for PlayerInfo {
    const ID: i32 = id::clientbound::PLAYER_INFO;
}

impl ProtoEncode for PlayerInfo {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        match self {
            Self::AddPlayers(entries) => {
                VarInt(ACTION_ADD_PLAYER).proto_encode(buf);
                VarInt(entries.len() as i32).proto_encode(buf);
                for entry in entries {
                    entry.uuid.proto_encode(buf);
                    write_string(buf, &entry.name);
                    VarInt(0).proto_encode(buf); // no properties
                    VarInt(GAMEMODE_CREATIVE).proto_encode(buf);
                    VarInt(DEFAULT_PING_MS).proto_encode(buf);
                    buf.put_u8(0); // no display name
                }
            }
            Self::RemovePlayers(uuids) => {
                VarInt(ACTION_REMOVE_PLAYER).proto_encode(buf);
                VarInt(uuids.len() as i32).proto_encode(buf);
                for uuid in uuids {
                    uuid.proto_encode(buf);
                }
            }
        }
    }
}

impl ProtoDecode for PlayerInfo {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let action = VarInt::proto_decode(buf)?.0;
        let count = VarInt::proto_decode(buf)?.0;
        if count < 0 {
            return Err(ProtoError::InvalidData(format!(
                "negative player count: {count}"
            )));
        }
        match action {
            ACTION_ADD_PLAYER => {
                let mut entries = Vec::new();
                for _ in 0..count {
                    let uuid = EntityUuid::proto_decode(buf)?;
                    let name = read_string(buf)?;
                    let properties = VarInt::proto_decode(buf)?.0;
                    if properties != 0 {
                        return Err(ProtoError::InvalidData(
                            "player properties are not supported".into(),
                        ));
                    }
                    let _gamemode = VarInt::proto_decode(buf)?;
                    let _ping = VarInt::proto_decode(buf)?;
                    let _has_display_name = read_bool(buf)?;
                    entries.push(PlayerInfoEntry { uuid, name });
                }
                Ok(Self::AddPlayers(entries))
            }
            ACTION_REMOVE_PLAYER => {
                let mut uuids = Vec::new();
                for _ in 0..count {
                    uuids.push(EntityUuid::proto_decode(buf)?);
                }
                Ok(Self::RemovePlayers(uuids))
            }
            other => Err(ProtoError::InvalidData(format!(
                "unsupported player info action: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framer::{encode_frame, packet_len};

    fn entries(names: &[&str]) -> Vec<PlayerInfoEntry> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| PlayerInfoEntry {
                uuid: EntityUuid(i as u8),
                name: (*name).to_string(),
            })
            .collect()
    }

    #[test]
    fn add_players_length_formula() {
        for names in [
            &[][..],
            &["Steve"][..],
            &["Steve", "Alex", "Notch_1234567890"][..],
            &["a", "bb", "ccc", "dddd", "eeeee"][..],
        ] {
            let pkt = PlayerInfo::AddPlayers(entries(names));
            let expected = PlayerInfo::add_players_len(names.iter().copied());
            assert_eq!(packet_len(&pkt), expected);
            assert_eq!(pkt.encoded_len(), expected);
        }
    }

    #[test]
    fn frame_prefix_matches_formula() {
        let pkt = PlayerInfo::AddPlayers(entries(&["Steve", "Alex"]));
        let frame = encode_frame(&pkt).unwrap();
        assert_eq!(frame[0] as usize, 3 + 21 * 2 + 5 + 4);
        assert_eq!(frame[1], 0x32);
    }

    #[test]
    fn remove_roundtrip() {
        let pkt = PlayerInfo::RemovePlayers(vec![EntityUuid(2)]);
        let mut buf = bytes::BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(buf.len() + 1, pkt.encoded_len());
        assert_eq!(PlayerInfo::proto_decode(&mut buf.freeze()).unwrap(), pkt);
    }

    #[test]
    fn add_roundtrip() {
        let pkt = PlayerInfo::AddPlayers(entries(&["Steve", "Alex"]));
        let mut buf = bytes::BytesMut::new();
        pkt.proto_encode(&mut buf);
        assert_eq!(PlayerInfo::proto_decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
