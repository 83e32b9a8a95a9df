//! Status state packets: request / response (0x00) and ping / pong (0x01).

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use super::id;
use crate::codec::{read_i64, read_string, write_string, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;

/// Status request (0x00): Client → Server. Empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRequest;

impl Packet for StatusRequest {
    const ID: i32 = id::serverbound::STATUS_REQUEST;
}

impl ProtoEncode for StatusRequest {
    fn proto_encode(&self, _buf: &mut impl BufMut) {}
}

/// Ping (0x01): Client → Server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingRequest {
    pub payload: i64,
}

impl Packet for PingRequest {
    const ID: i32 = id::serverbound::PING;
}

impl ProtoEncode for PingRequest {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i64(self.payload);
    }
}

impl ProtoDecode for PingRequest {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            payload: read_i64(buf)?,
        })
    }
}

/// Inbound packets of the Status state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPacket {
    Request,
    Ping(PingRequest),
}

impl StatusPacket {
    pub fn from_frame(packet_id: i32, payload: &mut impl Buf) -> Result<Self, ProtoError> {
        match packet_id {
            id::serverbound::STATUS_REQUEST => Ok(Self::Request),
            id::serverbound::PING => Ok(Self::Ping(PingRequest::proto_decode(payload)?)),
            got => Err(ProtoError::UnexpectedPacket {
                state: "status",
                expected: id::serverbound::STATUS_REQUEST,
                got,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Status JSON document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub version: StatusVersion,
    pub players: StatusPlayers,
    pub description: StatusDescription,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusVersion {
    pub name: String,
    pub protocol: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPlayers {
    pub max: u32,
    pub online: u32,
    #[serde(default)]
    pub sample: Vec<StatusSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSample {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDescription {
    pub text: String,
}

/// Status response (0x00): Server → Client. One JSON string field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResponse {
    pub json: String,
}

impl StatusResponse {
    pub fn from_status(status: &ServerStatus) -> Result<Self, ProtoError> {
        let json = serde_json::to_string(status).map_err(|e| ProtoError::Json(e.to_string()))?;
        Ok(Self { json })
    }

    pub fn status(&self) -> Result<ServerStatus, ProtoError> {
        serde_json::from_str(&self.json).map_err(|e| ProtoError::Json(e.to_string()))
    }
}

impl Packet for StatusResponse {
    const ID: i32 = id::clientbound::STATUS_RESPONSE;
}

impl ProtoEncode for StatusResponse {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.json);
    }
}

impl ProtoDecode for StatusResponse {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            json: read_string(buf)?,
        })
    }
}

/// Pong (0x01): Server → Client. Echoes the ping payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong {
    pub payload: i64,
}

impl Packet for Pong {
    const ID: i32 = id::clientbound::PONG;
}

impl ProtoEncode for Pong {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        buf.put_i64(self.payload);
    }
}

impl ProtoDecode for Pong {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            payload: read_i64(buf)?,
        })
    }
}
