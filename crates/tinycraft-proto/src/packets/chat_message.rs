//! ChatMessage (0x0E): Server → Client.

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use super::id;
use crate::codec::{read_string, read_u8, write_string, Packet, ProtoDecode, ProtoEncode};
use crate::error::ProtoError;
use crate::types::EntityUuid;

/// Where the client renders the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChatPosition {
    Chat = 0,
    System = 1,
}

impl ChatPosition {
    fn from_u8(v: u8) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::Chat),
            1 => Ok(Self::System),
            _ => Err(ProtoError::InvalidData(format!("unknown chat position: {v}"))),
        }
    }
}

/// JSON text component. `bold` is sent as the string `"false"`, which
/// vanilla clients accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatComponent {
    pub text: String,
    #[serde(default)]
    pub bold: String,
}

impl ChatComponent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: "false".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub component: ChatComponent,
    pub position: ChatPosition,
    pub sender: EntityUuid,
}

impl ChatMessage {
    /// A player chat line rendered as `<name> message`.
    pub fn from_player(name: &str, message: &str, sender: EntityUuid) -> Self {
        Self {
            component: ChatComponent::plain(format!("<{name}> {message}")),
            position: ChatPosition::Chat,
            sender,
        }
    }

    /// JSON body as it goes on the wire.
    pub fn json(&self) -> String {
        // Serializing a struct of two strings cannot fail.
        serde_json::to_string(&self.component).unwrap_or_default()
    }
}

impl Packet for ChatMessage {
    const ID: i32 = id::clientbound::CHAT_MESSAGE;
}

impl ProtoEncode for ChatMessage {
    fn proto_encode(&self, buf: &mut impl BufMut) {
        write_string(buf, &self.json());
        buf.put_u8(self.position as u8);
        self.sender.proto_encode(buf);
    }
}

impl ProtoDecode for ChatMessage {
    fn proto_decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let json = read_string(buf)?;
        let component =
            serde_json::from_str(&json).map_err(|e| ProtoError::Json(e.to_string()))?;
        let position = ChatPosition::from_u8(read_u8(buf)?)?;
        let sender = EntityUuid::proto_decode(buf)?;
        Ok(Self {
            component,
            position,
            sender,
        })
    }
}
