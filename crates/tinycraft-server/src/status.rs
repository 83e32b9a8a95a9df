//! Server-list status document.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tinycraft_proto::framer::{packet_len, MAX_PACKET_SIZE};
use tinycraft_proto::packets::{
    ServerStatus, StatusDescription, StatusPlayers, StatusResponse, StatusSample, StatusVersion,
    GAME_VERSION, MAX_USERNAME_LEN, PROTOCOL_VERSION,
};
use tinycraft_proto::types::EntityUuid;
use tracing::warn;

use crate::config::ServerSection;
use crate::error::ConfigError;
use crate::registry::{PlayerId, MAX_PLAYERS};

const BUNDLED_FAVICON: &[u8] = include_bytes!("../assets/favicon.png");

/// Encode PNG bytes as a `data:` URI.
pub fn favicon_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Resolve the favicon once at startup: the configured file, or the
/// bundled icon.
///
/// A configured icon whose status response would not fit in one packet with
/// a full roster is replaced by the bundled icon.
pub fn load_favicon(server: &ServerSection) -> Result<String, ConfigError> {
    let Some(path) = server.favicon.as_deref() else {
        return Ok(favicon_data_uri(BUNDLED_FAVICON));
    };
    let png = std::fs::read(Path::new(path))?;
    let uri = favicon_data_uri(&png);
    match worst_case_status_len(server, &uri) {
        Some(len) if len <= MAX_PACKET_SIZE => Ok(uri),
        len => {
            warn!(
                path,
                status_len = ?len,
                max = MAX_PACKET_SIZE,
                "favicon too large for a status response, using the bundled icon"
            );
            Ok(favicon_data_uri(BUNDLED_FAVICON))
        }
    }
}

/// Encoded size of a status response with every slot filled by a
/// longest-possible name.
fn worst_case_status_len(server: &ServerSection, favicon: &str) -> Option<usize> {
    let name = "W".repeat(MAX_USERNAME_LEN);
    let roster: Vec<(PlayerId, String)> = (0..MAX_PLAYERS as PlayerId)
        .map(|id| (id, name.clone()))
        .collect();
    let status = build_status(server, Some(favicon), &roster);
    StatusResponse::from_status(&status)
        .ok()
        .map(|response| packet_len(&response))
}

/// Build the status document for the current roster.
pub fn build_status(
    server: &ServerSection,
    favicon: Option<&str>,
    roster: &[(PlayerId, String)],
) -> ServerStatus {
    ServerStatus {
        version: StatusVersion {
            name: GAME_VERSION.to_string(),
            protocol: PROTOCOL_VERSION,
        },
        players: StatusPlayers {
            max: MAX_PLAYERS as u32,
            online: roster.len() as u32,
            sample: roster
                .iter()
                .map(|(id, name)| StatusSample {
                    name: name.clone(),
                    id: EntityUuid(*id).to_string(),
                })
                .collect(),
        },
        description: StatusDescription {
            text: server.motd.clone(),
        },
        favicon: favicon.map(str::to_string),
    }
}
