use super::*;

use tinycraft_proto::error::ProtoError;
use tinycraft_proto::packets::id::serverbound;
use tinycraft_proto::packets::{Pong, StatusPacket, StatusResponse};

use crate::status::build_status;

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Answer one status request and one ping, then close.
    pub(super) async fn serve_status(&mut self) -> Result<(), ConnectionError> {
        let (packet_id, mut payload) = self.reader.read_frame().await?;
        match StatusPacket::from_frame(packet_id, &mut payload)? {
            StatusPacket::Request => {}
            StatusPacket::Ping(ping) => {
                // Some clients ping without asking for the status first.
                self.send(&Pong { payload: ping.payload }).await?;
                return self.advance(Event::PingAnswered);
            }
        }

        let delay = self.ctx.config.network.status_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let roster = self.ctx.registry.roster().await?;
        let status = build_status(
            &self.ctx.config.server,
            self.ctx.favicon.as_deref(),
            &roster,
        );
        self.send(&StatusResponse::from_status(&status)?).await?;
        debug!(slot = self.id, online = roster.len(), "status sent");

        let (packet_id, mut payload) = self.reader.read_frame().await?;
        match StatusPacket::from_frame(packet_id, &mut payload)? {
            StatusPacket::Ping(ping) => {
                self.send(&Pong { payload: ping.payload }).await?;
                self.advance(Event::PingAnswered)
            }
            StatusPacket::Request => Err(ProtoError::UnexpectedPacket {
                state: "status",
                expected: serverbound::PING,
                got: packet_id,
            }
            .into()),
        }
    }
}
