use super::*;

use tinycraft_proto::packets::{
    JoinGame, LoginPacket, LoginSuccess, PlayerPositionAndLook, ServerDifficulty,
};
use tinycraft_proto::types::EntityUuid;
use tinycraft_world::SPAWN_POSITION;

use crate::registry::{PlayerSnapshot, MAX_PLAYERS};

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Offline-mode login. Returns the username the client asked for.
    pub(super) async fn login(&mut self) -> Result<String, ConnectionError> {
        let (packet_id, mut payload) = self.reader.read_frame().await?;
        let LoginPacket::Start(start) = LoginPacket::from_frame(packet_id, &mut payload)?;

        self.send(&LoginSuccess {
            uuid: EntityUuid(self.id),
            username: start.username.clone(),
        })
        .await?;
        self.advance(Event::LoginStarted)?;
        Ok(start.username)
    }

    /// Send the join burst, then register with the registry so other players
    /// start seeing this one.
    pub(super) async fn enter_play(&self, username: &str) -> Result<(), ConnectionError> {
        let world = &self.ctx.world;
        self.send(&JoinGame::creative_overworld(
            self.id as i32,
            MAX_PLAYERS as i32,
            world.dimension_codec.clone(),
            world.dimension.clone(),
        ))
        .await?;
        self.send(&PlayerPositionAndLook::spawn(SPAWN_POSITION)).await?;
        self.send(&ServerDifficulty::PEACEFUL_LOCKED).await?;
        for frame in &world.chunk_frames {
            self.writer.send(frame).await?;
        }

        let outbound = self.spawn_pump();
        self.ctx
            .registry
            .join(
                self.id,
                username.to_string(),
                outbound,
                PlayerSnapshot::at(SPAWN_POSITION),
            )
            .await
    }
}
