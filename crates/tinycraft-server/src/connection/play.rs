use super::*;

use tinycraft_proto::packets::ServerboundPlay;
use tinycraft_proto::types::{Angle, Vec3d};
use tinycraft_world::SPAWN_POSITION;
use tracing::trace;

use crate::registry::PlayerSnapshot;

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    /// Read Play frames until the peer goes away. Position and orientation
    /// live here; the registry only ever sees copies.
    pub(super) async fn play(&mut self, username: &str) -> Result<(), ConnectionError> {
        let mut snapshot = PlayerSnapshot::at(SPAWN_POSITION);
        let registry = self.ctx.registry.clone();

        loop {
            let (packet_id, mut payload) = self.reader.read_frame().await?;
            match ServerboundPlay::from_frame(packet_id, &mut payload)? {
                ServerboundPlay::TeleportConfirm { teleport_id } => {
                    debug!(slot = self.id, player = %username, teleport_id, "teleport confirmed");
                }
                ServerboundPlay::ChatMessage { message } => {
                    registry.chat(self.id, message).await?;
                }
                ServerboundPlay::KeepAlive { id } => {
                    trace!(slot = self.id, id, "keep-alive answered");
                }
                ServerboundPlay::PlayerPosition { x, y, z, on_ground } => {
                    if !self.move_to(&mut snapshot, Vec3d::new(x, y, z)) {
                        continue;
                    }
                    snapshot.on_ground = on_ground;
                    registry.moved(self.id, snapshot).await?;
                }
                ServerboundPlay::PlayerPositionAndRotation {
                    x,
                    y,
                    z,
                    yaw,
                    pitch,
                    on_ground,
                } => {
                    if !self.move_to(&mut snapshot, Vec3d::new(x, y, z)) {
                        continue;
                    }
                    snapshot.yaw = Angle::from_degrees(yaw);
                    snapshot.pitch = Angle::from_degrees(pitch);
                    snapshot.on_ground = on_ground;
                    registry.moved(self.id, snapshot).await?;
                }
                ServerboundPlay::PlayerRotation {
                    yaw,
                    pitch,
                    on_ground,
                } => {
                    snapshot.yaw = Angle::from_degrees(yaw);
                    snapshot.pitch = Angle::from_degrees(pitch);
                    snapshot.on_ground = on_ground;
                    registry.rotated(self.id, snapshot).await?;
                }
                ServerboundPlay::EntityAction { action, .. } => {
                    registry.entity_action(self.id, action).await?;
                }
                ServerboundPlay::Animation { hand } => {
                    registry.animation(self.id, hand).await?;
                }
                ServerboundPlay::Unknown { id, len } => {
                    trace!(slot = self.id, packet_id = id, len, "ignoring play packet");
                }
            }
        }
    }

    /// Apply a reported position. Non-finite coordinates are dropped.
    fn move_to(&self, snapshot: &mut PlayerSnapshot, position: Vec3d) -> bool {
        if !position.is_finite() {
            warn!(slot = self.id, %position, "ignoring non-finite position");
            return false;
        }
        snapshot.position = position;
        true
    }
}
