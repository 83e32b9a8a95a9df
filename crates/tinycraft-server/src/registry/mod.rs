//! Player registry actor.
//!
//! The registry task is the only owner of the slot table. Connection tasks
//! talk to it through a [`RegistryHandle`] and receive their outbound frames
//! on a per-player queue. Every broadcast is computed here, in slot order.

pub mod fanout;

use std::time::Duration;

use bytes::Bytes;
use tinycraft_proto::codec::Packet;
use tinycraft_proto::framer::encode_frame;
use tinycraft_proto::packets::play::entity_action;
use tinycraft_proto::packets::{
    ChatComponent, ChatMessage, ChatPosition, EntityAnimation, EntityDestroy, EntityHeadLook,
    EntityMetadata, EntityRotation, EntityTeleport, KeepAlive, PlayerInfo, PlayerInfoEntry, Pose,
    SpawnPlayer,
};
use tinycraft_proto::types::{Angle, EntityUuid, Vec3d};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use self::fanout::Audience;
use crate::error::ConnectionError;

/// Fixed number of player slots.
pub const MAX_PLAYERS: usize = 5;

/// Slot index. Doubles as entity id and surrogate UUID byte.
pub type PlayerId = u8;

/// Name used for server-originated chat lines.
const SERVER_NAME: &str = "Server";

/// Chat text answered privately instead of broadcast.
const STATS_COMMAND: &str = "/stats";

const COMMAND_QUEUE: usize = 256;

/// Position and orientation as last reported by a connection task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec3d,
    pub yaw: Angle,
    pub pitch: Angle,
    pub on_ground: bool,
}

impl PlayerSnapshot {
    pub fn at(position: Vec3d) -> Self {
        Self {
            position,
            yaw: Angle::default(),
            pitch: Angle::default(),
            on_ground: true,
        }
    }
}

/// Survival stats carried per player. Nothing changes them yet.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Vitals {
    health: f32,
    food: u8,
    saturation: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: 20.0,
            food: 20,
            saturation: 5.0,
        }
    }
}

struct Player {
    username: String,
    outbound: mpsc::Sender<Bytes>,
    snapshot: PlayerSnapshot,
    vitals: Vitals,
}

enum Slot {
    Free,
    Reserved,
    Connected(Player),
}

/// Messages accepted by the registry task.
#[derive(Debug)]
pub enum RegistryCommand {
    /// Claim the first free slot for a freshly accepted socket.
    Reserve {
        reply: oneshot::Sender<Option<PlayerId>>,
    },
    /// The join burst has been sent; the player becomes visible.
    Join {
        id: PlayerId,
        username: String,
        outbound: mpsc::Sender<Bytes>,
        snapshot: PlayerSnapshot,
    },
    Moved {
        id: PlayerId,
        snapshot: PlayerSnapshot,
    },
    Rotated {
        id: PlayerId,
        snapshot: PlayerSnapshot,
    },
    Chat {
        id: PlayerId,
        message: String,
    },
    Animation {
        id: PlayerId,
        hand: i32,
    },
    EntityAction {
        id: PlayerId,
        action: i32,
    },
    /// The connection task is gone. Frees the slot.
    Leave {
        id: PlayerId,
    },
    /// Connected players in slot order.
    Roster {
        reply: oneshot::Sender<Vec<(PlayerId, String)>>,
    },
}

/// Cloneable sender side of the registry.
#[derive(Clone)]
pub struct RegistryHandle {
    command_tx: mpsc::Sender<RegistryCommand>,
}

impl RegistryHandle {
    async fn send(&self, command: RegistryCommand) -> Result<(), ConnectionError> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| ConnectionError::RegistryClosed)
    }

    /// Reserve a slot, or `None` when the server is full.
    pub async fn reserve(&self) -> Result<Option<PlayerId>, ConnectionError> {
        let (reply, rx) = oneshot::channel();
        self.send(RegistryCommand::Reserve { reply }).await?;
        rx.await.map_err(|_| ConnectionError::RegistryClosed)
    }

    pub async fn join(
        &self,
        id: PlayerId,
        username: String,
        outbound: mpsc::Sender<Bytes>,
        snapshot: PlayerSnapshot,
    ) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::Join {
            id,
            username,
            outbound,
            snapshot,
        })
        .await
    }

    pub async fn moved(&self, id: PlayerId, snapshot: PlayerSnapshot) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::Moved { id, snapshot }).await
    }

    pub async fn rotated(
        &self,
        id: PlayerId,
        snapshot: PlayerSnapshot,
    ) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::Rotated { id, snapshot }).await
    }

    pub async fn chat(&self, id: PlayerId, message: String) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::Chat { id, message }).await
    }

    pub async fn animation(&self, id: PlayerId, hand: i32) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::Animation { id, hand }).await
    }

    pub async fn entity_action(&self, id: PlayerId, action: i32) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::EntityAction { id, action }).await
    }

    pub async fn leave(&self, id: PlayerId) -> Result<(), ConnectionError> {
        self.send(RegistryCommand::Leave { id }).await
    }

    pub async fn roster(&self) -> Result<Vec<(PlayerId, String)>, ConnectionError> {
        let (reply, rx) = oneshot::channel();
        self.send(RegistryCommand::Roster { reply }).await?;
        rx.await.map_err(|_| ConnectionError::RegistryClosed)
    }
}

/// The slot table plus the world clock.
pub struct Registry {
    slots: Vec<Slot>,
    started: Instant,
    last_sweep: Instant,
    tick: u64,
    keep_alive_interval: Duration,
}

impl Registry {
    pub fn new(keep_alive_interval: Duration) -> Self {
        Self {
            slots: (0..MAX_PLAYERS).map(|_| Slot::Free).collect(),
            started: Instant::now(),
            last_sweep: Instant::now(),
            tick: 0,
            keep_alive_interval,
        }
    }

    /// Start the registry task and return a handle to it.
    pub fn spawn(
        self,
        shutdown: watch::Receiver<bool>,
    ) -> (RegistryHandle, tokio::task::JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
        let task = tokio::spawn(self.run(command_rx, shutdown));
        (RegistryHandle { command_tx }, task)
    }

    /// Process commands and keep-alive sweeps until shutdown or until every
    /// handle is dropped.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<RegistryCommand>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let period = self.keep_alive_interval;
        let mut keep_alive = interval_at(Instant::now() + period, period);
        keep_alive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                _ = keep_alive.tick() => self.sweep(),
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("registry stopped");
    }

    fn handle(&mut self, command: RegistryCommand) {
        match command {
            RegistryCommand::Reserve { reply } => {
                let _ = reply.send(self.reserve());
            }
            RegistryCommand::Join {
                id,
                username,
                outbound,
                snapshot,
            } => self.join(id, username, outbound, snapshot),
            RegistryCommand::Moved { id, snapshot } => self.moved(id, snapshot),
            RegistryCommand::Rotated { id, snapshot } => self.rotated(id, snapshot),
            RegistryCommand::Chat { id, message } => self.chat(id, &message),
            RegistryCommand::Animation { id, hand } => self.animation(id, hand),
            RegistryCommand::EntityAction { id, action } => self.entity_action(id, action),
            RegistryCommand::Leave { id } => self.leave(id),
            RegistryCommand::Roster { reply } => {
                let _ = reply.send(self.roster());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Slot bookkeeping
    // -----------------------------------------------------------------------

    fn connected_flags(&self) -> Vec<bool> {
        self.slots
            .iter()
            .map(|s| matches!(s, Slot::Connected(_)))
            .collect()
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        match self.slots.get(id as usize)? {
            Slot::Connected(player) => Some(player),
            _ => None,
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        match self.slots.get_mut(id as usize)? {
            Slot::Connected(player) => Some(player),
            _ => None,
        }
    }

    fn online(&self) -> usize {
        self.connected_flags().iter().filter(|&&c| c).count()
    }

    fn roster(&self) -> Vec<(PlayerId, String)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| match slot {
                Slot::Connected(p) => Some((id as PlayerId, p.username.clone())),
                _ => None,
            })
            .collect()
    }

    fn reserve(&mut self) -> Option<PlayerId> {
        let id = self.slots.iter().position(|s| matches!(s, Slot::Free))?;
        self.slots[id] = Slot::Reserved;
        debug!(slot = id, "slot reserved");
        Some(id as PlayerId)
    }

    // -----------------------------------------------------------------------
    // Delivery
    // -----------------------------------------------------------------------

    /// Queue an already framed packet for one player. A full or closed queue
    /// drops the frame for that player only.
    fn deliver(&self, to: PlayerId, frame: &Bytes) {
        let Some(player) = self.player(to) else {
            return;
        };
        if let Err(e) = player.outbound.try_send(frame.clone()) {
            warn!(slot = to, player = %player.username, "dropping outbound frame: {e}");
        }
    }

    fn broadcast<P: Packet>(&self, audience: Audience, packet: &P) {
        let frame = match encode_frame(packet) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(packet_id = P::ID, "failed to encode broadcast: {e}");
                return;
            }
        };
        for to in fanout::recipients(&self.connected_flags(), audience) {
            self.deliver(to, &frame);
        }
    }

    fn server_chat(&self, audience: Audience, text: String, subject: PlayerId) {
        let msg = ChatMessage::from_player(SERVER_NAME, &text, EntityUuid(subject));
        self.broadcast(audience, &msg);
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    fn join(
        &mut self,
        id: PlayerId,
        username: String,
        outbound: mpsc::Sender<Bytes>,
        snapshot: PlayerSnapshot,
    ) {
        match self.slots.get(id as usize) {
            Some(Slot::Reserved) => {}
            _ => {
                warn!(slot = id, "join for a slot that was not reserved");
                return;
            }
        }
        self.slots[id as usize] = Slot::Connected(Player {
            username: username.clone(),
            outbound,
            snapshot,
            vitals: Vitals::default(),
        });
        info!(slot = id, player = %username, online = self.online(), "player joined");

        self.broadcast_tab_list();
        self.server_chat(Audience::All, format!("{username} joined the server"), id);
        self.broadcast_spawns();
    }

    /// Full tab list to every connected player.
    fn broadcast_tab_list(&self) {
        let entries: Vec<PlayerInfoEntry> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| match slot {
                Slot::Connected(p) => Some(PlayerInfoEntry {
                    uuid: EntityUuid(id as PlayerId),
                    name: p.username.clone(),
                }),
                _ => None,
            })
            .collect();
        let expected = PlayerInfo::add_players_len(entries.iter().map(|e| e.name.as_str()));
        let packet = PlayerInfo::AddPlayers(entries);
        if packet.encoded_len() != expected {
            warn!(
                expected,
                actual = packet.encoded_len(),
                "tab list size differs from the precomputed length"
            );
        }
        self.broadcast(Audience::All, &packet);
    }

    /// Every connected player learns about every other one.
    fn broadcast_spawns(&self) {
        for (receiver, subject) in fanout::spawn_pairs(&self.connected_flags()) {
            let Some(player) = self.player(subject) else {
                continue;
            };
            let snap = player.snapshot;
            let entity_id = subject as i32;
            self.broadcast(
                Audience::Only(receiver),
                &SpawnPlayer {
                    entity_id,
                    uuid: EntityUuid(subject),
                    position: snap.position,
                    yaw: snap.yaw,
                    pitch: snap.pitch,
                },
            );
            self.broadcast(
                Audience::Only(receiver),
                &EntityHeadLook {
                    entity_id,
                    head_yaw: snap.yaw,
                },
            );
        }
    }

    fn moved(&mut self, id: PlayerId, snapshot: PlayerSnapshot) {
        let Some(player) = self.player_mut(id) else {
            return;
        };
        player.snapshot = snapshot;
        trace!(slot = id, position = %snapshot.position, "player moved");
        let entity_id = id as i32;
        self.broadcast(
            Audience::AllExcept(id),
            &EntityTeleport {
                entity_id,
                position: snapshot.position,
                yaw: snapshot.yaw,
                pitch: snapshot.pitch,
                on_ground: snapshot.on_ground,
            },
        );
        self.broadcast(
            Audience::AllExcept(id),
            &EntityHeadLook {
                entity_id,
                head_yaw: snapshot.yaw,
            },
        );
    }

    fn rotated(&mut self, id: PlayerId, snapshot: PlayerSnapshot) {
        let Some(player) = self.player_mut(id) else {
            return;
        };
        player.snapshot = snapshot;
        let entity_id = id as i32;
        self.broadcast(
            Audience::AllExcept(id),
            &EntityRotation {
                entity_id,
                yaw: snapshot.yaw,
                pitch: snapshot.pitch,
                on_ground: snapshot.on_ground,
            },
        );
        self.broadcast(
            Audience::AllExcept(id),
            &EntityHeadLook {
                entity_id,
                head_yaw: snapshot.yaw,
            },
        );
    }

    fn chat(&self, id: PlayerId, message: &str) {
        let Some(player) = self.player(id) else {
            return;
        };
        if message.trim() == STATS_COMMAND {
            let text = format!(
                "{} of {} players online, world tick {}",
                self.online(),
                MAX_PLAYERS,
                self.tick
            );
            let reply = ChatMessage {
                component: ChatComponent::plain(text),
                position: ChatPosition::System,
                sender: EntityUuid(id),
            };
            self.broadcast(Audience::Only(id), &reply);
            return;
        }
        info!("<{}> {}", player.username, message);
        let msg = ChatMessage::from_player(&player.username, message, EntityUuid(id));
        self.broadcast(Audience::All, &msg);
    }

    fn animation(&self, id: PlayerId, hand: i32) {
        if self.player(id).is_none() {
            return;
        }
        let Some(animation) = EntityAnimation::animation_for_hand(hand) else {
            debug!(slot = id, hand, "ignoring animation for unknown hand");
            return;
        };
        self.broadcast(
            Audience::AllExcept(id),
            &EntityAnimation {
                entity_id: id as i32,
                animation,
            },
        );
    }

    fn entity_action(&self, id: PlayerId, action: i32) {
        if self.player(id).is_none() {
            return;
        }
        let pose = match action {
            entity_action::START_SNEAKING => Pose::Sneaking,
            entity_action::STOP_SNEAKING => Pose::Standing,
            other => {
                trace!(slot = id, action = other, "entity action not forwarded");
                return;
            }
        };
        self.broadcast(
            Audience::AllExcept(id),
            &EntityMetadata {
                entity_id: id as i32,
                pose,
            },
        );
    }

    fn leave(&mut self, id: PlayerId) {
        let Some(slot) = self.slots.get_mut(id as usize) else {
            return;
        };
        let previous = std::mem::replace(slot, Slot::Free);
        let Slot::Connected(player) = previous else {
            debug!(slot = id, "reserved slot released");
            return;
        };
        info!(slot = id, player = %player.username, online = self.online(), "player left");
        debug!(
            slot = id,
            health = player.vitals.health,
            food = player.vitals.food,
            saturation = player.vitals.saturation,
            "final vitals"
        );

        self.broadcast(Audience::AllExcept(id), &EntityDestroy::single(id as i32));
        self.broadcast(
            Audience::AllExcept(id),
            &PlayerInfo::RemovePlayers(vec![EntityUuid(id)]),
        );
        self.server_chat(
            Audience::AllExcept(id),
            format!("{} left the server", player.username),
            id,
        );
    }

    /// Keep-alive to every connected player; payload is seconds since start.
    fn sweep(&mut self) {
        self.tick += 1;
        let uptime = self.started.elapsed().as_secs() as i64;
        trace!(
            tick = self.tick,
            uptime,
            since_last = ?self.last_sweep.elapsed(),
            "keep-alive sweep"
        );
        self.last_sweep = Instant::now();
        self.broadcast(Audience::All, &KeepAlive { id: uptime });
    }
}
