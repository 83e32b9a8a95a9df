//! Per-connection task: handshake, then status or login and play.

mod login;
mod play;
mod status;

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, ReadHalf, WriteHalf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tinycraft_proto::codec::Packet;
use tinycraft_proto::packets::Handshake;
use tinycraft_proto::state::{ConnectionState, Event, NextState};

use crate::config::ServerConfig;
use crate::error::ConnectionError;
use crate::registry::{PlayerId, RegistryHandle};
use crate::transport::{FrameReader, FrameWriter};
use crate::world::SpawnWorld;

/// Outbound frames a player may have queued before broadcasts to it are
/// dropped.
const OUTBOUND_QUEUE: usize = 256;

/// Everything a connection task needs from the server.
pub struct ServerContext {
    pub config: ServerConfig,
    pub registry: RegistryHandle,
    pub world: SpawnWorld,
    /// Favicon data URI, resolved at startup.
    pub favicon: Option<String>,
}

struct Connection<S> {
    id: PlayerId,
    state: ConnectionState,
    reader: FrameReader<BufReader<ReadHalf<S>>>,
    writer: Arc<FrameWriter<WriteHalf<S>>>,
    ctx: Arc<ServerContext>,
}

/// Drive one accepted stream until it closes. The slot `id` must already be
/// reserved; it is released on return.
pub async fn handle_connection<S>(stream: S, id: PlayerId, ctx: Arc<ServerContext>)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read_half, write_half) = tokio::io::split(stream);
    let mut conn = Connection {
        id,
        state: ConnectionState::Handshake,
        reader: FrameReader::new(BufReader::new(read_half)),
        writer: Arc::new(FrameWriter::new(write_half)),
        ctx,
    };

    match conn.run().await {
        Ok(()) => debug!(slot = id, "connection finished"),
        Err(ConnectionError::Closed) => debug!(slot = id, state = %conn.state, "peer closed"),
        Err(e) => warn!(slot = id, state = %conn.state, "connection error: {e}"),
    }
    conn.state = ConnectionState::Closed;

    if let Err(e) = conn.ctx.registry.leave(id).await {
        warn!(slot = id, "failed to release slot: {e}");
    }
    conn.writer.shutdown().await;
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    async fn run(&mut self) -> Result<(), ConnectionError> {
        let (packet_id, mut payload) = self.reader.read_frame().await?;
        let handshake = Handshake::from_frame(packet_id, &mut payload)?;
        debug!(
            slot = self.id,
            address = %handshake.server_address,
            port = handshake.server_port,
            next = ?handshake.next_state,
            "handshake"
        );
        self.advance(Event::Handshake(handshake.next_state))?;

        match handshake.next_state {
            NextState::Status => self.serve_status().await,
            NextState::Login => {
                let username = self.login().await?;
                self.enter_play(&username).await?;
                info!(slot = self.id, player = %username, "entered play");
                self.play(&username).await
            }
        }
    }

    fn advance(&mut self, event: Event) -> Result<(), ConnectionError> {
        let next = self.state.transition(event)?;
        debug!(slot = self.id, from = %self.state, to = %next, "state change");
        self.state = next;
        Ok(())
    }

    async fn send<P: Packet>(&self, packet: &P) -> Result<(), ConnectionError> {
        self.writer.send_packet(packet).await
    }

    /// Start the task that drains broadcast frames into this socket.
    fn spawn_pump(&self) -> mpsc::Sender<Bytes> {
        let (tx, mut rx) = mpsc::channel::<Bytes>(OUTBOUND_QUEUE);
        let writer = self.writer.clone();
        let id = self.id;
        tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                if let Err(e) = writer.send(&frame).await {
                    debug!(slot = id, "outbound pump stopped: {e}");
                    break;
                }
            }
        });
        tx
    }
}
