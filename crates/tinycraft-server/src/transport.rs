//! VarInt length-prefixed framing over async streams.
//!
//! ```text
//! +----------------+-------------------+-----------------+
//! | VarInt length  | VarInt packet id  | payload         |
//! +----------------+-------------------+-----------------+
//!                  |<-------------- length ------------->|
//! ```

use bytes::{Bytes, BytesMut};
use tinycraft_proto::codec::{Packet, ProtoDecode};
use tinycraft_proto::error::ProtoError;
use tinycraft_proto::framer::{encode_frame, MAX_INBOUND_FRAME};
use tinycraft_proto::types::{VarInt, VarIntError};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::error::ConnectionError;

/// Reads whole frames from the read half of a connection.
pub struct FrameReader<R> {
    inner: R,
    max_frame: usize,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_max_frame(inner, MAX_INBOUND_FRAME)
    }

    pub fn with_max_frame(inner: R, max_frame: usize) -> Self {
        Self { inner, max_frame }
    }

    async fn read_byte(&mut self) -> Result<u8, ConnectionError> {
        match self.inner.read_u8().await {
            Ok(b) => Ok(b),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(ConnectionError::Closed),
            Err(e) => Err(ConnectionError::Io(e)),
        }
    }

    async fn read_length(&mut self) -> Result<i32, ConnectionError> {
        let mut header = [0u8; VarInt::MAX_BYTES];
        for i in 0..VarInt::MAX_BYTES {
            let byte = self.read_byte().await?;
            header[i] = byte;
            if byte & 0x80 == 0 {
                let (len, _) = VarInt::decode(&header[..=i]).map_err(ProtoError::from)?;
                return Ok(len.0);
            }
        }
        Err(ProtoError::from(VarIntError::TooManyBytes {
            max_bytes: VarInt::MAX_BYTES,
        })
        .into())
    }

    /// Read one frame and split it into `(packet_id, payload)`.
    ///
    /// The whole frame is consumed even when the payload is later ignored.
    pub async fn read_frame(&mut self) -> Result<(i32, Bytes), ConnectionError> {
        let len = self.read_length().await?;
        if len <= 0 {
            return Err(ProtoError::InvalidFrameLength(len).into());
        }
        let len = len as usize;
        if len > self.max_frame {
            return Err(ProtoError::FrameTooLarge {
                size: len,
                max: self.max_frame,
            }
            .into());
        }

        let mut body = BytesMut::zeroed(len);
        self.inner.read_exact(&mut body).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                ConnectionError::Closed
            } else {
                ConnectionError::Io(e)
            }
        })?;

        let mut body = body.freeze();
        let packet_id = VarInt::proto_decode(&mut body)?.0;
        Ok((packet_id, body))
    }
}

/// Serializes whole-frame writes to the write half of a connection.
///
/// The lock is held for exactly one frame, so frames from different tasks
/// never interleave on the wire.
pub struct FrameWriter<W> {
    inner: Mutex<W>,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Write one already framed packet and flush it.
    pub async fn send(&self, frame: &[u8]) -> Result<(), ConnectionError> {
        let mut writer = self.inner.lock().await;
        writer.write_all(frame).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Encode and send a single packet.
    pub async fn send_packet<P: Packet>(&self, packet: &P) -> Result<(), ConnectionError> {
        let frame = encode_frame(packet)?;
        self.send(&frame).await
    }

    pub async fn shutdown(&self) {
        let mut writer = self.inner.lock().await;
        let _ = writer.shutdown().await;
    }
}
