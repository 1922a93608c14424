//! # Codec Driver
//!
//! Turns one framed buffer into a handled packet, and one packet into one
//! buffer.
//!
//! ## Decode
//! 1. Reject buffers over the configured size limit
//! 2. Read the identifier varint
//! 3. Ask the registry for the matching empty packet
//! 4. Check the peer is allowed to send that packet
//! 5. Let the packet decode its own payload
//! 6. Fail if any bytes are left over
//! 7. Let the packet pick its handler method
//!
//! ## Encode
//! The identifier varint followed by the packet's payload. Encoding a packet
//! the local side may not send is a bug in the caller and panics.
//!
//! ## Usage
//! ```rust
//! use mcpe_protocol::{ChangeDimensionPacket, DataPacket, PacketCodec, PacketRegistry, Side, Vector3};
//!
//! let registry = PacketRegistry::standard()?;
//! let server = PacketCodec::new(&registry, Side::Server);
//! let client = PacketCodec::new(&registry, Side::Client);
//!
//! let packet = ChangeDimensionPacket {
//!     dimension: 1,
//!     position: Vector3::new(10.5, 64.0, -3.25),
//!     respawn: true,
//! };
//! let bytes = server.encode(&packet.clone().into());
//! assert_eq!(client.decode(&bytes)?, DataPacket::from(packet));
//! # Ok::<(), mcpe_protocol::ProtocolError>(())
//! ```

use crate::config::CodecConfig;
use crate::core::cursor::{varint_len, ReadCursor, WriteCursor};
use crate::error::{ProtocolError, Result};
use crate::protocol::handler::PacketHandler;
use crate::protocol::packet::{DataPacket, Side};
use crate::protocol::registry::PacketRegistry;
use crate::utils::metrics::{global_metrics, Timer};
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;
use tracing::{debug, instrument, trace, warn};

/// Outcome of [`PacketCodec::dispatch_batch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Handler returned `true`
    pub handled: usize,
    /// Handler returned `false`
    pub passed: usize,
    /// Unrecognized identifiers that were skipped
    pub skipped: usize,
}

/// Packet codec bound to a registry and to the local side of the connection.
///
/// Cheap to copy; one codec can serve any number of concurrent connections.
#[derive(Debug, Clone, Copy)]
pub struct PacketCodec<'r> {
    registry: &'r PacketRegistry,
    side: Side,
    max_packet_size: usize,
    enforce_direction: bool,
}

impl<'r> PacketCodec<'r> {
    /// Codec with default limits for the given side
    pub fn new(registry: &'r PacketRegistry, side: Side) -> Self {
        Self::with_config(
            registry,
            &CodecConfig {
                side,
                ..CodecConfig::default()
            },
        )
    }

    pub fn with_config(registry: &'r PacketRegistry, config: &CodecConfig) -> Self {
        Self {
            registry,
            side: config.side,
            max_packet_size: config.max_packet_size,
            enforce_direction: config.enforce_direction,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn registry(&self) -> &'r PacketRegistry {
        self.registry
    }

    /// Decode one framed buffer without dispatching it.
    ///
    /// Errors are returned as the cursor or packet raised them; the
    /// identifier, once read, is attached to the span and to the log event.
    #[instrument(
        skip(self, buffer),
        fields(len = buffer.len(), side = %self.side, id = tracing::field::Empty),
        level = "trace"
    )]
    pub fn decode(&self, buffer: &[u8]) -> Result<DataPacket> {
        let (id, result) = self.decode_inner(buffer);
        let metrics = global_metrics();
        match &result {
            Ok(packet) => {
                metrics.packet_decoded(buffer.len() as u64);
                trace!(id = packet.id(), name = packet.name(), "Packet decoded");
            }
            Err(ProtocolError::UnrecognizedPacket { id }) => {
                metrics.unrecognized_packet();
                debug!(id = *id, "Unrecognized packet");
            }
            Err(e) => {
                metrics.decode_error();
                match id {
                    Some(id) => warn!(id, error = %e, "Failed to decode packet"),
                    None => warn!(error = %e, "Failed to decode packet"),
                }
            }
        }
        result
    }

    /// Returns the identifier alongside the outcome once it has been read.
    fn decode_inner(&self, buffer: &[u8]) -> (Option<u32>, Result<DataPacket>) {
        if buffer.len() > self.max_packet_size {
            let err = ProtocolError::OversizedPacket {
                size: buffer.len(),
                max: self.max_packet_size,
            };
            return (None, Err(err));
        }

        let mut cursor = ReadCursor::new(buffer);
        let id = match cursor.read_var_u32() {
            Ok(id) => id,
            Err(e) => return (None, Err(e)),
        };
        tracing::Span::current().record("id", id);

        (Some(id), self.decode_packet(id, &mut cursor))
    }

    fn decode_packet(&self, id: u32, cursor: &mut ReadCursor<'_>) -> Result<DataPacket> {
        let factory = self.registry.lookup(id).map_err(|e| match e {
            ProtocolError::UnknownIdentifier(id) => ProtocolError::UnrecognizedPacket { id },
            other => other,
        })?;
        let mut packet = factory();

        if self.enforce_direction && !packet.direction().allows_sender(self.side.peer()) {
            return Err(ProtocolError::UnexpectedDirection {
                id,
                name: packet.name(),
            });
        }

        packet.decode_payload(cursor)?;

        if !cursor.is_empty() {
            return Err(ProtocolError::TrailingData {
                id,
                remaining: cursor.remaining(),
            });
        }

        Ok(packet)
    }

    /// Decode one framed buffer and hand the packet to `handler`.
    ///
    /// Returns the handler method's verdict unchanged.
    pub fn decode_and_dispatch<H>(&self, buffer: &[u8], handler: &mut H) -> Result<bool>
    where
        H: PacketHandler + ?Sized,
    {
        let _timer = Timer::start("decode_and_dispatch");
        let packet = self.decode(buffer)?;
        let handled = packet.handle(handler);
        if handled {
            global_metrics().packet_handled();
        }
        trace!(id = packet.id(), handled, "Packet dispatched");
        Ok(handled)
    }

    /// Decode and dispatch a connection's buffers in arrival order.
    ///
    /// Unrecognized packets are logged and skipped; any other error stops the
    /// batch and is returned.
    pub fn dispatch_batch<'b, I, H>(&self, buffers: I, handler: &mut H) -> Result<BatchSummary>
    where
        I: IntoIterator<Item = &'b [u8]>,
        H: PacketHandler + ?Sized,
    {
        let mut summary = BatchSummary::default();
        for buffer in buffers {
            match self.decode_and_dispatch(buffer, handler) {
                Ok(true) => summary.handled += 1,
                Ok(false) => summary.passed += 1,
                Err(e) if e.is_recoverable() => {
                    warn!(error = %e, "Skipping unrecognized packet");
                    summary.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(summary)
    }

    /// Encode a packet as identifier followed by payload.
    ///
    /// # Panics
    ///
    /// If the local side is not allowed to send this packet kind.
    pub fn encode(&self, packet: &DataPacket) -> Bytes {
        let mut cursor = WriteCursor::with_capacity(varint_len(u64::from(packet.id())) + 16);
        self.encode_into(packet, &mut cursor);
        cursor.into_bytes()
    }

    fn encode_into(&self, packet: &DataPacket, cursor: &mut WriteCursor) {
        assert!(
            packet.direction().allows_sender(self.side),
            "{} ({:#04x}) cannot be sent by the {}",
            packet.name(),
            packet.id(),
            self.side
        );

        let start = cursor.offset();
        cursor.write_var_u32(packet.id());
        packet.encode_payload(cursor);

        let written = cursor.offset() - start;
        global_metrics().packet_encoded(written as u64);
        trace!(id = packet.id(), name = packet.name(), bytes = written, "Packet encoded");
    }
}

impl Encoder<DataPacket> for PacketCodec<'_> {
    type Error = ProtocolError;

    fn encode(&mut self, item: DataPacket, dst: &mut BytesMut) -> Result<()> {
        let mut cursor = WriteCursor::with_buffer(dst.split_off(dst.len()));
        self.encode_into(&item, &mut cursor);
        dst.unsplit(cursor.into_inner());
        Ok(())
    }
}
