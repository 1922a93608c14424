//! # mcpe-protocol
//!
//! Binary packet framework for the Bedrock game protocol: a typed registry of
//! packet kinds, symmetric encode/decode over byte cursors, and double
//! dispatch of decoded packets to a handler.
//!
//! ## Layout
//! - [`core`]: Read/write cursors, `Vector3`, and the codec driver
//! - [`protocol`]: Packet kinds, the registry, and the handler trait
//! - [`config`]: Codec and logging configuration
//! - [`error`]: `ProtocolError` and the crate `Result`
//! - [`utils`]: Logging setup and metrics
//!
//! ## Quick Start
//! ```rust
//! use mcpe_protocol::*;
//!
//! struct Client {
//!     dimension: i32,
//! }
//!
//! impl PacketHandler for Client {
//!     fn handle_change_dimension(&mut self, packet: &ChangeDimensionPacket) -> bool {
//!         self.dimension = packet.dimension;
//!         true
//!     }
//!     fn handle_respawn(&mut self, _: &RespawnPacket) -> bool { false }
//!     fn handle_set_difficulty(&mut self, _: &SetDifficultyPacket) -> bool { false }
//!     fn handle_request_chunk_radius(&mut self, _: &RequestChunkRadiusPacket) -> bool { false }
//! }
//!
//! let registry = init_registry()?;
//! let server = PacketCodec::new(registry, Side::Server);
//! let client = PacketCodec::new(registry, Side::Client);
//!
//! let bytes = server.encode(&ChangeDimensionPacket { dimension: 1, ..Default::default() }.into());
//!
//! let mut handler = Client { dimension: 0 };
//! assert!(client.decode_and_dispatch(&bytes, &mut handler)?);
//! assert_eq!(handler.dimension, 1);
//! # Ok::<(), ProtocolError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::codec::{BatchSummary, PacketCodec};
pub use crate::core::cursor::{ReadCursor, WriteCursor};
pub use crate::core::vector::Vector3;
pub use crate::error::{ProtocolError, Result};
pub use crate::protocol::handler::PacketHandler;
pub use crate::protocol::packet::{DataPacket, Direction, Packet, Side};
pub use crate::protocol::packets::{
    ChangeDimensionPacket, RequestChunkRadiusPacket, RespawnPacket, SetDifficultyPacket,
};
pub use crate::protocol::registry::{global_registry, init_registry, PacketFactory, PacketRegistry};
