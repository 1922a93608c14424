//! Packet kinds and the closed set of packet variants.
//!
//! Every packet kind is a plain struct implementing [`Packet`]: it knows its
//! identifier, the directions it may travel in, how to read and write its own
//! payload, and which [`PacketHandler`] method it belongs to. [`DataPacket`]
//! gathers the kinds into one enum so the codec can work with whatever the
//! registry produced.

use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::protocol::handler::PacketHandler;
use crate::protocol::packets::{
    ChangeDimensionPacket, RequestChunkRadiusPacket, RespawnPacket, SetDifficultyPacket,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which end of a connection the local process is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Server,
    Client,
}

impl Side {
    pub fn peer(self) -> Side {
        match self {
            Side::Server => Side::Client,
            Side::Client => Side::Server,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Server => f.write_str("server"),
            Side::Client => f.write_str("client"),
        }
    }
}

/// Directions a packet kind is allowed to travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Server to client only
    Clientbound,
    /// Client to server only
    Serverbound,
    /// Either way
    Bidirectional,
}

impl Direction {
    /// Whether `sender` is allowed to put this packet on the wire.
    pub fn allows_sender(self, sender: Side) -> bool {
        matches!(
            (self, sender),
            (Direction::Bidirectional, _)
                | (Direction::Clientbound, Side::Server)
                | (Direction::Serverbound, Side::Client)
        )
    }
}

/// A single packet kind.
///
/// `Default` produces the empty shell the registry hands out before
/// [`Packet::decode_payload`] fills it in.
pub trait Packet: Default + fmt::Debug + Into<DataPacket> {
    /// Wire identifier, written first as an unsigned varint
    const ID: u32;
    /// Name used in logs and errors
    const NAME: &'static str;
    const DIRECTION: Direction;

    /// Populate every field from the cursor, in wire order.
    fn decode_payload(&mut self, cursor: &mut ReadCursor<'_>) -> Result<()>;

    /// Write every field into the cursor, in wire order. Never validates.
    fn encode_payload(&self, cursor: &mut WriteCursor);

    /// Hand this packet to its dedicated handler method and return that
    /// method's verdict unchanged.
    fn handle<H: PacketHandler + ?Sized>(&self, handler: &mut H) -> bool;
}

/// Any packet the protocol knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum DataPacket {
    ChangeDimension(ChangeDimensionPacket),
    Respawn(RespawnPacket),
    SetDifficulty(SetDifficultyPacket),
    RequestChunkRadius(RequestChunkRadiusPacket),
}

impl DataPacket {
    pub fn id(&self) -> u32 {
        match self {
            DataPacket::ChangeDimension(_) => ChangeDimensionPacket::ID,
            DataPacket::Respawn(_) => RespawnPacket::ID,
            DataPacket::SetDifficulty(_) => SetDifficultyPacket::ID,
            DataPacket::RequestChunkRadius(_) => RequestChunkRadiusPacket::ID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataPacket::ChangeDimension(_) => ChangeDimensionPacket::NAME,
            DataPacket::Respawn(_) => RespawnPacket::NAME,
            DataPacket::SetDifficulty(_) => SetDifficultyPacket::NAME,
            DataPacket::RequestChunkRadius(_) => RequestChunkRadiusPacket::NAME,
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            DataPacket::ChangeDimension(_) => ChangeDimensionPacket::DIRECTION,
            DataPacket::Respawn(_) => RespawnPacket::DIRECTION,
            DataPacket::SetDifficulty(_) => SetDifficultyPacket::DIRECTION,
            DataPacket::RequestChunkRadius(_) => RequestChunkRadiusPacket::DIRECTION,
        }
    }

    pub fn decode_payload(&mut self, cursor: &mut ReadCursor<'_>) -> Result<()> {
        match self {
            DataPacket::ChangeDimension(p) => p.decode_payload(cursor),
            DataPacket::Respawn(p) => p.decode_payload(cursor),
            DataPacket::SetDifficulty(p) => p.decode_payload(cursor),
            DataPacket::RequestChunkRadius(p) => p.decode_payload(cursor),
        }
    }

    pub fn encode_payload(&self, cursor: &mut WriteCursor) {
        match self {
            DataPacket::ChangeDimension(p) => p.encode_payload(cursor),
            DataPacket::Respawn(p) => p.encode_payload(cursor),
            DataPacket::SetDifficulty(p) => p.encode_payload(cursor),
            DataPacket::RequestChunkRadius(p) => p.encode_payload(cursor),
        }
    }

    /// Route to the handler method for this packet's kind.
    pub fn handle<H: PacketHandler + ?Sized>(&self, handler: &mut H) -> bool {
        match self {
            DataPacket::ChangeDimension(p) => p.handle(handler),
            DataPacket::Respawn(p) => p.handle(handler),
            DataPacket::SetDifficulty(p) => p.handle(handler),
            DataPacket::RequestChunkRadius(p) => p.handle(handler),
        }
    }
}

impl From<ChangeDimensionPacket> for DataPacket {
    fn from(packet: ChangeDimensionPacket) -> Self {
        DataPacket::ChangeDimension(packet)
    }
}

impl From<RespawnPacket> for DataPacket {
    fn from(packet: RespawnPacket) -> Self {
        DataPacket::Respawn(packet)
    }
}

impl From<SetDifficultyPacket> for DataPacket {
    fn from(packet: SetDifficultyPacket) -> Self {
        DataPacket::SetDifficulty(packet)
    }
}

impl From<RequestChunkRadiusPacket> for DataPacket {
    fn from(packet: RequestChunkRadiusPacket) -> Self {
        DataPacket::RequestChunkRadius(packet)
    }
}
