//! Handler capability for decoded packets.
//!
//! A [`PacketHandler`] exposes one method per packet kind. The codec never
//! looks inside a handler; it asks the decoded packet to call the right method
//! (see [`Packet::handle`](crate::protocol::packet::Packet::handle)), so a new
//! packet kind needs a new method here and nothing in the codec.
//!
//! None of the methods have default bodies: adding a packet kind without
//! teaching every handler about it is a compile error.
//!
//! Each method returns `true` when the handler fully consumed the packet and
//! `false` to let it pass through.

use crate::protocol::packets::{
    ChangeDimensionPacket, RequestChunkRadiusPacket, RespawnPacket, SetDifficultyPacket,
};

pub trait PacketHandler {
    fn handle_change_dimension(&mut self, packet: &ChangeDimensionPacket) -> bool;

    fn handle_respawn(&mut self, packet: &RespawnPacket) -> bool;

    fn handle_set_difficulty(&mut self, packet: &SetDifficultyPacket) -> bool;

    fn handle_request_chunk_radius(&mut self, packet: &RequestChunkRadiusPacket) -> bool;
}

impl<H: PacketHandler + ?Sized> PacketHandler for &mut H {
    fn handle_change_dimension(&mut self, packet: &ChangeDimensionPacket) -> bool {
        (**self).handle_change_dimension(packet)
    }

    fn handle_respawn(&mut self, packet: &RespawnPacket) -> bool {
        (**self).handle_respawn(packet)
    }

    fn handle_set_difficulty(&mut self, packet: &SetDifficultyPacket) -> bool {
        (**self).handle_set_difficulty(packet)
    }

    fn handle_request_chunk_radius(&mut self, packet: &RequestChunkRadiusPacket) -> bool {
        (**self).handle_request_chunk_radius(packet)
    }
}

impl<H: PacketHandler + ?Sized> PacketHandler for Box<H> {
    fn handle_change_dimension(&mut self, packet: &ChangeDimensionPacket) -> bool {
        (**self).handle_change_dimension(packet)
    }

    fn handle_respawn(&mut self, packet: &RespawnPacket) -> bool {
        (**self).handle_respawn(packet)
    }

    fn handle_set_difficulty(&mut self, packet: &SetDifficultyPacket) -> bool {
        (**self).handle_set_difficulty(packet)
    }

    fn handle_request_chunk_radius(&mut self, packet: &RequestChunkRadiusPacket) -> bool {
        (**self).handle_request_chunk_radius(packet)
    }
}
