use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::protocol::handler::PacketHandler;
use crate::protocol::packet::{Direction, Packet};

/// Client asks for a view distance, in chunks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestChunkRadiusPacket {
    pub radius: i32,
}

impl Packet for RequestChunkRadiusPacket {
    const ID: u32 = 0x45;
    const NAME: &'static str = "RequestChunkRadiusPacket";
    const DIRECTION: Direction = Direction::Serverbound;

    fn decode_payload(&mut self, cursor: &mut ReadCursor<'_>) -> Result<()> {
        self.radius = cursor.read_var_i32()?;
        Ok(())
    }

    fn encode_payload(&self, cursor: &mut WriteCursor) {
        cursor.write_var_i32(self.radius);
    }

    fn handle<H: PacketHandler + ?Sized>(&self, handler: &mut H) -> bool {
        handler.handle_request_chunk_radius(self)
    }
}
