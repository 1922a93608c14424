use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::error::Result;
use crate::protocol::handler::PacketHandler;
use crate::protocol::packet::{Direction, Packet};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDifficultyPacket {
    pub difficulty: u32,
}

impl Packet for SetDifficultyPacket {
    const ID: u32 = 0x3c;
    const NAME: &'static str = "SetDifficultyPacket";
    const DIRECTION: Direction = Direction::Clientbound;

    fn decode_payload(&mut self, cursor: &mut ReadCursor<'_>) -> Result<()> {
        self.difficulty = cursor.read_var_u32()?;
        Ok(())
    }

    fn encode_payload(&self, cursor: &mut WriteCursor) {
        cursor.write_var_u32(self.difficulty);
    }

    fn handle<H: PacketHandler + ?Sized>(&self, handler: &mut H) -> bool {
        handler.handle_set_difficulty(self)
    }
}
