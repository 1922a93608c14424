use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::vector::Vector3;
use crate::error::Result;
use crate::protocol::handler::PacketHandler;
use crate::protocol::packet::{Direction, Packet};

/// Respawn handshake. The server announces a spawn point and the client
/// acknowledges once it is ready, so both sides send it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RespawnPacket {
    pub position: Vector3,
    pub state: u8,
    pub runtime_entity_id: u64,
}

impl RespawnPacket {
    pub const SEARCHING_FOR_SPAWN: u8 = 0;
    pub const READY_TO_SPAWN: u8 = 1;
    pub const CLIENT_READY_TO_SPAWN: u8 = 2;
}

impl Packet for RespawnPacket {
    const ID: u32 = 0x2d;
    const NAME: &'static str = "RespawnPacket";
    const DIRECTION: Direction = Direction::Bidirectional;

    fn decode_payload(&mut self, cursor: &mut ReadCursor<'_>) -> Result<()> {
        self.position = cursor.read_vector3()?;
        self.state = cursor.read_u8()?;
        self.runtime_entity_id = cursor.read_var_u64()?;
        Ok(())
    }

    fn encode_payload(&self, cursor: &mut WriteCursor) {
        cursor.write_vector3(self.position);
        cursor.write_u8(self.state);
        cursor.write_var_u64(self.runtime_entity_id);
    }

    fn handle<H: PacketHandler + ?Sized>(&self, handler: &mut H) -> bool {
        handler.handle_respawn(self)
    }
}
