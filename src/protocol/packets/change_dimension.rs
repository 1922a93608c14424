use crate::core::cursor::{ReadCursor, WriteCursor};
use crate::core::vector::Vector3;
use crate::error::Result;
use crate::protocol::handler::PacketHandler;
use crate::protocol::packet::{Direction, Packet};

/// Moves the client into another dimension.
///
/// With `respawn` set the client runs its respawn sequence instead of a
/// seamless transition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeDimensionPacket {
    pub dimension: i32,
    pub position: Vector3,
    pub respawn: bool,
}

impl Packet for ChangeDimensionPacket {
    const ID: u32 = 0x3d;
    const NAME: &'static str = "ChangeDimensionPacket";
    const DIRECTION: Direction = Direction::Clientbound;

    fn decode_payload(&mut self, cursor: &mut ReadCursor<'_>) -> Result<()> {
        self.dimension = cursor.read_var_i32()?;
        self.position = cursor.read_vector3()?;
        self.respawn = cursor.read_bool()?;
        Ok(())
    }

    fn encode_payload(&self, cursor: &mut WriteCursor) {
        cursor.write_var_i32(self.dimension);
        cursor.write_vector3(self.position);
        cursor.write_bool(self.respawn);
    }

    fn handle<H: PacketHandler + ?Sized>(&self, handler: &mut H) -> bool {
        handler.handle_change_dimension(self)
    }
}
