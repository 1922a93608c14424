//! Concrete packet kinds.
//!
//! | Packet | ID | Direction |
//! |--------|----|-----------|
//! | [`RespawnPacket`] | `0x2d` | both |
//! | [`SetDifficultyPacket`] | `0x3c` | clientbound |
//! | [`ChangeDimensionPacket`] | `0x3d` | clientbound |
//! | [`RequestChunkRadiusPacket`] | `0x45` | serverbound |

mod change_dimension;
mod request_chunk_radius;
mod respawn;
mod set_difficulty;

pub use change_dimension::ChangeDimensionPacket;
pub use request_chunk_radius::RequestChunkRadiusPacket;
pub use respawn::RespawnPacket;
pub use set_difficulty::SetDifficultyPacket;
