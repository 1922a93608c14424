//! # Protocol Layer
//!
//! Packet kinds, the registry that materializes them from identifiers, and
//! the handler capability decoded packets are dispatched to.
//!
//! ## Components
//! - **Packet**: The `Packet` trait, the `DataPacket` enum and direction rules
//! - **Packets**: Concrete packet kinds
//! - **Registry**: Identifier to factory table, plus the process-wide instance
//! - **Handler**: One method per packet kind, called through double dispatch

pub mod handler;
pub mod packet;
pub mod packets;
pub mod registry;

#[cfg(test)]
mod tests;
