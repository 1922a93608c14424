//! Packet registry: identifier to factory.
//!
//! The registry is filled once, when a protocol version is set up, and only
//! read afterwards. Lookups take `&self` and need no locking, so one registry
//! can be shared by every connection task.
//!
//! A process-wide instance is available through [`init_registry`], which must
//! be called explicitly before [`global_registry`] will hand it out.

use crate::error::{constants, ProtocolError, Result};
use crate::protocol::packet::{DataPacket, Packet};
use crate::protocol::packets::{
    ChangeDimensionPacket, RequestChunkRadiusPacket, RespawnPacket, SetDifficultyPacket,
};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Produces a default-valued packet ready to be decoded into.
pub type PacketFactory = fn() -> DataPacket;

fn make<P: Packet>() -> DataPacket {
    P::default().into()
}

#[derive(Debug, Default)]
pub struct PacketRegistry {
    factories: HashMap<u32, PacketFactory>,
}

impl PacketRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every packet kind this crate ships.
    pub fn standard() -> Result<Self> {
        let mut registry = Self::new();
        registry.register_packet::<ChangeDimensionPacket>()?;
        registry.register_packet::<RespawnPacket>()?;
        registry.register_packet::<SetDifficultyPacket>()?;
        registry.register_packet::<RequestChunkRadiusPacket>()?;
        debug!(packets = registry.len(), "Standard packet registry built");
        Ok(registry)
    }

    pub fn register(&mut self, id: u32, factory: PacketFactory) -> Result<()> {
        if self.factories.contains_key(&id) {
            return Err(ProtocolError::DuplicateIdentifier(id));
        }
        self.factories.insert(id, factory);
        Ok(())
    }

    /// Register `P` under its own identifier.
    pub fn register_packet<P: Packet>(&mut self) -> Result<()> {
        self.register(P::ID, make::<P>)
    }

    pub fn lookup(&self, id: u32) -> Result<PacketFactory> {
        self.factories
            .get(&id)
            .copied()
            .ok_or(ProtocolError::UnknownIdentifier(id))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.factories.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Registered identifiers in ascending order
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.factories.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

static REGISTRY: OnceCell<PacketRegistry> = OnceCell::new();

/// Build the process-wide registry (call once at startup).
///
/// Later calls return the instance built by the first one.
pub fn init_registry() -> Result<&'static PacketRegistry> {
    REGISTRY.get_or_try_init(PacketRegistry::standard)
}

/// The process-wide registry, if [`init_registry`] has run.
pub fn global_registry() -> Result<&'static PacketRegistry> {
    REGISTRY.get().ok_or_else(|| {
        warn!("{}", constants::ERR_REGISTRY_NOT_INITIALIZED);
        ProtocolError::RegistryNotInitialized
    })
}
