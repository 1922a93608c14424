//! # Error Types
//!
//! Error handling for the packet framework.
//!
//! This module defines every error variant that can occur while reading packet
//! buffers, building the packet registry, or loading configuration.
//!
//! ## Error Categories
//! - **Cursor Errors**: Truncated buffers, unterminated varints
//! - **Packet Errors**: Unknown identifiers, trailing bytes, wrong direction, oversized buffers
//! - **Registry Errors**: Duplicate or missing factories, uninitialized global registry
//! - **Configuration Errors**: Unreadable or invalid configuration
//!
//! Decode errors abort the single buffer being processed. They never touch the
//! registry, so the caller is free to log them and continue with the next buffer.
//!
//! ## Example Usage
//! ```rust
//! use mcpe_protocol::error::ProtocolError;
//! use mcpe_protocol::ReadCursor;
//! use tracing::warn;
//!
//! let mut cursor = ReadCursor::new(&[0x80, 0x80]);
//! match cursor.read_var_u32() {
//!     Err(ProtocolError::UnexpectedEof { offset, .. }) => warn!(offset, "Truncated varint"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Registry errors
    pub const ERR_REGISTRY_NOT_INITIALIZED: &str =
        "Packet registry used before init_registry() was called";

    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";

    /// Logging errors
    pub const ERR_LOG_FILE: &str = "Failed to open log file";
    pub const ERR_LOG_INIT: &str = "Failed to install tracing subscriber";
}

/// ProtocolError is the primary error type for all packet operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unexpected end of buffer at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("Malformed varint at offset {offset}: unterminated or too wide for {max_bytes} bytes")]
    MalformedVarint { offset: usize, max_bytes: usize },

    #[error("Unrecognized packet identifier: {id:#04x}")]
    UnrecognizedPacket { id: u32 },

    #[error("Trailing data after packet {id:#04x}: {remaining} unread bytes")]
    TrailingData { id: u32, remaining: usize },

    #[error("Packet {name} ({id:#04x}) may not be sent by the remote side")]
    UnexpectedDirection { id: u32, name: &'static str },

    #[error("Packet too large: {size} bytes (max {max})")]
    OversizedPacket { size: usize, max: usize },

    #[error("Duplicate packet identifier: {0:#04x}")]
    DuplicateIdentifier(u32),

    #[error("Unknown packet identifier: {0:#04x}")]
    UnknownIdentifier(u32),

    #[error("Packet registry used before init_registry() was called")]
    RegistryNotInitialized,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ProtocolError {
    /// Whether a stream of buffers can keep going after this error.
    ///
    /// Only an unrecognized identifier qualifies; everything else points at a
    /// framing bug or a peer speaking a different protocol.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ProtocolError::UnrecognizedPacket { .. })
    }
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
