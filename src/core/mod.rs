//! # Core Protocol Components
//!
//! Low-level buffer access and the codec driver.
//!
//! ## Components
//! - **Cursor**: Read and write cursors with varint, float, vector and bool primitives
//! - **Vector**: The 3-component coordinate type used by positional packets
//! - **Codec**: Identifier lookup, payload decode, trailing-data check and handler dispatch
//!
//! ## Wire Format
//! ```text
//! [Identifier(varint, 1-5)] [Payload(N)]
//! ```
//!
//! Buffers arrive here already framed, decrypted and decompressed; the codec
//! only ever sees one packet per buffer.

pub mod codec;
pub mod cursor;
pub mod vector;
