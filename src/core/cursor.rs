//! # Byte Cursors
//!
//! Positioned, one-directional access to packet buffers.
//!
//! [`ReadCursor`] borrows an inbound buffer and decodes primitives from it;
//! [`WriteCursor`] owns a growable [`BytesMut`] and encodes primitives into it.
//! A cursor never switches direction.
//!
//! ## Primitives
//! - **Varints**: little-endian base-128, high bit = continuation,
//!   at most 5 bytes for 32-bit values and 10 bytes for 64-bit values
//! - **Signed varints**: zigzag-mapped onto the unsigned encoding
//! - **Floats**: little-endian IEEE-754 single precision
//! - **Vector3**: three floats in x, y, z order
//! - **Bool**: one byte; any nonzero byte reads as `true`, writes are always `0x00`/`0x01`
//!
//! ## Invariants
//! - `0 <= offset <= len` at all times
//! - A failed read leaves the offset at the start of the primitive it was reading

use crate::core::vector::Vector3;
use crate::error::{ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// Maximum encoded length of a 32-bit varint
pub const MAX_VARINT32_BYTES: usize = 5;

/// Maximum encoded length of a 64-bit varint
pub const MAX_VARINT64_BYTES: usize = 10;

const CONTINUATION_BIT: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7f;

/// Read-only cursor over an inbound packet buffer.
#[derive(Debug, Clone)]
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Current read position
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `needed` bytes and advance past them.
    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(ProtocolError::UnexpectedEof {
                offset: self.offset,
                needed,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += needed;
        Ok(&self.buf[start..self.offset])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Decode an unsigned varint of at most `max_bytes` groups holding a
    /// `bits`-wide value.
    ///
    /// The offset is only committed once the terminating byte has been read.
    /// A final group carrying bits above `bits` is malformed.
    fn read_varint(&mut self, max_bytes: usize, bits: u32) -> Result<u64> {
        let start = self.offset;
        let mut value: u64 = 0;

        for i in 0..max_bytes {
            let Some(&byte) = self.buf.get(start + i) else {
                return Err(ProtocolError::UnexpectedEof {
                    offset: start,
                    needed: i + 1,
                    remaining: self.buf.len() - start,
                });
            };

            if i + 1 == max_bytes {
                let used = bits - 7 * i as u32;
                if byte & PAYLOAD_MASK & !((1u8 << used) - 1) != 0 {
                    return Err(ProtocolError::MalformedVarint {
                        offset: start,
                        max_bytes,
                    });
                }
            }

            value |= u64::from(byte & PAYLOAD_MASK) << (7 * i);
            if byte & CONTINUATION_BIT == 0 {
                self.offset = start + i + 1;
                return Ok(value);
            }
        }

        Err(ProtocolError::MalformedVarint {
            offset: start,
            max_bytes,
        })
    }

    /// Read an unsigned 32-bit varint (at most 5 bytes).
    pub fn read_var_u32(&mut self) -> Result<u32> {
        self.read_varint(MAX_VARINT32_BYTES, u32::BITS)
            .map(|v| v as u32)
    }

    /// Read an unsigned 64-bit varint (at most 10 bytes).
    pub fn read_var_u64(&mut self) -> Result<u64> {
        self.read_varint(MAX_VARINT64_BYTES, u64::BITS)
    }

    /// Read a zigzag-encoded signed 32-bit varint.
    pub fn read_var_i32(&mut self) -> Result<i32> {
        let raw = self.read_var_u32()?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    /// Read a zigzag-encoded signed 64-bit varint.
    pub fn read_var_i64(&mut self) -> Result<i64> {
        let raw = self.read_var_u64()?;
        Ok(((raw >> 1) as i64) ^ -((raw & 1) as i64))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a boolean. Any nonzero byte is `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a little-endian `f32`.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take_array::<4>()?))
    }

    /// Read three little-endian `f32` values as x, y, z.
    ///
    /// Checks for all 12 bytes up front so a short buffer fails without
    /// consuming any coordinate.
    pub fn read_vector3(&mut self) -> Result<Vector3> {
        let bytes = self.take_array::<12>()?;
        let coord = |i: usize| f32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Ok(Vector3::new(coord(0), coord(4), coord(8)))
    }
}

/// Write-only cursor accumulating an outbound packet buffer.
///
/// Writes are infallible: the buffer grows as needed.
#[derive(Debug, Default)]
pub struct WriteCursor {
    buf: BytesMut,
}

impl WriteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Append to an existing buffer. Pair with [`WriteCursor::into_inner`].
    pub fn with_buffer(buf: BytesMut) -> Self {
        Self { buf }
    }

    /// Current write position
    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> BytesMut {
        self.buf
    }

    /// Freeze the written bytes into an immutable buffer.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    fn write_varint(&mut self, mut value: u64) {
        loop {
            let byte = (value as u8) & PAYLOAD_MASK;
            value >>= 7;
            if value == 0 {
                self.buf.put_u8(byte);
                return;
            }
            self.buf.put_u8(byte | CONTINUATION_BIT);
        }
    }

    /// Write an unsigned 32-bit varint using the minimal number of bytes.
    pub fn write_var_u32(&mut self, value: u32) {
        self.write_varint(u64::from(value));
    }

    /// Write an unsigned 64-bit varint using the minimal number of bytes.
    pub fn write_var_u64(&mut self, value: u64) {
        self.write_varint(value);
    }

    /// Write a zigzag-encoded signed 32-bit varint.
    pub fn write_var_i32(&mut self, value: i32) {
        self.write_var_u32(((value << 1) ^ (value >> 31)) as u32);
    }

    /// Write a zigzag-encoded signed 64-bit varint.
    pub fn write_var_i64(&mut self, value: i64) {
        self.write_var_u64(((value << 1) ^ (value >> 63)) as u64);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a boolean as exactly `0x00` or `0x01`.
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    pub fn write_vector3(&mut self, value: Vector3) {
        self.write_f32(value.x);
        self.write_f32(value.y);
        self.write_f32(value.z);
    }
}

/// Number of bytes the minimal varint encoding of `value` occupies.
pub fn varint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.max(1).div_ceil(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_varint_known_encodings() {
        let cases: &[(u32, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7f]),
            (128, &[0x80, 0x01]),
            (300, &[0xac, 0x02]),
            (u32::MAX, &[0xff, 0xff, 0xff, 0xff, 0x0f]),
        ];
        for &(value, expected) in cases {
            let mut w = WriteCursor::new();
            w.write_var_u32(value);
            assert_eq!(w.as_slice(), expected, "encoding of {value}");

            let mut r = ReadCursor::new(expected);
            assert_eq!(r.read_var_u32().unwrap(), value);
            assert!(r.is_empty());
        }
    }

    #[test]
    fn test_varint_len_matches_encoding() {
        for value in [0u64, 1, 127, 128, 16_383, 16_384, u32::MAX as u64, u64::MAX] {
            let mut w = WriteCursor::new();
            w.write_var_u64(value);
            assert_eq!(w.offset(), varint_len(value), "length of {value}");
        }
        assert_eq!(varint_len(u64::MAX), MAX_VARINT64_BYTES);
    }

    #[test]
    fn test_zigzag_mapping() {
        let cases: &[(i32, u8)] = &[(0, 0), (-1, 1), (1, 2), (-2, 3), (2, 4)];
        for &(value, encoded) in cases {
            let mut w = WriteCursor::new();
            w.write_var_i32(value);
            assert_eq!(w.as_slice(), &[encoded]);
            assert_eq!(ReadCursor::new(&[encoded]).read_var_i32().unwrap(), value);
        }

        for value in [i32::MIN, i32::MAX] {
            let mut w = WriteCursor::new();
            w.write_var_i32(value);
            let bytes = w.into_bytes();
            assert_eq!(ReadCursor::new(&bytes).read_var_i32().unwrap(), value);
        }

        for value in [i64::MIN, -1, 0, i64::MAX] {
            let mut w = WriteCursor::new();
            w.write_var_i64(value);
            let bytes = w.into_bytes();
            assert_eq!(ReadCursor::new(&bytes).read_var_i64().unwrap(), value);
        }
    }

    #[test]
    fn test_varint32_unterminated_is_malformed() {
        let bytes = [0xff; 6];
        let mut r = ReadCursor::new(&bytes);
        match r.read_var_u32() {
            Err(ProtocolError::MalformedVarint { offset, max_bytes }) => {
                assert_eq!(offset, 0);
                assert_eq!(max_bytes, MAX_VARINT32_BYTES);
            }
            other => panic!("expected MalformedVarint, got {other:?}"),
        }
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn test_varint64_accepts_ten_bytes() {
        let mut bytes = vec![0xff; 9];
        bytes.push(0x01);
        let mut r = ReadCursor::new(&bytes);
        assert_eq!(r.read_var_u64().unwrap(), u64::MAX);

        let bytes = [0xff; 10];
        assert!(matches!(
            ReadCursor::new(&bytes).read_var_u64(),
            Err(ProtocolError::MalformedVarint { max_bytes: 10, .. })
        ));
    }

    #[test]
    fn test_varint_overflowing_width_is_malformed() {
        // 0x3d with bit 32 set in the fifth group
        let bytes = [0xbd, 0x80, 0x80, 0x80, 0x10];
        let mut r = ReadCursor::new(&bytes);
        assert!(matches!(
            r.read_var_u32(),
            Err(ProtocolError::MalformedVarint { offset: 0, max_bytes: 5 })
        ));
        assert_eq!(r.offset(), 0);
        assert!(matches!(
            ReadCursor::new(&bytes).read_var_i32(),
            Err(ProtocolError::MalformedVarint { .. })
        ));

        let mut bytes = vec![0xff; 9];
        bytes.push(0x02);
        assert!(matches!(
            ReadCursor::new(&bytes).read_var_u64(),
            Err(ProtocolError::MalformedVarint { max_bytes: 10, .. })
        ));
    }

    #[test]
    fn test_varint_truncated_is_eof() {
        let mut r = ReadCursor::new(&[0x80, 0x80]);
        assert!(matches!(
            r.read_var_u32(),
            Err(ProtocolError::UnexpectedEof { offset: 0, .. })
        ));
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn test_bool_read_is_lenient_write_is_canonical() {
        let mut r = ReadCursor::new(&[0x00, 0x01, 0x02, 0xff]);
        assert!(!r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());
        assert!(r.read_bool().unwrap());

        let mut w = WriteCursor::new();
        w.write_bool(true);
        w.write_bool(false);
        assert_eq!(w.as_slice(), &[0x01, 0x00]);
    }

    #[test]
    fn test_vector3_layout() {
        let mut w = WriteCursor::new();
        w.write_vector3(Vector3::new(1.0, -2.0, 0.5));
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(&bytes[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &(-2.0f32).to_le_bytes());
        assert_eq!(&bytes[8..12], &0.5f32.to_le_bytes());

        let mut r = ReadCursor::new(&bytes);
        assert_eq!(r.read_vector3().unwrap(), Vector3::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn test_short_vector3_consumes_nothing() {
        let bytes = [0u8; 11];
        let mut r = ReadCursor::new(&bytes);
        match r.read_vector3() {
            Err(ProtocolError::UnexpectedEof {
                needed, remaining, ..
            }) => {
                assert_eq!(needed, 12);
                assert_eq!(remaining, 11);
            }
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn test_read_on_empty_buffer() {
        let mut r = ReadCursor::new(&[]);
        assert!(matches!(r.read_u8(), Err(ProtocolError::UnexpectedEof { .. })));
        assert!(matches!(r.read_f32(), Err(ProtocolError::UnexpectedEof { .. })));
        assert_eq!(r.offset(), 0);
    }

    #[test]
    fn test_with_buffer_appends() {
        let mut prefix = BytesMut::new();
        prefix.put_u8(0xaa);
        let mut w = WriteCursor::with_buffer(prefix);
        w.write_u8(0xbb);
        assert_eq!(&w.into_inner()[..], &[0xaa, 0xbb]);
    }
}
