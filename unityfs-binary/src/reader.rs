//! Bounds-checked binary reader
//!
//! Every read checks the remaining length first and fails with
//! `TruncatedInput` instead of reading past the end of the view.

use crate::error::{BinaryError, Result};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::Cursor;

/// Byte order for reading binary data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Big endian (envelope and directory)
    Big,
    /// Little endian (serialized objects)
    #[default]
    Little,
}

/// Binary reader over a borrowed byte view
pub struct BinaryReader<'a> {
    cursor: Cursor<&'a [u8]>,
    byte_order: ByteOrder,
}

macro_rules! read_ordered {
    ($self:ident, $size:expr, $method:ident) => {{
        $self.ensure($size)?;
        match $self.byte_order {
            ByteOrder::Big => Ok($self.cursor.$method::<BigEndian>()?),
            ByteOrder::Little => Ok($self.cursor.$method::<LittleEndian>()?),
        }
    }};
}

impl<'a> BinaryReader<'a> {
    /// Create a new binary reader from byte slice
    pub fn new(data: &'a [u8], byte_order: ByteOrder) -> Self {
        Self {
            cursor: Cursor::new(data),
            byte_order,
        }
    }

    /// The whole underlying view
    pub fn data(&self) -> &'a [u8] {
        *self.cursor.get_ref()
    }

    /// Get current position in the view
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Set position in the view
    pub fn set_position(&mut self, pos: usize) -> Result<()> {
        if pos > self.len() {
            return Err(BinaryError::truncated(pos, self.len()));
        }
        self.cursor.set_position(pos as u64);
        Ok(())
    }

    /// Get the total length of the data
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    /// Check if the reader is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get remaining bytes from current position
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// Check if we have at least `count` bytes remaining
    pub fn has_bytes(&self, count: usize) -> bool {
        self.remaining() >= count
    }

    fn ensure(&self, count: usize) -> Result<()> {
        if self.has_bytes(count) {
            Ok(())
        } else {
            Err(BinaryError::truncated(count, self.remaining()))
        }
    }

    /// Align to the next 4-byte boundary
    pub fn align(&mut self) -> Result<()> {
        self.align_to(4)
    }

    /// Align to the specified byte boundary
    ///
    /// The aligned position is clamped to the end of the view, so padding
    /// missing from the tail of an object is not an error.
    pub fn align_to(&mut self, alignment: usize) -> Result<()> {
        if alignment == 0 {
            return Ok(());
        }
        let pos = self.position();
        let aligned = pos.div_ceil(alignment) * alignment;
        self.set_position(aligned.min(self.len()))
    }

    /// Advance the position by `count` bytes
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.cursor.set_position((self.position() + count) as u64);
        Ok(())
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.cursor.read_u8()?)
    }

    /// Read a boolean (as u8, 0 = false, non-zero = true)
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a signed 8-bit integer
    pub fn read_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.cursor.read_i8()?)
    }

    /// Read an unsigned 16-bit integer
    pub fn read_u16(&mut self) -> Result<u16> {
        read_ordered!(self, 2, read_u16)
    }

    /// Read a signed 16-bit integer
    pub fn read_i16(&mut self) -> Result<i16> {
        read_ordered!(self, 2, read_i16)
    }

    /// Read an unsigned 32-bit integer
    pub fn read_u32(&mut self) -> Result<u32> {
        read_ordered!(self, 4, read_u32)
    }

    /// Read a signed 32-bit integer
    pub fn read_i32(&mut self) -> Result<i32> {
        read_ordered!(self, 4, read_i32)
    }

    /// Read a 32-bit floating point number
    pub fn read_f32(&mut self) -> Result<f32> {
        read_ordered!(self, 4, read_f32)
    }

    /// Read a 64-bit floating point number
    pub fn read_f64(&mut self) -> Result<f64> {
        read_ordered!(self, 8, read_f64)
    }

    /// Borrow the next `count` bytes and advance past them
    pub fn read_slice(&mut self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        let start = self.position();
        let data: &'a [u8] = *self.cursor.get_ref();
        self.cursor.set_position((start + count) as u64);
        Ok(&data[start..start + count])
    }

    /// Read a fixed number of bytes into an owned buffer
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        Ok(self.read_slice(count)?.to_vec())
    }

    /// Read a null-terminated string, one character per byte
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = self.remaining_slice();
        let end = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| BinaryError::truncated(rest.len() + 1, rest.len()))?;
        let text = latin1(&rest[..end]);
        self.skip(end + 1)?;
        Ok(text)
    }

    /// Get the current byte order
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Set the byte order
    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.byte_order = byte_order;
    }

    /// Get a slice of the remaining data without advancing
    pub fn remaining_slice(&self) -> &'a [u8] {
        let data: &'a [u8] = *self.cursor.get_ref();
        &data[self.position().min(data.len())..]
    }

    /// Bounds-checked window into the underlying view, independent of position
    pub fn slice_view(&self, offset: usize, length: usize) -> Result<&'a [u8]> {
        let data: &'a [u8] = *self.cursor.get_ref();
        let end = offset
            .checked_add(length)
            .ok_or_else(|| BinaryError::truncated(usize::MAX, data.len()))?;
        if end > data.len() {
            return Err(BinaryError::truncated(end, data.len()));
        }
        Ok(&data[offset..end])
    }
}

/// Map each byte to the character with the same code point
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
