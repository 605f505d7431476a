//! Bounds-checked big-endian reads over a message buffer.
//!
//! Every read reports `WireError::Truncated` instead of panicking so that
//! attacker-controlled datagrams can never index past the end of the buffer.

use crate::errors::WireError;

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8, WireError> {
    buf.get(offset)
        .copied()
        .ok_or(WireError::Truncated { offset, needed: 1 })
}

pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16, WireError> {
    let bytes = read_slice(buf, offset, 2)?;
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32, WireError> {
    let bytes = read_slice(buf, offset, 4)?;
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

pub fn read_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], WireError> {
    let end = offset
        .checked_add(len)
        .ok_or(WireError::Truncated { offset, needed: len })?;
    buf.get(offset..end)
        .ok_or(WireError::Truncated { offset, needed: len })
}

#[inline]
pub fn bit(value: u16, position: u32) -> bool {
    (value >> position) & 0x01 == 1
}

#[inline]
pub fn set_bit(value: bool, position: u32) -> u16 {
    u16::from(value) << position
}
