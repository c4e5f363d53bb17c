use alloc::vec::Vec;

use crate::error::{Error, Result};

/// Pad a message to a multiple of `blocksize` with PKCS#7
///
/// Appends between 1 and `blocksize` bytes, each equal to the count of bytes
/// appended. A message already block-aligned gains a full block of padding,
/// so removal is never ambiguous.
///
/// Blocksize must be in `1..=255` (the pad value is a single byte)
pub fn pad(buf: &[u8], blocksize: usize) -> Result<Vec<u8>> {
    if blocksize == 0 || blocksize > 255 {
        return Err(Error::InvalidArgument);
    }

    let count = blocksize - buf.len() % blocksize;

    let mut padded = Vec::with_capacity(buf.len() + count);
    padded.extend_from_slice(buf);
    padded.resize(buf.len() + count, count as u8);

    Ok(padded)
}

/// Remove PKCS#7 padding from a message
///
/// Fails with `Error::Padding` when the final byte is zero, larger than the
/// message, or the trailing run is not uniform
pub fn unpad(buf: &[u8]) -> Result<Vec<u8>> {
    let count = *buf.last().ok_or(Error::Padding)? as usize;

    if count == 0 || count > buf.len() {
        return Err(Error::Padding);
    }

    let (msg, padding) = buf.split_at(buf.len() - count);

    if !padding.iter().all(|&b| b as usize == count) {
        return Err(Error::Padding);
    }

    Ok(msg.to_vec())
}
