use hashbrown::HashMap;

use crate::error::{Error, Result};

/// Score block collisions in a buffer
///
/// Partitions the buffer into whole blocks (trailing partial bytes are
/// ignored) and returns the fraction of unordered block pairs with identical
/// bytes. A score of 1.0 over three or more blocks is a reliable ECB
/// fingerprint; CBC and CTR output scores near zero with overwhelming
/// probability.
///
/// Fails when the blocksize is zero or fewer than two whole blocks exist
pub fn score(buf: &[u8], blocksize: usize) -> Result<f64> {
    if blocksize == 0 {
        return Err(Error::InvalidArgument);
    }

    let nblocks = buf.len() / blocksize;
    if nblocks < 2 {
        return Err(Error::InvalidArgument);
    }

    // census of identical blocks
    let mut census: HashMap<&[u8], usize> = HashMap::new();
    for block in buf.chunks_exact(blocksize) {
        *census.entry(block).or_insert(0) += 1;
    }

    // unordered pairs drawn within each set of identical blocks
    let matches: usize = census.values().map(|&count| count * (count - 1) / 2).sum();
    let pairs = nblocks * (nblocks - 1) / 2;

    Ok(matches as f64 / pairs as f64)
}

/// Whether the buffer bears the full-collision ECB fingerprint
pub fn is_ecb(buf: &[u8], blocksize: usize) -> Result<bool> {
    Ok(score(buf, blocksize)? == 1.0)
}
