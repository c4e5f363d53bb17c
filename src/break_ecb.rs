//! Chosen-plaintext byte-at-a-time recovery of an ECB oracle's hidden
//! suffix, tolerant of an unknown, non-aligned prefix

use alloc::vec;
use alloc::vec::Vec;

use crate::detect;
use crate::error::{Error, Result};

// Filler byte for chosen payloads
const FILL: u8 = 0x41;

// Largest blocksize the discovery probe will accept
const MAX_BLOCKSIZE: usize = 256;

/// Chosen-plaintext encryption oracle attacked by [`recover_secret`]
///
/// A query encrypts `prefix || payload || secret` in ECB mode under hidden
/// state (key, prefix, secret) that stays fixed across all calls of one
/// attack run. Transport failures are `Err` and abort the attack; the
/// breaker never sees the key.
pub trait EncryptionOracle {
    /// Encrypt the chosen payload between the hidden prefix and secret
    fn query(&self, payload: &[u8]) -> Result<Vec<u8>>;
}

impl<F> EncryptionOracle for F
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    fn query(&self, payload: &[u8]) -> Result<Vec<u8>> {
        self(payload)
    }
}

/// Recover the oracle's hidden secret suffix, byte for byte
///
/// Works for any prefix content and length. Fails with
/// `Error::AttackAborted` when the oracle does not behave like a fixed-state
/// ECB oracle; any oracle error aborts the run with no partial result.
pub fn recover_secret<O: EncryptionOracle>(oracle: &O) -> Result<Vec<u8>> {
    recover_secret_with_cancel(oracle, || false)
}

/// Same attack with a caller cancellation hook
///
/// The hook is consulted once per recovered byte, never inside the 256-value
/// candidate scan. Cancellation yields `Error::Cancelled` and no partial
/// result.
pub fn recover_secret_with_cancel<O, F>(oracle: &O, cancel: F) -> Result<Vec<u8>>
where
    O: EncryptionOracle,
    F: Fn() -> bool,
{
    let (blocksize, total) = probe_geometry(oracle)?;
    let prefixlen = probe_prefix_len(oracle, blocksize)?;

    if total < prefixlen {
        // measurements disagree, the hidden state moved under us
        return Err(Error::AttackAborted);
    }

    recover_bytes(oracle, cancel, blocksize, prefixlen, total - prefixlen)
}

// Grow the payload one byte at a time until the ciphertext jumps by a whole
// block: the jump size is the blocksize, and the length right at the jump
// pins down the combined prefix+secret length (the jump means the padding
// just became one full block).
fn probe_geometry<O: EncryptionOracle>(oracle: &O) -> Result<(usize, usize)> {
    let mut prev = oracle.query(&[])?.len();

    for i in 1..=MAX_BLOCKSIZE {
        let len = oracle.query(&vec![FILL; i])?.len();
        if len > prev {
            let blocksize = len - prev;
            let total = len - i - blocksize;
            return Ok((blocksize, total));
        }
        prev = len;
    }

    Err(Error::AttackAborted)
}

// Four identical payload blocks guarantee at least three identical aligned
// ciphertext blocks right after the prefix; the offset of that run is the
// prefix length rounded up to a block boundary. No run at any offset means
// the target is not an ECB oracle.
fn probe_prefix_len<O: EncryptionOracle>(oracle: &O, blocksize: usize) -> Result<usize> {
    let cipher = oracle.query(&vec![FILL; 4 * blocksize])?;

    let mut offset = 0;
    while offset + 3 * blocksize <= cipher.len() {
        if detect::score(&cipher[offset..offset + 3 * blocksize], blocksize)? == 1.0 {
            if offset == 0 {
                return Ok(0);
            }
            return refine_prefix_len(oracle, blocksize, offset);
        }
        offset += blocksize;
    }

    Err(Error::AttackAborted)
}

// The boundary block is the last block the prefix touches. Build one-block
// baselines with two different fill values, then shrink the payload a byte
// at a time: the first length where the boundary block diverges from both
// baselines is where the secret's first byte slid into the block. Trying
// both fill values guards against a secret byte that happens to equal the
// probe byte. No divergence at all means the prefix fills the boundary
// block exactly.
fn refine_prefix_len<O: EncryptionOracle>(
    oracle: &O,
    blocksize: usize,
    ceiling: usize,
) -> Result<usize> {
    let bstart = ceiling - blocksize;

    let base0 = oracle.query(&vec![0x00; blocksize])?[bstart..ceiling].to_vec();
    let base1 = oracle.query(&vec![0x01; blocksize])?[bstart..ceiling].to_vec();

    for len in (0..blocksize).rev() {
        let ct0 = oracle.query(&vec![0x00; len])?;
        let ct1 = oracle.query(&vec![0x01; len])?;

        if ct0[bstart..ceiling] != base0[..] || ct1[bstart..ceiling] != base1[..] {
            return Ok(ceiling - len - 1);
        }
    }

    Ok(ceiling)
}

// Byte recovery proper: park the next unknown secret byte on the last
// position of a block-aligned target block, then find the candidate byte
// whose chosen-plaintext ciphertext matches it.
fn recover_bytes<O, F>(
    oracle: &O,
    cancel: F,
    blocksize: usize,
    prefixlen: usize,
    secretlen: usize,
) -> Result<Vec<u8>>
where
    O: EncryptionOracle,
    F: Fn() -> bool,
{
    // payload bytes needed to push the prefix to a block boundary
    let fill = (blocksize - prefixlen % blocksize) % blocksize;
    // block-aligned start of the attacker-controlled window
    let base = prefixlen + fill;
    // blocks needed to hold the full secret
    let nblock = secretlen / blocksize + 1;
    // the target block, last of the controlled window
    let boffset = base + (nblock - 1) * blocksize;

    let mut recovered: Vec<u8> = Vec::with_capacity(secretlen);

    for i in 1..=secretlen {
        if cancel() {
            return Err(Error::Cancelled);
        }

        // payload length that parks secret[i-1] on the target block's last
        // byte when the secret follows naturally
        let index = nblock * blocksize - i;

        let reference = oracle.query(&vec![FILL; fill + index])?;
        let want = &reference[boffset..boffset + blocksize];

        // attempt is fill || 'A' * index || recovered || candidate, placing
        // the candidate byte exactly where secret[i-1] sat in the reference
        let mut attempt = vec![FILL; fill + index];
        attempt.extend_from_slice(&recovered);
        attempt.push(0x00);
        let last = attempt.len() - 1;

        let mut found = None;
        for candidate in 0x00..=0xff {
            attempt[last] = candidate;
            let cipher = oracle.query(&attempt)?;
            if cipher[boffset..boffset + blocksize] == want[..] {
                found = Some(candidate);
                break;
            }
        }

        match found {
            Some(byte) => recovered.push(byte),
            None => return Err(Error::AttackAborted),
        }
    }

    Ok(recovered)
}
