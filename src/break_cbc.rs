//! Chosen-ciphertext recovery of a CBC plaintext through a PKCS#7
//! padding-validity side channel

use alloc::vec;
use alloc::vec::Vec;

use crate::bytes;
use crate::error::{Error, Result};
use crate::pkcs7;

/// Padding-validity oracle attacked by [`recover_plaintext`]
///
/// A check decrypts `ciphertext` in CBC mode under a hidden key with the
/// forged chaining value `iv` and reports only whether the PKCS#7 padding of
/// the result is well formed. A negative verdict is ordinary data;
/// transport failures are `Err` and abort the attack immediately.
pub trait PaddingOracle {
    /// Whether the ciphertext decrypts to well-formed padding under `iv`
    fn check(&self, ciphertext: &[u8], iv: &[u8]) -> Result<bool>;
}

impl<F> PaddingOracle for F
where
    F: Fn(&[u8], &[u8]) -> Result<bool>,
{
    fn check(&self, ciphertext: &[u8], iv: &[u8]) -> Result<bool> {
        self(ciphertext, iv)
    }
}

/// Recover the full plaintext of a CBC ciphertext from its padding oracle
///
/// The blocksize is taken from the IV length and must be at least 2 (the
/// padding-length disambiguation inspects the byte before the candidate)
/// and at most 255. Each block is recovered independently from its own
/// ciphertext pair, then the assembled plaintext is unpadded.
///
/// Exhausting a candidate scan without a consistent verdict yields
/// `Error::AttackAborted` and no partial result.
pub fn recover_plaintext<O: PaddingOracle>(
    oracle: &O,
    ciphertext: &[u8],
    iv: &[u8],
) -> Result<Vec<u8>> {
    recover_plaintext_with_cancel(oracle, ciphertext, iv, || false)
}

/// Same attack with a caller cancellation hook
///
/// The hook is consulted once per recovered byte, never inside the
/// 256-value candidate scan. Cancellation yields `Error::Cancelled` and no
/// partial result.
pub fn recover_plaintext_with_cancel<O, F>(
    oracle: &O,
    ciphertext: &[u8],
    iv: &[u8],
    cancel: F,
) -> Result<Vec<u8>>
where
    O: PaddingOracle,
    F: Fn() -> bool,
{
    let blocksize = iv.len();
    if blocksize < 2 || blocksize > 255 {
        return Err(Error::InvalidArgument);
    }
    if ciphertext.is_empty() || ciphertext.len() % blocksize != 0 {
        return Err(Error::LengthMismatch);
    }

    let mut plaintext = Vec::with_capacity(ciphertext.len());

    // each block depends only on its own chaining value, so blocks are
    // independent of each other's recovered plaintext
    let mut chain: &[u8] = iv;
    for block in ciphertext.chunks_exact(blocksize) {
        let inter = recover_intermediate(oracle, block, chain, &cancel)?;
        plaintext.extend_from_slice(&bytes::xor(&inter, chain));
        chain = block;
    }

    pkcs7::unpad(&plaintext)
}

// Recover the intermediate state of one block, i.e. the raw block
// decryption before the chaining XOR, from the last byte to the first.
//
// For target padding length p, the forged chaining block pins every
// already-recovered tail byte to decrypt to p, then scans the candidate
// byte: a valid verdict means the candidate XOR p is the intermediate
// byte.
fn recover_intermediate<O, F>(
    oracle: &O,
    block: &[u8],
    chain: &[u8],
    cancel: &F,
) -> Result<Vec<u8>>
where
    O: PaddingOracle,
    F: Fn() -> bool,
{
    let blocksize = block.len();
    let mut inter = vec![0_u8; blocksize];

    for p in 1..=blocksize {
        if cancel() {
            return Err(Error::Cancelled);
        }

        let idx = blocksize - p;
        let mut forged = chain.to_vec();
        for j in idx + 1..blocksize {
            forged[j] = inter[j] ^ p as u8;
        }

        let found = if p == 1 {
            scan_last_byte(oracle, block, &mut forged)?
        } else {
            scan_byte(oracle, block, &mut forged, idx)?
        };

        match found {
            Some(byte) => inter[idx] = byte ^ p as u8,
            None => return Err(Error::AttackAborted),
        }
    }

    Ok(inter)
}

// Candidate scan for padding lengths >= 2: the forged tail already pins the
// trailing bytes to p, so the first valid verdict is the answer.
fn scan_byte<O: PaddingOracle>(
    oracle: &O,
    block: &[u8],
    forged: &mut [u8],
    idx: usize,
) -> Result<Option<u8>> {
    for candidate in 0x00..=0xff {
        forged[idx] = candidate;
        if oracle.check(block, forged)? {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}

// Candidate scan for padding length 1. A valid verdict can be a false
// positive when the second-to-last plaintext byte happens to extend the
// padding (e.g. it equals 2 and the candidate makes the last byte 2), so
// every valid candidate is re-checked with the second-to-last forged byte
// disturbed: a true positive stays valid, a false positive flips to
// invalid. Anything but exactly one confirmed candidate means the oracle
// broke an attack assumption.
fn scan_last_byte<O: PaddingOracle>(
    oracle: &O,
    block: &[u8],
    forged: &mut [u8],
) -> Result<Option<u8>> {
    let last = forged.len() - 1;
    let mut confirmed = None;

    for candidate in 0x00..=0xff {
        forged[last] = candidate;
        if !oracle.check(block, forged)? {
            continue;
        }

        forged[last - 1] ^= 1;
        let still_valid = oracle.check(block, forged)?;
        forged[last - 1] ^= 1;

        if still_valid && confirmed.replace(candidate).is_some() {
            // two confirmed candidates cannot both decrypt to 0x01
            return Ok(None);
        }
    }

    Ok(confirmed)
}
