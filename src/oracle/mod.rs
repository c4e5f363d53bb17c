//! Sample vulnerable oracles built on the mode engine
//!
//! These are the collaborators the attack engines are exercised against in
//! tests. Hidden keys are private fields: the attacker code never sees
//! them.

use alloc::vec;
use alloc::vec::Vec;

use rand::rngs::ThreadRng;
use rand::{Rng, RngCore};

use crate::cipher::{AES_128_BLOCK_LEN, AES_128_KEY_LEN};
use crate::error::{Error, Result};

mod cbc;
mod ecb;

pub use cbc::CbcPaddingOracle;
pub use ecb::SecretSuffixOracle;

/// Generate a random AES-128 key
pub fn gen_rand_key(rng: &mut ThreadRng) -> [u8; AES_128_KEY_LEN] {
    let mut key = [0_u8; AES_128_KEY_LEN];
    rng.fill_bytes(&mut key);
    key
}

/// Generate a random AES-128-CBC IV
pub fn gen_rand_iv(rng: &mut ThreadRng) -> [u8; AES_128_BLOCK_LEN] {
    let mut iv = [0_u8; AES_128_BLOCK_LEN];
    rng.fill_bytes(&mut iv);
    iv
}

/// Generate random bytes with a length drawn from `[lo, hi)`
pub fn gen_rand_bytes(rng: &mut ThreadRng, lo: usize, hi: usize) -> Result<Vec<u8>> {
    if lo >= hi {
        return Err(Error::InvalidArgument);
    }

    let len = rng.gen_range::<usize, usize, usize>(lo, hi);
    let mut bytes = vec![0_u8; len];

    rng.fill(bytes.as_mut_slice());

    Ok(bytes)
}
