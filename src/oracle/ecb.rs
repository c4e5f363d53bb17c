use alloc::vec::Vec;

use rand::thread_rng;

use crate::break_ecb::EncryptionOracle;
use crate::cipher::{Aes128, AES_128_KEY_LEN};
use crate::ecb;
use crate::error::Result;

use super::{gen_rand_bytes, gen_rand_key};

// Upper limit for the randomized prefix length (exclusive)
const RAND_PREFIX_HI: usize = 33;

/// ECB oracle hiding a key, a fixed prefix and a fixed secret suffix
///
/// Encrypts `prefix || payload || secret` under AES-128-ECB. The key is
/// generated at construction and fixed for the oracle's lifetime; it never
/// leaves the oracle.
pub struct SecretSuffixOracle {
    key: [u8; AES_128_KEY_LEN],
    prefix: Vec<u8>,
    secret: Vec<u8>,
}

impl SecretSuffixOracle {
    /// Create an oracle with the given prefix and secret and a random key
    pub fn new(prefix: Vec<u8>, secret: Vec<u8>) -> Self {
        Self {
            key: gen_rand_key(&mut thread_rng()),
            prefix,
            secret,
        }
    }

    /// Create an oracle with a random prefix (up to 32 bytes, possibly
    /// empty) in front of the given secret
    pub fn with_random_prefix(secret: Vec<u8>) -> Self {
        let mut rng = thread_rng();

        // range is valid, cannot fail
        let prefix = gen_rand_bytes(&mut rng, 0, RAND_PREFIX_HI).unwrap();

        Self {
            key: gen_rand_key(&mut rng),
            prefix,
            secret,
        }
    }

    /// Encrypt a chosen payload between the hidden prefix and secret
    pub fn encrypt(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let plaintext = [&self.prefix[..], payload, &self.secret[..]].concat();
        ecb::encrypt::<Aes128>(&plaintext, &self.key)
    }
}

impl EncryptionOracle for SecretSuffixOracle {
    fn query(&self, payload: &[u8]) -> Result<Vec<u8>> {
        self.encrypt(payload)
    }
}
