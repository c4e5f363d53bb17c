use alloc::vec::Vec;

use rand::thread_rng;

use crate::break_cbc::PaddingOracle;
use crate::cbc;
use crate::cipher::{Aes128, AES_128_KEY_LEN};
use crate::error::{Error, Result};

use super::gen_rand_key;

/// AES-128-CBC encryption oracle exposing a padding-validity side channel
///
/// The key is generated at construction and fixed for the oracle's
/// lifetime. Decrypted bytes never leave the oracle; only the padding
/// verdict does. Obviously, do not open this side channel in practice.
pub struct CbcPaddingOracle {
    key: [u8; AES_128_KEY_LEN],
}

impl CbcPaddingOracle {
    /// Create an oracle with a fresh random key
    pub fn new() -> Self {
        Self {
            key: gen_rand_key(&mut thread_rng()),
        }
    }

    /// Encrypt a plaintext under the hidden key
    pub fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
        cbc::encrypt::<Aes128>(plaintext, &self.key, iv)
    }

    /// Whether the ciphertext decrypts to well-formed PKCS#7 padding
    ///
    /// A padding failure is an ordinary `false` verdict; every other
    /// decryption failure is surfaced as an error
    pub fn valid(&self, ciphertext: &[u8], iv: &[u8]) -> Result<bool> {
        match cbc::decrypt::<Aes128>(ciphertext, &self.key, iv) {
            Ok(_) => Ok(true),
            Err(Error::Padding) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl Default for CbcPaddingOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl PaddingOracle for CbcPaddingOracle {
    fn check(&self, ciphertext: &[u8], iv: &[u8]) -> Result<bool> {
        self.valid(ciphertext, iv)
    }
}
