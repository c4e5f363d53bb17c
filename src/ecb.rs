use alloc::vec::Vec;

use crate::cipher::BlockCipher;
use crate::error::{Error, Result};
use crate::pkcs7;

/// Encrypt a message under `key` in ECB mode
///
/// The message is PKCS#7 padded to the cipher blocksize, then every block is
/// encrypted independently. The key is expanded once for the whole call.
pub fn encrypt<C: BlockCipher>(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let expkey = C::expand_key(key)?;
    let padded = pkcs7::pad(plaintext, C::blocksize())?;

    let mut ciphertext = Vec::with_capacity(padded.len());
    for block in padded.chunks_exact(C::blocksize()) {
        ciphertext.extend_from_slice(&C::encrypt(block, &expkey)?);
    }

    Ok(ciphertext)
}

/// Decrypt an ECB ciphertext under `key` and strip the padding
///
/// The ciphertext length must be a multiple of the cipher blocksize
pub fn decrypt<C: BlockCipher>(ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    let blocksize = C::blocksize();
    if ciphertext.len() % blocksize != 0 {
        return Err(Error::LengthMismatch);
    }

    let expkey = C::expand_key(key)?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    for block in ciphertext.chunks_exact(blocksize) {
        plaintext.extend_from_slice(&C::decrypt(block, &expkey)?);
    }

    pkcs7::unpad(&plaintext)
}
