use alloc::vec::Vec;

use crate::bytes;
use crate::cipher::BlockCipher;
use crate::error::{Error, Result};
use crate::pkcs7;

/// Encrypt a message under `key` in CBC mode
///
/// Each padded plaintext block is XORed with the previous ciphertext block
/// (the IV for the first) before encryption. The IV length must equal the
/// cipher blocksize.
pub fn encrypt<C: BlockCipher>(plaintext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let blocksize = C::blocksize();
    if iv.len() != blocksize {
        return Err(Error::LengthMismatch);
    }

    let expkey = C::expand_key(key)?;
    let padded = pkcs7::pad(plaintext, blocksize)?;

    let mut ciphertext = Vec::with_capacity(padded.len());
    let mut prev = iv.to_vec();
    for block in padded.chunks_exact(blocksize) {
        let mut input = block.to_vec();
        bytes::xor_assign(&mut input, &prev);
        prev = C::encrypt(&input, &expkey)?;
        ciphertext.extend_from_slice(&prev);
    }

    Ok(ciphertext)
}

/// Decrypt a CBC ciphertext under `key` and strip the padding
///
/// The chaining value for each block is the previous *ciphertext* block,
/// never the recovered plaintext. The ciphertext length must be a multiple
/// of the cipher blocksize, and the IV length must equal it.
pub fn decrypt<C: BlockCipher>(ciphertext: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let blocksize = C::blocksize();
    if iv.len() != blocksize || ciphertext.len() % blocksize != 0 {
        return Err(Error::LengthMismatch);
    }

    let expkey = C::expand_key(key)?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    let mut prev: &[u8] = iv;
    for block in ciphertext.chunks_exact(blocksize) {
        let mut output = C::decrypt(block, &expkey)?;
        bytes::xor_assign(&mut output, prev);
        plaintext.extend_from_slice(&output);
        prev = block;
    }

    pkcs7::unpad(&plaintext)
}
