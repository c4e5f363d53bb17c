use alloc::vec::Vec;

use crate::bytes;
use crate::cipher::BlockCipher;
use crate::error::{Error, Result};

/// Encrypt or decrypt a message in CTR mode (the transform is its own
/// inverse)
///
/// The keystream block for index `i` is the encryption of the 8-byte
/// little-endian nonce followed by the 8-byte little-endian `i`, so the
/// cipher blocksize must be 16. The input is never padded; the final
/// keystream block is truncated to the remaining input length.
pub fn crypt<C: BlockCipher>(input: &[u8], key: &[u8], nonce: u64) -> Result<Vec<u8>> {
    let blocksize = C::blocksize();
    if blocksize != 16 {
        return Err(Error::InvalidArgument);
    }

    let expkey = C::expand_key(key)?;

    let mut counter = [0_u8; 16];
    counter[..8].copy_from_slice(&nonce.to_le_bytes());

    let mut output = Vec::with_capacity(input.len());
    for (i, chunk) in input.chunks(blocksize).enumerate() {
        counter[8..].copy_from_slice(&(i as u64).to_le_bytes());

        let mut stream = C::encrypt(&counter, &expkey)?;
        stream.truncate(chunk.len());
        bytes::xor_assign(&mut stream, chunk);

        output.extend_from_slice(&stream);
    }

    Ok(output)
}
