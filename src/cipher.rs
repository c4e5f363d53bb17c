use alloc::vec::Vec;

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

use crate::error::{Error, Result};

/// AES-128 key length in bytes
pub const AES_128_KEY_LEN: usize = 16;
/// AES-128 block length in bytes
pub const AES_128_BLOCK_LEN: usize = 16;

/// A fixed-blocksize keyed permutation and its inverse
///
/// The mode-of-operation transforms are generic over this capability, never
/// over a concrete cipher. The expanded key is derived once per mode call
/// and reused immutably for every block of that call.
pub trait BlockCipher {
    /// Opaque, primitive-specific expanded key
    type ExpandedKey;

    /// Expected key length in bytes
    fn keylength() -> usize;

    /// Block size in bytes, fixed and non-zero
    fn blocksize() -> usize;

    /// Derive the expanded key from raw key bytes
    fn expand_key(key: &[u8]) -> Result<Self::ExpandedKey>;

    /// Encrypt a single block of exactly `blocksize()` bytes
    fn encrypt(block: &[u8], expkey: &Self::ExpandedKey) -> Result<Vec<u8>>;

    /// Decrypt a single block of exactly `blocksize()` bytes
    fn decrypt(block: &[u8], expkey: &Self::ExpandedKey) -> Result<Vec<u8>>;
}

/// AES-128 primitive backed by the RustCrypto `aes` crate
pub struct Aes128;

impl BlockCipher for Aes128 {
    type ExpandedKey = aes::Aes128;

    fn keylength() -> usize {
        AES_128_KEY_LEN
    }

    fn blocksize() -> usize {
        AES_128_BLOCK_LEN
    }

    fn expand_key(key: &[u8]) -> Result<Self::ExpandedKey> {
        aes::Aes128::new_from_slice(key).map_err(|_| Error::Primitive)
    }

    fn encrypt(block: &[u8], expkey: &Self::ExpandedKey) -> Result<Vec<u8>> {
        if block.len() != Self::blocksize() {
            return Err(Error::LengthMismatch);
        }

        let mut buf = GenericArray::clone_from_slice(block);
        expkey.encrypt_block(&mut buf);

        Ok(buf.to_vec())
    }

    fn decrypt(block: &[u8], expkey: &Self::ExpandedKey) -> Result<Vec<u8>> {
        if block.len() != Self::blocksize() {
            return Err(Error::LengthMismatch);
        }

        let mut buf = GenericArray::clone_from_slice(block);
        expkey.decrypt_block(&mut buf);

        Ok(buf.to_vec())
    }
}

/// Identity permutation with a 16-byte block
///
/// Exercises the mode layer without any real cryptography; the ciphertext
/// equals the chained input, which makes mode tests readable by hand.
pub struct Nope;

impl BlockCipher for Nope {
    type ExpandedKey = ();

    fn keylength() -> usize {
        1
    }

    fn blocksize() -> usize {
        16
    }

    fn expand_key(key: &[u8]) -> Result<Self::ExpandedKey> {
        if key.len() != Self::keylength() {
            return Err(Error::Primitive);
        }

        Ok(())
    }

    fn encrypt(block: &[u8], _expkey: &Self::ExpandedKey) -> Result<Vec<u8>> {
        if block.len() != Self::blocksize() {
            return Err(Error::LengthMismatch);
        }

        Ok(block.to_vec())
    }

    fn decrypt(block: &[u8], _expkey: &Self::ExpandedKey) -> Result<Vec<u8>> {
        if block.len() != Self::blocksize() {
            return Err(Error::LengthMismatch);
        }

        Ok(block.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS-197 appendix C.1 example vector
    const FIPS_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
        0x0e, 0x0f,
    ];
    const FIPS_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
        0xee, 0xff,
    ];
    const FIPS_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4,
        0xc5, 0x5a,
    ];

    #[test]
    fn aes_128_known_vector() {
        let expkey = Aes128::expand_key(&FIPS_KEY).unwrap();

        let cipher = Aes128::encrypt(&FIPS_PLAIN, &expkey).unwrap();
        assert_eq!(cipher[..], FIPS_CIPHER[..]);

        let plain = Aes128::decrypt(&cipher, &expkey).unwrap();
        assert_eq!(plain[..], FIPS_PLAIN[..]);
    }

    #[test]
    fn aes_128_rejects_bad_lengths() {
        assert_eq!(Aes128::expand_key(&[0xab; 24]).unwrap_err(), Error::Primitive);

        let expkey = Aes128::expand_key(&FIPS_KEY).unwrap();
        assert_eq!(
            Aes128::encrypt(&[0_u8; 15], &expkey),
            Err(Error::LengthMismatch)
        );
        assert_eq!(
            Aes128::decrypt(&[0_u8; 17], &expkey),
            Err(Error::LengthMismatch)
        );
    }

    #[test]
    fn nope_is_identity() {
        let expkey = Nope::expand_key(&[0xbb]).unwrap();
        let block = [0x41_u8; 16];

        assert_eq!(Nope::encrypt(&block, &expkey).unwrap()[..], block[..]);
        assert_eq!(Nope::decrypt(&block, &expkey).unwrap()[..], block[..]);
        assert_eq!(Nope::encrypt(&[0_u8; 8], &expkey), Err(Error::LengthMismatch));
    }
}
