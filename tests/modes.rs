use rand::{thread_rng, Rng};

use modebreak::cipher::{Aes128, BlockCipher};
use modebreak::oracle::{gen_rand_iv, gen_rand_key};
use modebreak::{cbc, ctr, ecb, pkcs7, Error};

fn rand_msg(len: usize) -> Vec<u8> {
    let mut msg = vec![0_u8; len];
    thread_rng().fill(msg.as_mut_slice());
    msg
}

#[test]
fn ecb_round_trip() {
    let mut rng = thread_rng();

    for &len in &[0_usize, 1, 15, 16, 17, 64, 255] {
        let key = gen_rand_key(&mut rng);
        let msg = rand_msg(len);

        let cipher = ecb::encrypt::<Aes128>(&msg, &key).unwrap();
        assert_eq!(cipher.len() % 16, 0);
        assert!(cipher.len() > msg.len());

        assert_eq!(ecb::decrypt::<Aes128>(&cipher, &key).unwrap(), msg);
    }
}

#[test]
fn cbc_round_trip() {
    let mut rng = thread_rng();

    for &len in &[0_usize, 1, 15, 16, 17, 64, 255] {
        let key = gen_rand_key(&mut rng);
        let iv = gen_rand_iv(&mut rng);
        let msg = rand_msg(len);

        let cipher = cbc::encrypt::<Aes128>(&msg, &key, &iv).unwrap();
        assert_eq!(cipher.len() % 16, 0);

        assert_eq!(cbc::decrypt::<Aes128>(&cipher, &key, &iv).unwrap(), msg);
    }
}

#[test]
fn ctr_round_trip() {
    let mut rng = thread_rng();

    for &len in &[0_usize, 1, 15, 16, 17, 64, 255] {
        let key = gen_rand_key(&mut rng);
        let nonce = rng.gen::<u64>();
        let msg = rand_msg(len);

        let cipher = ctr::crypt::<Aes128>(&msg, &key, nonce).unwrap();
        // CTR never pads
        assert_eq!(cipher.len(), msg.len());

        assert_eq!(ctr::crypt::<Aes128>(&cipher, &key, nonce).unwrap(), msg);
    }
}

// key = 16 random bytes, plaintext = "YELLOW SUBMARINE", iv = 16 zero bytes
#[test]
fn cbc_yellow_submarine_zero_iv() {
    let key = gen_rand_key(&mut thread_rng());
    let iv = [0_u8; 16];
    let msg = b"YELLOW SUBMARINE";

    let cipher = cbc::encrypt::<Aes128>(msg.as_ref(), &key, &iv).unwrap();
    // one message block plus one full padding block
    assert_eq!(cipher.len(), 32);

    assert_eq!(cbc::decrypt::<Aes128>(&cipher, &key, &iv).unwrap(), msg.to_vec());
}

#[test]
fn modes_reject_bad_lengths() {
    let key = gen_rand_key(&mut thread_rng());
    let iv = [0_u8; 16];

    assert_eq!(
        ecb::decrypt::<Aes128>(&[0_u8; 33], &key),
        Err(Error::LengthMismatch)
    );
    assert_eq!(
        cbc::encrypt::<Aes128>(b"msg", &key, &iv[..12]),
        Err(Error::LengthMismatch)
    );
    assert_eq!(
        cbc::decrypt::<Aes128>(&[0_u8; 20], &key, &iv),
        Err(Error::LengthMismatch)
    );
}

// identity cipher with a non-16-byte block
struct Wide;

impl BlockCipher for Wide {
    type ExpandedKey = ();

    fn keylength() -> usize {
        1
    }

    fn blocksize() -> usize {
        32
    }

    fn expand_key(_key: &[u8]) -> modebreak::Result<()> {
        Ok(())
    }

    fn encrypt(block: &[u8], _expkey: &()) -> modebreak::Result<Vec<u8>> {
        Ok(block.to_vec())
    }

    fn decrypt(block: &[u8], _expkey: &()) -> modebreak::Result<Vec<u8>> {
        Ok(block.to_vec())
    }
}

// CTR packs an 8-byte nonce and an 8-byte counter into one block
#[test]
fn ctr_requires_16_byte_blocks() {
    assert_eq!(
        ctr::crypt::<Wide>(b"msg", &[0xbb], 0),
        Err(Error::InvalidArgument)
    );
    // the mode layer itself works for other blocksizes
    let cipher = ecb::encrypt::<Wide>(b"msg", &[0xbb]).unwrap();
    assert_eq!(ecb::decrypt::<Wide>(&cipher, &[0xbb]).unwrap(), b"msg".to_vec());
}

#[test]
fn pad_unpad_property() {
    let mut rng = thread_rng();

    for blocksize in 1..=255_usize {
        let msg = rand_msg(rng.gen_range::<usize, usize, usize>(0, 64));
        let padded = pkcs7::pad(&msg, blocksize).unwrap();

        // pad appends between 1 and blocksize bytes
        let appended = padded.len() - msg.len();
        assert!(appended >= 1 && appended <= blocksize);
        assert_eq!(padded.len() % blocksize, 0);

        assert_eq!(pkcs7::unpad(&padded).unwrap(), msg);
    }
}

#[test]
fn primitive_failure_discards_output() {
    // wrong key length surfaces from key expansion, not from mid-stream
    assert_eq!(
        ecb::encrypt::<Aes128>(b"msg", &[0xab; 7]),
        Err(Error::Primitive)
    );
}
