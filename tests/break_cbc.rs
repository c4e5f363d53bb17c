use rand::{thread_rng, Rng};

use modebreak::break_cbc::{recover_plaintext, recover_plaintext_with_cancel};
use modebreak::oracle::{gen_rand_iv, CbcPaddingOracle};
use modebreak::{Error, Result};

fn rand_msg(len: usize) -> Vec<u8> {
    let mut msg = vec![0_u8; len];
    thread_rng().fill(msg.as_mut_slice());
    msg
}

#[test]
fn recovers_plaintexts_of_every_alignment() {
    for &len in &[0_usize, 1, 15, 16, 17, 37, 200] {
        let msg = rand_msg(len);
        let iv = gen_rand_iv(&mut thread_rng());

        let oracle = CbcPaddingOracle::new();
        let cipher = oracle.encrypt(&msg, &iv).unwrap();

        assert_eq!(recover_plaintext(&oracle, &cipher, &iv).unwrap(), msg);
    }
}

// three-block ciphertext hiding ";admin=true;", recovered byte for byte
#[test]
fn recovers_admin_tuple() {
    let msg = b"comment1=cooking%20MCs;admin=true;comment2=x";
    let iv = gen_rand_iv(&mut thread_rng());

    let oracle = CbcPaddingOracle::new();
    let cipher = oracle.encrypt(msg.as_ref(), &iv).unwrap();
    assert_eq!(cipher.len(), 48);

    let plaintext = recover_plaintext(&oracle, &cipher, &iv).unwrap();
    assert_eq!(plaintext, msg.to_vec());
}

// an oracle that always answers "valid" must abort the attack instead of
// returning a silently wrong plaintext
#[test]
fn always_valid_oracle_aborts() {
    let msg = b"comment1=cooking%20MCs;admin=true;comment2=x";
    let iv = gen_rand_iv(&mut thread_rng());

    let honest = CbcPaddingOracle::new();
    let cipher = honest.encrypt(msg.as_ref(), &iv).unwrap();

    let corrupted = |_: &[u8], _: &[u8]| -> Result<bool> { Ok(true) };
    assert_eq!(
        recover_plaintext(&corrupted, &cipher, &iv),
        Err(Error::AttackAborted)
    );
}

#[test]
fn oracle_failure_aborts_without_guessing() {
    let iv = gen_rand_iv(&mut thread_rng());
    let failing = |_: &[u8], _: &[u8]| -> Result<bool> { Err(Error::Oracle) };

    assert_eq!(
        recover_plaintext(&failing, &[0_u8; 32], &iv),
        Err(Error::Oracle)
    );
}

#[test]
fn cancellation_stops_byte_recovery() {
    let msg = rand_msg(16);
    let iv = gen_rand_iv(&mut thread_rng());

    let oracle = CbcPaddingOracle::new();
    let cipher = oracle.encrypt(&msg, &iv).unwrap();

    assert_eq!(
        recover_plaintext_with_cancel(&oracle, &cipher, &iv, || true),
        Err(Error::Cancelled)
    );
}

#[test]
fn argument_contracts() {
    let oracle = CbcPaddingOracle::new();

    // blocksize below 2 cannot host the disambiguation probe
    assert_eq!(
        recover_plaintext(&oracle, &[0_u8; 16], &[0xaa]),
        Err(Error::InvalidArgument)
    );
    let iv = gen_rand_iv(&mut thread_rng());
    assert_eq!(
        recover_plaintext(&oracle, &[0_u8; 20], &iv),
        Err(Error::LengthMismatch)
    );
}
