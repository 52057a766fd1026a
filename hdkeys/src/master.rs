//! Master-key generation from seed material.
//!
//! Four schemes: the BIP32/SLIP-0010 HMAC construction, the BIP32-Ed25519
//! paper construction for Cardano extended keys, the Byron-legacy CBOR
//! construction and the Icarus PBKDF2 construction. All but Icarus retry
//! until the key material validates; the loops are capped so a bad input
//! cannot spin forever.

use crate::curve::Curve;
use crate::error::Bip32Error;
use crate::keys::PrivateKey;
use crypto_utils::hash::sha512;
use crypto_utils::hmac::{hmac_sha256, hmac_sha512};
use crypto_utils::kdf::pbkdf2_sha512;

const RETRY_LIMIT: u32 = 1000;
const ICARUS_ROUNDS: u32 = 4096;

#[derive(Debug)]
pub(crate) struct MasterKey {
    pub key: Vec<u8>,
    pub chain_code: [u8; 32],
}

fn check_seed(seed: &[u8]) -> Result<(), Bip32Error> {
    if !(16..=64).contains(&seed.len()) {
        return Err(Bip32Error::InvalidSeedLength(seed.len()));
    }
    Ok(())
}

fn right_half(i: &[u8; 64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&i[32..]);
    out
}

/// Byron-legacy / Ledger clamp: clear the low 3 bits of byte 0 and the top
/// bit of byte 31, then set bit 0x40 of byte 31.
fn tweak_byron(kl: &mut [u8]) {
    kl[0] &= 0xF8;
    kl[31] &= 0x7F;
    kl[31] |= 0x40;
}

/// Icarus clamp: clears the top three bits of byte 31 instead of one.
/// The asymmetry with the Byron clamp is deliberate and load-bearing for
/// wallet compatibility.
fn tweak_icarus(kl: &mut [u8]) {
    kl[0] &= 0xF8;
    kl[31] &= 0x1F;
    kl[31] |= 0x40;
}

/// `HMAC-SHA512(curve_tag, seed)`; if the left half is not a valid scalar
/// for the curve the whole output is fed back in as the next seed.
fn standard_master(curve: Curve, seed: &[u8]) -> Result<MasterKey, Bip32Error> {
    let hmac_key = curve.seed_hmac_key();
    let mut i = hmac_sha512(hmac_key, seed);
    for _ in 0..RETRY_LIMIT {
        match PrivateKey::from_bytes(curve, &i[..32]) {
            Ok(key) => {
                return Ok(MasterKey {
                    key: key.to_bytes(),
                    chain_code: right_half(&i),
                });
            }
            Err(_) => i = hmac_sha512(hmac_key, &i),
        }
    }
    Err(Bip32Error::RetryLimitReached)
}

/// BIP32-Ed25519 (Khovratovich/Law) master key, the scheme Ledger ships:
/// `kl ‖ kr` are the HMAC-SHA512 halves with `kl` clamped, rehashing the full
/// 64-byte output while bit 0x20 of the raw left half's last byte is set. The
/// chain code is an independent HMAC-SHA256 over `0x01 ‖ seed`.
fn kholaw_master(seed: &[u8]) -> Result<MasterKey, Bip32Error> {
    let hmac_key = Curve::Ed25519Kholaw.seed_hmac_key();
    let mut i = hmac_sha512(hmac_key, seed);
    for _ in 0..RETRY_LIMIT {
        if i[31] & 0x20 == 0 {
            let mut key = i.to_vec();
            tweak_byron(&mut key);
            let mut prefixed = Vec::with_capacity(1 + seed.len());
            prefixed.push(0x01);
            prefixed.extend_from_slice(seed);
            return Ok(MasterKey {
                key,
                chain_code: hmac_sha256(hmac_key, &prefixed),
            });
        }
        i = hmac_sha512(hmac_key, &i);
    }
    Err(Bip32Error::RetryLimitReached)
}

/// Byron-legacy master key. The HMAC key is the CBOR encoding of the seed
/// and the message is `"Root Seed Chain {n}"`; on a bad clamp the counter
/// is incremented rather than rehashing the output.
fn byron_master(seed: &[u8]) -> Result<MasterKey, Bip32Error> {
    let mut serializer = cbor_event::se::Serializer::new_vec();
    serializer
        .write_bytes(seed)
        .map_err(|_| Bip32Error::InvalidKeyData)?;
    let cbor_seed = serializer.finalize();
    for iteration in 1..=RETRY_LIMIT {
        let msg = format!("Root Seed Chain {iteration}");
        let i = hmac_sha512(&cbor_seed, msg.as_bytes());
        let mut key = sha512(&i[..32]).to_vec();
        tweak_byron(&mut key);
        if key[31] & 0x20 == 0 {
            return Ok(MasterKey {
                key,
                chain_code: right_half(&i),
            });
        }
    }
    Err(Bip32Error::RetryLimitReached)
}

pub(crate) fn from_seed(curve: Curve, seed: &[u8]) -> Result<MasterKey, Bip32Error> {
    check_seed(seed)?;
    match curve {
        Curve::Secp256k1 | Curve::Nist256p1 | Curve::Ed25519 | Curve::Ed25519Blake2b => {
            standard_master(curve, seed)
        }
        Curve::Ed25519Kholaw => kholaw_master(seed),
        Curve::Ed25519KholawByron => byron_master(seed),
    }
}

/// Icarus master key from BIP39 entropy: a single 96-byte PBKDF2 pass keyed
/// by the spending passphrase, no retry loop.
pub(crate) fn from_entropy_icarus(entropy: &[u8], passphrase: &[u8]) -> Result<MasterKey, Bip32Error> {
    check_seed(entropy)?;
    let mut out = [0u8; 96];
    pbkdf2_sha512(passphrase, entropy, ICARUS_ROUNDS, &mut out);
    tweak_icarus(&mut out[..64]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&out[64..]);
    Ok(MasterKey {
        key: out[..64].to_vec(),
        chain_code,
    })
}
