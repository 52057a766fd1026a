//! Cardano ed25519 extended-key child derivation.
//!
//! The extended private key is `kl || kr`; children are produced by two
//! HMAC-SHA512 passes over the parent chain code, one for the key material
//! (tags 0x00/0x02) and one for the child chain code (tags 0x01/0x03).
//! Key-half additions are fixed-width byte arithmetic with no reduction
//! modulo the group order.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::Scalar;

use crate::derivation::is_hardened;
use crate::error::Bip32Error;
use crypto_utils::hmac::hmac_sha512;

pub(crate) struct KholawChild {
    pub kl: [u8; 32],
    pub kr: [u8; 32],
    pub chain_code: [u8; 32],
}

/// `x + 8 * trunc28(y)`, carries propagated through all 32 bytes.
pub(crate) fn add_28_mul8(x: &[u8; 32], y: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry: u16 = 0;
    for i in 0..28 {
        let r = x[i] as u16 + ((y[i] as u16) << 3) + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    for i in 28..32 {
        let r = x[i] as u16 + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    out
}

/// `(x + y) mod 2^256`, little-endian bytes.
pub(crate) fn add_256bits(x: &[u8; 32], y: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry: u16 = 0;
    for i in 0..32 {
        let r = x[i] as u16 + y[i] as u16 + carry;
        out[i] = (r & 0xff) as u8;
        carry = r >> 8;
    }
    out
}

/// Public point of an extended key: `kl * B` without clamping or reduction.
pub(crate) fn public_point(kl: &[u8; 32]) -> CompressedEdwardsY {
    (&Scalar::from_bits(*kl) * &ED25519_BASEPOINT_TABLE).compress()
}

fn split64(i: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&i[..32]);
    right.copy_from_slice(&i[32..]);
    (left, right)
}

/// Derives a child extended private key.
///
/// `big_endian_index` and `private_form_only` select the Byron-legacy
/// flavour; Icarus uses little-endian indices and switches to the public
/// point for non-hardened children.
pub(crate) fn derive_private(
    kl: &[u8; 32],
    kr: &[u8; 32],
    chain_code: &[u8; 32],
    index: u32,
    big_endian_index: bool,
    private_form_only: bool,
) -> KholawChild {
    let idx = if big_endian_index {
        index.to_be_bytes()
    } else {
        index.to_le_bytes()
    };
    let (z, i) = if is_hardened(index) || private_form_only {
        let mut body = Vec::with_capacity(69);
        body.push(0x00);
        body.extend_from_slice(kl);
        body.extend_from_slice(kr);
        body.extend_from_slice(&idx);
        let z = hmac_sha512(chain_code, &body);
        body[0] = 0x01;
        (z, hmac_sha512(chain_code, &body))
    } else {
        let point = public_point(kl);
        let mut body = Vec::with_capacity(37);
        body.push(0x02);
        body.extend_from_slice(point.as_bytes());
        body.extend_from_slice(&idx);
        let z = hmac_sha512(chain_code, &body);
        body[0] = 0x03;
        (z, hmac_sha512(chain_code, &body))
    };
    let (zl, zr) = split64(&z);
    let mut chain = [0u8; 32];
    chain.copy_from_slice(&i[32..]);
    KholawChild {
        kl: add_28_mul8(kl, &zl),
        kr: add_256bits(kr, &zr),
        chain_code: chain,
    }
}

/// Derives a child public key from a parent point (Icarus scheme only).
pub(crate) fn derive_public(
    point: &CompressedEdwardsY,
    chain_code: &[u8; 32],
    index: u32,
) -> Result<(CompressedEdwardsY, [u8; 32]), Bip32Error> {
    if is_hardened(index) {
        return Err(Bip32Error::UnsupportedDerivation);
    }
    let mut body = Vec::with_capacity(37);
    body.push(0x02);
    body.extend_from_slice(point.as_bytes());
    body.extend_from_slice(&index.to_le_bytes());
    let z = hmac_sha512(chain_code, &body);
    body[0] = 0x03;
    let i = hmac_sha512(chain_code, &body);

    let (zl, _) = split64(&z);
    let zl8 = add_28_mul8(&[0u8; 32], &zl);
    let parent = point.decompress().ok_or(Bip32Error::InvalidKeyData)?;
    let child = &parent + &(&Scalar::from_bits(zl8) * &ED25519_BASEPOINT_TABLE);
    let mut chain = [0u8; 32];
    chain.copy_from_slice(&i[32..]);
    Ok((child.compress(), chain))
}
