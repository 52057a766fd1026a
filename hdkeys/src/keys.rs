use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::CompressedEdwardsY;
use curve25519_dalek::scalar::Scalar;
use p256::elliptic_curve::PrimeField;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use secp256k1::Secp256k1;

use crate::curve::Curve;
use crate::error::Bip32Error;
use crate::kholaw;
use crypto_utils::hash::{blake2b512, hash160, sha512};

/// A private key of one of the supported curves. The Kholaw variant holds a
/// Cardano extended key: 32 scalar bytes `kl` plus 32 nonce bytes `kr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateKey {
    Secp256k1(secp256k1::SecretKey),
    Nist256p1(p256::SecretKey),
    Ed25519([u8; 32]),
    Ed25519Blake2b([u8; 32]),
    Kholaw { kl: [u8; 32], kr: [u8; 32] },
}

/// A public key, stored in the curve's native compressed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicKey {
    Secp256k1(secp256k1::PublicKey),
    Nist256p1(p256::PublicKey),
    Ed25519(CompressedEdwardsY),
    Ed25519Blake2b(CompressedEdwardsY),
    Kholaw(CompressedEdwardsY),
}

fn to_array32(bytes: &[u8]) -> Result<[u8; 32], Bip32Error> {
    bytes.try_into().map_err(|_| Bip32Error::InvalidKeyData)
}

/// Ed25519 public-key derivation from a 64-byte expansion: clamp the left
/// half and multiply the basepoint. `Scalar::from_bits` keeps the clamped
/// bytes untouched, which the SLIP-0010 serialization depends on.
fn expanded_public_point(expanded: &[u8; 64]) -> CompressedEdwardsY {
    let mut bits = [0u8; 32];
    bits.copy_from_slice(&expanded[..32]);
    bits[0] &= 248;
    bits[31] &= 127;
    bits[31] |= 64;
    (&Scalar::from_bits(bits) * &ED25519_BASEPOINT_TABLE).compress()
}

impl PrivateKey {
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self, Bip32Error> {
        match curve {
            Curve::Secp256k1 => {
                let key = secp256k1::SecretKey::from_slice(bytes)
                    .map_err(|_| Bip32Error::InvalidKeyData)?;
                Ok(PrivateKey::Secp256k1(key))
            }
            Curve::Nist256p1 => {
                let key =
                    p256::SecretKey::from_slice(bytes).map_err(|_| Bip32Error::InvalidKeyData)?;
                Ok(PrivateKey::Nist256p1(key))
            }
            Curve::Ed25519 => Ok(PrivateKey::Ed25519(to_array32(bytes)?)),
            Curve::Ed25519Blake2b => Ok(PrivateKey::Ed25519Blake2b(to_array32(bytes)?)),
            Curve::Ed25519Kholaw | Curve::Ed25519KholawByron => {
                if bytes.len() != 64 {
                    return Err(Bip32Error::InvalidKeyData);
                }
                Ok(PrivateKey::Kholaw {
                    kl: to_array32(&bytes[..32])?,
                    kr: to_array32(&bytes[32..])?,
                })
            }
        }
    }

    /// Raw key bytes: 32 for single-scalar curves, 64 (`kl || kr`) for Kholaw.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PrivateKey::Secp256k1(key) => key.secret_bytes().to_vec(),
            PrivateKey::Nist256p1(key) => key.to_bytes().to_vec(),
            PrivateKey::Ed25519(key) | PrivateKey::Ed25519Blake2b(key) => key.to_vec(),
            PrivateKey::Kholaw { kl, kr } => {
                let mut out = Vec::with_capacity(64);
                out.extend_from_slice(kl);
                out.extend_from_slice(kr);
                out
            }
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Secp256k1(key) => {
                let secp = Secp256k1::new();
                PublicKey::Secp256k1(secp256k1::PublicKey::from_secret_key(&secp, key))
            }
            PrivateKey::Nist256p1(key) => PublicKey::Nist256p1(key.public_key()),
            PrivateKey::Ed25519(key) => PublicKey::Ed25519(expanded_public_point(&sha512(key))),
            PrivateKey::Ed25519Blake2b(key) => {
                PublicKey::Ed25519Blake2b(expanded_public_point(&blake2b512(key)))
            }
            PrivateKey::Kholaw { kl, .. } => PublicKey::Kholaw(kholaw::public_point(kl)),
        }
    }

    /// ECDSA child-key scalar addition, `child = (parent + IL) mod n`.
    /// An out-of-range IL or a zero result is unrecoverable by design.
    pub(crate) fn tweak_add(&self, il: &[u8; 32]) -> Result<PrivateKey, Bip32Error> {
        match self {
            PrivateKey::Secp256k1(key) => {
                let tweak = secp256k1::Scalar::from_be_bytes(*il)
                    .map_err(|_| Bip32Error::InvalidDerivedKey)?;
                let child = key
                    .clone()
                    .add_tweak(&tweak)
                    .map_err(|_| Bip32Error::InvalidDerivedKey)?;
                Ok(PrivateKey::Secp256k1(child))
            }
            PrivateKey::Nist256p1(key) => {
                let tweak = Option::<p256::Scalar>::from(p256::Scalar::from_repr((*il).into()))
                    .ok_or(Bip32Error::InvalidDerivedKey)?;
                let sum = tweak + key.to_nonzero_scalar().as_ref();
                let child = Option::<p256::NonZeroScalar>::from(p256::NonZeroScalar::new(sum))
                    .ok_or(Bip32Error::InvalidDerivedKey)?;
                Ok(PrivateKey::Nist256p1(p256::SecretKey::from(child)))
            }
            _ => Err(Bip32Error::UnsupportedDerivation),
        }
    }
}

impl PublicKey {
    /// Parses the 33-byte serialized form (SEC1 compressed for ECDSA curves,
    /// a zero byte followed by the Edwards point otherwise).
    pub fn from_bytes33(curve: Curve, bytes: &[u8]) -> Result<Self, Bip32Error> {
        match curve {
            Curve::Secp256k1 => {
                let key = secp256k1::PublicKey::from_slice(bytes)
                    .map_err(|_| Bip32Error::InvalidKeyData)?;
                Ok(PublicKey::Secp256k1(key))
            }
            Curve::Nist256p1 => {
                if bytes.len() != 33 {
                    return Err(Bip32Error::InvalidKeyData);
                }
                let key = p256::PublicKey::from_sec1_bytes(bytes)
                    .map_err(|_| Bip32Error::InvalidKeyData)?;
                Ok(PublicKey::Nist256p1(key))
            }
            Curve::Ed25519 | Curve::Ed25519Blake2b | Curve::Ed25519Kholaw
            | Curve::Ed25519KholawByron => {
                if bytes.len() != 33 || bytes[0] != 0x00 {
                    return Err(Bip32Error::InvalidKeyData);
                }
                let compressed = CompressedEdwardsY(to_array32(&bytes[1..])?);
                if compressed.decompress().is_none() {
                    return Err(Bip32Error::InvalidKeyData);
                }
                Ok(match curve {
                    Curve::Ed25519 => PublicKey::Ed25519(compressed),
                    Curve::Ed25519Blake2b => PublicKey::Ed25519Blake2b(compressed),
                    _ => PublicKey::Kholaw(compressed),
                })
            }
        }
    }

    /// Fixed 33-byte serialization; ed25519-family keys get a zero prefix.
    pub fn to_bytes33(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        match self {
            PublicKey::Secp256k1(key) => out.copy_from_slice(&key.serialize()),
            PublicKey::Nist256p1(key) => {
                out.copy_from_slice(key.to_encoded_point(true).as_bytes());
            }
            PublicKey::Ed25519(point)
            | PublicKey::Ed25519Blake2b(point)
            | PublicKey::Kholaw(point) => out[1..].copy_from_slice(point.as_bytes()),
        }
        out
    }

    /// First four bytes of HASH160 over the serialized key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let digest = hash160(&self.to_bytes33());
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&digest[..4]);
        fp
    }

    /// ECDSA public child derivation, `child = IL*G + parent`.
    pub(crate) fn tweak_add(&self, il: &[u8; 32]) -> Result<PublicKey, Bip32Error> {
        match self {
            PublicKey::Secp256k1(key) => {
                let secp = Secp256k1::new();
                // Scalar accepts zero; IL == 0 leaves the point unchanged,
                // matching the private path.
                let tweak = secp256k1::Scalar::from_be_bytes(*il)
                    .map_err(|_| Bip32Error::InvalidDerivedKey)?;
                let child = key
                    .add_exp_tweak(&secp, &tweak)
                    .map_err(|_| Bip32Error::InvalidDerivedKey)?;
                Ok(PublicKey::Secp256k1(child))
            }
            PublicKey::Nist256p1(key) => {
                let tweak = Option::<p256::Scalar>::from(p256::Scalar::from_repr((*il).into()))
                    .ok_or(Bip32Error::InvalidDerivedKey)?;
                let point = p256::ProjectivePoint::GENERATOR * tweak + key.to_projective();
                let child = p256::PublicKey::from_affine(point.to_affine())
                    .map_err(|_| Bip32Error::InvalidDerivedKey)?;
                Ok(PublicKey::Nist256p1(child))
            }
            _ => Err(Bip32Error::UnsupportedDerivation),
        }
    }
}
