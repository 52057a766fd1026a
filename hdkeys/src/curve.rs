/// Elliptic curve and derivation scheme of a key tree.
///
/// The two Kholaw variants share their key algebra but derive children
/// differently: Icarus serializes indices little-endian and supports public
/// derivation, Byron-legacy serializes them big-endian and always frames the
/// derivation message around the private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    Secp256k1,
    Nist256p1,
    Ed25519,
    Ed25519Blake2b,
    Ed25519Kholaw,
    Ed25519KholawByron,
}

impl Curve {
    /// HMAC key used by the standard master-key generator.
    pub(crate) fn seed_hmac_key(self) -> &'static [u8] {
        match self {
            Curve::Secp256k1 => b"Bitcoin seed",
            Curve::Nist256p1 => b"Nist256p1 seed",
            Curve::Ed25519
            | Curve::Ed25519Blake2b
            | Curve::Ed25519Kholaw
            | Curve::Ed25519KholawByron => b"ed25519 seed",
        }
    }

    /// Whether non-hardened indices are derivable from a private key.
    pub fn supports_soft_derivation(self) -> bool {
        !matches!(self, Curve::Ed25519 | Curve::Ed25519Blake2b)
    }

    /// Whether children can be derived from a public-only node.
    pub fn supports_public_derivation(self) -> bool {
        matches!(self, Curve::Secp256k1 | Curve::Nist256p1 | Curve::Ed25519Kholaw)
    }

    /// Serialized private-key length in bytes (64 for extended ed25519 keys).
    pub fn private_key_len(self) -> usize {
        match self {
            Curve::Ed25519Kholaw | Curve::Ed25519KholawByron => 64,
            _ => 32,
        }
    }
}
