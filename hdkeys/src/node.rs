//! The HD tree node: one key (private or public-only) plus its chain code
//! and provenance metadata, polymorphic over the supported curves.
//!
//! Nodes are immutable; every derivation returns a new node. Child key
//! derivation dispatches on the curve: the ECDSA curves use the BIP32
//! construction, SLIP ed25519 is hardened-only, and the two Cardano
//! variants go through the extended-key arithmetic in `kholaw`.

use crate::curve::Curve;
use crate::derivation::{DerivationPath, is_hardened};
use crate::error::Bip32Error;
use crate::extended::{self, KeyNetVersions};
use crate::keys::{PrivateKey, PublicKey};
use crate::kholaw;
use crate::master;
use crypto_utils::hmac::hmac_sha512_split;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bip32Node {
    curve: Curve,
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
    chain_code: [u8; 32],
    depth: u8,
    index: u32,
    parent_fingerprint: [u8; 4],
    net_versions: KeyNetVersions,
}

impl Bip32Node {
    /// Master node from a seed, serialized with mainnet versions.
    pub fn from_seed(curve: Curve, seed: &[u8]) -> Result<Self, Bip32Error> {
        Self::from_seed_with(curve, seed, extended::MAINNET)
    }

    pub fn from_seed_with(
        curve: Curve,
        seed: &[u8],
        net_versions: KeyNetVersions,
    ) -> Result<Self, Bip32Error> {
        let master = master::from_seed(curve, seed)?;
        Self::master_node(curve, master, net_versions)
    }

    /// Cardano Icarus master node from BIP39 entropy and a spending
    /// passphrase (empty for no passphrase).
    pub fn from_entropy_icarus(entropy: &[u8], passphrase: &[u8]) -> Result<Self, Bip32Error> {
        let master = master::from_entropy_icarus(entropy, passphrase)?;
        Self::master_node(Curve::Ed25519Kholaw, master, extended::MAINNET)
    }

    fn master_node(
        curve: Curve,
        master: master::MasterKey,
        net_versions: KeyNetVersions,
    ) -> Result<Self, Bip32Error> {
        let private_key = PrivateKey::from_bytes(curve, &master.key)?;
        let public_key = private_key.public_key();
        Ok(Bip32Node {
            curve,
            private_key: Some(private_key),
            public_key,
            chain_code: master.chain_code,
            depth: 0,
            index: 0,
            parent_fingerprint: [0u8; 4],
            net_versions,
        })
    }

    /// Orphan node from raw private-key bytes. No chain code can be
    /// recovered from a bare key, so it is the all-zero sentinel.
    pub fn from_private_key(curve: Curve, bytes: &[u8]) -> Result<Self, Bip32Error> {
        let private_key = PrivateKey::from_bytes(curve, bytes)?;
        let public_key = private_key.public_key();
        Ok(Bip32Node {
            curve,
            private_key: Some(private_key),
            public_key,
            chain_code: [0u8; 32],
            depth: 0,
            index: 0,
            parent_fingerprint: [0u8; 4],
            net_versions: extended::MAINNET,
        })
    }

    /// Orphan public-only node from a 33-byte serialized public key.
    pub fn from_public_key(curve: Curve, bytes: &[u8]) -> Result<Self, Bip32Error> {
        let public_key = PublicKey::from_bytes33(curve, bytes)?;
        Ok(Bip32Node {
            curve,
            private_key: None,
            public_key,
            chain_code: [0u8; 32],
            depth: 0,
            index: 0,
            parent_fingerprint: [0u8; 4],
            net_versions: extended::MAINNET,
        })
    }

    pub(crate) fn from_parts(
        curve: Curve,
        private_key: Option<PrivateKey>,
        public_key: PublicKey,
        chain_code: [u8; 32],
        depth: u8,
        index: u32,
        parent_fingerprint: [u8; 4],
        net_versions: KeyNetVersions,
    ) -> Self {
        Bip32Node {
            curve,
            private_key,
            public_key,
            chain_code,
            depth,
            index,
            parent_fingerprint,
            net_versions,
        }
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn is_public_only(&self) -> bool {
        self.private_key.is_none()
    }

    pub fn private_key(&self) -> Result<&PrivateKey, Bip32Error> {
        self.private_key.as_ref().ok_or(Bip32Error::PublicKeyOnly)
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// 33-byte serialized public key, for downstream encoders.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        self.public_key.to_bytes33()
    }

    /// Raw private-key bytes (32, or 64 for Cardano extended keys).
    pub fn private_key_bytes(&self) -> Result<Vec<u8>, Bip32Error> {
        Ok(self.private_key()?.to_bytes())
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn fingerprint(&self) -> [u8; 4] {
        self.public_key.fingerprint()
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn net_versions(&self) -> KeyNetVersions {
        self.net_versions
    }

    /// The same node with the private key dropped. Idempotent.
    pub fn to_public(&self) -> Self {
        Bip32Node {
            private_key: None,
            ..self.clone()
        }
    }

    /// Derives the child at `index`, using private derivation when a
    /// private key is present and public derivation otherwise.
    pub fn child_key(&self, index: u32) -> Result<Self, Bip32Error> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(Bip32Error::MaxDepthReached)?;
        match &self.private_key {
            Some(private) => self.derive_private(private, index, depth),
            None => self.derive_public(index, depth),
        }
    }

    /// Applies each path component in order. An absolute path is only
    /// meaningful from a master node.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, Bip32Error> {
        if path.is_absolute() && self.depth != 0 {
            return Err(Bip32Error::InvalidPath);
        }
        let mut node = self.clone();
        for &index in path.indices() {
            node = node.child_key(index)?;
        }
        Ok(node)
    }

    pub fn to_extended_private(&self) -> Result<String, Bip32Error> {
        let private = self.private_key.as_ref().ok_or(Bip32Error::PublicKeyOnly)?;
        Ok(extended::encode_private(self, private))
    }

    pub fn to_extended_public(&self) -> String {
        extended::encode_public(self)
    }

    pub fn from_extended_key(s: &str, curve: Curve) -> Result<Self, Bip32Error> {
        Self::from_extended_key_with(s, curve, extended::MAINNET)
    }

    pub fn from_extended_key_with(
        s: &str,
        curve: Curve,
        net_versions: KeyNetVersions,
    ) -> Result<Self, Bip32Error> {
        extended::decode(s, curve, net_versions)
    }

    fn child_node(
        &self,
        private_key: Option<PrivateKey>,
        public_key: PublicKey,
        chain_code: [u8; 32],
        index: u32,
        depth: u8,
    ) -> Self {
        Bip32Node {
            curve: self.curve,
            private_key,
            public_key,
            chain_code,
            depth,
            index,
            parent_fingerprint: self.public_key.fingerprint(),
            net_versions: self.net_versions,
        }
    }

    fn derive_private(
        &self,
        private: &PrivateKey,
        index: u32,
        depth: u8,
    ) -> Result<Self, Bip32Error> {
        match self.curve {
            Curve::Secp256k1 | Curve::Nist256p1 => {
                let mut data = Vec::with_capacity(37);
                if is_hardened(index) {
                    data.push(0u8);
                    data.extend_from_slice(&private.to_bytes());
                } else {
                    data.extend_from_slice(&self.public_key.to_bytes33());
                }
                data.extend_from_slice(&index.to_be_bytes());
                let (il, ir) = hmac_sha512_split(&self.chain_code, &data);
                let child = private.tweak_add(&il)?;
                let public = child.public_key();
                Ok(self.child_node(Some(child), public, ir, index, depth))
            }
            Curve::Ed25519 | Curve::Ed25519Blake2b => {
                if !is_hardened(index) {
                    return Err(Bip32Error::UnsupportedDerivation);
                }
                let mut data = Vec::with_capacity(37);
                data.push(0u8);
                data.extend_from_slice(&private.to_bytes());
                data.extend_from_slice(&index.to_be_bytes());
                let (il, ir) = hmac_sha512_split(&self.chain_code, &data);
                let child = PrivateKey::from_bytes(self.curve, &il)?;
                let public = child.public_key();
                Ok(self.child_node(Some(child), public, ir, index, depth))
            }
            Curve::Ed25519Kholaw | Curve::Ed25519KholawByron => {
                let PrivateKey::Kholaw { kl, kr } = private else {
                    return Err(Bip32Error::InvalidKeyData);
                };
                let byron = self.curve == Curve::Ed25519KholawByron;
                let child = kholaw::derive_private(kl, kr, &self.chain_code, index, byron, byron);
                let key = PrivateKey::Kholaw {
                    kl: child.kl,
                    kr: child.kr,
                };
                let public = key.public_key();
                Ok(self.child_node(Some(key), public, child.chain_code, index, depth))
            }
        }
    }

    fn derive_public(&self, index: u32, depth: u8) -> Result<Self, Bip32Error> {
        if is_hardened(index) {
            return Err(Bip32Error::UnsupportedDerivation);
        }
        match self.curve {
            Curve::Secp256k1 | Curve::Nist256p1 => {
                let mut data = Vec::with_capacity(37);
                data.extend_from_slice(&self.public_key.to_bytes33());
                data.extend_from_slice(&index.to_be_bytes());
                let (il, ir) = hmac_sha512_split(&self.chain_code, &data);
                let child = self.public_key.tweak_add(&il)?;
                Ok(self.child_node(None, child, ir, index, depth))
            }
            Curve::Ed25519Kholaw => {
                let PublicKey::Kholaw(point) = &self.public_key else {
                    return Err(Bip32Error::InvalidKeyData);
                };
                let (child, chain_code) = kholaw::derive_public(point, &self.chain_code, index)?;
                Ok(self.child_node(None, PublicKey::Kholaw(child), chain_code, index, depth))
            }
            _ => Err(Bip32Error::UnsupportedDerivation),
        }
    }
}
