//! Hierarchical deterministic key derivation over multiple elliptic curves.
//!
//! Implements BIP32 (secp256k1), SLIP-0010 (nist256p1, ed25519 and its
//! Blake2b flavour) and the Cardano ed25519 extended-key scheme (Icarus and
//! Byron-legacy), behind a single curve-dispatched tree node.

pub mod curve;
pub mod derivation;
pub mod error;
pub mod extended;
pub mod keys;
mod kholaw;
mod master;
pub mod node;

pub use curve::Curve;
pub use derivation::{DerivationPath, HARDENED_OFFSET, harden, is_hardened};
pub use error::Bip32Error;
pub use extended::{KeyNetVersions, MAINNET, TESTNET};
pub use keys::{PrivateKey, PublicKey};
pub use node::Bip32Node;
