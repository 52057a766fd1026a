use crypto_utils::base58::Base58Error;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Bip32Error {
    #[error("seed length must be 16..=64 bytes, got {0}")]
    InvalidSeedLength(usize),
    #[error("key bytes are not valid for the curve")]
    InvalidKeyData,
    #[error("derivation step produced an invalid key")]
    InvalidDerivedKey,
    #[error("master key generation did not converge")]
    RetryLimitReached,
    #[error("derivation not supported by this curve or key")]
    UnsupportedDerivation,
    #[error("operation requires a private key")]
    PublicKeyOnly,
    #[error("maximum derivation depth reached")]
    MaxDepthReached,
    #[error("invalid derivation path")]
    InvalidPath,
    #[error("invalid base58 string")]
    InvalidBase58,
    #[error("checksum mismatch")]
    InvalidChecksum,
    #[error("invalid extended key length")]
    InvalidLength,
    #[error("unknown network version bytes")]
    InvalidVersion,
    #[error("master key fields are inconsistent")]
    InvalidMasterKey,
}

impl From<Base58Error> for Bip32Error {
    fn from(err: Base58Error) -> Self {
        match err {
            Base58Error::InvalidCharacter(_) => Bip32Error::InvalidBase58,
            Base58Error::InvalidLength => Bip32Error::InvalidLength,
            Base58Error::InvalidChecksum => Bip32Error::InvalidChecksum,
        }
    }
}
