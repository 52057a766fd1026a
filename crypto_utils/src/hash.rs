use blake2::Blake2b512;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

pub fn sha256(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// Double SHA-256, used for Base58Check checksums.
pub fn sha256d(input: &[u8]) -> [u8; 32] {
    sha256(&sha256(input))
}

pub fn sha512(input: &[u8]) -> [u8; 64] {
    Sha512::digest(input).into()
}

pub fn ripemd160(input: &[u8]) -> [u8; 20] {
    Ripemd160::digest(input).into()
}

/// RIPEMD-160 over SHA-256, the key-identifier hash of BIP32.
pub fn hash160(input: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(input))
}

pub fn blake2b512(input: &[u8]) -> [u8; 64] {
    Blake2b512::digest(input).into()
}
