pub mod base58;
pub mod hash;
pub mod hmac;
pub mod kdf;

pub use base58::{Base58Error, decode, decode_check, encode, encode_check};
pub use hash::{blake2b512, hash160, ripemd160, sha256, sha256d, sha512};
pub use hmac::{hmac_sha256, hmac_sha512, hmac_sha512_split};
pub use kdf::pbkdf2_sha512;
