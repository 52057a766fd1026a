use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

/// PBKDF2-HMAC-SHA512 with a caller-sized output buffer.
pub fn pbkdf2_sha512(password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    pbkdf2_hmac::<Sha512>(password, salt, rounds, out);
}
