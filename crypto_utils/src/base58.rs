use crate::hash::sha256d;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    InvalidCharacter(char),
    InvalidLength,
    InvalidChecksum,
}

const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Maps an ASCII byte to its alphabet position, 0xFF for non-alphabet bytes.
const DECODE_MAP: [u8; 128] = {
    let mut map = [0xFFu8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();
    // Base-58 digits, least significant first.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in &data[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }
    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push('1');
    }
    for &d in digits.iter().rev() {
        out.push(ALPHABET[d as usize] as char);
    }
    out
}

pub fn decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    if s.is_empty() {
        return Err(Base58Error::InvalidLength);
    }
    let zeros = s.bytes().take_while(|&b| b == b'1').count();
    // Output bytes, least significant first.
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    for c in s.bytes().skip(zeros) {
        let val = match DECODE_MAP.get(c as usize) {
            Some(&v) if v != 0xFF => v,
            _ => return Err(Base58Error::InvalidCharacter(c as char)),
        };
        let mut carry = val as u32;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }
    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

/// Encodes `payload || sha256d(payload)[..4]`.
pub fn encode_check(payload: &[u8]) -> String {
    let mut framed = payload.to_vec();
    framed.extend_from_slice(&sha256d(payload)[..4]);
    encode(&framed)
}

pub fn decode_check(s: &str) -> Result<Vec<u8>, Base58Error> {
    let mut framed = decode(s)?;
    if framed.len() < 4 {
        return Err(Base58Error::InvalidLength);
    }
    let checksum = framed.split_off(framed.len() - 4);
    if checksum != sha256d(&framed)[..4] {
        return Err(Base58Error::InvalidChecksum);
    }
    Ok(framed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(encode(&[0x00]), "1");
        assert_eq!(encode(&[0x61]), "2g");
        assert_eq!(encode(&[0x62, 0x62, 0x62]), "a3gV");
        assert_eq!(encode(&[0x63, 0x63, 0x63]), "aPEr");
    }

    #[test]
    fn leading_zeros_are_preserved() {
        assert_eq!(encode(&[0, 0, 1]), "112");
        assert_eq!(encode(&[0, 0, 0, 0, 1]), "11112");
        assert_eq!(decode("112"), Ok(vec![0, 0, 1]));
        assert_eq!(decode("1115T"), Ok(vec![0, 0, 0, 1, 2]));
    }

    #[test]
    fn decode_rejects_empty_input() {
        assert_eq!(decode(""), Err(Base58Error::InvalidLength));
    }

    #[test]
    fn decode_rejects_non_alphabet_bytes() {
        assert_eq!(decode("4P1e!"), Err(Base58Error::InvalidCharacter('!')));
        assert_eq!(decode("0OIl"), Err(Base58Error::InvalidCharacter('0')));
        // Non-ASCII input must not index past the table.
        assert!(matches!(decode("ab\u{00e9}"), Err(Base58Error::InvalidCharacter(_))));
    }

    #[test]
    fn encode_decode_roundtrip() {
        for data in [&b"hello world"[..], &[0u8; 5], &[0xFF; 40]] {
            assert_eq!(decode(&encode(data)), Ok(data.to_vec()));
        }
    }

    #[test]
    fn check_roundtrip() {
        let payload: Vec<u8> = (0u8..78).collect();
        let encoded = encode_check(&payload);
        assert_eq!(decode_check(&encoded), Ok(payload));
    }

    #[test]
    fn check_rejects_corruption() {
        let mut encoded = encode_check(b"Hello, World!").into_bytes();
        encoded[0] ^= 1;
        let s = std::str::from_utf8(&encoded).unwrap();
        assert!(decode_check(s).is_err());
    }

    #[test]
    fn check_rejects_truncation() {
        let encoded = encode_check(b"Hello");
        assert!(decode_check(&encoded[..encoded.len() - 1]).is_err());
    }

    #[test]
    fn check_rejects_too_short_payload() {
        // "1" decodes to a single zero byte, shorter than a checksum.
        assert_eq!(decode_check("1"), Err(Base58Error::InvalidLength));
    }

    #[test]
    fn check_empty_payload() {
        let encoded = encode_check(b"");
        assert_eq!(decode_check(&encoded), Ok(vec![]));
    }
}
