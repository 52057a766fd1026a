//! Base58Check serialization of extended keys.
//!
//! Wire layout: `version(4) ‖ depth(1) ‖ parent_fingerprint(4) ‖
//! index(4, BE) ‖ chain_code(32) ‖ key_data`, then a 4-byte double-SHA256
//! checksum. Key data is 33 bytes for public keys and zero-prefixed
//! private keys, 65 bytes for Cardano extended private keys (110-byte
//! payload total instead of 78).

use crate::curve::Curve;
use crate::error::Bip32Error;
use crate::keys::{PrivateKey, PublicKey};
use crate::node::Bip32Node;
use crypto_utils::base58;

/// Version-byte pair selecting the network of a serialized key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNetVersions {
    pub public: [u8; 4],
    pub private: [u8; 4],
}

/// Bitcoin mainnet `xpub`/`xprv` versions.
pub const MAINNET: KeyNetVersions = KeyNetVersions {
    public: [0x04, 0x88, 0xB2, 0x1E],
    private: [0x04, 0x88, 0xAD, 0xE4],
};

/// Bitcoin testnet `tpub`/`tprv` versions.
pub const TESTNET: KeyNetVersions = KeyNetVersions {
    public: [0x04, 0x35, 0x87, 0xCF],
    private: [0x04, 0x35, 0x83, 0x94],
};

fn header(node: &Bip32Node, version: [u8; 4], key_len: usize) -> Vec<u8> {
    let mut payload = Vec::with_capacity(45 + key_len);
    payload.extend_from_slice(&version);
    payload.push(node.depth());
    payload.extend_from_slice(&node.parent_fingerprint());
    payload.extend_from_slice(&node.index().to_be_bytes());
    payload.extend_from_slice(node.chain_code());
    payload
}

pub(crate) fn encode_private(node: &Bip32Node, key: &PrivateKey) -> String {
    let key_bytes = key.to_bytes();
    let mut payload = header(node, node.net_versions().private, 1 + key_bytes.len());
    payload.push(0u8);
    payload.extend_from_slice(&key_bytes);
    base58::encode_check(&payload)
}

pub(crate) fn encode_public(node: &Bip32Node) -> String {
    let mut payload = header(node, node.net_versions().public, 33);
    payload.extend_from_slice(&node.public_key().to_bytes33());
    base58::encode_check(&payload)
}

pub(crate) fn decode(
    s: &str,
    curve: Curve,
    net_versions: KeyNetVersions,
) -> Result<Bip32Node, Bip32Error> {
    let data = base58::decode_check(s)?;
    if data.len() < 45 {
        return Err(Bip32Error::InvalidLength);
    }
    let version: [u8; 4] = data[..4].try_into().map_err(|_| Bip32Error::InvalidLength)?;
    let is_private = if version == net_versions.private {
        true
    } else if version == net_versions.public {
        false
    } else {
        return Err(Bip32Error::InvalidVersion);
    };

    let depth = data[4];
    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&data[5..9]);
    let index = u32::from_be_bytes(data[9..13].try_into().map_err(|_| Bip32Error::InvalidLength)?);
    if depth == 0 && (parent_fingerprint != [0u8; 4] || index != 0) {
        return Err(Bip32Error::InvalidMasterKey);
    }
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&data[13..45]);
    let key_data = &data[45..];

    let (private_key, public_key) = if is_private {
        if key_data.len() != 1 + curve.private_key_len() {
            return Err(Bip32Error::InvalidLength);
        }
        if key_data[0] != 0 {
            return Err(Bip32Error::InvalidKeyData);
        }
        let private = PrivateKey::from_bytes(curve, &key_data[1..])?;
        let public = private.public_key();
        (Some(private), public)
    } else {
        if key_data.len() != 33 {
            return Err(Bip32Error::InvalidLength);
        }
        (None, PublicKey::from_bytes33(curve, key_data)?)
    };

    Ok(Bip32Node::from_parts(
        curve,
        private_key,
        public_key,
        chain_code,
        depth,
        index,
        parent_fingerprint,
        net_versions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Bip32Node;
    use hex_literal::hex;

    struct Case<'a> {
        key: &'a str,
        expected: Bip32Error,
    }

    /// BIP32 test vector 5: malformed extended keys must be rejected.
    #[test]
    fn rejects_invalid_public_keys() {
        let cases = [
            // pubkey version with private key data
            Case {
                key: "xpub661MyMwAqRbcEYS8w7XLSVeEsBXy79zSzH1J8vCdxAZningWLdN3zgtU6LBpB85b3D2yc8sfvZU521AAwdZafEz7mnzBBsz4wKY5fTtTQBm",
                expected: Bip32Error::InvalidKeyData,
            },
            // invalid pubkey prefix 04
            Case {
                key: "xpub661MyMwAqRbcEYS8w7XLSVeEsBXy79zSzH1J8vCdxAZningWLdN3zgtU6Txnt3siSujt9RCVYsx4qHZGc62TG4McvMGcAUjeuwZdduYEvFn",
                expected: Bip32Error::InvalidKeyData,
            },
            // invalid pubkey prefix 01
            Case {
                key: "xpub661MyMwAqRbcEYS8w7XLSVeEsBXy79zSzH1J8vCdxAZningWLdN3zgtU6N8ZMMXctdiCjxTNq964yKkwrkBJJwpzZS4HS2fxvyYUA4q2Xe4",
                expected: Bip32Error::InvalidKeyData,
            },
            // zero depth with non-zero parent fingerprint
            Case {
                key: "xpub661no6RGEX3uJkY4bNnPcw4URcQTrSibUZ4NqJEw5eBkv7ovTwgiT91XX27VbEXGENhYRCf7hyEbWrR3FewATdCEebj6znwMfQkhRYHRLpJ",
                expected: Bip32Error::InvalidMasterKey,
            },
            // zero depth with non-zero index
            Case {
                key: "xpub661MyMwAuDcm6CRQ5N4qiHKrJ39Xe1R1NyfouMKTTWcguwVcfrZJaNvhpebzGerh7gucBvzEQWRugZDuDXjNDRmXzSZe4c7mnTK97pTvGS8",
                expected: Bip32Error::InvalidMasterKey,
            },
            // pubkey 0200..07 is not a curve point
            Case {
                key: "xpub661MyMwAqRbcEYS8w7XLSVeEsBXy79zSzH1J8vCdxAZningWLdN3zgtU6Q5JXayek4PRsn35jii4veMimro1xefsM58PgBMrvdYre8QyULY",
                expected: Bip32Error::InvalidKeyData,
            },
        ];
        for case in &cases {
            let err = decode(case.key, Curve::Secp256k1, MAINNET).unwrap_err();
            assert_eq!(
                err, case.expected,
                "xpub \"{}\" returned {:?}, expected {:?}",
                case.key, err, case.expected
            );
        }
    }

    #[test]
    fn rejects_invalid_private_keys() {
        let cases = [
            // prvkey version with public key data
            Case {
                key: "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFGTQQD3dC4H2D5GBj7vWvSQaaBv5cxi9gafk7NF3pnBju6dwKvH",
                expected: Bip32Error::InvalidKeyData,
            },
            // invalid prvkey prefix 04
            Case {
                key: "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFGpWnsj83BHtEy5Zt8CcDr1UiRXuWCmTQLxEK9vbz5gPstX92JQ",
                expected: Bip32Error::InvalidKeyData,
            },
            // invalid prvkey prefix 01
            Case {
                key: "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFAzHGBP2UuGCqWLTAPLcMtD9y5gkZ6Eq3Rjuahrv17fEQ3Qen6J",
                expected: Bip32Error::InvalidKeyData,
            },
            // zero depth with non-zero parent fingerprint
            Case {
                key: "xprv9s2SPatNQ9Vc6GTbVMFPFo7jsaZySyzk7L8n2uqKXJen3KUmvQNTuLh3fhZMBoG3G4ZW1N2kZuHEPY53qmbZzCHshoQnNf4GvELZfqTUrcv",
                expected: Bip32Error::InvalidMasterKey,
            },
            // zero depth with non-zero index
            Case {
                key: "xprv9s21ZrQH4r4TsiLvyLXqM9P7k1K3EYhA1kkD6xuquB5i39AU8KF42acDyL3qsDbU9NmZn6MsGSUYZEsuoePmjzsB3eFKSUEh3Gu1N3cqVUN",
                expected: Bip32Error::InvalidMasterKey,
            },
            // private key 0 not in 1..n-1
            Case {
                key: "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzF93Y5wvzdUayhgkkFoicQZcP3y52uPPxFnfoLZB21Teqt1VvEHx",
                expected: Bip32Error::InvalidKeyData,
            },
            // private key n not in 1..n-1
            Case {
                key: "xprv9s21ZrQH143K24Mfq5zL5MhWK9hUhhGbd45hLXo2Pq2oqzMMo63oStZzFAzHGBP2UuGCqWLTAPLcMtD5SDKr24z3aiUvKr9bJpdrcLg1y3G",
                expected: Bip32Error::InvalidKeyData,
            },
            // invalid checksum
            Case {
                key: "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHL",
                expected: Bip32Error::InvalidChecksum,
            },
        ];
        for case in &cases {
            let err = decode(case.key, Curve::Secp256k1, MAINNET).unwrap_err();
            assert_eq!(
                err, case.expected,
                "xprv \"{}\" returned {:?}, expected {:?}",
                case.key, err, case.expected
            );
        }
    }

    #[test]
    fn rejects_unknown_versions() {
        let unknown = [
            "DMwo58pR1QLEFihHiXPVykYB6fJmsTeHvyTp7hRThAtCX8CvYzgPcn8XnmdfHGMQzT7ayAmfo4z3gY5KfbrZWZ6St24UVf2Qgo6oujFktLHdHY4",
            "DMwo58pR1QLEFihHiXPVykYB6fJmsTeHvyTp7hRThAtCX8CvYzgPcn8XnmdfHPmHJiEDXkTiJTVV9rHEBUem2mwVbbNfvT2MTcAqj3nesx8uBf9",
        ];
        for key in unknown {
            assert_eq!(
                decode(key, Curve::Secp256k1, MAINNET).unwrap_err(),
                Bip32Error::InvalidVersion
            );
        }
    }

    #[test]
    fn base58_error_mapping() {
        assert_eq!(
            decode("", Curve::Secp256k1, MAINNET).unwrap_err(),
            Bip32Error::InvalidLength
        );
        assert_eq!(
            decode("0", Curve::Secp256k1, MAINNET).unwrap_err(),
            Bip32Error::InvalidBase58
        );
    }

    #[test]
    fn private_roundtrip() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let node = Bip32Node::from_seed(Curve::Secp256k1, &seed).unwrap();
        let child = node.child_key(0x8000_0000).unwrap();
        let encoded = child.to_extended_private().unwrap();
        let decoded = Bip32Node::from_extended_key(&encoded, Curve::Secp256k1).unwrap();
        assert_eq!(decoded, child);
    }

    #[test]
    fn public_roundtrip() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let node = Bip32Node::from_seed(Curve::Secp256k1, &seed)
            .unwrap()
            .child_key(1)
            .unwrap()
            .to_public();
        let decoded = Bip32Node::from_extended_key(&node.to_extended_public(), Curve::Secp256k1)
            .unwrap();
        assert_eq!(decoded, node);
    }

    /// Cardano extended private keys serialize to a 110-byte payload.
    #[test]
    fn kholaw_roundtrip() {
        let node = Bip32Node::from_seed(Curve::Ed25519Kholaw, &[0x42u8; 32]).unwrap();
        let encoded = node.to_extended_private().unwrap();
        let payload = base58::decode_check(&encoded).unwrap();
        assert_eq!(payload.len(), 110);
        let decoded = Bip32Node::from_extended_key(&encoded, Curve::Ed25519Kholaw).unwrap();
        assert_eq!(decoded, node);
    }

    /// A 78-byte private payload is the wrong length for a Kholaw key.
    #[test]
    fn kholaw_rejects_short_key_data() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let xprv = Bip32Node::from_seed(Curve::Secp256k1, &seed)
            .unwrap()
            .to_extended_private()
            .unwrap();
        assert_eq!(
            decode(&xprv, Curve::Ed25519Kholaw, MAINNET).unwrap_err(),
            Bip32Error::InvalidLength
        );
    }

    #[test]
    fn testnet_versions() {
        let seed = hex!("000102030405060708090a0b0c0d0e0f");
        let node = Bip32Node::from_seed_with(Curve::Secp256k1, &seed, TESTNET).unwrap();
        let encoded = node.to_extended_private().unwrap();
        assert!(encoded.starts_with("tprv"));
        assert!(node.to_extended_public().starts_with("tpub"));
        // A testnet key is not decodable against mainnet versions.
        assert_eq!(
            decode(&encoded, Curve::Secp256k1, MAINNET).unwrap_err(),
            Bip32Error::InvalidVersion
        );
        let decoded = decode(&encoded, Curve::Secp256k1, TESTNET).unwrap();
        assert_eq!(decoded, node);
    }
}
