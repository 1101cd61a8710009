use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};

use crate::error::Error;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const CHECKSUM_LEN: usize = 4;
/// Length of the base32 text form.
pub const ADDRESS_LEN: usize = 58;

/// An Algorand account address: a 32-byte ed25519 public key.
///
/// The text form is the unpadded base32 encoding of the key followed by the
/// last four bytes of its SHA-512/256 digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    pub const fn new(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_LEN]
    }

    fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(public_key);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        checksum
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_LEN {
            return Err(Error::InvalidAddress(format!(
                "expected {} characters, got {}",
                ADDRESS_LEN,
                s.len()
            )));
        }

        let decoded = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", s, e)))?;
        if decoded.len() != PUBLIC_KEY_LEN + CHECKSUM_LEN {
            return Err(Error::InvalidAddress(s.to_string()));
        }

        let (key, checksum) = decoded.split_at(PUBLIC_KEY_LEN);
        if Self::checksum(key) != checksum {
            return Err(Error::InvalidAddress(format!("{}: checksum mismatch", s)));
        }

        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(key);
        Ok(Self(public_key))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
        bytes.extend_from_slice(&self.0);
        bytes.extend_from_slice(&Self::checksum(&self.0));
        f.write_str(&BASE32_NOPAD.encode(&bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_ADDRESS: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";

    #[test]
    fn test_zero_address_round_trip() {
        let address: Address = ZERO_ADDRESS.parse().unwrap();
        assert!(address.is_zero());
        assert_eq!(address.to_string(), ZERO_ADDRESS);
    }

    #[test]
    fn test_display_then_parse() {
        let address = Address::new([7u8; 32]);
        let text = address.to_string();
        assert_eq!(text.len(), ADDRESS_LEN);
        assert_eq!(text.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        let mut text = Address::new([9u8; 32]).to_string();
        // flip a character inside the checksum tail
        let last = text.pop().unwrap();
        text.push(if last == 'A' { 'B' } else { 'A' });
        assert!(matches!(
            text.parse::<Address>(),
            Err(Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!("ABC".parse::<Address>().is_err());
        assert!(ZERO_ADDRESS[1..].parse::<Address>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Address::default()).unwrap();
        assert_eq!(json, format!("\"{}\"", ZERO_ADDRESS));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert!(back.is_zero());
    }
}
