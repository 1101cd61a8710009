//! Decodes the marketplace app's per-account local state.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::address::{Address, PUBLIC_KEY_LEN};
use crate::algod::{Account, ApplicationLocalState, TealValue};
use crate::utils::serialization::{base64_to_bytes, bytes_to_display};

const KEY_CREATOR: &str = "creator";
const KEY_NAME: &str = "name";
const KEY_TYPE: &str = "type";
const KEY_PURCHASABLE: &str = "purchasable";
const KEY_PRICE: &str = "price";

/// A decoded local-state value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Bytes(String),
    Uint(u64),
}

/// The NFT record the app keeps in an account's local state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NftListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub nft_type: Option<String>,
    pub purchasable: bool,
    pub price: u64,
    #[serde(flatten)]
    pub other: BTreeMap<String, StateValue>,
}

impl NftListing {
    /// Listed means purchasable with a non-zero price.
    pub fn is_listed(&self) -> bool {
        self.purchasable && self.price > 0
    }
}

/// Every key/value pair of one app's local state. Keys that are not valid
/// base64 are skipped.
pub fn decode_local_state(state: &ApplicationLocalState) -> BTreeMap<String, StateValue> {
    state
        .key_value
        .iter()
        .filter_map(|kv| {
            let key = base64_to_bytes("key", &kv.key).ok()?;
            let key = String::from_utf8_lossy(&key).into_owned();
            let value = match kv.value.value_type {
                TealValue::BYTES => {
                    let bytes = base64_to_bytes("value", &kv.value.bytes).ok()?;
                    if key == KEY_CREATOR && bytes.len() == PUBLIC_KEY_LEN {
                        let mut public_key = [0u8; PUBLIC_KEY_LEN];
                        public_key.copy_from_slice(&bytes);
                        StateValue::Bytes(Address::new(public_key).to_string())
                    } else {
                        StateValue::Bytes(bytes_to_display(&bytes))
                    }
                }
                _ => StateValue::Uint(kv.value.uint),
            };
            Some((key, value))
        })
        .collect()
}

impl From<BTreeMap<String, StateValue>> for NftListing {
    fn from(mut state: BTreeMap<String, StateValue>) -> Self {
        let mut take_bytes = |key: &str| match state.remove(key) {
            Some(StateValue::Bytes(s)) => Some(s),
            Some(other) => {
                state.insert(key.to_string(), other);
                None
            }
            None => None,
        };
        let creator = take_bytes(KEY_CREATOR);
        let name = take_bytes(KEY_NAME);
        let nft_type = take_bytes(KEY_TYPE);

        let mut take_uint = |key: &str| match state.remove(key) {
            Some(StateValue::Uint(v)) => v,
            Some(other) => {
                state.insert(key.to_string(), other);
                0
            }
            None => 0,
        };
        let purchasable = take_uint(KEY_PURCHASABLE) == 1;
        let price = take_uint(KEY_PRICE);

        Self {
            creator,
            name,
            nft_type,
            purchasable,
            price,
            other: state,
        }
    }
}

/// The listing `account` holds in app `app_id`, if it has opted in.
pub fn app_listing(account: &Account, app_id: u64) -> Option<NftListing> {
    account
        .apps_local_state
        .iter()
        .find(|app| app.id == app_id)
        .map(|app| NftListing::from(decode_local_state(app)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algod::TealKeyValue;
    use crate::utils::serialization::bytes_to_base64;

    fn bytes_kv(key: &str, value: &[u8]) -> TealKeyValue {
        TealKeyValue {
            key: bytes_to_base64(key.as_bytes()),
            value: TealValue {
                value_type: TealValue::BYTES,
                bytes: bytes_to_base64(value),
                uint: 0,
            },
        }
    }

    fn uint_kv(key: &str, value: u64) -> TealKeyValue {
        TealKeyValue {
            key: bytes_to_base64(key.as_bytes()),
            value: TealValue {
                value_type: TealValue::UINT,
                bytes: String::new(),
                uint: value,
            },
        }
    }

    fn account(app_id: u64, key_value: Vec<TealKeyValue>) -> Account {
        Account {
            address: Address::new([1u8; 32]).to_string(),
            amount: 1_000_000,
            min_balance: None,
            assets: Vec::new(),
            apps_local_state: vec![ApplicationLocalState {
                id: app_id,
                key_value,
            }],
        }
    }

    #[test]
    fn test_listing_decoded() {
        let creator = Address::new([1u8; 32]);
        let acct = account(
            7,
            vec![
                bytes_kv("creator", creator.as_bytes()),
                bytes_kv("name", b"Sunset"),
                bytes_kv("type", b"art"),
                uint_kv("purchasable", 1),
                uint_kv("price", 5_000_000),
            ],
        );

        let listing = app_listing(&acct, 7).unwrap();
        assert_eq!(listing.creator.as_deref(), Some(creator.to_string().as_str()));
        assert_eq!(listing.name.as_deref(), Some("Sunset"));
        assert_eq!(listing.nft_type.as_deref(), Some("art"));
        assert!(listing.is_listed());
        assert!(listing.other.is_empty());
    }

    #[test]
    fn test_other_app_is_none() {
        assert!(app_listing(&account(7, Vec::new()), 8).is_none());
    }

    #[test]
    fn test_unknown_keys_kept() {
        let acct = account(7, vec![uint_kv("royalty", 5), uint_kv("price", 0)]);
        let listing = app_listing(&acct, 7).unwrap();
        assert!(!listing.is_listed());
        assert_eq!(listing.other.get("royalty"), Some(&StateValue::Uint(5)));

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["royalty"], 5);
        assert_eq!(json["price"], 0);
        assert!(json.get("creator").is_none());
    }
}
