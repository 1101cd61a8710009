//! Canonical msgpack encoding.
//!
//! Algorand hashes the exact bytes of a transaction, so the encoding must be
//! canonical: map keys sorted, zero and empty values omitted, and integers
//! written in their smallest form.

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

use super::types::{AssetParams, TransactionKind};
use super::Transaction;
use crate::error::{Error, Result};

const TX_PREFIX: &[u8] = b"TX";
const GROUP_PREFIX: &[u8] = b"TG";

/// A msgpack value in a canonical map.
#[derive(Debug, Clone)]
enum Field {
    Uint(u64),
    Bool(bool),
    Str(String),
    Bin(Vec<u8>),
    BinArray(Vec<Vec<u8>>),
    Map(Vec<(&'static str, Field)>),
}

impl Field {
    fn is_empty(&self) -> bool {
        match self {
            Field::Uint(v) => *v == 0,
            Field::Bool(v) => !*v,
            Field::Str(v) => v.is_empty(),
            Field::Bin(v) => v.is_empty(),
            Field::BinArray(v) => v.is_empty(),
            Field::Map(v) => v.iter().all(|(_, f)| f.is_empty()),
        }
    }
}

fn enc<T, E: std::fmt::Display>(r: std::result::Result<T, E>) -> Result<T> {
    r.map_err(|e| Error::Encoding(e.to_string()))
}

fn write_field(buf: &mut Vec<u8>, field: &Field) -> Result<()> {
    match field {
        Field::Uint(v) => {
            enc(rmp::encode::write_uint(buf, *v))?;
        }
        Field::Bool(v) => enc(rmp::encode::write_bool(buf, *v))?,
        Field::Str(v) => enc(rmp::encode::write_str(buf, v))?,
        Field::Bin(v) => enc(rmp::encode::write_bin(buf, v))?,
        Field::BinArray(items) => {
            enc(rmp::encode::write_array_len(buf, items.len() as u32))?;
            for item in items {
                enc(rmp::encode::write_bin(buf, item))?;
            }
        }
        Field::Map(entries) => write_map(buf, entries)?,
    }
    Ok(())
}

fn write_map(buf: &mut Vec<u8>, entries: &[(&'static str, Field)]) -> Result<()> {
    let mut present: Vec<&(&'static str, Field)> =
        entries.iter().filter(|(_, f)| !f.is_empty()).collect();
    present.sort_by(|a, b| a.0.cmp(b.0));

    enc(rmp::encode::write_map_len(buf, present.len() as u32))?;
    for (key, field) in present {
        enc(rmp::encode::write_str(buf, key))?;
        write_field(buf, field)?;
    }
    Ok(())
}

fn asset_params_fields(params: &AssetParams) -> Vec<(&'static str, Field)> {
    let address = |a: &Option<crate::address::Address>| {
        Field::Bin(a.map(|a| a.as_bytes().to_vec()).unwrap_or_default())
    };
    vec![
        ("t", Field::Uint(params.total)),
        ("dc", Field::Uint(u64::from(params.decimals))),
        ("df", Field::Bool(params.default_frozen)),
        ("un", Field::Str(params.unit_name.clone())),
        ("an", Field::Str(params.asset_name.clone())),
        ("au", Field::Str(params.url.clone())),
        (
            "am",
            Field::Bin(params.metadata_hash.map(|h| h.to_vec()).unwrap_or_default()),
        ),
        ("m", address(&params.manager)),
        ("r", address(&params.reserve)),
        ("f", address(&params.freeze)),
        ("c", address(&params.clawback)),
    ]
}

fn transaction_fields(txn: &Transaction) -> Vec<(&'static str, Field)> {
    let mut fields = vec![
        ("type", Field::Str(txn.kind.type_tag().to_string())),
        ("snd", Field::Bin(txn.sender.as_bytes().to_vec())),
        ("fee", Field::Uint(txn.fee)),
        ("fv", Field::Uint(txn.first_valid)),
        ("lv", Field::Uint(txn.last_valid)),
        ("gen", Field::Str(txn.genesis_id.clone())),
        ("gh", Field::Bin(txn.genesis_hash.to_vec())),
        (
            "grp",
            Field::Bin(txn.group.map(|g| g.to_vec()).unwrap_or_default()),
        ),
    ];

    match &txn.kind {
        TransactionKind::Payment { receiver, amount } => {
            fields.push(("rcv", Field::Bin(receiver.as_bytes().to_vec())));
            fields.push(("amt", Field::Uint(*amount)));
        }
        TransactionKind::AssetCreate(params) => {
            fields.push(("apar", Field::Map(asset_params_fields(params))));
        }
        TransactionKind::ApplicationCall {
            app_id,
            on_complete,
            args,
            accounts,
        } => {
            fields.push(("apid", Field::Uint(*app_id)));
            fields.push(("apan", Field::Uint(on_complete.as_u64())));
            fields.push(("apaa", Field::BinArray(args.clone())));
            fields.push((
                "apat",
                Field::BinArray(accounts.iter().map(|a| a.as_bytes().to_vec()).collect()),
            ));
        }
    }

    fields
}

/// Canonical msgpack bytes of an unsigned transaction.
pub fn encode_transaction(txn: &Transaction) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    write_map(&mut buf, &transaction_fields(txn))?;
    Ok(buf)
}

/// SHA-512/256 of `"TX" || bytes`.
pub fn raw_transaction_id(encoded: &[u8]) -> [u8; 32] {
    let mut hasher = Sha512_256::new();
    hasher.update(TX_PREFIX);
    hasher.update(encoded);
    hasher.finalize().into()
}

/// Text form of a transaction id: 52 characters of unpadded base32.
pub fn transaction_id(encoded: &[u8]) -> String {
    BASE32_NOPAD.encode(&raw_transaction_id(encoded))
}

/// SHA-512/256 of `"TG" || msgpack({"txlist": ids})`.
pub fn compute_group_id(raw_ids: &[[u8; 32]]) -> Result<[u8; 32]> {
    let mut buf = Vec::with_capacity(16 + raw_ids.len() * 34);
    write_map(
        &mut buf,
        &[(
            "txlist",
            Field::BinArray(raw_ids.iter().map(|id| id.to_vec()).collect()),
        )],
    )?;

    let mut hasher = Sha512_256::new();
    hasher.update(GROUP_PREFIX);
    hasher.update(&buf);
    Ok(hasher.finalize().into())
}

/// Id of the first transaction in a signed blob (`{"sig": .., "txn": ..}`).
///
/// The embedded `txn` map is re-encoded as read, which reproduces the signed
/// bytes as long as the signer wrote canonical msgpack.
pub fn signed_transaction_id(blob: &[u8]) -> Result<String> {
    let mut reader = blob;
    let value = rmpv::decode::read_value(&mut reader)?;

    let entries = value
        .as_map()
        .ok_or_else(|| Error::Encoding("signed transaction is not a map".to_string()))?;
    let txn = entries
        .iter()
        .find(|(k, _)| k.as_str() == Some("txn"))
        .map(|(_, v)| v)
        .ok_or_else(|| Error::Encoding("signed transaction has no txn field".to_string()))?;

    let mut encoded = Vec::new();
    enc(rmpv::encode::write_value(&mut encoded, txn))?;
    Ok(transaction_id(&encoded))
}

/// Wrap canonical transaction bytes as a signed transaction with the given
/// signature.
#[cfg(test)]
pub(crate) fn encode_signed(encoded_txn: &[u8], signature: &[u8; 64]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_txn.len() + 80);
    enc(rmp::encode::write_map_len(&mut buf, 2))?;
    enc(rmp::encode::write_str(&mut buf, "sig"))?;
    enc(rmp::encode::write_bin(&mut buf, signature))?;
    enc(rmp::encode::write_str(&mut buf, "txn"))?;
    buf.extend_from_slice(encoded_txn);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::transaction::types::OnComplete;

    fn sample(kind: TransactionKind) -> Transaction {
        Transaction {
            sender: Address::new([1u8; 32]),
            fee: 1000,
            first_valid: 100,
            last_valid: 1100,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: [2u8; 32],
            group: None,
            kind,
        }
    }

    fn top_level_keys(bytes: &[u8]) -> Vec<String> {
        let value = rmpv::decode::read_value(&mut &bytes[..]).unwrap();
        value
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_payment_keys_sorted_and_zeroes_omitted() {
        let txn = sample(TransactionKind::Payment {
            receiver: Address::new([3u8; 32]),
            amount: 0,
        });
        let keys = top_level_keys(&encode_transaction(&txn).unwrap());
        assert_eq!(
            keys,
            vec!["fee", "fv", "gen", "gh", "lv", "rcv", "snd", "type"]
        );
    }

    #[test]
    fn test_app_call_keys() {
        let txn = sample(TransactionKind::ApplicationCall {
            app_id: 42,
            on_complete: OnComplete::OptIn,
            args: vec![b"buy_nft".to_vec()],
            accounts: vec![Address::new([4u8; 32])],
        });
        let keys = top_level_keys(&encode_transaction(&txn).unwrap());
        assert_eq!(
            keys,
            vec!["apaa", "apan", "apat", "apid", "fee", "fv", "gen", "gh", "lv", "snd", "type"]
        );
    }

    #[test]
    fn test_noop_app_call_omits_on_complete() {
        let txn = sample(TransactionKind::ApplicationCall {
            app_id: 42,
            on_complete: OnComplete::NoOp,
            args: Vec::new(),
            accounts: Vec::new(),
        });
        let keys = top_level_keys(&encode_transaction(&txn).unwrap());
        assert!(!keys.contains(&"apan".to_string()));
        assert!(!keys.contains(&"apaa".to_string()));
    }

    #[test]
    fn test_asset_params_nested_sorted() {
        let txn = sample(TransactionKind::AssetCreate(AssetParams {
            total: 1,
            unit_name: "NFT".to_string(),
            asset_name: "Sunset".to_string(),
            manager: Some(Address::new([1u8; 32])),
            ..AssetParams::default()
        }));
        let bytes = encode_transaction(&txn).unwrap();
        let value = rmpv::decode::read_value(&mut &bytes[..]).unwrap();
        let apar = value
            .as_map()
            .unwrap()
            .iter()
            .find(|(k, _)| k.as_str() == Some("apar"))
            .map(|(_, v)| v.clone())
            .unwrap();
        let keys: Vec<&str> = apar
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["an", "m", "t", "un"]);
    }

    #[test]
    fn test_transaction_id_shape() {
        let txn = sample(TransactionKind::Payment {
            receiver: Address::new([3u8; 32]),
            amount: 5,
        });
        let id = transaction_id(&encode_transaction(&txn).unwrap());
        assert_eq!(id.len(), 52);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn test_group_id_depends_on_order() {
        let a = [1u8; 32];
        let b = [2u8; 32];
        let ab = compute_group_id(&[a, b]).unwrap();
        let ba = compute_group_id(&[b, a]).unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ab, compute_group_id(&[a, b]).unwrap());
    }

    #[test]
    fn test_signed_transaction_id_matches_unsigned() {
        let txn = sample(TransactionKind::Payment {
            receiver: Address::new([3u8; 32]),
            amount: 975_000,
        });
        let encoded = encode_transaction(&txn).unwrap();
        let signed = encode_signed(&encoded, &[0u8; 64]).unwrap();
        assert_eq!(
            signed_transaction_id(&signed).unwrap(),
            transaction_id(&encoded)
        );
    }

    #[test]
    fn test_signed_transaction_id_rejects_garbage() {
        assert!(signed_transaction_id(&[0x01]).is_err());
        assert!(signed_transaction_id(&[]).is_err());
    }
}
