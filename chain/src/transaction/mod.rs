//! # Transaction Module
//!
//! Unsigned Algorand transactions:
//! - header construction from suggested params, with fee estimation
//! - canonical encoding and transaction ids
//! - atomic group assignment

pub mod encoding;
pub mod types;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub use encoding::{encode_transaction, signed_transaction_id, transaction_id};
pub use types::*;

use crate::address::Address;
use crate::error::{Error, Result};

/// Bytes a signature adds to the encoded transaction.
const SIGNATURE_OVERHEAD: u64 = 75;

/// Maximum number of transactions in one atomic group.
pub const MAX_GROUP_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
    pub group: Option<[u8; 32]>,
    pub kind: TransactionKind,
}

impl Transaction {
    /// Build a transaction from suggested params and set its fee.
    ///
    /// Unless the params carry a flat fee, the fee is the per-byte rate times
    /// the signed size estimate, floored at the minimum fee.
    pub fn new(sender: Address, params: &SuggestedParams, kind: TransactionKind) -> Result<Self> {
        let mut txn = Self {
            sender,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
            group: None,
            kind,
        };

        if !params.flat_fee {
            let size = txn.encode()?.len() as u64 + SIGNATURE_OVERHEAD;
            txn.fee = params
                .fee
                .saturating_mul(size)
                .max(params.min_fee.max(MIN_TX_FEE));
        }

        Ok(txn)
    }

    pub fn payment(
        sender: Address,
        receiver: Address,
        amount: u64,
        params: &SuggestedParams,
    ) -> Result<Self> {
        Self::new(sender, params, TransactionKind::Payment { receiver, amount })
    }

    pub fn asset_create(sender: Address, asset: AssetParams, params: &SuggestedParams) -> Result<Self> {
        Self::new(sender, params, TransactionKind::AssetCreate(asset))
    }

    pub fn app_call(
        sender: Address,
        app_id: u64,
        on_complete: OnComplete,
        args: Vec<Vec<u8>>,
        accounts: Vec<Address>,
        params: &SuggestedParams,
    ) -> Result<Self> {
        Self::new(
            sender,
            params,
            TransactionKind::ApplicationCall {
                app_id,
                on_complete,
                args,
                accounts,
            },
        )
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        encoding::encode_transaction(self)
    }

    pub fn raw_id(&self) -> Result<[u8; 32]> {
        Ok(encoding::raw_transaction_id(&self.encode()?))
    }

    pub fn id(&self) -> Result<String> {
        Ok(encoding::transaction_id(&self.encode()?))
    }

    /// Base64 bytes plus id, ready for a wallet to sign.
    pub fn to_encoded(&self) -> Result<EncodedTransaction> {
        let bytes = self.encode()?;
        Ok(EncodedTransaction {
            txn: BASE64.encode(&bytes),
            txn_id: encoding::transaction_id(&bytes),
        })
    }
}

/// Compute a group id over `txns` in order and stamp it on every member.
pub fn assign_group_id(txns: &mut [Transaction]) -> Result<[u8; 32]> {
    if txns.is_empty() {
        return Err(Error::invalid_input("cannot group zero transactions"));
    }
    if txns.len() > MAX_GROUP_SIZE {
        return Err(Error::invalid_input(format!(
            "group of {} exceeds the maximum of {}",
            txns.len(),
            MAX_GROUP_SIZE
        )));
    }

    let mut raw_ids = Vec::with_capacity(txns.len());
    for txn in txns.iter_mut() {
        txn.group = None;
        raw_ids.push(txn.raw_id()?);
    }

    let group_id = encoding::compute_group_id(&raw_ids)?;
    for txn in txns.iter_mut() {
        txn.group = Some(group_id);
    }
    Ok(group_id)
}

/// Encode an already grouped set of transactions.
pub fn encode_group(txns: &[Transaction]) -> Result<EncodedGroup> {
    let group_id = txns
        .first()
        .and_then(|t| t.group)
        .ok_or_else(|| Error::invalid_input("transactions have no group id"))?;

    let mut encoded = Vec::with_capacity(txns.len());
    let mut ids = Vec::with_capacity(txns.len());
    for txn in txns {
        if txn.group != Some(group_id) {
            return Err(Error::invalid_input("transactions carry different group ids"));
        }
        let EncodedTransaction { txn, txn_id } = txn.to_encoded()?;
        encoded.push(txn);
        ids.push(txn_id);
    }

    Ok(EncodedGroup {
        txns: encoded,
        txn_ids: ids,
        group_id: BASE64.encode(group_id),
    })
}

/// `uint64` application argument: 8 bytes, big-endian.
pub fn encode_uint64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}
