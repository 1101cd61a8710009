use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Floor applied to every transaction fee, in microalgos.
pub const MIN_TX_FEE: u64 = 1000;

/// Validity window added to the node's last round.
pub const VALIDITY_WINDOW: u64 = 1000;

/// Network parameters every transaction header needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte, or the absolute fee when `flat_fee` is set.
    pub fee: u64,
    pub min_fee: u64,
    pub flat_fee: bool,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; 32],
}

/// What an application call does to the caller's relationship with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnComplete {
    #[default]
    NoOp,
    OptIn,
}

impl OnComplete {
    pub fn as_u64(self) -> u64 {
        match self {
            OnComplete::NoOp => 0,
            OnComplete::OptIn => 1,
        }
    }
}

/// Parameters of a new asset (`acfg` with no asset id).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetParams {
    pub total: u64,
    pub decimals: u32,
    pub default_frozen: bool,
    pub unit_name: String,
    pub asset_name: String,
    pub url: String,
    pub metadata_hash: Option<[u8; 32]>,
    pub manager: Option<Address>,
    pub reserve: Option<Address>,
    pub freeze: Option<Address>,
    pub clawback: Option<Address>,
}

/// Type-specific body of a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    Payment {
        receiver: Address,
        amount: u64,
    },
    AssetCreate(AssetParams),
    ApplicationCall {
        app_id: u64,
        on_complete: OnComplete,
        args: Vec<Vec<u8>>,
        accounts: Vec<Address>,
    },
}

impl TransactionKind {
    /// The wire `type` tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            TransactionKind::Payment { .. } => "pay",
            TransactionKind::AssetCreate(_) => "acfg",
            TransactionKind::ApplicationCall { .. } => "appl",
        }
    }
}

/// An unsigned transaction as handed to the client for signing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EncodedTransaction {
    /// Base64 canonical msgpack bytes.
    pub txn: String,
    pub txn_id: String,
}

/// An ordered set of unsigned transactions sharing one group id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EncodedGroup {
    pub txns: Vec<String>,
    pub txn_ids: Vec<String>,
    /// Base64 of the 32-byte group id.
    pub group_id: String,
}
