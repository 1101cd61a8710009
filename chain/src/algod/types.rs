use serde::{Deserialize, Serialize};

/// `GET /v2/transactions/params`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionParams {
    #[serde(default)]
    pub consensus_version: String,
    pub fee: u64,
    /// Base64 of the 32-byte genesis hash.
    pub genesis_hash: String,
    pub genesis_id: String,
    pub last_round: u64,
    #[serde(default)]
    pub min_fee: u64,
}

/// `GET /v2/status` and `GET /v2/status/wait-for-block-after/{round}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    pub last_round: u64,
    #[serde(default)]
    pub time_since_last_round: u64,
    #[serde(default)]
    pub catchup_time: u64,
}

/// `GET /v2/transactions/pending/{txid}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransactionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_round: Option<u64>,
    #[serde(default)]
    pub pool_error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn: Option<serde_json::Value>,
}

impl PendingTransactionInfo {
    pub fn confirmed(&self) -> Option<u64> {
        self.confirmed_round.filter(|round| *round > 0)
    }
}

/// `POST /v2/transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTransactionsResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// Body of algod error responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// `GET /v2/accounts/{address}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    pub address: String,
    pub amount: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_balance: Option<u64>,
    #[serde(default)]
    pub assets: Vec<AssetHolding>,
    #[serde(default)]
    pub apps_local_state: Vec<ApplicationLocalState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetHolding {
    pub amount: u64,
    pub asset_id: u64,
    #[serde(default)]
    pub is_frozen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationLocalState {
    pub id: u64,
    #[serde(default)]
    pub key_value: Vec<TealKeyValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TealKeyValue {
    /// Base64 key bytes.
    pub key: String,
    pub value: TealValue,
}

/// A stored value: `type` 1 is bytes, 2 is uint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TealValue {
    #[serde(rename = "type")]
    pub value_type: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

impl TealValue {
    pub const BYTES: u8 = 1;
    pub const UINT: u8 = 2;
}

/// `GET /v2/assets/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Asset {
    pub index: u64,
    pub params: AssetInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_round: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AssetInfo {
    pub creator: String,
    pub decimals: u32,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_frozen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clawback: Option<String>,
}
