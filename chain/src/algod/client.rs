use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    Account, Asset, ErrorResponse, NodeStatus, PendingTransactionInfo, PostTransactionsResponse,
    TransactionParams,
};
use crate::address::Address;
use crate::error::{Error, Result};
use crate::transaction::{SuggestedParams, VALIDITY_WINDOW};
use crate::utils::serialization::base64_to_bytes;

const TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Where the algod node lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgodConfig {
    pub server: String,
    /// Appended as `:port` when not empty.
    pub port: String,
    pub token: String,
}

impl AlgodConfig {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port: String::new(),
            token: String::new(),
        }
    }

    pub fn base_url(&self) -> String {
        let server = self.server.trim_end_matches('/');
        if self.port.is_empty() {
            server.to_string()
        } else {
            format!("{}:{}", server, self.port)
        }
    }
}

/// REST client for an algod node.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AlgodClient {
    base_url: String,
    headers: HeaderMap,
    client: reqwest::Client,
}

impl AlgodClient {
    pub fn new(config: AlgodConfig) -> Result<Self> {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Fails when the token cannot be sent as a header value.
    pub fn with_client(config: AlgodConfig, client: reqwest::Client) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if !config.token.is_empty() {
            let val = HeaderValue::from_str(&config.token).map_err(|_| {
                Error::Config("ALGOD_TOKEN contains invalid header characters".to_string())
            })?;
            headers.insert(TOKEN_HEADER, val);
        }

        Ok(Self {
            base_url: config.base_url(),
            headers,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current network parameters, shaped for transaction headers.
    pub async fn suggested_params(&self) -> Result<SuggestedParams> {
        let params = self.transaction_params().await?;

        let hash = base64_to_bytes("genesis-hash", &params.genesis_hash)
            .map_err(|e| Error::Encoding(e.to_string()))?;
        let genesis_hash: [u8; 32] = hash.try_into().map_err(|v: Vec<u8>| {
            Error::Encoding(format!("genesis hash is {} bytes, expected 32", v.len()))
        })?;

        Ok(SuggestedParams {
            fee: params.fee,
            min_fee: params.min_fee,
            flat_fee: false,
            first_valid: params.last_round,
            last_valid: params.last_round + VALIDITY_WINDOW,
            genesis_id: params.genesis_id,
            genesis_hash,
        })
    }

    pub async fn transaction_params(&self) -> Result<TransactionParams> {
        self.get("v2/transactions/params").await
    }

    pub async fn account_information(&self, address: &Address) -> Result<Account> {
        self.get(&format!("v2/accounts/{}", address)).await
    }

    pub async fn asset_by_id(&self, asset_id: u64) -> Result<Asset> {
        self.get(&format!("v2/assets/{}", asset_id)).await
    }

    pub async fn status(&self) -> Result<NodeStatus> {
        self.get("v2/status").await
    }

    /// Blocks on the node until a round after `round` is committed.
    pub async fn status_after_block(&self, round: u64) -> Result<NodeStatus> {
        self.get(&format!("v2/status/wait-for-block-after/{}", round))
            .await
    }

    pub async fn pending_transaction_information(
        &self,
        tx_id: &str,
    ) -> Result<PendingTransactionInfo> {
        self.get(&format!("v2/transactions/pending/{}?format=json", tx_id))
            .await
    }

    /// Submit one signed transaction or a concatenated signed group.
    pub async fn send_raw_transaction(&self, signed: &[u8]) -> Result<String> {
        let url = self.url("v2/transactions");
        debug!("POST {} ({} bytes)", url, signed.len());

        let resp = self
            .client
            .post(&url)
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "application/x-binary")
            .body(signed.to_vec())
            .send()
            .await?;

        let body: PostTransactionsResponse = Self::parse(resp).await?;
        Ok(body.tx_id)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?;

        Self::parse(resp).await
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        let text = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(Self::node_message(&text)));
        }
        if !status.is_success() {
            return Err(Error::Node {
                status: status.as_u16(),
                message: Self::node_message(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    fn node_message(text: &str) -> String {
        serde_json::from_str::<ErrorResponse>(text)
            .map(|e| e.message)
            .unwrap_or_else(|_| text.to_string())
    }
}
