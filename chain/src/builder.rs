//! Builds the unsigned transactions behind each marketplace action.
//!
//! Every build validates its intent first, then makes exactly one node call
//! for suggested params. Nothing is signed or stored here.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::address::Address;
use crate::algod::AlgodClient;
use crate::error::{Error, Result};
use crate::intent::{
    BuyIntent, DelistIntent, ListIntent, MintIntent, OptInIntent, UpdatePriceIntent,
};
use crate::transaction::{
    assign_group_id, encode_group, encode_uint64, AssetParams, EncodedGroup, EncodedTransaction,
    OnComplete, Transaction,
};

/// Basis points in one whole.
pub const BASIS_POINTS: u64 = 10_000;
/// Fee the marketplace takes on every sale unless configured otherwise.
pub const DEFAULT_PLATFORM_FEE_BP: u64 = 250;

const OP_MINT: &[u8] = b"mint_nft";
const OP_LIST: &[u8] = b"list_nft";
const OP_BUY: &[u8] = b"buy_nft";
const OP_UPDATE_PRICE: &[u8] = b"update_price";
const OP_DELIST: &[u8] = b"delist_nft";

const MINT_SIGN_MESSAGE: &str = "Sign both transactions in your wallet";
const BUY_SIGN_MESSAGE: &str = "Sign all grouped transactions in your wallet";

/// Marketplace settings the builder needs besides the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    pub app_id: u64,
    pub platform_fee_bp: u64,
    /// Receiver of the platform fee in a purchase group.
    pub platform_wallet: Option<Address>,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            app_id: 0,
            platform_fee_bp: DEFAULT_PLATFORM_FEE_BP,
            platform_wallet: None,
        }
    }
}

/// A price divided between the platform and the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSplit {
    pub fee_amount: u64,
    pub seller_amount: u64,
}

/// Floor-divide the platform's share out of `price`; the seller gets the rest.
pub fn split_price(price: u64, fee_bp: u64) -> Result<FeeSplit> {
    if fee_bp > BASIS_POINTS {
        return Err(Error::Config(format!(
            "platform fee of {} bp exceeds 100%",
            fee_bp
        )));
    }
    let fee_amount = (u128::from(price) * u128::from(fee_bp) / u128::from(BASIS_POINTS)) as u64;
    Ok(FeeSplit {
        fee_amount,
        seller_amount: price - fee_amount,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintTransactions {
    pub asset_transaction: EncodedTransaction,
    pub app_transaction: EncodedTransaction,
    /// Hint for the wallet prompt.
    pub message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyTransactions {
    #[serde(flatten)]
    pub group: EncodedGroup,
    pub platform_fee: u64,
    #[serde(flatten)]
    pub split: FeeSplit,
    pub message: &'static str,
}

/// Turns validated intents into unsigned, encoded transactions.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    algod: AlgodClient,
    config: MarketplaceConfig,
}

impl TransactionBuilder {
    pub fn new(algod: AlgodClient, config: MarketplaceConfig) -> Self {
        Self { algod, config }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// Asset creation plus the `mint_nft` app call recording the NFT.
    pub async fn build_mint(&self, intent: &MintIntent) -> Result<MintTransactions> {
        let mint = intent.validate()?;
        info!(
            "Building mint for {} ({}, {}, purchasable={}, price={})",
            mint.creator, mint.name, mint.nft_type, mint.purchasable, mint.price
        );

        let params = self.algod.suggested_params().await?;

        let asset = AssetParams {
            total: 1,
            decimals: 0,
            default_frozen: false,
            unit_name: mint.unit_name.clone(),
            asset_name: mint.asset_name.clone(),
            url: mint.url.clone(),
            metadata_hash: metadata_hash(&mint.metadata),
            manager: Some(mint.creator),
            ..AssetParams::default()
        };
        let asset_txn = Transaction::asset_create(mint.creator, asset, &params)?;

        let args = vec![
            OP_MINT.to_vec(),
            mint.name.as_bytes().to_vec(),
            mint.nft_type.as_str().as_bytes().to_vec(),
            encode_uint64(u64::from(mint.purchasable)),
            encode_uint64(mint.price),
        ];
        let app_txn = self.app_call(mint.creator, OnComplete::NoOp, args, Vec::new(), &params)?;

        let built = MintTransactions {
            asset_transaction: asset_txn.to_encoded()?,
            app_transaction: app_txn.to_encoded()?,
            message: MINT_SIGN_MESSAGE,
        };
        info!(
            "Mint transactions created: asset {}, app {}",
            built.asset_transaction.txn_id, built.app_transaction.txn_id
        );
        Ok(built)
    }

    pub async fn build_list(&self, intent: &ListIntent) -> Result<EncodedTransaction> {
        let listing = intent.validate()?;
        self.single_app_call(
            listing.seller,
            OnComplete::NoOp,
            vec![OP_LIST.to_vec(), encode_uint64(listing.price)],
            Vec::new(),
        )
        .await
    }

    pub async fn build_update_price(
        &self,
        intent: &UpdatePriceIntent,
    ) -> Result<EncodedTransaction> {
        let listing = intent.validate()?;
        self.single_app_call(
            listing.seller,
            OnComplete::NoOp,
            vec![OP_UPDATE_PRICE.to_vec(), encode_uint64(listing.price)],
            Vec::new(),
        )
        .await
    }

    pub async fn build_delist(&self, intent: &DelistIntent) -> Result<EncodedTransaction> {
        let seller = intent.validate()?;
        self.single_app_call(seller, OnComplete::NoOp, vec![OP_DELIST.to_vec()], Vec::new())
            .await
    }

    pub async fn build_opt_in(&self, intent: &OptInIntent) -> Result<EncodedTransaction> {
        let address = intent.validate()?;
        self.single_app_call(address, OnComplete::OptIn, Vec::new(), Vec::new())
            .await
    }

    /// The purchase group, in the order the app checks it:
    /// `[platform fee payment, seller payment, buy_nft app call]`.
    pub async fn build_buy(&self, intent: &BuyIntent) -> Result<BuyTransactions> {
        let buy = intent.validate()?;
        let platform_wallet = self
            .config
            .platform_wallet
            .ok_or_else(|| Error::Config("PLATFORM_WALLET is not set".to_string()))?;
        let split = split_price(buy.price, self.config.platform_fee_bp)?;
        info!(
            "Building buy: {} pays {} ({} fee, {} to seller {})",
            buy.buyer, buy.price, split.fee_amount, split.seller_amount, buy.seller
        );

        let params = self.algod.suggested_params().await?;

        let fee_txn = Transaction::payment(buy.buyer, platform_wallet, split.fee_amount, &params)?;
        let payment_txn =
            Transaction::payment(buy.buyer, buy.seller, split.seller_amount, &params)?;
        let app_txn = self.app_call(
            buy.buyer,
            OnComplete::NoOp,
            vec![OP_BUY.to_vec()],
            vec![buy.seller],
            &params,
        )?;

        let mut txns = [fee_txn, payment_txn, app_txn];
        assign_group_id(&mut txns)?;
        let group = encode_group(&txns)?;
        info!("Buy group created: {}", group.group_id);

        Ok(BuyTransactions {
            group,
            platform_fee: self.config.platform_fee_bp,
            split,
            message: BUY_SIGN_MESSAGE,
        })
    }

    async fn single_app_call(
        &self,
        sender: Address,
        on_complete: OnComplete,
        args: Vec<Vec<u8>>,
        accounts: Vec<Address>,
    ) -> Result<EncodedTransaction> {
        let params = self.algod.suggested_params().await?;
        let txn = self.app_call(sender, on_complete, args, accounts, &params)?;
        let encoded = txn.to_encoded()?;
        info!(
            "App call {:?} from {} created: {}",
            on_complete, sender, encoded.txn_id
        );
        Ok(encoded)
    }

    fn app_call(
        &self,
        sender: Address,
        on_complete: OnComplete,
        args: Vec<Vec<u8>>,
        accounts: Vec<Address>,
        params: &crate::transaction::SuggestedParams,
    ) -> Result<Transaction> {
        Transaction::app_call(
            sender,
            self.config.app_id,
            on_complete,
            args,
            accounts,
            params,
        )
    }
}

/// SHA-256 of the metadata text, or no hash when there is no metadata.
fn metadata_hash(metadata: &str) -> Option<[u8; 32]> {
    if metadata.is_empty() {
        None
    } else {
        Some(Sha256::digest(metadata.as_bytes()).into())
    }
}
