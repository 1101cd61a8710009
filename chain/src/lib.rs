//! # Algomint Chain
//!
//! Algorand plumbing for a thin NFT marketplace backend.
//!
//! ## Features
//! - Intent validation for mint, list, buy, price update, delist and opt-in
//! - Unsigned transaction construction with canonical encoding and atomic groups
//! - Platform fee split in basis points
//! - Relay for externally signed transactions with bounded confirmation polling
//! - Decoding of the marketplace app's local state
//! - Wallet connection session tracking
//!
//! ## Quick Start
//!
//! ```no_run
//! use algomint_chain::{AlgodClient, AlgodConfig, ListIntent, MarketplaceConfig, TransactionBuilder};
//!
//! # async fn run() -> algomint_chain::Result<()> {
//! let algod = AlgodClient::new(AlgodConfig::new("https://testnet-api.algonode.cloud"))?;
//! let builder = TransactionBuilder::new(algod, MarketplaceConfig { app_id: 42, ..Default::default() });
//!
//! let unsigned = builder
//!     .build_list(&ListIntent {
//!         seller: Some("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ".to_string()),
//!         price: Some(1_000_000),
//!     })
//!     .await?;
//! println!("{}", unsigned.txn_id);
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod algod;
pub mod app_state;
pub mod builder;
pub mod error;
pub mod intent;
pub mod relay;
pub mod transaction;
pub mod utils;
pub mod wallet;


pub use address::Address;
pub use algod::{Account, AlgodClient, AlgodConfig, Asset, PendingTransactionInfo};
pub use app_state::{app_listing, decode_local_state, NftListing, StateValue};
pub use builder::{
    split_price, BuyTransactions, FeeSplit, MarketplaceConfig, MintTransactions,
    TransactionBuilder, BASIS_POINTS, DEFAULT_PLATFORM_FEE_BP,
};
pub use error::{Error, Result};
pub use intent::{
    BuyIntent, DelistIntent, ListIntent, MintIntent, NftType, OptInIntent, UpdatePriceIntent,
};
pub use relay::{SubmissionRelay, SubmissionResult, DEFAULT_WAIT_ROUNDS};
pub use transaction::{EncodedGroup, EncodedTransaction, Transaction};
pub use wallet::{short_address, WalletEvent, WalletSession, WalletState};
