use actix_web::{web, HttpResponse};
use algomint_chain::algod::{ApplicationLocalState, AssetHolding, AssetInfo};
use algomint_chain::{app_listing, Address, AlgodClient, Error, NftListing, TransactionBuilder};
use serde::Serialize;
use tracing::info;

use crate::response::{ApiError, ApiResponse};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub address: String,
    pub amount: u64,
    pub assets: Vec<AssetHolding>,
    pub apps_local_state: Vec<ApplicationLocalState>,
    /// Local state in the marketplace app, `null` before opt-in.
    pub nft_data: Option<NftListing>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResponse {
    pub index: u64,
    pub params: AssetInfo,
    pub created_at_round: Option<u64>,
}

#[derive(Serialize)]
pub struct MarketplaceResponse {
    pub message: &'static str,
    pub tip: &'static str,
}

/// Balance, holdings and marketplace state of one account.
#[actix_web::get("/account/{address}")]
pub async fn get_account(
    path: web::Path<String>,
    algod: web::Data<AlgodClient>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    let raw = path.into_inner();
    let address: Address = raw.trim().parse()?;
    info!("Account lookup: {}", address);

    let account = algod.account_information(&address).await?;
    let nft_data = app_listing(&account, builder.config().app_id);

    Ok(ApiResponse::ok(AccountResponse {
        address: account.address,
        amount: account.amount,
        assets: account.assets,
        apps_local_state: account.apps_local_state,
        nft_data,
    }))
}

#[actix_web::get("/details/{asset_id}")]
pub async fn get_nft_details(
    path: web::Path<String>,
    algod: web::Data<AlgodClient>,
) -> Result<HttpResponse, ApiError> {
    let asset_id: u64 = path
        .trim()
        .parse()
        .map_err(|_| Error::invalid_input("Asset ID must be a positive integer"))?;
    info!("Asset lookup: {}", asset_id);

    let asset = algod.asset_by_id(asset_id).await?;
    Ok(ApiResponse::ok(AssetResponse {
        index: asset.index,
        params: asset.params,
        created_at_round: asset.created_at_round,
    }))
}

/// Listings are not indexed here; clients query an indexer.
#[actix_web::get("/marketplace")]
pub async fn get_marketplace() -> HttpResponse {
    ApiResponse::ok(MarketplaceResponse {
        message: "Use Algorand Indexer to query marketplace listings",
        tip: "Filter by app_id and look for local state with price > 0",
    })
}
