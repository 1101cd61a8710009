use actix_web::{web, HttpResponse};
use algomint_chain::{
    BuyIntent, DelistIntent, ListIntent, MintIntent, OptInIntent, TransactionBuilder,
    UpdatePriceIntent,
};
use tracing::info;

use crate::response::{ApiError, ApiResponse};

/// Unsigned asset-create and `mint_nft` app call for the creator to sign.
#[actix_web::post("/mint")]
pub async fn mint_nft(
    req: web::Json<MintIntent>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    info!(
        "Mint request: creator={:?} name={:?} type={:?} purchasable={:?} price={:?}",
        req.creator, req.name, req.nft_type, req.purchasable, req.price
    );
    let built = builder.build_mint(&req).await?;
    Ok(ApiResponse::ok(built))
}

#[actix_web::post("/list")]
pub async fn list_nft(
    req: web::Json<ListIntent>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    info!("List request: seller={:?} price={:?}", req.seller, req.price);
    let txn = builder.build_list(&req).await?;
    Ok(ApiResponse::ok(txn))
}

/// The three-transaction purchase group with its fee split.
#[actix_web::post("/buy")]
pub async fn buy_nft(
    req: web::Json<BuyIntent>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    info!(
        "Buy request: buyer={:?} seller={:?} price={:?}",
        req.buyer, req.seller, req.price
    );
    let built = builder.build_buy(&req).await?;
    Ok(ApiResponse::ok(built))
}

#[actix_web::post("/update-price")]
pub async fn update_price(
    req: web::Json<UpdatePriceIntent>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    info!("Update price request: seller={:?} price={:?}", req.seller, req.price);
    let txn = builder.build_update_price(&req).await?;
    Ok(ApiResponse::ok(txn))
}

#[actix_web::post("/delist")]
pub async fn delist_nft(
    req: web::Json<DelistIntent>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    info!("Delist request: seller={:?}", req.seller);
    let txn = builder.build_delist(&req).await?;
    Ok(ApiResponse::ok(txn))
}

#[actix_web::post("/opt-in")]
pub async fn opt_in(
    req: web::Json<OptInIntent>,
    builder: web::Data<TransactionBuilder>,
) -> Result<HttpResponse, ApiError> {
    info!("Opt-in request: address={:?}", req.address);
    let txn = builder.build_opt_in(&req).await?;
    Ok(ApiResponse::ok(txn))
}
