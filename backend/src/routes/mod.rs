pub mod account;
pub mod health;
pub mod nft;
pub mod transaction;

use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use tracing::warn;

use crate::response::ApiError;

pub use account::*;
pub use health::*;
pub use nft::*;
pub use transaction::*;

/// Everything mounted under `/api/nfts`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/nfts")
            .service(get_account)
            .service(mint_nft)
            .service(list_nft)
            .service(buy_nft)
            .service(update_price)
            .service(delist_nft)
            .service(submit_transaction)
            .service(opt_in)
            .service(get_nft_details)
            .service(get_marketplace)
            .default_service(web::to(not_found)),
    )
    .service(health_check);
}

/// Malformed or mistyped JSON bodies answer 400 in the usual envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        error::InternalError::from_response(
            err.to_string(),
            ApiError::BadRequest(err.to_string()).error_response(),
        )
        .into()
    })
}

pub async fn not_found(req: HttpRequest) -> HttpResponse {
    warn!("No route for {} {}", req.method(), req.path());
    ApiError::NotFound("Route not found".to_string()).error_response()
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::body::MessageBody;
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::{web, App};
    use algomint_chain::{
        Address, AlgodClient, AlgodConfig, MarketplaceConfig, SubmissionRelay, TransactionBuilder,
    };
    use serde_json::json;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const APP_ID: u64 = 1001;

    pub fn address(seed: u8) -> String {
        Address::new([seed; 32]).to_string()
    }

    /// The API wired to a mock node. `platform_wallet` seeds the fee receiver.
    pub fn app(
        node: &MockServer,
        platform_wallet: Option<u8>,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let algod = AlgodClient::new(AlgodConfig::new(node.uri())).unwrap();
        let builder = TransactionBuilder::new(
            algod.clone(),
            MarketplaceConfig {
                app_id: APP_ID,
                platform_fee_bp: 250,
                platform_wallet: platform_wallet.map(|seed| Address::new([seed; 32])),
            },
        );
        let relay = SubmissionRelay::new(algod.clone(), 3);

        App::new()
            .app_data(super::json_config())
            .app_data(web::Data::new(algod))
            .app_data(web::Data::new(builder))
            .app_data(web::Data::new(relay))
            .configure(super::configure)
            .default_service(web::to(super::not_found))
    }

    /// A node that fails the test if it is contacted at all.
    pub async fn node_without_calls() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;
        server
    }

    pub async fn node_with_params() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/transactions/params"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fee": 0,
                "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
                "genesis-id": "testnet-v1.0",
                "last-round": 20_000,
                "min-fee": 1000
            })))
            .mount(&server)
            .await;
        server
    }

    pub async fn failing_node() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"message": "catching up"})),
            )
            .mount(&server)
            .await;
        server
    }
}
