use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::header, web, App, HttpServer};
use algomint_chain::{AlgodClient, SubmissionRelay, TransactionBuilder};
use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod response;
mod routes;

use config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("algomint_backend=info,algomint_chain=info,actix_web=info")
        }))
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let algod = AlgodClient::new(config.algod.clone()).context("invalid algod settings")?;
    let builder = web::Data::new(TransactionBuilder::new(
        algod.clone(),
        config.marketplace.clone(),
    ));
    let relay = web::Data::new(SubmissionRelay::new(
        algod.clone(),
        config.confirmation_rounds,
    ));
    let algod = web::Data::new(algod);

    if config.marketplace.app_id == 0 {
        warn!("APP_ID is not set; app calls will target application 0");
    }
    if config.marketplace.platform_wallet.is_none() {
        warn!("PLATFORM_WALLET is not set; buy requests will fail");
    }

    info!("AlgoMint server starting on {}:{}", config.host, config.port);
    info!("Algod node: {}", algod.base_url());
    info!("Health check: http://{}:{}/health", config.host, config.port);

    let frontend_url = config.frontend_url.clone();
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
            .supports_credentials();

        App::new()
            .wrap(Logger::default())
            .wrap(cors)
            .app_data(routes::json_config())
            .app_data(algod.clone())
            .app_data(builder.clone())
            .app_data(relay.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind(config.bind_address())
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
