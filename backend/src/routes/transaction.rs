use actix_web::{web, HttpResponse};
use algomint_chain::SubmissionRelay;
use serde::Deserialize;
use tracing::info;

use crate::response::{ApiError, ApiResponse};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub signed_txn: Option<String>,
}

/// Relay a wallet-signed transaction or group and wait for confirmation.
#[actix_web::post("/submit")]
pub async fn submit_transaction(
    req: web::Json<SubmitRequest>,
    relay: web::Data<SubmissionRelay>,
) -> Result<HttpResponse, ApiError> {
    let signed = req.signed_txn.as_deref().unwrap_or_default();
    info!("Submit request ({} base64 chars)", signed.len());

    let result = relay.submit(signed).await?;
    Ok(ApiResponse::ok(result))
}
