use actix_web::HttpResponse;
use chrono::Utc;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

#[actix_web::get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "OK",
        message: "AlgoMint API is running",
        timestamp: Utc::now().to_rfc3339(),
    })
}
