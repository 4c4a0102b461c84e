use rocket::get;
use rocket::serde::json::Json;
use rocket_okapi::openapi;

use crate::models::{ApiEndpoints, ApiResponse, ApiSummary};

/// Lists the available endpoints.
#[openapi(tag = "Info")]
#[get("/")]
pub fn index() -> Json<ApiResponse<ApiSummary>> {
    tracing::info!("Received request: GET /");

    let api_summary = ApiEndpoints::get_summary();
    let message = format!(
        "Welcome to the Wallet Issuer! {} total endpoints available ({} working, {} not implemented)",
        api_summary.total_endpoints, api_summary.working_endpoints, api_summary.not_implemented
    );

    Json(ApiResponse {
        success: true,
        data: Some(api_summary),
        message,
    })
}
