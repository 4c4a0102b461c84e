use rocket::serde::json::Json;
use rocket::{State, get, http::Status, post};
use rocket_okapi::openapi;

use crate::guards::ApiToken;
use crate::models::{ApiResponse, AppState, GateStatusResponse, IssueWalletResponse};
use crate::services::wallet::IssuanceError;

/// HTTP status for a failed issuance
pub fn issuance_error_status(error: &IssuanceError) -> Status {
    match error {
        IssuanceError::GateBusy | IssuanceError::GateClosed | IssuanceError::GateTimeout(_) => {
            Status::ServiceUnavailable
        }
        IssuanceError::InvalidCapacity(_) | IssuanceError::Generation(_) => {
            Status::InternalServerError
        }
    }
}

/// Issues a new wallet.
///
/// Generates a fresh address and private key inside the issuance gate and
/// returns both. The private key is not kept by the service.
#[openapi(tag = "Wallet")]
#[post("/issue_wallet")]
pub async fn issue_wallet(
    state: &State<AppState>,
    _token: ApiToken,
) -> Result<Json<ApiResponse<IssueWalletResponse>>, (Status, Json<ApiResponse<IssueWalletResponse>>)>
{
    tracing::info!("Received request: POST /issue_wallet");
    let _guard = sentry::Hub::current().push_scope();
    sentry::configure_scope(|scope| {
        scope.set_tag("endpoint", "/issue_wallet");
    });

    let result = match state.acquire_timeout {
        Some(timeout) => state.issuer.issue_with_timeout(timeout).await,
        None => state.issuer.issue_new_credential_pair().await,
    };

    match result {
        Ok(pair) => {
            let response = IssueWalletResponse::from(pair);
            Ok(Json(ApiResponse {
                success: true,
                message: format!("Issued wallet {}", response.address),
                data: Some(response),
            }))
        }
        Err(e) => {
            let status = issuance_error_status(&e);
            if status == Status::InternalServerError {
                tracing::error!("Failed to issue wallet: {}", e);
                sentry::capture_message(
                    &format!("Failed to issue wallet: {e}"),
                    sentry::Level::Error,
                );
            } else {
                tracing::warn!("Wallet issuance unavailable: {}", e);
            }

            Err((
                status,
                Json(ApiResponse {
                    success: false,
                    data: None,
                    message: format!("Failed to issue wallet: {e}"),
                }),
            ))
        }
    }
}

/// Reports the issuance gate state and issuance counters.
#[openapi(tag = "Wallet")]
#[get("/issuance_gate")]
pub fn issuance_gate(
    state: &State<AppState>,
    _token: ApiToken,
) -> Json<ApiResponse<GateStatusResponse>> {
    tracing::info!("Received request: GET /issuance_gate");

    let gate = state.issuer.gate();
    let stats = state.issuer.stats();
    let status = GateStatusResponse {
        state: gate.state(),
        held: gate.held_count(),
        capacity: gate.capacity(),
        closed: gate.is_closed(),
        issued: stats.issued,
        failed: stats.failed,
    };

    Json(ApiResponse {
        success: true,
        message: format!(
            "Issuance gate {:?}: {} of {} held",
            status.state, status.held, status.capacity
        ),
        data: Some(status),
    })
}
