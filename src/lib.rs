use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use std::sync::Arc;

pub mod fairings;
pub mod guards;
pub mod models;
pub mod routes;
pub mod services;

use crate::models::{AppState, IssuerConfig};
use crate::services::wallet::{IssuanceError, WalletIssuer};

/// Build the application state from configuration
pub fn build_app_state(config: &IssuerConfig) -> Result<AppState, IssuanceError> {
    let issuer = WalletIssuer::from_config(config)?;

    Ok(AppState {
        issuer: Arc::new(issuer),
        acquire_timeout: config.acquire_timeout,
        access_token: config.access_token.clone(),
    })
}

/// Mount routes and fairings on an already built state
pub fn rocket_with_state(app_state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(app_state)
        .attach(fairings::RequestLogger)
        .attach(fairings::PanicCatcher)
        .attach(fairings::NoStoreSecrets)
        .attach(AdHoc::on_shutdown("Close issuance gate", |rocket| {
            Box::pin(async move {
                if let Some(state) = rocket.state::<AppState>() {
                    state.issuer.gate().close();
                }
            })
        }))
        .mount(
            "/",
            openapi_get_routes![
                routes::info::index,
                routes::wallet::issue_wallet,
                routes::wallet::issuance_gate,
            ],
        )
}

pub async fn create_rocket() -> Rocket<Build> {
    // Load and cache environment variables
    dotenvy::dotenv().ok();

    let config = IssuerConfig::from_env().expect("Failed to load issuer configuration");
    let app_state = build_app_state(&config).expect("Failed to build wallet issuer");

    rocket_with_state(app_state)
}
