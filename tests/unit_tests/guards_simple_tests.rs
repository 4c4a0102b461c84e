use rocket::http::{Header, Status};
use rocket::local::asynchronous::Client;
use rocket::{get, routes};
use wallet_issuer::guards::ApiToken;

use crate::test_utils::{TEST_TOKEN, bearer, create_simple_test_app_state};

#[get("/protected")]
fn protected(token: ApiToken) -> String {
    token.0
}

async fn client_with_state() -> Client {
    let rocket = rocket::build()
        .manage(create_simple_test_app_state())
        .mount("/", routes![protected]);
    Client::tracked(rocket).await.expect("valid rocket instance")
}

#[tokio::test]
async fn test_valid_token_accepted() {
    let client = client_with_state().await;
    let response = client.get("/protected").header(bearer()).dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.unwrap(), TEST_TOKEN);
}

#[tokio::test]
async fn test_missing_header_rejected() {
    let client = client_with_state().await;
    let response = client.get("/protected").dispatch().await;

    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_wrong_token_rejected() {
    let client = client_with_state().await;
    let response = client
        .get("/protected")
        .header(Header::new("Authorization", "Bearer wrong"))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_non_bearer_scheme_rejected() {
    let client = client_with_state().await;
    let response = client
        .get("/protected")
        .header(Header::new("Authorization", format!("Basic {TEST_TOKEN}")))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Unauthorized);
}

#[tokio::test]
async fn test_missing_state_is_server_error() {
    let rocket = rocket::build().mount("/", routes![protected]);
    let client = Client::tracked(rocket).await.expect("valid rocket instance");
    let response = client.get("/protected").header(bearer()).dispatch().await;

    assert_eq!(response.status(), Status::InternalServerError);
}
