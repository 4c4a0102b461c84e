// Unit tests for wallet routes

use alloy::signers::local::PrivateKeySigner;
use rocket::State;
use rocket::http::Status;
use std::str::FromStr;
use std::time::Duration;
use wallet_issuer::guards::ApiToken;
use wallet_issuer::models::GateState;
use wallet_issuer::routes::wallet::{issuance_gate, issue_wallet};
use wallet_issuer::services::wallet::IssuanceGate;

use crate::test_utils::{
    TEST_TOKEN, anvil_generator, create_simple_test_app_state, create_test_app_state_with,
};

fn token() -> ApiToken {
    ApiToken(TEST_TOKEN.to_string())
}

#[tokio::test]
async fn test_issue_wallet_returns_matching_pair() {
    let test_state = create_simple_test_app_state();
    let state = State::from(&test_state);

    let response = issue_wallet(state, token())
        .await
        .expect("issuance should succeed")
        .into_inner();

    assert!(response.success);
    let data = response.data.expect("response should carry the wallet");
    assert!(data.address.starts_with("0x"));
    assert_eq!(data.address.len(), 42);
    assert!(data.private_key.starts_with("0x"));
    assert_eq!(data.private_key.len(), 66);

    let signer = PrivateKeySigner::from_str(&data.private_key).expect("valid private key");
    assert_eq!(signer.address().to_checksum(None), data.address);
    assert_eq!(test_state.issuer.gate().state(), GateState::Free);
}

#[tokio::test]
async fn test_issue_wallet_generation_failure_is_500() {
    let generator = anvil_generator();
    generator.fail_next(1);
    let test_state = create_test_app_state_with(IssuanceGate::binary(), generator, None);
    let state = State::from(&test_state);

    let (status, body) = issue_wallet(state, token()).await.unwrap_err();
    assert_eq!(status, Status::InternalServerError);
    assert!(!body.success);
    assert!(body.data.is_none());
    assert!(body.message.contains("Injected generation failure"));

    // The gate was released, so the next request succeeds
    assert!(issue_wallet(state, token()).await.is_ok());
}

#[tokio::test]
async fn test_issue_wallet_gate_timeout_is_503() {
    let gate = IssuanceGate::binary();
    let test_state = create_test_app_state_with(
        gate.clone(),
        anvil_generator(),
        Some(Duration::from_millis(10)),
    );
    let state = State::from(&test_state);

    let _held = gate.acquire().await.unwrap();
    let (status, body) = issue_wallet(state, token()).await.unwrap_err();

    assert_eq!(status, Status::ServiceUnavailable);
    assert!(body.message.contains("Timed out"));
}

#[tokio::test]
async fn test_issue_wallet_closed_gate_is_503() {
    let gate = IssuanceGate::binary();
    gate.close();
    let test_state = create_test_app_state_with(gate, anvil_generator(), None);
    let state = State::from(&test_state);

    let (status, _) = issue_wallet(state, token()).await.unwrap_err();
    assert_eq!(status, Status::ServiceUnavailable);
}

#[tokio::test]
async fn test_issuance_gate_reports_counters() {
    let generator = anvil_generator();
    let test_state =
        create_test_app_state_with(IssuanceGate::new(2).unwrap(), generator.clone(), None);
    let state = State::from(&test_state);

    issue_wallet(state, token()).await.unwrap();
    generator.fail_next(1);
    issue_wallet(state, token()).await.unwrap_err();

    let status = issuance_gate(state, token()).into_inner().data.unwrap();
    assert_eq!(status.state, GateState::Free);
    assert_eq!(status.held, 0);
    assert_eq!(status.capacity, 2);
    assert!(!status.closed);
    assert_eq!(status.issued, 1);
    assert_eq!(status.failed, 1);
}

#[tokio::test]
async fn test_issuance_gate_while_held() {
    let gate = IssuanceGate::binary();
    let test_state = create_test_app_state_with(gate.clone(), anvil_generator(), None);
    let state = State::from(&test_state);

    let _held = gate.acquire().await.unwrap();
    let response = issuance_gate(state, token()).into_inner();

    let status = response.data.unwrap();
    assert_eq!(status.state, GateState::Held);
    assert_eq!(status.held, 1);
    assert!(response.message.contains("1 of 1 held"));
}
