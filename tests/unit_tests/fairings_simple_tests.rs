use rocket::fairing::Fairing;
use wallet_issuer::fairings::{NoStoreSecrets, PanicCatcher, RequestLogger};

#[test]
fn test_fairing_names() {
    assert_eq!(RequestLogger.info().name, "Request/Response Logger");
    assert_eq!(PanicCatcher.info().name, "Panic Catcher");
    assert_eq!(NoStoreSecrets.info().name, "No-Store Secrets");
}

#[test]
fn test_no_store_applies_only_to_secret_paths() {
    assert!(NoStoreSecrets::applies_to("/issue_wallet"));
    assert!(!NoStoreSecrets::applies_to("/"));
    assert!(!NoStoreSecrets::applies_to("/issuance_gate"));
}

#[test]
fn test_fairing_trait_implementation() {
    fn check_fairing<T: Fairing>(_fairing: T) {}

    check_fairing(RequestLogger);
    check_fairing(PanicCatcher);
    check_fairing(NoStoreSecrets);
}
