use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{Data, Request, Response};
use std::time::{Duration, Instant};

/// Paths whose responses carry private key material
pub const SECRET_PATHS: &[&str] = &["/issue_wallet"];

struct RequestStart(Option<Instant>);

/// Logs incoming requests and outgoing responses.
///
/// Captures method, URI, remote address, status and latency. Bodies are
/// never logged.
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Request/Response Logger",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(|| RequestStart(Some(Instant::now())));

        let remote = request
            .remote()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        tracing::info!(
            "Incoming request: {} {} from {}",
            request.method(),
            request.uri(),
            remote
        );

        // Log authentication header presence only
        if request.headers().get_one("authorization").is_some() {
            tracing::trace!("Request includes authorization header");
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let method = request.method();
        let uri = request.uri();
        let status = response.status();
        let elapsed = request
            .local_cache(|| RequestStart(None))
            .0
            .map(|start| start.elapsed())
            .unwrap_or(Duration::ZERO);

        tracing::info!(
            "Response: {} {} - Status: {} ({:?})",
            method,
            uri,
            status,
            elapsed
        );

        if !status.class().is_success() {
            tracing::error!("Error response: {} {} returned {}", method, uri, status);
        }
    }
}

/// Catches and logs internal server errors that may indicate panics.
///
/// Reports 500 responses to Sentry.
pub struct PanicCatcher;

#[rocket::async_trait]
impl Fairing for PanicCatcher {
    fn info(&self) -> Info {
        Info {
            name: "Panic Catcher",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if response.status() == Status::InternalServerError {
            let method = request.method();
            let uri = request.uri();

            tracing::error!(
                "Internal Server Error detected for {} {} - possible panic or unhandled error",
                method,
                uri
            );

            sentry::capture_message(
                &format!("Internal Server Error: {method} {uri}"),
                sentry::Level::Error,
            );
        }
    }
}

/// Marks responses that contain private keys as non-cacheable.
pub struct NoStoreSecrets;

impl NoStoreSecrets {
    pub fn applies_to(path: &str) -> bool {
        SECRET_PATHS.contains(&path)
    }
}

#[rocket::async_trait]
impl Fairing for NoStoreSecrets {
    fn info(&self) -> Info {
        Info {
            name: "No-Store Secrets",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        if Self::applies_to(request.uri().path().as_str()) {
            response.set_header(Header::new("Cache-Control", "no-store"));
            response.set_header(Header::new("Pragma", "no-cache"));
        }
    }
}
