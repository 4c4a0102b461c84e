pub mod app_state;
pub mod responses;
pub mod wallet;

pub use app_state::{ApiEndpoints, ApiSummary, AppState, EndpointInfo, EndpointStatus};
pub use responses::{ApiResponse, GateStatusResponse, IssueWalletResponse};
pub use wallet::{CredentialPair, GateState, IssuerConfig};
