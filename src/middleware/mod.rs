pub mod auth;
pub mod response;
pub mod session;

pub use auth::{require_identity_middleware, MaybeIdentity};
pub use response::{ApiResponse, ApiResult};
pub use session::{attach_session_middleware, SessionVerifier};
