//! Caller identity resolution.
//!
//! Turns the identity signals on an incoming request (attached session, identity
//! headers, identity cookie) into a single canonical [`SubjectId`], trying the
//! most trusted surface first.

pub mod cookies;
pub mod headers;
pub mod resolver;
pub mod session;
pub mod subject;

pub use cookies::{read_cookies, IDENTITY_COOKIE};
pub use headers::{read_headers, HeaderCandidates, IDENTITY_HEADERS};
pub use resolver::{
    require, resolve, IdentityError, IdentityRequest, Resolution, Source,
    AUTHENTICATION_REQUIRED,
};
pub use session::{read_session, SessionClaims, SessionUser};
pub use subject::SubjectId;
