use axum::http::{request::Parts, HeaderMap};
use serde::Serialize;
use thiserror::Error;

use super::cookies::{cookie_header, read_cookies};
use super::headers::read_headers;
use super::session::{read_session, SessionClaims, SessionUser};
use super::subject::SubjectId;

/// Message carried by every rejection from [`require`].
pub const AUTHENTICATION_REQUIRED: &str = "authentication required";

/// Request surface that produced an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Session,
    Header,
    Cookie,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Session => "session",
            Source::Header => "header",
            Source::Cookie => "cookie",
        }
    }
}

/// Outcome of resolving a request. `Anonymous` is a normal result, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Identified { subject: SubjectId, source: Source },
    Anonymous,
}

impl Resolution {
    pub fn subject(&self) -> Option<&SubjectId> {
        match self {
            Resolution::Identified { subject, .. } => Some(subject),
            Resolution::Anonymous => None,
        }
    }

    pub fn source(&self) -> Option<Source> {
        match self {
            Resolution::Identified { source, .. } => Some(*source),
            Resolution::Anonymous => None,
        }
    }

    pub fn into_subject(self) -> Option<SubjectId> {
        match self {
            Resolution::Identified { subject, .. } => Some(subject),
            Resolution::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("authentication required")]
    Unauthenticated,
}

/// Borrowed view of the parts of a request identity resolution reads.
pub struct IdentityRequest<'a> {
    session: Option<&'a dyn SessionClaims>,
    headers: &'a HeaderMap,
}

impl<'a> IdentityRequest<'a> {
    pub fn new(session: Option<&'a dyn SessionClaims>, headers: &'a HeaderMap) -> Self {
        Self { session, headers }
    }

    /// Build from request parts, taking the session from the [`SessionUser`] extension.
    pub fn from_parts(parts: &'a Parts) -> Self {
        let session = parts
            .extensions
            .get::<SessionUser>()
            .map(|s| s as &dyn SessionClaims);
        Self::new(session, &parts.headers)
    }
}

/// Session, then headers, then cookies. Later readers are not evaluated once one matches.
pub fn resolve(req: &IdentityRequest<'_>) -> Resolution {
    let found = read_session(req.session)
        .map(|s| (s, Source::Session))
        .or_else(|| read_headers(req.headers).map(|s| (s, Source::Header)))
        .or_else(|| {
            read_cookies(cookie_header(req.headers).as_deref()).map(|s| (s, Source::Cookie))
        });

    match found {
        Some((subject, source)) => {
            tracing::debug!(source = source.as_str(), "caller identity resolved");
            Resolution::Identified { subject, source }
        }
        None => {
            tracing::debug!("no caller identity on request");
            Resolution::Anonymous
        }
    }
}

/// Resolve or reject with [`IdentityError::Unauthenticated`].
pub fn require(req: &IdentityRequest<'_>) -> Result<SubjectId, IdentityError> {
    resolve(req)
        .into_subject()
        .ok_or(IdentityError::Unauthenticated)
}
