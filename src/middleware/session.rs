use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::identity::SessionUser;

/// Verifies already-issued HS256 bearer tokens. Never issues tokens.
#[derive(Clone)]
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn hs256(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<SessionUser, jsonwebtoken::errors::Error> {
        decode::<SessionUser>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

/// Attach the bearer token's claims as the request session.
///
/// Missing or invalid tokens are not rejected here: the request simply carries no
/// session and identity resolution falls through to headers and cookies.
pub async fn attach_session_middleware(
    State(verifier): State<SessionVerifier>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(request.headers()) {
        match verifier.verify(token) {
            Ok(session) => {
                request.extensions_mut().insert(session);
            }
            Err(e) => {
                tracing::debug!("Ignoring bearer session: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
