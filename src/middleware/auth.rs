use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;

use crate::error::ApiError;
use crate::identity::{require, resolve, IdentityRequest, Resolution};

/// Guard for routes that must not be reached anonymously.
///
/// Resolves the caller and injects the [`SubjectId`](crate::identity::SubjectId)
/// into request extensions, or answers 401 without running the handler.
pub async fn require_identity_middleware(request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();
    let subject = match require(&IdentityRequest::from_parts(&parts)) {
        Ok(subject) => subject,
        Err(e) => return ApiError::from(e).into_response(),
    };
    parts.extensions.insert(subject);

    next.run(Request::from_parts(parts, body)).await
}

/// Optional caller identity. Never rejects; anonymous requests carry
/// [`Resolution::Anonymous`].
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Resolution);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(resolve(&IdentityRequest::from_parts(parts))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    use crate::identity::SubjectId;

    fn guarded() -> Router {
        Router::new()
            .route(
                "/",
                get(|Extension(subject): Extension<SubjectId>| async move { subject.into_inner() }),
            )
            .layer(from_fn(require_identity_middleware))
    }

    #[tokio::test]
    async fn guard_rejects_anonymous() {
        let response = guarded()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn guard_passes_subject_to_handler() {
        let response = guarded()
            .oneshot(
                HttpRequest::builder()
                    .uri("/")
                    .header("x-factory-user-id", "vendor-7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"vendor-7");
    }
}
