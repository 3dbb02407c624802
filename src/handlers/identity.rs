use axum::Extension;
use serde::Serialize;

use crate::identity::{SubjectId, Source};
use crate::middleware::{ApiResponse, ApiResult, MaybeIdentity};

#[derive(Debug, Serialize)]
pub struct IdentityView {
    pub authenticated: bool,
    pub subject: Option<SubjectId>,
    pub source: Option<Source>,
}

#[derive(Debug, Serialize)]
pub struct WhoamiView {
    pub subject: SubjectId,
}

/// GET /api/identity - Who is calling, if anyone
///
/// Anonymous callers get `authenticated: false` rather than an error.
pub async fn identity_get(MaybeIdentity(resolution): MaybeIdentity) -> ApiResult<IdentityView> {
    let source = resolution.source();
    let subject = resolution.into_subject();

    Ok(ApiResponse::success(IdentityView {
        authenticated: subject.is_some(),
        subject,
        source,
    }))
}

/// GET /api/whoami - Current caller; sits behind `require_identity_middleware`
pub async fn whoami_get(Extension(subject): Extension<SubjectId>) -> ApiResult<WhoamiView> {
    Ok(ApiResponse::success(WhoamiView { subject }))
}
