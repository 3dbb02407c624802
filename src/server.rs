use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::identity::IDENTITY_HEADERS;
use crate::middleware::{attach_session_middleware, require_identity_middleware, SessionVerifier};

pub fn app(config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(identity_routes())
        .fallback(|| async { ApiError::not_found("Route not found") });

    // Layered after the routes so it wraps the identity guard.
    if let Some(secret) = config.security.session_secret.as_deref() {
        router = router.layer(from_fn_with_state(
            SessionVerifier::hs256(secret),
            attach_session_middleware,
        ));
    }
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn identity_routes() -> Router {
    let protected = Router::new()
        .route("/api/whoami", get(handlers::whoami_get))
        .route_layer(from_fn(require_identity_middleware));

    Router::new()
        .route("/api/identity", get(handlers::identity_get))
        .merge(protected)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                tracing::warn!("Ignoring wildcard CORS origin; credentialed requests need explicit origins");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            }
        })
        .collect();

    let mut allowed_headers = vec![header::AUTHORIZATION, header::CONTENT_TYPE];
    allowed_headers.extend(IDENTITY_HEADERS.iter().copied().map(HeaderName::from_static));

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers(AllowHeaders::list(allowed_headers))
        .allow_credentials(true)
}

pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("Factory API listening on http://{}", bind_addr);

    axum::serve(listener, app(config)).await?;
    Ok(())
}
