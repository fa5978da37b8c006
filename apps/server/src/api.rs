use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use pricedrop_core::CategorizedResult;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn healthz() -> &'static str {
    "ok"
}

/// Takes an order export as the raw request body and answers with the
/// classified result. Only individual fetches time out; the batch runs until
/// every record has an outcome.
async fn check_prices(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<Json<CategorizedResult>> {
    let csv = std::str::from_utf8(&body)
        .map_err(|e| ApiError::BadRequest(format!("Request body is not UTF-8 text: {}", e)))?;
    tracing::info!("Price check requested ({} bytes)", body.len());
    let result = state.price_check_service.check(csv).await?;
    Ok(Json(result))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect();
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/price-check", post(check_prices));

    Router::new()
        .route("/", post(check_prices))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
