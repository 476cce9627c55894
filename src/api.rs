// 🌐 REST API - validation over HTTP (feature = "server")

use crate::batch::{BatchRecord, BatchReport};
use crate::config::ServerConfig;
use crate::identifiers::{self, IdKind};
use crate::validation::ValidationResult;
use axum::{
    body::Body,
    extract::{MatchedPath, Path, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, debug_span, warn, Span};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }
}

/// API Response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}

#[derive(Debug, Serialize)]
pub struct KindResponse {
    kind: IdKind,
    label: &'static str,
    digits: usize,
}

impl From<IdKind> for KindResponse {
    fn from(kind: IdKind) -> Self {
        Self {
            kind,
            label: kind.label(),
            digits: kind.length(),
        }
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/kinds - Supported identifier kinds
async fn list_kinds() -> impl IntoResponse {
    let kinds: Vec<KindResponse> = IdKind::ALL.into_iter().map(KindResponse::from).collect();
    Json(ApiResponse::ok(kinds))
}

/// GET /api/validate/:kind/:value - Validate a single identifier
async fn validate_one(Path((kind, value)): Path<(String, String)>) -> Response {
    let kind = match kind.parse::<IdKind>() {
        Ok(kind) => kind,
        Err(e) => {
            warn!(kind = %e.0, "rejected unsupported kind");
            return failure(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let result: ValidationResult = identifiers::validate(kind, &value);
    debug!(kind = %kind, valid = result.is_valid, "validated identifier");

    (StatusCode::OK, Json(ApiResponse::ok(result))).into_response()
}

/// POST /api/validate/batch - Validate a JSON array of {kind, value}
async fn validate_batch(
    State(state): State<AppState>,
    Json(records): Json<Vec<BatchRecord>>,
) -> Response {
    let limit = state.config.max_batch_items;
    if records.len() > limit {
        warn!(items = records.len(), limit, "batch too large");
        return failure(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("batch of {} items exceeds the limit of {}", records.len(), limit),
        );
    }

    let report = BatchReport::build(&records);
    debug!(summary = %report.summary.summary(), "validated batch");

    (StatusCode::OK, Json(ApiResponse::ok(report))).into_response()
}

// ============================================================================
// Router
// ============================================================================

/// Request span keyed by route template; the raw URI carries identifier
/// values and must stay out of the logs
fn request_span(req: &Request<Body>) -> Span {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or("unmatched");

    debug_span!("request", method = %req.method(), route)
}

pub fn build_router(state: AppState) -> Router {
    let cors_permissive = state.config.cors_permissive;

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/kinds", get(list_kinds))
        .route("/validate/batch", post(validate_batch))
        .route("/validate/:kind/:value", get(validate_one))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http().make_span_with(request_span));

    if cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
