//! HTTP request handlers for the webhook service.
//!
//! Implements the call-completion webhook, record listing and a health check
//! using axum.

use crate::config::{ConfigError, ServerConfig};
use crate::dto::{RecordDto, StoredRecordDto, WebhookResponse};
use crate::signature::{SignatureError, SignatureVerifier};
use crate::snapshot::write_snapshot;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use callsheet_domain::{RecordId, RecordStore};
use callsheet_extractor::{parse_payload, RecordAssembler};
use callsheet_store::{SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Default page size for `GET /summaries`
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Largest page size `GET /summaries` will return
pub const MAX_LIST_LIMIT: usize = 500;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Record store, one insert per webhook call
    pub store: Arc<Mutex<SqliteStore>>,
    /// Payload normalization
    pub assembler: Arc<RecordAssembler>,
    /// Signature check, present when a secret is configured
    pub verifier: Option<Arc<SignatureVerifier>>,
    /// Header carrying the signature
    pub signature_header: HeaderName,
    /// Where to write the last payload, if anywhere
    pub snapshot_path: Option<PathBuf>,
}

impl AppState {
    /// Build state from configuration around an opened store
    pub fn from_config(config: &ServerConfig, store: SqliteStore) -> Result<Self, ConfigError> {
        let signature_header = HeaderName::from_bytes(config.signature_header.as_bytes())
            .map_err(|e| ConfigError::InvalidField {
                field: "signature_header".to_string(),
                reason: e.to_string(),
            })?;

        let verifier = config
            .secret()
            .map(|secret| SignatureVerifier::new(secret.as_bytes(), config.require_signature))
            .transpose()
            .map_err(|e| ConfigError::InvalidField {
                field: "webhook_secret".to_string(),
                reason: e.to_string(),
            })?
            .map(Arc::new);

        let snapshot_path = Some(config.last_payload_path.as_str())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            assembler: Arc::new(RecordAssembler::new(config.extractor.clone())),
            verifier,
            signature_header,
            snapshot_path,
        })
    }
}

/// Query parameters for `GET /summaries`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Page size (default 50, clamped to 1..=500)
    pub limit: Option<usize>,
    /// Records to skip from the newest
    pub skip: Option<usize>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy" when the store answers, "unhealthy" otherwise
    pub status: String,
    /// Number of stored records
    pub record_count: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Signature check failed
    Signature(SignatureError),
    /// Store failure
    Store(StoreError),
    /// Requested record does not exist
    NotFound(String),
    /// Malformed request
    BadRequest(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Signature(e) => (StatusCode::FORBIDDEN, e.to_string()),
            AppError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<SignatureError> for AppError {
    fn from(e: SignatureError) -> Self {
        AppError::Signature(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

fn poisoned() -> AppError {
    AppError::Internal("Record store lock poisoned".to_string())
}

/// Run a store operation on the blocking pool under the store lock
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    F: FnOnce(&mut SqliteStore) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || -> Result<T, AppError> {
        let mut store = store.lock().map_err(|_| poisoned())?;
        op(&mut store).map_err(AppError::from)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Store task failed: {}", e)))?
}

/// POST /end-call-webhook - Normalize and store a call-completion event
///
/// Any body is accepted; non-JSON bodies are stored as an all-empty record.
async fn end_call_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, AppError> {
    let payload = parse_payload(&body);

    if let Some(path) = &state.snapshot_path {
        if let Err(e) = write_snapshot(path, &headers, &payload).await {
            warn!(path = %path.display(), "{}", e);
        }
    }

    if let Some(verifier) = &state.verifier {
        let signature = headers
            .get(&state.signature_header)
            .and_then(|value| value.to_str().ok());
        if let Err(e) = verifier.verify(&body, signature) {
            warn!("Rejected webhook: {}", e);
            return Err(e.into());
        }
    }

    let record = state.assembler.assemble(&payload);

    let to_store = record.clone();
    let id = with_store(&state, move |store| store.insert(to_store)).await?;

    info!(
        id = %id,
        caller = %record.caller_name,
        questions = record.questions_asked.len(),
        actions = record.action_items.len(),
        "Saved call summary"
    );

    Ok(Json(WebhookResponse {
        status: "success".to_string(),
        id: id.to_string(),
        saved: RecordDto::from(record),
    }))
}

/// GET /summaries - Stored records, newest first
async fn list_summaries(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<StoredRecordDto>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let skip = params.skip.unwrap_or(0);

    let records = with_store(&state, move |store| store.list(limit, skip)).await?;

    Ok(Json(records.into_iter().map(StoredRecordDto::from).collect()))
}

/// GET /summaries/:id - One stored record
async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredRecordDto>, AppError> {
    let id = RecordId::from_string(&id).map_err(AppError::BadRequest)?;

    let record = with_store(&state, move |store| store.get(id)).await?;

    record
        .map(|stored| Json(stored.into()))
        .ok_or_else(|| AppError::NotFound(format!("No summary with id {}", id)))
}

/// GET /health - Store health check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let count = with_store(&state, |store| store.count()).await.ok();

    Json(match count {
        Some(record_count) => HealthCheckResponse {
            status: "healthy".to_string(),
            record_count,
        },
        None => HealthCheckResponse {
            status: "unhealthy".to_string(),
            record_count: 0,
        },
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/end-call-webhook", post(end_call_webhook))
        .route("/summaries", get(list_summaries))
        .route("/summaries/:id", get(get_summary))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
