//! HTTP API for HandMorse
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /lexicon - Lexicon summary
//! - POST /decode - Decode a debounced bit sequence
//! - POST /debounce - Debounce a raw observation stream
//! - POST /pipeline - Debounce and decode a raw observation stream

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{parse_bits, validate_bits, Pipeline};
use crate::types::{Candidate, DebounceOutput, DecodeResult, PipelineOutput, ReasonCode, Sample};

/// Upper bound on candidates listed per request
pub const MAX_TOP_CANDIDATES: usize = 100;

/// App state
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

/// Bits as a JSON array or a "0101" string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BitsInput {
    List(Vec<u8>),
    Text(String),
}

impl BitsInput {
    pub fn into_bits(self) -> Result<Vec<u8>, ReasonCode> {
        match self {
            BitsInput::List(bits) => {
                validate_bits(&bits)?;
                Ok(bits)
            }
            BitsInput::Text(text) => parse_bits(&text),
        }
    }
}

/// Decode request
#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub bits: BitsInput,
    /// Also list the n closest phrases
    pub top: Option<usize>,
}

/// Decode response
#[derive(Debug, Serialize)]
pub struct DecodeResponse {
    #[serde(flatten)]
    pub result: DecodeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Vec<Candidate>>,
}

/// Observation stream request
#[derive(Debug, Deserialize)]
pub struct SamplesRequest {
    pub samples: Vec<Sample>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub lexicon_size: usize,
    pub lexicon_fingerprint: String,
}

/// Lexicon summary response
#[derive(Debug, Serialize)]
pub struct LexiconResponse {
    pub size: usize,
    pub max_phrase_len: usize,
    pub base_words: Vec<String>,
    pub fingerprint: String,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub description: String,
}

/// Handler failure
#[derive(Debug)]
pub enum ApiError {
    Reason(ReasonCode),
    /// Worker task failed
    Internal,
}

impl From<ReasonCode> for ApiError {
    fn from(reason: ReasonCode) -> Self {
        ApiError::Reason(reason)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Reason(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    code: reason.code().to_string(),
                    description: reason.description().to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// Create the API router
pub fn create_router(shared: Arc<Pipeline>) -> Router {
    let state = Arc::new(AppState { pipeline: shared });

    Router::new()
        .route("/health", get(health))
        .route("/lexicon", get(lexicon))
        .route("/decode", post(decode))
        .route("/debounce", post(debounce))
        .route("/pipeline", post(pipeline))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let lexicon = state.pipeline.lexicon();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        lexicon_size: lexicon.len(),
        lexicon_fingerprint: lexicon.fingerprint().to_string(),
    })
}

/// Lexicon summary
async fn lexicon(State(state): State<Arc<AppState>>) -> Json<LexiconResponse> {
    let lexicon = state.pipeline.lexicon();
    Json(LexiconResponse {
        size: lexicon.len(),
        max_phrase_len: lexicon.max_phrase_len(),
        base_words: lexicon.base_words().to_vec(),
        fingerprint: lexicon.fingerprint().to_string(),
    })
}

/// Decode bits
async fn decode(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecodeRequest>,
) -> Result<Json<DecodeResponse>, ApiError> {
    let bits = req.bits.into_bits()?;
    let top = req.top.map(|n| n.min(MAX_TOP_CANDIDATES));
    let pipeline = state.pipeline.clone();

    // Full lexicon scans stay off the async workers
    let response = tokio::task::spawn_blocking(move || -> Result<DecodeResponse, ReasonCode> {
        let result = pipeline.decode_bits(&bits)?;
        let top = match top {
            Some(n) => Some(pipeline.top_candidates(&bits, n)?),
            None => None,
        };
        Ok(DecodeResponse { result, top })
    })
    .await
    .map_err(|_| ApiError::Internal)??;

    debug!(phrase = %response.result.phrase, distance = response.result.distance, "decode request");
    Ok(Json(response))
}

/// Debounce samples
async fn debounce(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SamplesRequest>,
) -> Result<Json<DebounceOutput>, ApiError> {
    let pipeline = state.pipeline.clone();
    let output = tokio::task::spawn_blocking(move || pipeline.debounce(&req.samples))
        .await
        .map_err(|_| ApiError::Internal)?;
    Ok(Json(output))
}

/// Debounce and decode samples
async fn pipeline(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SamplesRequest>,
) -> Result<Json<PipelineOutput>, ApiError> {
    let pipeline = state.pipeline.clone();
    let output = tokio::task::spawn_blocking(move || pipeline.run(&req.samples))
        .await
        .map_err(|_| ApiError::Internal)??;
    Ok(Json(output))
}

/// Run the API server
pub async fn run_server(addr: &str, pipeline: Arc<Pipeline>) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router(pipeline);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "API listening");
    println!("HandMorse API running on {}", addr);
    println!("  GET  /health    - Health check");
    println!("  GET  /lexicon   - Lexicon summary");
    println!("  POST /decode    - Decode bits");
    println!("  POST /debounce  - Debounce samples");
    println!("  POST /pipeline  - Debounce and decode samples");
    axum::serve(listener, router).await?;
    Ok(())
}
