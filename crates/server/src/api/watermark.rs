//! Watermark API handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use watermark_core::{Author, Document, ServiceError, ServiceStatus, Ticket, Topic, Watermark};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for watermarking a document.
///
/// A topic makes it a book; without one it is a journal.
#[derive(Debug, Deserialize)]
pub struct CreateWatermarkBody {
    pub title: String,
    pub author: Author,
    pub topic: Option<Topic>,
}

/// Query parameters for watermarking a document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWatermarkParams {
    pub title: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub topic: Option<Topic>,
}

/// Query parameters for fetching a watermark.
#[derive(Debug, Deserialize)]
pub struct GetWatermarkParams {
    pub ticket: u64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct WatermarkErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(WatermarkErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

impl From<ServiceError> for WatermarkErrorResponse {
    fn from(e: ServiceError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Watermark a document described by a JSON body.
pub async fn create_from_body(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateWatermarkBody>,
) -> Response {
    let document = Document::from_parts(body.title, body.author, body.topic);
    info!("Create a new watermark via post for document with title {}", document.title());
    submit(&state, document).await
}

/// Watermark a document described by query parameters.
pub async fn create_from_query(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CreateWatermarkParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let author = Author::new(params.author_first_name, params.author_last_name);
    let document = Document::from_parts(params.title, author, params.topic);
    info!("Create a new watermark for {}", document.title());
    submit(&state, document).await
}

async fn submit(state: &AppState, document: Document) -> Response {
    match state.service().submit(document).await {
        Ok(ticket) => Json(ticket).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(WatermarkErrorResponse::from(e)),
        )
            .into_response(),
    }
}

/// Fetch the watermark for a ticket.
///
/// Tickets that are unknown and tickets still being processed both get 404.
pub async fn get_watermark(
    State(state): State<Arc<AppState>>,
    params: Result<Query<GetWatermarkParams>, QueryRejection>,
) -> Result<Json<Watermark>, Response> {
    let Query(params) =
        params.map_err(|rejection| error_response(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    let ticket = Ticket::new(params.ticket);

    info!("Retrieving watermark for ticket {}", ticket);
    state.service().watermark_for(ticket).map(Json).ok_or_else(|| {
        error_response(
            StatusCode::NOT_FOUND,
            format!("No watermark available for ticket {}", ticket),
        )
    })
}

/// Store and worker pool statistics.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<ServiceStatus> {
    Json(state.service().status())
}
