use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::mail::SendEmailRequest;
use crate::metadata::{search_media, SearchHit};
use crate::newsletter::GenerateRequest;
use crate::server::error::AppError;
use crate::server::AppContext;

pub const MISSING_SEND_FIELDS: &str = "Missing recipients, subject, or HTML content";
pub const MAIL_NOT_CONFIGURED: &str = "Email credentials are not configured on the server.";
pub const CATALOG_NOT_CONFIGURED: &str = "Metadata API key is not configured on the server.";

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .route("/generate", post(generate))
        .route("/send-email", post(send_email))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Deserialize)]
struct SearchQuery {
    query: Option<String>,
}

async fn search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>, AppError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| Error::MissingInput("Query parameter is required".to_string()))?;

    if !ctx.metadata.is_available() {
        return Err(Error::NotConfigured(CATALOG_NOT_CONFIGURED.to_string()).into());
    }

    let hits = search_media(ctx.metadata.as_ref(), &query).await?;
    tracing::debug!(query = %query, results = hits.len(), "Search complete");
    Ok(Json(hits))
}

#[derive(Serialize)]
struct GenerateResponse {
    html: String,
}

async fn generate(
    State(ctx): State<AppContext>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    let request: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|e| Error::Generate(format!("invalid request body: {e}")))?;

    let html = ctx.newsletter.generate(request).await?;
    Ok(Json(GenerateResponse { html }))
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

async fn send_email(
    State(ctx): State<AppContext>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let request: SendEmailRequest = serde_json::from_slice(&body)
        .map_err(|_| Error::MissingInput(MISSING_SEND_FIELDS.to_string()))?;

    let email = request
        .into_email()
        .ok_or_else(|| Error::MissingInput(MISSING_SEND_FIELDS.to_string()))?;

    let mailer = ctx
        .mailer
        .as_ref()
        .ok_or_else(|| Error::NotConfigured(MAIL_NOT_CONFIGURED.to_string()))?;

    mailer.send(&email).await.map_err(Error::from)?;

    Ok(Json(MessageResponse {
        message: "Email sent successfully!".to_string(),
    }))
}
