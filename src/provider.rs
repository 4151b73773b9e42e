use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{info, warn};

use crate::extractor::get_video_links;
use crate::models::{FailureEnvelope, LinksEnvelope};
use crate::server::AppState;
use crate::utils::query_param;

/// Extracts playable streams for the provider URL in the `url` parameter.
pub async fn provider_links(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(provider_url) = query_param(query.as_deref(), "url").filter(|u| !u.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing provider URL" })),
        )
            .into_response();
    };

    match get_video_links(state.fetcher.as_ref(), &state.config, &provider_url).await {
        Ok(links) => {
            info!(%provider_url, count = links.len(), "extracted provider links");
            Json(LinksEnvelope {
                success: true,
                links,
            })
            .into_response()
        }
        Err(e) => {
            warn!(%provider_url, error = %e, "provider extraction failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureEnvelope {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
