use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::server::AppState;

/// Forwards a catalog query to the upstream API.
///
/// The upstream status and body pass through unchanged; only the headers are
/// replaced. A non-success upstream status is not an error here.
pub async fn relay(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let target = state.config.api_url(query.as_deref());
    debug!(%target, "relaying catalog query");

    let upstream = state.fetcher.get(&target, &state.config.referer).await?;

    Ok((
        upstream.status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response())
}
