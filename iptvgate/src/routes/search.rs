use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use log::info;
use serde::Deserialize;

use crate::{
    AppStateRef,
    catalog::{Catalog, SearchEntry},
    status_with_log,
    transfer::fetch_playlist,
};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub origin: String,
    pub query: Option<String>,
}

pub async fn get_search(
    State(state): State<AppStateRef>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchEntry>>, StatusCode> {
    let playlist = fetch_playlist(&state.http_client, &query.origin)
        .await
        .map_err(status_with_log!("Fetch playlist"))?;

    let entries = Catalog::new(&playlist, query.origin.as_str()).search(query.query.as_deref());
    info!(
        "Search {} in {}: {} of {} channels",
        query.query.as_deref().unwrap_or("*"),
        query.origin,
        entries.len(),
        playlist.len()
    );

    Ok(Json(entries))
}
