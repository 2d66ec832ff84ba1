use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::{
    AppStateRef,
    catalog::{Catalog, LoadResponse},
    status_with_log,
    transfer::fetch_playlist,
};

#[derive(Deserialize)]
pub struct LoadQuery {
    pub origin: String,
}

pub async fn get_load(
    State(state): State<AppStateRef>,
    Query(query): Query<LoadQuery>,
) -> Result<Json<LoadResponse>, StatusCode> {
    let playlist = fetch_playlist(&state.http_client, &query.origin)
        .await
        .map_err(status_with_log!("Fetch playlist"))?;

    let response = Catalog::new(&playlist, query.origin.as_str())
        .load()
        .map_err(status_with_log!(format!("Load {}", query.origin)))?;

    Ok(Json(response))
}
