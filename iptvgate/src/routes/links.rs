use axum::{Json, extract::State};
use log::debug;

use crate::{
    AppStateRef,
    catalog::{LoadData, StreamLink},
};

pub async fn post_links(
    State(state): State<AppStateRef>,
    Json(data): Json<LoadData>,
) -> Json<StreamLink> {
    debug!("Links for {} ({:?})", data.channel_name, data.kind);
    Json(data.into_link(state.config.provider_name()))
}
