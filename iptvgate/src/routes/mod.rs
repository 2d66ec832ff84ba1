use axum::{
    Router,
    routing::{get, post},
};

use crate::AppStateRef;

mod links;
mod load;
mod search;

pub fn get_routes(app_state: &AppStateRef) -> Router {
    Router::new()
        .route("/search", get(search::get_search))
        .route("/load", get(load::get_load))
        .route("/links", post(links::post_links))
        .with_state(app_state.clone())
}
