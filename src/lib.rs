pub mod admin;
pub mod admin_views;
pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{catalog::Catalog, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/film/{slug}", get(routes::film_detail))
        .route("/film/{slug}/review", post(routes::submit_review))
        .route("/film/{slug}/rating", post(routes::submit_rating))
        .route("/admin", get(admin::dashboard))
        .route("/admin/films", get(admin::film_list).post(admin::film_create))
        .route("/admin/films/new", get(admin::film_new))
        .route("/admin/films/draft", post(admin::film_drafts))
        .route("/admin/films/{id}", get(admin::film_edit).post(admin::film_update))
        .route("/admin/films/{id}/delete", post(admin::film_delete))
        .route("/admin/categories", get(admin::category_list).post(admin::category_create))
        .route("/admin/categories/new", get(admin::category_new))
        .route("/admin/categories/{id}", get(admin::category_edit).post(admin::category_update))
        .route("/admin/categories/{id}/delete", post(admin::category_delete))
        .route("/admin/genres", get(admin::genre_list).post(admin::genre_create))
        .route("/admin/genres/new", get(admin::genre_new))
        .route("/admin/genres/{id}", get(admin::genre_edit).post(admin::genre_update))
        .route("/admin/genres/{id}/delete", post(admin::genre_delete))
        .route("/admin/actors", get(admin::actor_list).post(admin::actor_create))
        .route("/admin/actors/new", get(admin::actor_new))
        .route("/admin/actors/{id}", get(admin::actor_edit).post(admin::actor_update))
        .route("/admin/actors/{id}/delete", post(admin::actor_delete))
        .route("/admin/shots", get(admin::shot_list).post(admin::shot_create))
        .route("/admin/shots/new", get(admin::shot_new))
        .route("/admin/shots/{id}", get(admin::shot_edit).post(admin::shot_update))
        .route("/admin/shots/{id}/delete", post(admin::shot_delete))
        .route("/admin/stars", get(admin::star_list).post(admin::star_create))
        .route("/admin/stars/{id}/delete", post(admin::star_delete))
        .route("/admin/ratings", get(admin::rating_list))
        .route("/admin/ratings/{id}/delete", post(admin::rating_delete))
        .route("/admin/reviews", get(admin::review_list))
        .route("/admin/reviews/{id}", get(admin::review_edit).post(admin::review_update))
        .route("/admin/reviews/{id}/delete", post(admin::review_delete))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
