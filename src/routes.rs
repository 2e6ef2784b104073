use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{ConnectInfo, Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    AppState,
    catalog::{RECENT_FILMS_DEFAULT, StoreError},
    error::{AppError, AppResult},
    forms::{FieldErrors, RatingForm, ReviewForm},
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let films = state.catalog.recent_films(RECENT_FILMS_DEFAULT).await?;
    let categories = state.catalog.categories().await?;
    Ok(Html(templates::index_page(&films, &categories)))
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    reply: Option<i32>,
}

pub async fn film_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Html<String>> {
    let detail = state.catalog.film_detail(&slug).await?.ok_or(AppError::NotFound)?;
    let stars = state.catalog.stars().await?;
    let categories = state.catalog.categories().await?;

    let mut form = ReviewForm::default();
    if let Some(parent) = query.reply {
        form.parent = parent.to_string();
    }

    Ok(Html(templates::film_page(
        &detail,
        &stars,
        &categories,
        &form,
        &FieldErrors::default(),
        &FieldErrors::default(),
    )))
}

pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Form(form): Form<ReviewForm>,
) -> AppResult<Response> {
    let detail = state.catalog.film_detail(&slug).await?.ok_or(AppError::NotFound)?;

    let valid = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => return rerender(&state, &slug, &form, errors, FieldErrors::default()).await,
    };

    match state.catalog.submit_review(detail.film.id, &valid).await {
        Ok(_) => Ok(Redirect::to(&format!("/film/{slug}")).into_response()),
        Err(err @ (StoreError::ParentNotFound | StoreError::ParentTooDeep)) => {
            let mut errors = FieldErrors::default();
            errors.push("parent", err.to_string());
            rerender(&state, &slug, &form, errors, FieldErrors::default()).await
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn submit_rating(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<RatingForm>,
) -> AppResult<Response> {
    let detail = state.catalog.film_detail(&slug).await?.ok_or(AppError::NotFound)?;

    let star_id = match form.validate() {
        Ok(star_id) => star_id,
        Err(errors) => {
            return rerender(&state, &slug, &ReviewForm::default(), FieldErrors::default(), errors)
                .await;
        }
    };

    let ip = client_ip(&headers, addr);
    match state.catalog.submit_rating(&ip, detail.film.id, star_id).await {
        Ok(()) => Ok(Redirect::to(&format!("/film/{slug}")).into_response()),
        Err(StoreError::UnknownStar) => {
            let mut errors = FieldErrors::default();
            errors.push("star", "Select a rating");
            rerender(&state, &slug, &ReviewForm::default(), FieldErrors::default(), errors).await
        }
        Err(err) => Err(err.into()),
    }
}

/// Re-render the film page with validation errors, entered values
/// preserved. Nothing has been written at this point.
async fn rerender(
    state: &AppState,
    slug: &str,
    form: &ReviewForm,
    review_errors: FieldErrors,
    rating_errors: FieldErrors,
) -> AppResult<Response> {
    let detail = state.catalog.film_detail(slug).await?.ok_or(AppError::NotFound)?;
    let stars = state.catalog.stars().await?;
    let categories = state.catalog.categories().await?;
    let body =
        templates::film_page(&detail, &stars, &categories, form, &review_errors, &rating_errors);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
}

/// Prefer the first forwarded address when behind a proxy.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        let addr: SocketAddr = "127.0.0.1:1234".parse().unwrap();
        assert_eq!(client_ip(&headers, addr), "203.0.113.9");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let addr: SocketAddr = "192.0.2.4:1234".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), addr), "192.0.2.4");
    }
}
