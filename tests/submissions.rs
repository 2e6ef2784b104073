use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use kinoteka::{
    AppState,
    catalog::Catalog,
    config::Config,
    db,
    entities::{film, rating, rating_star, review},
};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use tower::ServiceExt;

async fn spawn() -> (Router, Catalog) {
    let db = db::connect_and_migrate("sqlite::memory:").await.expect("connect");
    let catalog = Catalog::new(db);
    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".into(),
    };
    let state = Arc::new(AppState { config: Arc::new(config), catalog: catalog.clone() });
    let app = kinoteka::router(state)
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
    (app, catalog)
}

async fn seed_film(catalog: &Catalog, slug: &str) -> film::Model {
    film::ActiveModel {
        title: Set("Stalker".into()),
        tagline: Set(String::new()),
        description: Set("The Zone".into()),
        poster: Set("movies/stalker.jpg".into()),
        year: Set(1979),
        country: Set("USSR".into()),
        world_premiere: Set("1979-05-25".into()),
        budget: Set(0),
        fees_in_usa: Set(0),
        fees_in_world: Set(0),
        category_id: Set(None),
        slug: Set(slug.into()),
        draft: Set(false),
        trailer: Set(String::new()),
        ..Default::default()
    }
    .insert(catalog.db())
    .await
    .expect("insert film")
}

async fn seed_star(catalog: &Catalog, value: i32) -> rating_star::Model {
    rating_star::ActiveModel { value: Set(value), ..Default::default() }
        .insert(catalog.db())
        .await
        .expect("insert star")
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn film_page_renders() {
    let (app, catalog) = spawn().await;
    seed_film(&catalog, "stalker").await;

    let response = app
        .oneshot(Request::builder().uri("/film/stalker").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Stalker"));
    assert!(body.contains("The Zone"));
}

#[tokio::test]
async fn unknown_slug_is_a_404() {
    let (app, _catalog) = spawn().await;

    let response = app
        .oneshot(Request::builder().uri("/film/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn review_with_invalid_email_creates_nothing() {
    let (app, catalog) = spawn().await;
    seed_film(&catalog, "stalker").await;

    let response = app
        .oneshot(form_post("/film/stalker/review", "name=Ada&email=not-an-email&text=Great"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Enter a valid email address"));
    // Entered values survive the round trip.
    assert!(body.contains("Ada"));

    assert_eq!(review::Entity::find().count(catalog.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn valid_review_is_stored_and_redirects() {
    let (app, catalog) = spawn().await;
    let film = seed_film(&catalog, "stalker").await;

    let response = app
        .oneshot(form_post(
            "/film/stalker/review",
            "name=Ada&email=ada%40example.com&text=Great+film",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let rows = review::Entity::find().all(catalog.db()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].film_id, film.id);
    assert_eq!(rows[0].name, "Ada");
    assert_eq!(rows[0].parent_id, None);
}

#[tokio::test]
async fn rating_without_star_creates_nothing() {
    let (app, catalog) = spawn().await;
    seed_film(&catalog, "stalker").await;
    seed_star(&catalog, 5).await;

    let response = app.oneshot(form_post("/film/stalker/rating", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("Select a rating"));

    assert_eq!(rating::Entity::find().count(catalog.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn rating_records_the_peer_address() {
    let (app, catalog) = spawn().await;
    let film = seed_film(&catalog, "stalker").await;
    let star = seed_star(&catalog, 5).await;

    let response = app
        .oneshot(form_post("/film/stalker/rating", &format!("star={}", star.id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let rows = rating::Entity::find().all(catalog.db()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].ip, "127.0.0.1");
    assert_eq!(rows[0].film_id, film.id);
    assert_eq!(rows[0].star_id, star.id);
}

#[tokio::test]
async fn rating_prefers_forwarded_address() {
    let (app, catalog) = spawn().await;
    seed_film(&catalog, "stalker").await;
    let star = seed_star(&catalog, 4).await;

    let request = Request::builder()
        .method("POST")
        .uri("/film/stalker/rating")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .body(Body::from(format!("star={}", star.id)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let rows = rating::Entity::find().all(catalog.db()).await.unwrap();
    assert_eq!(rows[0].ip, "203.0.113.7");
}

#[tokio::test]
async fn index_lists_recent_films() {
    let (app, catalog) = spawn().await;
    seed_film(&catalog, "stalker").await;

    let response =
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("/film/stalker"));
}

#[tokio::test]
async fn admin_rating_list_shows_submitter_film_and_star() {
    let (app, catalog) = spawn().await;
    let film = seed_film(&catalog, "stalker").await;
    let star = seed_star(&catalog, 5).await;
    catalog.submit_rating("203.0.113.7", film.id, star.id).await.unwrap();

    let response = app
        .oneshot(Request::builder().uri("/admin/ratings").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("203.0.113.7"));
    assert!(body.contains("Stalker"));
    assert!(body.contains("5★"));
}

#[tokio::test]
async fn admin_rating_delete_removes_the_row() {
    let (app, catalog) = spawn().await;
    let film = seed_film(&catalog, "stalker").await;
    let star = seed_star(&catalog, 5).await;
    catalog.submit_rating("203.0.113.7", film.id, star.id).await.unwrap();

    let row = rating::Entity::find().one(catalog.db()).await.unwrap().unwrap();
    let response = app
        .oneshot(form_post(&format!("/admin/ratings/{}/delete", row.id), ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(rating::Entity::find().count(catalog.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn updating_a_missing_category_is_a_404() {
    let (app, catalog) = spawn().await;

    let response = app
        .oneshot(form_post("/admin/categories/99", "name=Drama&description=&slug=drama"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        kinoteka::entities::category::Entity::find().count(catalog.db()).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn bulk_draft_update_from_admin_list() {
    let (app, catalog) = spawn().await;
    let a = seed_film(&catalog, "stalker").await;
    let b = film::ActiveModel {
        title: Set("Mirror".into()),
        tagline: Set(String::new()),
        description: Set(String::new()),
        poster: Set("movies/mirror.jpg".into()),
        year: Set(1975),
        country: Set("USSR".into()),
        world_premiere: Set("1975-03-07".into()),
        budget: Set(0),
        fees_in_usa: Set(0),
        fees_in_world: Set(0),
        category_id: Set(None),
        slug: Set("mirror".into()),
        draft: Set(true),
        trailer: Set(String::new()),
        ..Default::default()
    }
    .insert(catalog.db())
    .await
    .unwrap();

    // Row a gets checked, row b gets unchecked.
    let body = format!("id={}&draft_{}=on&id={}", a.id, a.id, b.id);
    let response = app.oneshot(form_post("/admin/films/draft", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let a = film::Entity::find_by_id(a.id).one(catalog.db()).await.unwrap().unwrap();
    let b = film::Entity::find_by_id(b.id).one(catalog.db()).await.unwrap().unwrap();
    assert!(a.draft);
    assert!(!b.draft);
}
