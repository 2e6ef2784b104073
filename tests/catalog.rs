use kinoteka::{
    catalog::{Catalog, StoreError},
    db,
    entities::{category, film, film_actor, genre, movie_shot, rating, rating_star, review},
    forms::{ValidCategory, ValidFilm, ValidGenre, ValidReview},
    models::FilmQuery,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

async fn catalog() -> Catalog {
    let db = db::connect_and_migrate("sqlite::memory:").await.expect("connect");
    Catalog::new(db)
}

async fn seed_category(db: &DatabaseConnection, name: &str, slug: &str) -> category::Model {
    category::ActiveModel {
        name: Set(name.into()),
        description: Set(String::new()),
        slug: Set(slug.into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert category")
}

async fn seed_film(
    db: &DatabaseConnection,
    title: &str,
    slug: &str,
    category_id: Option<i32>,
) -> film::Model {
    film::ActiveModel {
        title: Set(title.into()),
        tagline: Set(String::new()),
        description: Set(String::new()),
        poster: Set("movies/poster.jpg".into()),
        year: Set(1999),
        country: Set("US".into()),
        world_premiere: Set("1999-03-31".into()),
        budget: Set(0),
        fees_in_usa: Set(0),
        fees_in_world: Set(0),
        category_id: Set(category_id),
        slug: Set(slug.into()),
        draft: Set(false),
        trailer: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert film")
}

async fn seed_star(db: &DatabaseConnection, value: i32) -> rating_star::Model {
    rating_star::ActiveModel { value: Set(value), ..Default::default() }
        .insert(db)
        .await
        .expect("insert star")
}

fn review_input(parent: Option<i32>) -> ValidReview {
    ValidReview {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        text: "Great film".into(),
        parent,
    }
}

fn film_input(title: &str, slug: &str) -> ValidFilm {
    ValidFilm {
        title: title.into(),
        tagline: String::new(),
        description: String::new(),
        poster: "movies/poster.jpg".into(),
        year: 1972,
        country: "USSR".into(),
        world_premiere: "1972-03-20".into(),
        budget: 1_000_000,
        fees_in_usa: 0,
        fees_in_world: 0,
        category_id: None,
        slug: slug.into(),
        draft: false,
        trailer: String::new(),
        actors: Vec::new(),
        directors: Vec::new(),
        genres: Vec::new(),
    }
}

#[tokio::test]
async fn duplicate_category_slug_is_rejected() {
    let catalog = catalog().await;
    let input = ValidCategory {
        name: "Drama".into(),
        description: String::new(),
        slug: "drama".into(),
    };
    catalog.save_category(None, &input).await.expect("first save");

    let err = catalog.save_category(None, &input).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug));

    let count = category::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_genre_slug_is_rejected() {
    let catalog = catalog().await;
    let input = ValidGenre {
        name: "Sci-Fi".into(),
        description: String::new(),
        slug: "sci-fi".into(),
    };
    catalog.save_genre(None, &input).await.expect("first save");

    let err = catalog.save_genre(None, &input).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug));

    let count = genre::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn duplicate_film_slug_is_rejected() {
    let catalog = catalog().await;
    catalog.save_film(None, &film_input("Solaris", "solaris")).await.expect("first save");

    let err = catalog.save_film(None, &film_input("Solaris again", "solaris")).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug));

    let count = film::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn deleting_category_clears_film_reference() {
    let catalog = catalog().await;
    let db = catalog.db();
    let cat = seed_category(db, "Drama", "drama").await;
    let film = seed_film(db, "Stalker", "stalker", Some(cat.id)).await;

    category::Entity::delete_by_id(cat.id).exec(db).await.unwrap();

    let reloaded = film::Entity::find_by_id(film.id).one(db).await.unwrap().expect("film survives");
    assert_eq!(reloaded.category_id, None);
}

#[tokio::test]
async fn deleting_film_cascades_to_dependents() {
    let catalog = catalog().await;
    let db = catalog.db();
    let film = seed_film(db, "Stalker", "stalker", None).await;
    let star = seed_star(db, 5).await;

    movie_shot::ActiveModel {
        title: Set("Zone".into()),
        description: Set(String::new()),
        image: Set("movie_shots/zone.jpg".into()),
        film_id: Set(film.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    catalog.submit_rating("203.0.113.1", film.id, star.id).await.unwrap();
    catalog.submit_review(film.id, &review_input(None)).await.unwrap();

    film::Entity::delete_by_id(film.id).exec(db).await.unwrap();

    assert_eq!(movie_shot::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(rating::Entity::find().count(db).await.unwrap(), 0);
    assert_eq!(review::Entity::find().count(db).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_parent_review_keeps_replies() {
    let catalog = catalog().await;
    let db = catalog.db();
    let film = seed_film(db, "Stalker", "stalker", None).await;

    let parent = catalog.submit_review(film.id, &review_input(None)).await.unwrap();
    let child = catalog.submit_review(film.id, &review_input(Some(parent.id))).await.unwrap();

    review::Entity::delete_by_id(parent.id).exec(db).await.unwrap();

    let reloaded = review::Entity::find_by_id(child.id).one(db).await.unwrap().expect("reply survives");
    assert_eq!(reloaded.parent_id, None);
}

#[tokio::test]
async fn reply_to_reply_is_rejected() {
    let catalog = catalog().await;
    let film = seed_film(catalog.db(), "Stalker", "stalker", None).await;

    let parent = catalog.submit_review(film.id, &review_input(None)).await.unwrap();
    let reply = catalog.submit_review(film.id, &review_input(Some(parent.id))).await.unwrap();

    let err = catalog.submit_review(film.id, &review_input(Some(reply.id))).await.unwrap_err();
    assert!(matches!(err, StoreError::ParentTooDeep));

    let count = review::Entity::find().count(catalog.db()).await.unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn reply_parent_must_belong_to_same_film() {
    let catalog = catalog().await;
    let db = catalog.db();
    let first = seed_film(db, "Stalker", "stalker", None).await;
    let second = seed_film(db, "Solaris", "solaris", None).await;

    let parent = catalog.submit_review(first.id, &review_input(None)).await.unwrap();

    let err = catalog.submit_review(second.id, &review_input(Some(parent.id))).await.unwrap_err();
    assert!(matches!(err, StoreError::ParentNotFound));
}

#[tokio::test]
async fn rating_per_ip_and_film_is_replaced_on_resubmit() {
    let catalog = catalog().await;
    let db = catalog.db();
    let film = seed_film(db, "Stalker", "stalker", None).await;
    let four = seed_star(db, 4).await;
    let five = seed_star(db, 5).await;

    catalog.submit_rating("203.0.113.1", film.id, four.id).await.unwrap();
    catalog.submit_rating("203.0.113.1", film.id, five.id).await.unwrap();

    let rows = rating::Entity::find().all(db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].star_id, five.id);

    // A different submitter still gets a row of their own.
    catalog.submit_rating("203.0.113.2", film.id, four.id).await.unwrap();
    assert_eq!(rating::Entity::find().count(db).await.unwrap(), 2);
}

#[tokio::test]
async fn rating_with_unknown_star_is_rejected() {
    let catalog = catalog().await;
    let film = seed_film(catalog.db(), "Stalker", "stalker", None).await;

    let err = catalog.submit_rating("203.0.113.1", film.id, 99).await.unwrap_err();
    assert!(matches!(err, StoreError::UnknownStar));
    assert_eq!(rating::Entity::find().count(catalog.db()).await.unwrap(), 0);
}

#[tokio::test]
async fn stars_are_ordered_by_descending_value() {
    let catalog = catalog().await;
    for value in [3, 1, 5, 2, 4] {
        seed_star(catalog.db(), value).await;
    }

    let values: Vec<i32> = catalog.stars().await.unwrap().iter().map(|s| s.value).collect();
    assert_eq!(values, vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn recent_films_returns_first_five_in_creation_order() {
    let catalog = catalog().await;
    let db = catalog.db();
    let mut ids = Vec::new();
    for n in 1..=7 {
        ids.push(seed_film(db, &format!("Film {n}"), &format!("film-{n}"), None).await.id);
    }

    let recent = catalog.recent_films(5).await.unwrap();
    let got: Vec<i32> = recent.iter().map(|f| f.id).collect();
    assert_eq!(got, ids[..5].to_vec());
}

#[tokio::test]
async fn categories_come_back_once_each_in_insertion_order() {
    let catalog = catalog().await;
    let db = catalog.db();
    for (name, slug) in [("Drama", "drama"), ("Action", "action"), ("Noir", "noir")] {
        seed_category(db, name, slug).await;
    }

    let names: Vec<String> =
        catalog.categories().await.unwrap().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Drama", "Action", "Noir"]);
}

#[tokio::test]
async fn film_search_matches_title_and_category_name() {
    let catalog = catalog().await;
    let db = catalog.db();
    let cat = seed_category(db, "Science Fiction", "sci-fi").await;
    seed_film(db, "Stalker", "stalker", Some(cat.id)).await;
    seed_film(db, "Mirror", "mirror", None).await;

    let by_title = catalog
        .search_films(&FilmQuery { q: Some("stalk".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].0.title, "Stalker");

    let by_category = catalog
        .search_films(&FilmQuery { q: Some("Science".into()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].0.title, "Stalker");

    let miss = catalog
        .search_films(&FilmQuery { q: Some("nothing".into()), ..Default::default() })
        .await
        .unwrap();
    assert!(miss.is_empty());
}

#[tokio::test]
async fn film_list_filters_on_category_and_year() {
    let catalog = catalog().await;
    let db = catalog.db();
    let cat = seed_category(db, "Drama", "drama").await;
    seed_film(db, "Stalker", "stalker", Some(cat.id)).await;
    seed_film(db, "Mirror", "mirror", None).await;

    let by_category = catalog
        .search_films(&FilmQuery { category: Some(cat.id), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].1.as_ref().unwrap().name, "Drama");

    let by_year = catalog
        .search_films(&FilmQuery { year: Some(1999), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_year.len(), 2);

    let no_match = catalog
        .search_films(&FilmQuery { year: Some(1800), ..Default::default() })
        .await
        .unwrap();
    assert!(no_match.is_empty());
}

#[tokio::test]
async fn save_film_replaces_memberships() {
    let catalog = catalog().await;
    let db = catalog.db();

    let first = kinoteka::entities::actor::ActiveModel {
        name: Set("Solonitsyn".into()),
        age: Set(47),
        description: Set(String::new()),
        image: Set("actors/s.jpg".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    let second = kinoteka::entities::actor::ActiveModel {
        name: Set("Kaidanovsky".into()),
        age: Set(49),
        description: Set(String::new()),
        image: Set("actors/k.jpg".into()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let mut input = film_input("Stalker", "stalker");
    input.actors = vec![first.id, second.id];
    let film_id = catalog.save_film(None, &input).await.unwrap();

    input.actors = vec![second.id];
    catalog.save_film(Some(film_id), &input).await.unwrap();

    let links = film_actor::Entity::find()
        .filter(film_actor::Column::FilmId.eq(film_id))
        .all(db)
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].actor_id, second.id);
}

#[tokio::test]
async fn update_drafts_edits_flags_in_place() {
    let catalog = catalog().await;
    let db = catalog.db();
    let a = seed_film(db, "Stalker", "stalker", None).await;
    let b = seed_film(db, "Mirror", "mirror", None).await;

    catalog.update_drafts(&[(a.id, true), (b.id, false)]).await.unwrap();

    let a = film::Entity::find_by_id(a.id).one(db).await.unwrap().unwrap();
    let b = film::Entity::find_by_id(b.id).one(db).await.unwrap().unwrap();
    assert!(a.draft);
    assert!(!b.draft);
}

#[tokio::test]
async fn film_detail_threads_reviews_one_level_deep() {
    let catalog = catalog().await;
    let film = seed_film(catalog.db(), "Stalker", "stalker", None).await;

    let top_a = catalog.submit_review(film.id, &review_input(None)).await.unwrap();
    let top_b = catalog.submit_review(film.id, &review_input(None)).await.unwrap();
    let reply = catalog.submit_review(film.id, &review_input(Some(top_a.id))).await.unwrap();

    let detail = catalog.film_detail("stalker").await.unwrap().expect("detail");
    assert_eq!(detail.reviews.len(), 2);
    assert_eq!(detail.reviews[0].review.id, top_a.id);
    assert_eq!(detail.reviews[0].replies.len(), 1);
    assert_eq!(detail.reviews[0].replies[0].id, reply.id);
    assert_eq!(detail.reviews[1].review.id, top_b.id);
    assert!(detail.reviews[1].replies.is_empty());
}
