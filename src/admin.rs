//! Handlers for the content-management surface. There is no derived state
//! here: every action is a direct schema read or write.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use crate::{
    AppState, admin_views,
    catalog::StoreError,
    entities::{actor, category, film, genre, movie_shot, rating, rating_star, review},
    error::{AppError, AppResult},
    forms::{
        ActorForm, CategoryForm, FieldErrors, FilmForm, GenreForm, MovieShotForm, ReviewEditForm,
        StarForm,
    },
    models::FilmQuery,
};

pub async fn dashboard() -> Html<String> {
    Html(admin_views::dashboard_page())
}

// ---- films ----

pub async fn film_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilmQuery>,
) -> AppResult<Html<String>> {
    let rows = state.catalog.search_films(&query).await?;
    let categories = state.catalog.categories().await?;
    let years = state.catalog.film_years().await?;
    Ok(Html(admin_views::film_list_page(&rows, &categories, &years, &query)))
}

pub async fn film_new(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let categories = state.catalog.categories().await?;
    Ok(Html(admin_views::film_form_page(
        None,
        &FilmForm::default(),
        &FieldErrors::default(),
        &categories,
        &[],
        &[],
    )))
}

pub async fn film_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<FilmForm>,
) -> AppResult<Response> {
    save_film(&state, None, form).await
}

pub async fn film_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let db = state.catalog.db();
    let film = film::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)?;
    let form = film_form_from(&state, &film).await?;
    let categories = state.catalog.categories().await?;
    let shots = film
        .find_related(movie_shot::Entity)
        .order_by_asc(movie_shot::Column::Id)
        .all(db)
        .await?;
    let reviews = film
        .find_related(review::Entity)
        .filter(review::Column::ParentId.is_null())
        .order_by_asc(review::Column::Id)
        .all(db)
        .await?;
    Ok(Html(admin_views::film_form_page(
        Some(id),
        &form,
        &FieldErrors::default(),
        &categories,
        &shots,
        &reviews,
    )))
}

pub async fn film_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<FilmForm>,
) -> AppResult<Response> {
    save_film(&state, Some(id), form).await
}

pub async fn film_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    film::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/films"))
}

/// Bulk draft toggle from the list view. The table posts one `id` field per
/// row plus a `draft_{id}` field for each checked box.
pub async fn film_drafts(
    State(state): State<Arc<AppState>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Redirect> {
    let checked: HashSet<&str> = pairs
        .iter()
        .filter_map(|(key, _)| key.strip_prefix("draft_"))
        .collect();

    let mut updates = Vec::new();
    for (key, value) in &pairs {
        if key == "id"
            && let Ok(id) = value.parse::<i32>()
        {
            updates.push((id, checked.contains(value.as_str())));
        }
    }

    state.catalog.update_drafts(&updates).await?;
    Ok(Redirect::to("/admin/films"))
}

async fn save_film(state: &AppState, id: Option<i32>, form: FilmForm) -> AppResult<Response> {
    let outcome = match form.validate() {
        Ok(valid) => match state.catalog.save_film(id, &valid).await {
            Ok(film_id) => return Ok(Redirect::to(&format!("/admin/films/{film_id}")).into_response()),
            Err(StoreError::DuplicateSlug) => {
                let mut errors = FieldErrors::default();
                errors.push("slug", StoreError::DuplicateSlug.to_string());
                errors
            }
            Err(err) => return Err(err.into()),
        },
        Err(errors) => errors,
    };

    let categories = state.catalog.categories().await?;
    let (shots, reviews) = match id {
        Some(id) => {
            let db = state.catalog.db();
            let shots = movie_shot::Entity::find()
                .filter(movie_shot::Column::FilmId.eq(id))
                .order_by_asc(movie_shot::Column::Id)
                .all(db)
                .await?;
            let reviews = review::Entity::find()
                .filter(review::Column::FilmId.eq(id))
                .filter(review::Column::ParentId.is_null())
                .order_by_asc(review::Column::Id)
                .all(db)
                .await?;
            (shots, reviews)
        }
        None => (Vec::new(), Vec::new()),
    };

    let body = admin_views::film_form_page(id, &form, &outcome, &categories, &shots, &reviews);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
}

async fn film_form_from(state: &AppState, film: &film::Model) -> AppResult<FilmForm> {
    let db = state.catalog.db();
    let genres = film.find_related(genre::Entity).all(db).await?;
    let actors = film.find_linked(film::FilmActors).all(db).await?;
    let directors = film.find_linked(film::FilmDirectors).all(db).await?;

    Ok(FilmForm {
        title: film.title.clone(),
        tagline: film.tagline.clone(),
        description: film.description.clone(),
        poster: film.poster.clone(),
        year: film.year.to_string(),
        country: film.country.clone(),
        world_premiere: film.world_premiere.clone(),
        budget: film.budget.to_string(),
        fees_in_usa: film.fees_in_usa.to_string(),
        fees_in_world: film.fees_in_world.to_string(),
        category: film.category_id.map(|id| id.to_string()).unwrap_or_default(),
        slug: film.slug.clone(),
        draft: film.draft.then(|| "on".to_string()),
        trailer: film.trailer.clone(),
        actors: id_csv(actors.iter().map(|a| a.id)),
        directors: id_csv(directors.iter().map(|a| a.id)),
        genres: id_csv(genres.iter().map(|g| g.id)),
    })
}

fn id_csv(ids: impl Iterator<Item = i32>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

// ---- categories ----

pub async fn category_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let categories = state.catalog.categories().await?;
    Ok(Html(admin_views::category_list_page(&categories)))
}

pub async fn category_new() -> Html<String> {
    Html(admin_views::category_form_page(None, &CategoryForm::default(), &FieldErrors::default()))
}

pub async fn category_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CategoryForm>,
) -> AppResult<Response> {
    save_category(&state, None, form).await
}

pub async fn category_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let cat = category::Entity::find_by_id(id)
        .one(state.catalog.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let form = CategoryForm { name: cat.name, description: cat.description, slug: cat.slug };
    Ok(Html(admin_views::category_form_page(Some(id), &form, &FieldErrors::default())))
}

pub async fn category_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<CategoryForm>,
) -> AppResult<Response> {
    save_category(&state, Some(id), form).await
}

pub async fn category_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    category::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/categories"))
}

async fn save_category(
    state: &AppState,
    id: Option<i32>,
    form: CategoryForm,
) -> AppResult<Response> {
    let errors = match form.validate() {
        Ok(valid) => match state.catalog.save_category(id, &valid).await {
            Ok(_) => return Ok(Redirect::to("/admin/categories").into_response()),
            Err(StoreError::DuplicateSlug) => {
                let mut errors = FieldErrors::default();
                errors.push("slug", StoreError::DuplicateSlug.to_string());
                errors
            }
            Err(err) => return Err(err.into()),
        },
        Err(errors) => errors,
    };
    let body = admin_views::category_form_page(id, &form, &errors);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
}

// ---- genres ----

pub async fn genre_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let genres =
        genre::Entity::find().order_by_asc(genre::Column::Id).all(state.catalog.db()).await?;
    Ok(Html(admin_views::genre_list_page(&genres)))
}

pub async fn genre_new() -> Html<String> {
    Html(admin_views::genre_form_page(None, &GenreForm::default(), &FieldErrors::default()))
}

pub async fn genre_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    save_genre(&state, None, form).await
}

pub async fn genre_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let g = genre::Entity::find_by_id(id)
        .one(state.catalog.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let form = GenreForm { name: g.name, description: g.description, slug: g.slug };
    Ok(Html(admin_views::genre_form_page(Some(id), &form, &FieldErrors::default())))
}

pub async fn genre_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    save_genre(&state, Some(id), form).await
}

pub async fn genre_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    genre::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/genres"))
}

async fn save_genre(state: &AppState, id: Option<i32>, form: GenreForm) -> AppResult<Response> {
    let errors = match form.validate() {
        Ok(valid) => match state.catalog.save_genre(id, &valid).await {
            Ok(_) => return Ok(Redirect::to("/admin/genres").into_response()),
            Err(StoreError::DuplicateSlug) => {
                let mut errors = FieldErrors::default();
                errors.push("slug", StoreError::DuplicateSlug.to_string());
                errors
            }
            Err(err) => return Err(err.into()),
        },
        Err(errors) => errors,
    };
    let body = admin_views::genre_form_page(id, &form, &errors);
    Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
}

// ---- actors ----

pub async fn actor_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let actors =
        actor::Entity::find().order_by_asc(actor::Column::Id).all(state.catalog.db()).await?;
    Ok(Html(admin_views::actor_list_page(&actors)))
}

pub async fn actor_new() -> Html<String> {
    Html(admin_views::actor_form_page(None, &ActorForm::default(), &FieldErrors::default()))
}

pub async fn actor_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ActorForm>,
) -> AppResult<Response> {
    save_actor(&state, None, form).await
}

pub async fn actor_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let a = actor::Entity::find_by_id(id)
        .one(state.catalog.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let form = ActorForm {
        name: a.name,
        age: a.age.to_string(),
        description: a.description,
        image: a.image,
    };
    Ok(Html(admin_views::actor_form_page(Some(id), &form, &FieldErrors::default())))
}

pub async fn actor_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<ActorForm>,
) -> AppResult<Response> {
    save_actor(&state, Some(id), form).await
}

pub async fn actor_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    actor::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/actors"))
}

async fn save_actor(state: &AppState, id: Option<i32>, form: ActorForm) -> AppResult<Response> {
    match form.validate() {
        Ok(valid) => {
            let model = actor::ActiveModel {
                name: Set(valid.name),
                age: Set(valid.age),
                description: Set(valid.description),
                image: Set(valid.image),
                ..Default::default()
            };
            match id {
                Some(id) => {
                    let mut model = model;
                    model.id = Set(id);
                    model.update(state.catalog.db()).await?;
                }
                None => {
                    model.insert(state.catalog.db()).await?;
                }
            }
            Ok(Redirect::to("/admin/actors").into_response())
        }
        Err(errors) => {
            let body = admin_views::actor_form_page(id, &form, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
        }
    }
}

// ---- movie shots ----

pub async fn shot_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let rows = movie_shot::Entity::find()
        .find_also_related(film::Entity)
        .order_by_asc(movie_shot::Column::Id)
        .all(state.catalog.db())
        .await?;
    Ok(Html(admin_views::shot_list_page(&rows)))
}

pub async fn shot_new(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let films =
        film::Entity::find().order_by_asc(film::Column::Id).all(state.catalog.db()).await?;
    Ok(Html(admin_views::shot_form_page(
        None,
        &MovieShotForm::default(),
        &FieldErrors::default(),
        &films,
    )))
}

pub async fn shot_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<MovieShotForm>,
) -> AppResult<Response> {
    save_shot(&state, None, form).await
}

pub async fn shot_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let db = state.catalog.db();
    let shot =
        movie_shot::Entity::find_by_id(id).one(db).await?.ok_or(AppError::NotFound)?;
    let films = film::Entity::find().order_by_asc(film::Column::Id).all(db).await?;
    let form = MovieShotForm {
        title: shot.title,
        description: shot.description,
        image: shot.image,
        film: shot.film_id.to_string(),
    };
    Ok(Html(admin_views::shot_form_page(Some(id), &form, &FieldErrors::default(), &films)))
}

pub async fn shot_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<MovieShotForm>,
) -> AppResult<Response> {
    save_shot(&state, Some(id), form).await
}

pub async fn shot_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    movie_shot::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/shots"))
}

async fn save_shot(state: &AppState, id: Option<i32>, form: MovieShotForm) -> AppResult<Response> {
    match form.validate() {
        Ok(valid) => {
            let model = movie_shot::ActiveModel {
                title: Set(valid.title),
                description: Set(valid.description),
                image: Set(valid.image),
                film_id: Set(valid.film_id),
                ..Default::default()
            };
            match id {
                Some(id) => {
                    let mut model = model;
                    model.id = Set(id);
                    model.update(state.catalog.db()).await?;
                }
                None => {
                    model.insert(state.catalog.db()).await?;
                }
            }
            Ok(Redirect::to("/admin/shots").into_response())
        }
        Err(errors) => {
            let films = film::Entity::find()
                .order_by_asc(film::Column::Id)
                .all(state.catalog.db())
                .await?;
            let body = admin_views::shot_form_page(id, &form, &errors, &films);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
        }
    }
}

// ---- rating stars ----

pub async fn star_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let stars = state.catalog.stars().await?;
    Ok(Html(admin_views::star_list_page(&stars, &FieldErrors::default())))
}

pub async fn star_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StarForm>,
) -> AppResult<Response> {
    match form.validate() {
        Ok(value) => {
            rating_star::Entity::insert(rating_star::ActiveModel {
                value: Set(value),
                ..Default::default()
            })
            .exec(state.catalog.db())
            .await?;
            Ok(Redirect::to("/admin/stars").into_response())
        }
        Err(errors) => {
            let stars = state.catalog.stars().await?;
            let body = admin_views::star_list_page(&stars, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
        }
    }
}

pub async fn star_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    rating_star::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/stars"))
}

// ---- ratings ----

pub async fn rating_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let rows = rating::Entity::find()
        .find_also_related(film::Entity)
        .order_by_asc(rating::Column::Id)
        .all(state.catalog.db())
        .await?;
    let stars = state.catalog.stars().await?;
    Ok(Html(admin_views::rating_list_page(&rows, &stars)))
}

pub async fn rating_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    rating::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/ratings"))
}

// ---- reviews ----

pub async fn review_list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let rows = review::Entity::find()
        .order_by_asc(review::Column::Id)
        .all(state.catalog.db())
        .await?;
    Ok(Html(admin_views::review_list_page(&rows)))
}

pub async fn review_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Html<String>> {
    let rev = review::Entity::find_by_id(id)
        .one(state.catalog.db())
        .await?
        .ok_or(AppError::NotFound)?;
    let text = rev.text.clone();
    Ok(Html(admin_views::review_edit_page(&rev, &text, &FieldErrors::default())))
}

/// Only the review text is administrator-editable; name and email are
/// locked to the original submitter.
pub async fn review_update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<ReviewEditForm>,
) -> AppResult<Response> {
    let rev = review::Entity::find_by_id(id)
        .one(state.catalog.db())
        .await?
        .ok_or(AppError::NotFound)?;

    match form.validate() {
        Ok(text) => {
            let model = review::ActiveModel {
                id: Set(id),
                text: Set(text),
                ..Default::default()
            };
            model.update(state.catalog.db()).await?;
            Ok(Redirect::to("/admin/reviews").into_response())
        }
        Err(errors) => {
            let body = admin_views::review_edit_page(&rev, &form.text, &errors);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
        }
    }
}

pub async fn review_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    review::Entity::delete_by_id(id).exec(state.catalog.db()).await?;
    Ok(Redirect::to("/admin/reviews"))
}
