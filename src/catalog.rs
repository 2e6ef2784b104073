use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use thiserror::Error;

use crate::{
    entities::{
        category, film, film_actor, film_director, film_genre, genre, movie_shot, rating,
        rating_star, review,
    },
    forms::{ValidCategory, ValidFilm, ValidGenre, ValidReview},
    models::{FilmDetail, FilmQuery, ReviewThread},
};

/// Default page size for the recent-films listing.
pub const RECENT_FILMS_DEFAULT: u64 = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("slug is already in use")]
    DuplicateSlug,
    #[error("record not found")]
    NotFound,
    #[error("parent review not found")]
    ParentNotFound,
    #[error("replies to replies are not allowed")]
    ParentTooDeep,
    #[error("unknown rating star")]
    UnknownStar,
    #[error(transparent)]
    Db(#[from] DbErr),
}

fn map_write_err(err: DbErr) -> StoreError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return StoreError::DuplicateSlug;
    }
    if matches!(err, DbErr::RecordNotUpdated) {
        return StoreError::NotFound;
    }
    err.into()
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Every category in insertion order. Used by the category nav on all
    /// public pages.
    pub async fn categories(&self) -> StoreResult<Vec<category::Model>> {
        Ok(category::Entity::find().order_by_asc(category::Column::Id).all(&self.db).await?)
    }

    /// The first `count` films in creation order. Drafts are included;
    /// callers decide whether to filter them.
    pub async fn recent_films(&self, count: u64) -> StoreResult<Vec<film::Model>> {
        Ok(film::Entity::find()
            .order_by_asc(film::Column::Id)
            .limit(count)
            .all(&self.db)
            .await?)
    }

    /// Selectable star values, highest first.
    pub async fn stars(&self) -> StoreResult<Vec<rating_star::Model>> {
        Ok(rating_star::Entity::find()
            .order_by_desc(rating_star::Column::Value)
            .all(&self.db)
            .await?)
    }

    pub async fn film_by_slug(&self, slug: &str) -> StoreResult<Option<film::Model>> {
        Ok(film::Entity::find()
            .filter(film::Column::Slug.eq(slug))
            .one(&self.db)
            .await?)
    }

    /// The full detail page aggregate for one film.
    pub async fn film_detail(&self, slug: &str) -> StoreResult<Option<FilmDetail>> {
        let Some(film) = self.film_by_slug(slug).await? else {
            return Ok(None);
        };

        let cat = match film.category_id {
            Some(id) => category::Entity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        let genres = film
            .find_related(genre::Entity)
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?;
        let actors = film.find_linked(film::FilmActors).all(&self.db).await?;
        let directors = film.find_linked(film::FilmDirectors).all(&self.db).await?;
        let shots = film
            .find_related(movie_shot::Entity)
            .order_by_asc(movie_shot::Column::Id)
            .all(&self.db)
            .await?;
        let reviews = film
            .find_related(review::Entity)
            .order_by_asc(review::Column::Id)
            .all(&self.db)
            .await?;

        Ok(Some(FilmDetail {
            film,
            category: cat,
            genres,
            actors,
            directors,
            shots,
            reviews: thread_reviews(reviews),
        }))
    }

    /// Admin list query: optional substring search over film title and
    /// category name, plus exact filters on category and year.
    pub async fn search_films(
        &self,
        query: &FilmQuery,
    ) -> StoreResult<Vec<(film::Model, Option<category::Model>)>> {
        let mut find = film::Entity::find()
            .find_also_related(category::Entity)
            .order_by_asc(film::Column::Id);

        if let Some(id) = query.category {
            find = find.filter(film::Column::CategoryId.eq(id));
        }
        if let Some(year) = query.year {
            find = find.filter(film::Column::Year.eq(year));
        }
        if let Some(term) = query.q.as_deref().filter(|t| !t.trim().is_empty()) {
            let term = term.trim();
            find = find.filter(
                Condition::any()
                    .add(film::Column::Title.contains(term))
                    .add(category::Column::Name.contains(term)),
            );
        }

        Ok(find.all(&self.db).await?)
    }

    /// Distinct film years for the admin list filter.
    pub async fn film_years(&self) -> StoreResult<Vec<i32>> {
        Ok(film::Entity::find()
            .select_only()
            .column(film::Column::Year)
            .distinct()
            .order_by_asc(film::Column::Year)
            .into_tuple()
            .all(&self.db)
            .await?)
    }

    /// Store a public review. Replies are checked against the parent:
    /// it must exist, belong to the same film, and be top-level.
    pub async fn submit_review(
        &self,
        film_id: i32,
        input: &ValidReview,
    ) -> StoreResult<review::Model> {
        if let Some(parent_id) = input.parent {
            let parent = review::Entity::find_by_id(parent_id)
                .one(&self.db)
                .await?
                .ok_or(StoreError::ParentNotFound)?;
            if parent.film_id != film_id {
                return Err(StoreError::ParentNotFound);
            }
            if parent.parent_id.is_some() {
                return Err(StoreError::ParentTooDeep);
            }
        }

        let model = review::ActiveModel {
            email: Set(input.email.clone()),
            name: Set(input.name.clone()),
            text: Set(input.text.clone()),
            parent_id: Set(input.parent),
            film_id: Set(film_id),
            ..Default::default()
        };

        let created = review::Entity::insert(model)
            .exec_with_returning(&self.db)
            .await?;
        tracing::debug!(film_id, review_id = created.id, "review stored");
        Ok(created)
    }

    /// Store a public rating. Resubmitting from the same address replaces
    /// the previous star for that film.
    pub async fn submit_rating(&self, ip: &str, film_id: i32, star_id: i32) -> StoreResult<()> {
        rating_star::Entity::find_by_id(star_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::UnknownStar)?;

        let model = rating::ActiveModel {
            ip: Set(ip.to_string()),
            star_id: Set(star_id),
            film_id: Set(film_id),
            ..Default::default()
        };

        rating::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([rating::Column::Ip, rating::Column::FilmId])
                    .update_columns([rating::Column::StarId])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        tracing::debug!(film_id, star_id, "rating stored");
        Ok(())
    }

    pub async fn save_category(&self, id: Option<i32>, input: &ValidCategory) -> StoreResult<i32> {
        let model = category::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            slug: Set(input.slug.clone()),
            ..Default::default()
        };
        match id {
            Some(id) => {
                let mut model = model;
                model.id = Set(id);
                category::Entity::update(model).exec(&self.db).await.map_err(map_write_err)?;
                Ok(id)
            }
            None => Ok(category::Entity::insert(model)
                .exec(&self.db)
                .await
                .map_err(map_write_err)?
                .last_insert_id),
        }
    }

    pub async fn save_genre(&self, id: Option<i32>, input: &ValidGenre) -> StoreResult<i32> {
        let model = genre::ActiveModel {
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            slug: Set(input.slug.clone()),
            ..Default::default()
        };
        match id {
            Some(id) => {
                let mut model = model;
                model.id = Set(id);
                genre::Entity::update(model).exec(&self.db).await.map_err(map_write_err)?;
                Ok(id)
            }
            None => Ok(genre::Entity::insert(model)
                .exec(&self.db)
                .await
                .map_err(map_write_err)?
                .last_insert_id),
        }
    }

    /// Create or update a film and replace its genre, actor, and director
    /// memberships in one transaction.
    pub async fn save_film(&self, id: Option<i32>, input: &ValidFilm) -> StoreResult<i32> {
        let txn = self.db.begin().await?;

        let model = film::ActiveModel {
            title: Set(input.title.clone()),
            tagline: Set(input.tagline.clone()),
            description: Set(input.description.clone()),
            poster: Set(input.poster.clone()),
            year: Set(input.year),
            country: Set(input.country.clone()),
            world_premiere: Set(input.world_premiere.clone()),
            budget: Set(input.budget),
            fees_in_usa: Set(input.fees_in_usa),
            fees_in_world: Set(input.fees_in_world),
            category_id: Set(input.category_id),
            slug: Set(input.slug.clone()),
            draft: Set(input.draft),
            trailer: Set(input.trailer.clone()),
            ..Default::default()
        };

        let film_id = match id {
            Some(id) => {
                let mut model = model;
                model.id = Set(id);
                film::Entity::update(model).exec(&txn).await.map_err(map_write_err)?;
                id
            }
            None => film::Entity::insert(model)
                .exec(&txn)
                .await
                .map_err(map_write_err)?
                .last_insert_id,
        };

        film_genre::Entity::delete_many()
            .filter(film_genre::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await?;
        for genre_id in &input.genres {
            film_genre::Entity::insert(film_genre::ActiveModel {
                film_id: Set(film_id),
                genre_id: Set(*genre_id),
            })
            .exec(&txn)
            .await?;
        }

        film_actor::Entity::delete_many()
            .filter(film_actor::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await?;
        for actor_id in &input.actors {
            film_actor::Entity::insert(film_actor::ActiveModel {
                film_id: Set(film_id),
                actor_id: Set(*actor_id),
            })
            .exec(&txn)
            .await?;
        }

        film_director::Entity::delete_many()
            .filter(film_director::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await?;
        for actor_id in &input.directors {
            film_director::Entity::insert(film_director::ActiveModel {
                film_id: Set(film_id),
                actor_id: Set(*actor_id),
            })
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(film_id)
    }

    /// Bulk in-place update of the draft flag from the admin film list.
    pub async fn update_drafts(&self, updates: &[(i32, bool)]) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        for (film_id, draft) in updates {
            film::Entity::update_many()
                .col_expr(film::Column::Draft, Expr::value(*draft))
                .filter(film::Column::Id.eq(*film_id))
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(())
    }
}

/// Group an id-ordered review list into top-level threads with their
/// replies. A reply whose parent is gone surfaces as top-level.
fn thread_reviews(rows: Vec<review::Model>) -> Vec<ReviewThread> {
    let mut threads: Vec<ReviewThread> = Vec::new();
    let mut by_id: HashMap<i32, usize> = HashMap::new();

    for row in rows {
        match row.parent_id.and_then(|pid| by_id.get(&pid).copied()) {
            Some(idx) => threads[idx].replies.push(row),
            None => {
                by_id.insert(row.id, threads.len());
                threads.push(ReviewThread { review: row, replies: Vec::new() });
            }
        }
    }

    threads
}
