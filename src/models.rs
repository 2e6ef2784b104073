use serde::Deserialize;

use crate::entities::{actor, category, film, genre, movie_shot, review};

/// Everything the film detail page needs in one aggregate.
#[derive(Clone, Debug)]
pub struct FilmDetail {
    pub film: film::Model,
    pub category: Option<category::Model>,
    pub genres: Vec<genre::Model>,
    pub actors: Vec<actor::Model>,
    pub directors: Vec<actor::Model>,
    pub shots: Vec<movie_shot::Model>,
    pub reviews: Vec<ReviewThread>,
}

/// A top-level review with its direct replies. Threading is one level deep.
#[derive(Clone, Debug)]
pub struct ReviewThread {
    pub review: review::Model,
    pub replies: Vec<review::Model>,
}

/// Admin film list filters, straight from the query string.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FilmQuery {
    pub q: Option<String>,
    pub category: Option<i32>,
    pub year: Option<i32>,
}
