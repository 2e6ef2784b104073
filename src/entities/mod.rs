pub mod actor;
pub mod category;
pub mod film;
pub mod film_actor;
pub mod film_director;
pub mod film_genre;
pub mod genre;
pub mod movie_shot;
pub mod rating;
pub mod rating_star;
pub mod review;
