//! Form payloads and their validation.
//!
//! Raw forms deserialize every field as a string so that a bad submission
//! never becomes a deserialization rejection; `validate()` turns a raw form
//! into its `Valid*` counterpart or a set of field-scoped errors. Nothing is
//! written to the store until validation passes.

use serde::Deserialize;
use time::macros::format_description;

pub const MAX_NAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_TEXT_LEN: usize = 3000;
pub const MAX_SLUG_LEN: usize = 150;

/// Validation failures keyed by form field name.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Minimal syntactic email check: one `@`, a non-empty local part, and a
/// domain with an interior dot. No whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot < domain.len() - 1,
        None => false,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub parent: String,
}

#[derive(Debug)]
pub struct ValidReview {
    pub name: String,
    pub email: String,
    pub text: String,
    pub parent: Option<i32>,
}

impl ReviewForm {
    pub fn validate(&self) -> Result<ValidReview, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Name is required");
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push("name", format!("Name must be at most {MAX_NAME_LEN} characters"));
        }

        let email = self.email.trim();
        if !is_valid_email(email) {
            errors.push("email", "Enter a valid email address");
        }

        let text = self.text.trim();
        if text.is_empty() {
            errors.push("text", "Comment text is required");
        } else if text.chars().count() > MAX_TEXT_LEN {
            errors.push("text", format!("Comment must be at most {MAX_TEXT_LEN} characters"));
        }

        let parent = match self.parent.trim() {
            "" => None,
            raw => match raw.parse::<i32>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push("parent", "Invalid parent review");
                    None
                }
            },
        };

        errors.into_result(ValidReview {
            name: name.to_string(),
            email: email.to_string(),
            text: text.to_string(),
            parent,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RatingForm {
    /// Absent entirely when no radio button was selected.
    pub star: Option<String>,
}

impl RatingForm {
    pub fn validate(&self) -> Result<i32, FieldErrors> {
        let mut errors = FieldErrors::default();
        let star = match self.star.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("star", "Select a rating");
                None
            }
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push("star", "Select a rating");
                    None
                }
            },
        };
        errors.into_result(star.unwrap_or_default())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug)]
pub struct ValidCategory {
    pub name: String,
    pub description: String,
    pub slug: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<ValidCategory, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = require(&mut errors, "name", &self.name, "Name is required");
        let slug = require_slug(&mut errors, &self.slug);
        errors.into_result(ValidCategory {
            name,
            description: self.description.trim().to_string(),
            slug,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug)]
pub struct ValidGenre {
    pub name: String,
    pub description: String,
    pub slug: String,
}

impl GenreForm {
    pub fn validate(&self) -> Result<ValidGenre, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = require(&mut errors, "name", &self.name, "Name is required");
        let slug = require_slug(&mut errors, &self.slug);
        errors.into_result(ValidGenre {
            name,
            description: self.description.trim().to_string(),
            slug,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ActorForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug)]
pub struct ValidActor {
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: String,
}

impl ActorForm {
    pub fn validate(&self) -> Result<ValidActor, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = require(&mut errors, "name", &self.name, "Name is required");
        let age = non_negative_i32(&mut errors, "age", &self.age);
        errors.into_result(ValidActor {
            name,
            age,
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieShotForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub film: String,
}

#[derive(Debug)]
pub struct ValidMovieShot {
    pub title: String,
    pub description: String,
    pub image: String,
    pub film_id: i32,
}

impl MovieShotForm {
    pub fn validate(&self) -> Result<ValidMovieShot, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = require(&mut errors, "title", &self.title, "Title is required");
        let film_id = match self.film.trim().parse::<i32>() {
            Ok(id) if id > 0 => id,
            _ => {
                errors.push("film", "Select a film");
                0
            }
        };
        errors.into_result(ValidMovieShot {
            title,
            description: self.description.trim().to_string(),
            image: self.image.trim().to_string(),
            film_id,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilmForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub world_premiere: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub fees_in_usa: String,
    #[serde(default)]
    pub fees_in_world: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub draft: Option<String>,
    #[serde(default)]
    pub trailer: String,
    /// Comma-separated actor ids.
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub directors: String,
    #[serde(default)]
    pub genres: String,
}

#[derive(Debug)]
pub struct ValidFilm {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub poster: String,
    pub year: i32,
    pub country: String,
    pub world_premiere: String,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub category_id: Option<i32>,
    pub slug: String,
    pub draft: bool,
    pub trailer: String,
    pub actors: Vec<i32>,
    pub directors: Vec<i32>,
    pub genres: Vec<i32>,
}

impl FilmForm {
    pub fn validate(&self) -> Result<ValidFilm, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = require(&mut errors, "title", &self.title, "Title is required");
        let slug = require_slug(&mut errors, &self.slug);
        let year = non_negative_i32(&mut errors, "year", &self.year);
        let budget = non_negative_i64(&mut errors, "budget", &self.budget);
        let fees_in_usa = non_negative_i64(&mut errors, "fees_in_usa", &self.fees_in_usa);
        let fees_in_world = non_negative_i64(&mut errors, "fees_in_world", &self.fees_in_world);

        let world_premiere = self.world_premiere.trim();
        let date_format = format_description!("[year]-[month]-[day]");
        if time::Date::parse(world_premiere, &date_format).is_err() {
            errors.push("world_premiere", "Enter a date as YYYY-MM-DD");
        }

        let category_id = match self.category.trim() {
            "" => None,
            raw => match raw.parse::<i32>() {
                Ok(id) if id > 0 => Some(id),
                _ => {
                    errors.push("category", "Invalid category");
                    None
                }
            },
        };

        let actors = id_list(&mut errors, "actors", &self.actors);
        let directors = id_list(&mut errors, "directors", &self.directors);
        let genres = id_list(&mut errors, "genres", &self.genres);

        errors.into_result(ValidFilm {
            title,
            tagline: self.tagline.trim().to_string(),
            description: self.description.trim().to_string(),
            poster: self.poster.trim().to_string(),
            year,
            country: self.country.trim().to_string(),
            world_premiere: world_premiere.to_string(),
            budget,
            fees_in_usa,
            fees_in_world,
            category_id,
            slug,
            draft: self.draft.is_some(),
            trailer: self.trailer.trim().to_string(),
            actors,
            directors,
            genres,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StarForm {
    #[serde(default)]
    pub value: String,
}

impl StarForm {
    pub fn validate(&self) -> Result<i32, FieldErrors> {
        let mut errors = FieldErrors::default();
        let value = non_negative_i32(&mut errors, "value", &self.value);
        errors.into_result(value)
    }
}

/// Admin edit of an existing review: only the text is editable.
#[derive(Debug, Default, Deserialize)]
pub struct ReviewEditForm {
    #[serde(default)]
    pub text: String,
}

impl ReviewEditForm {
    pub fn validate(&self) -> Result<String, FieldErrors> {
        let mut errors = FieldErrors::default();
        let text = self.text.trim();
        if text.is_empty() {
            errors.push("text", "Comment text is required");
        } else if text.chars().count() > MAX_TEXT_LEN {
            errors.push("text", format!("Comment must be at most {MAX_TEXT_LEN} characters"));
        }
        errors.into_result(text.to_string())
    }
}

fn require(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
    message: &'static str,
) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, message);
    }
    value.to_string()
}

fn require_slug(errors: &mut FieldErrors, raw: &str) -> String {
    let slug = raw.trim();
    if slug.is_empty() {
        errors.push("slug", "Slug is required");
    } else if slug.len() > MAX_SLUG_LEN {
        errors.push("slug", format!("Slug must be at most {MAX_SLUG_LEN} characters"));
    } else if !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        errors.push("slug", "Slug may only contain letters, digits, hyphens, and underscores");
    }
    slug.to_string()
}

fn non_negative_i32(errors: &mut FieldErrors, field: &'static str, raw: &str) -> i32 {
    match raw.trim().parse::<i32>() {
        Ok(n) if n >= 0 => n,
        _ => {
            errors.push(field, "Enter a non-negative number");
            0
        }
    }
}

fn non_negative_i64(errors: &mut FieldErrors, field: &'static str, raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n >= 0 => n,
        _ => {
            errors.push(field, "Enter a non-negative number");
            0
        }
    }
}

fn id_list(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Vec<i32> {
    let mut out = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<i32>() {
            Ok(id) if id > 0 => {
                if !out.contains(&id) {
                    out.push(id);
                }
            }
            _ => errors.push(field, format!("Invalid id: {part}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(name: &str, email: &str, text: &str, parent: &str) -> ReviewForm {
        ReviewForm {
            name: name.to_string(),
            email: email.to_string(),
            text: text.to_string(),
            parent: parent.to_string(),
        }
    }

    #[test]
    fn valid_review_passes() {
        let valid = review("Ada", "ada@example.com", "Loved it", "").validate().unwrap();
        assert_eq!(valid.name, "Ada");
        assert_eq!(valid.parent, None);
    }

    #[test]
    fn review_reply_parses_parent() {
        let valid = review("Ada", "ada@example.com", "Agreed", "12").validate().unwrap();
        assert_eq!(valid.parent, Some(12));
    }

    #[test]
    fn review_rejects_bad_email() {
        for email in ["", "plain", "@nodomain.com", "a@b", "a b@c.com", "x@.com", "x@com."] {
            let errs = review("Ada", email, "text", "").validate().unwrap_err();
            assert!(errs.get("email").is_some(), "{email:?} should be rejected");
        }
    }

    #[test]
    fn review_accepts_reasonable_emails() {
        for email in ["a@b.co", "first.last@sub.example.com", "x+tag@example.org"] {
            assert!(is_valid_email(email), "{email:?} should be accepted");
        }
    }

    #[test]
    fn review_rejects_empty_name_and_text() {
        let errs = review("  ", "ada@example.com", "", "").validate().unwrap_err();
        assert!(errs.get("name").is_some());
        assert!(errs.get("text").is_some());
        assert!(errs.get("email").is_none());
    }

    #[test]
    fn review_rejects_overlong_text() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        let errs = review("Ada", "ada@example.com", &long, "").validate().unwrap_err();
        assert!(errs.get("text").is_some());
    }

    #[test]
    fn rating_requires_a_selection() {
        assert!(RatingForm { star: None }.validate().is_err());
        assert!(RatingForm { star: Some("".into()) }.validate().is_err());
        assert!(RatingForm { star: Some("abc".into()) }.validate().is_err());
        assert_eq!(RatingForm { star: Some("3".into()) }.validate().unwrap(), 3);
    }

    #[test]
    fn film_form_rejects_negative_numbers() {
        let form = FilmForm {
            title: "Solaris".into(),
            slug: "solaris".into(),
            year: "-1972".into(),
            world_premiere: "1972-03-20".into(),
            budget: "0".into(),
            fees_in_usa: "0".into(),
            fees_in_world: "0".into(),
            ..Default::default()
        };
        let errs = form.validate().unwrap_err();
        assert!(errs.get("year").is_some());
        assert!(errs.get("budget").is_none());
    }

    #[test]
    fn film_form_parses_memberships() {
        let form = FilmForm {
            title: "Solaris".into(),
            slug: "solaris".into(),
            year: "1972".into(),
            world_premiere: "1972-03-20".into(),
            budget: "1000000".into(),
            fees_in_usa: "0".into(),
            fees_in_world: "0".into(),
            actors: "1, 2, 2, 3".into(),
            genres: "5".into(),
            draft: Some("on".into()),
            ..Default::default()
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.actors, vec![1, 2, 3]);
        assert_eq!(valid.genres, vec![5]);
        assert!(valid.directors.is_empty());
        assert!(valid.draft);
    }

    #[test]
    fn film_form_rejects_bad_date() {
        let form = FilmForm {
            title: "Solaris".into(),
            slug: "solaris".into(),
            year: "1972".into(),
            world_premiere: "20 March 1972".into(),
            budget: "0".into(),
            fees_in_usa: "0".into(),
            fees_in_world: "0".into(),
            ..Default::default()
        };
        let errs = form.validate().unwrap_err();
        assert!(errs.get("world_premiere").is_some());
    }

    #[test]
    fn slug_rejects_unsafe_characters() {
        let form = CategoryForm {
            name: "Drama".into(),
            description: String::new(),
            slug: "dra ma!".into(),
        };
        let errs = form.validate().unwrap_err();
        assert!(errs.get("slug").is_some());
    }
}
