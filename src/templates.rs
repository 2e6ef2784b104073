use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::{category, film, rating_star},
    forms::{FieldErrors, ReviewForm},
    models::FilmDetail,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Image fields hold paths under the media root; serving them is an
/// external concern.
pub fn media_url(path: &str) -> String {
    format!("/media/{}", path.trim_start_matches('/'))
}

pub fn index_page(films: &[film::Model], categories: &[category::Model]) -> String {
    page(
        "Kinoteka",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    h1 class="text-3xl font-bold text-gray-900" { "Kinoteka" }
                    p class="mt-2 text-gray-600" { "A small movie catalog." }

                    (category_nav(categories))

                    h2 class="mt-10 text-xl font-semibold text-gray-900" { "Recently added" }
                    div class="mt-4 space-y-4" {
                        @for film in films {
                            div class="bg-white shadow rounded-lg p-6 flex items-start gap-4" {
                                img class="w-16 h-20 object-cover rounded" src=(media_url(&film.poster)) alt=(film.title);
                                div {
                                    a class="text-lg font-semibold text-blue-600 hover:text-blue-800" href=(format!("/film/{}", film.slug)) {
                                        (film.title)
                                    }
                                    p class="text-sm text-gray-500" { (film.year) " · " (film.country) }
                                    @if !film.tagline.is_empty() {
                                        p class="mt-1 text-sm text-gray-600 italic" { (film.tagline) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn film_page(
    detail: &FilmDetail,
    stars: &[rating_star::Model],
    categories: &[category::Model],
    review_form: &ReviewForm,
    review_errors: &FieldErrors,
    rating_errors: &FieldErrors,
) -> String {
    let film = &detail.film;
    page(
        &film.title,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-12" {
                    a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "← All films" }

                    (category_nav(categories))

                    div class="mt-6 bg-white shadow rounded-lg p-8" {
                        div class="flex items-start gap-6" {
                            img class="w-40 h-56 object-cover rounded" src=(media_url(&film.poster)) alt=(film.title);
                            div {
                                h1 class="text-3xl font-bold text-gray-900" {
                                    (film.title)
                                    span class="ml-2 font-normal text-gray-500" { "(" (film.year) ")" }
                                }
                                @if !film.tagline.is_empty() {
                                    p class="mt-1 text-gray-600 italic" { (film.tagline) }
                                }
                                @if let Some(cat) = &detail.category {
                                    p class="mt-2 text-sm text-gray-500" { "Category: " (cat.name) }
                                }
                                p class="mt-2 text-sm text-gray-500" {
                                    (film.country) " · premiere " (film.world_premiere)
                                }
                                @if !detail.genres.is_empty() {
                                    p class="mt-2 text-sm text-gray-500" {
                                        "Genres: " (names(detail.genres.iter().map(|g| g.name.as_str())))
                                    }
                                }
                                @if !detail.directors.is_empty() {
                                    p class="mt-1 text-sm text-gray-500" {
                                        "Directed by " (names(detail.directors.iter().map(|a| a.name.as_str())))
                                    }
                                }
                                @if !detail.actors.is_empty() {
                                    p class="mt-1 text-sm text-gray-500" {
                                        "Starring " (names(detail.actors.iter().map(|a| a.name.as_str())))
                                    }
                                }
                            }
                        }

                        p class="mt-6 text-gray-700" { (film.description) }

                        @if !film.trailer.is_empty() {
                            div class="mt-6" {
                                iframe class="w-full aspect-video rounded" src=(film.trailer) allowfullscreen {}
                            }
                        }
                    }

                    @if !detail.shots.is_empty() {
                        h2 class="mt-10 text-xl font-semibold text-gray-900" { "Stills" }
                        div class="mt-4 grid grid-cols-3 gap-4" {
                            @for shot in &detail.shots {
                                figure {
                                    img class="rounded shadow" src=(media_url(&shot.image)) alt=(shot.title);
                                    figcaption class="mt-1 text-xs text-gray-500" { (shot.title) }
                                }
                            }
                        }
                    }

                    (rating_form(&film.slug, stars, rating_errors))
                    (review_section(detail, review_form, review_errors))
                }
            }
        },
    )
}

fn rating_form(slug: &str, stars: &[rating_star::Model], errors: &FieldErrors) -> Markup {
    html! {
        div class="mt-10 bg-white shadow rounded-lg p-6" {
            h2 class="text-xl font-semibold text-gray-900" { "Rate this film" }
            form class="mt-4" method="post" action=(format!("/film/{slug}/rating")) {
                div class="flex gap-4" {
                    // Highest value first, nothing pre-selected.
                    @for star in stars {
                        label class="flex items-center gap-1 text-gray-700" {
                            input type="radio" name="star" value=(star.id) required;
                            (star.value) "★"
                        }
                    }
                }
                (field_error(errors, "star"))
                button class="mt-4 rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Rate" }
            }
        }
    }
}

fn review_section(detail: &FilmDetail, form: &ReviewForm, errors: &FieldErrors) -> Markup {
    let slug = &detail.film.slug;
    html! {
        h2 class="mt-10 text-xl font-semibold text-gray-900" { "Reviews" }
        div class="mt-4 space-y-4" {
            @for thread in &detail.reviews {
                div class="bg-white shadow rounded-lg p-6" {
                    p class="font-semibold text-gray-900" { (thread.review.name) }
                    p class="mt-2 text-gray-700" { (thread.review.text) }
                    a class="mt-2 inline-block text-sm text-blue-600 hover:text-blue-800"
                        href=(format!("/film/{slug}?reply={}#review-form", thread.review.id)) { "Reply" }
                    @for reply in &thread.replies {
                        div class="mt-4 ml-6 border-l-2 border-gray-200 pl-4" {
                            p class="font-semibold text-gray-900" { (reply.name) }
                            p class="mt-1 text-gray-700" { (reply.text) }
                        }
                    }
                }
            }
        }

        div id="review-form" class="mt-8 bg-white shadow rounded-lg p-6" {
            h3 class="text-lg font-semibold text-gray-900" {
                @if form.parent.is_empty() { "Leave a review" } @else { "Reply to a review" }
            }
            form class="mt-4 space-y-4" method="post" action=(format!("/film/{slug}/review")) {
                input type="hidden" name="parent" value=(form.parent);
                div {
                    label class="block text-sm font-medium text-gray-700" for="name" { "Name" }
                    input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="name" id="name" value=(form.name);
                    (field_error(errors, "name"))
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="email" { "Email" }
                    input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="email" id="email" value=(form.email);
                    (field_error(errors, "email"))
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="text" { "Comment" }
                    textarea class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="text" id="text" rows="4" { (form.text) }
                    (field_error(errors, "text"))
                }
                (field_error(errors, "parent"))
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Submit" }
            }
        }
    }
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

pub fn field_error(errors: &FieldErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p class="mt-1 text-sm text-red-600" { (message) }
        }
    }
}

fn category_nav(categories: &[category::Model]) -> Markup {
    html! {
        @if !categories.is_empty() {
            nav class="mt-6 flex flex-wrap gap-2" {
                @for cat in categories {
                    span class="rounded-full bg-gray-200 px-3 py-1 text-sm text-gray-700" { (cat.name) }
                }
            }
        }
    }
}

fn names<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

pub fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}
