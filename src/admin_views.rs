//! Markup for the content-management surface.

use maud::{Markup, html};

use crate::{
    entities::{actor, category, film, genre, movie_shot, rating, rating_star, review},
    forms::{ActorForm, CategoryForm, FieldErrors, FilmForm, GenreForm, MovieShotForm},
    models::FilmQuery,
    templates::{self, field_error, media_url},
};

pub fn dashboard_page() -> String {
    admin_layout(
        "Admin",
        html! {
            p class="text-gray-600" { "Manage the catalog." }
        },
    )
}

pub fn film_list_page(
    rows: &[(film::Model, Option<category::Model>)],
    categories: &[category::Model],
    years: &[i32],
    query: &FilmQuery,
) -> String {
    admin_layout(
        "Films",
        html! {
            div class="flex items-center justify-between" {
                form method="get" action="/admin/films" class="flex gap-2" {
                    input class="rounded-md border border-gray-300 px-3 py-1" type="text" name="q"
                        placeholder="Search title or category" value=(query.q.as_deref().unwrap_or(""));
                    button class="rounded-md bg-gray-200 px-3 py-1 text-gray-700" type="submit" { "Search" }
                }
                a class="rounded-md bg-blue-600 px-3 py-1 font-semibold text-white" href="/admin/films/new" { "Add film" }
            }

            div class="mt-4 flex flex-wrap gap-2 text-sm" {
                span class="text-gray-500" { "Category:" }
                a class="text-blue-600 hover:underline" href=(filter_url(query, None, query.year)) { "all" }
                @for cat in categories {
                    a class=(filter_class(query.category == Some(cat.id))) href=(filter_url(query, Some(cat.id), query.year)) { (cat.name) }
                }
                span class="ml-4 text-gray-500" { "Year:" }
                a class="text-blue-600 hover:underline" href=(filter_url(query, query.category, None)) { "all" }
                @for year in years {
                    a class=(filter_class(query.year == Some(*year))) href=(filter_url(query, query.category, Some(*year))) { (year) }
                }
            }

            // The whole table is one form so draft flags can be edited in
            // place and saved in bulk.
            form method="post" action="/admin/films/draft" class="mt-6" {
                table class="w-full bg-white shadow rounded-lg text-left text-sm" {
                    thead {
                        tr class="border-b text-gray-500" {
                            th class="px-4 py-2" { "Title" }
                            th class="px-4 py-2" { "Category" }
                            th class="px-4 py-2" { "Slug" }
                            th class="px-4 py-2" { "Draft" }
                            th class="px-4 py-2" { "Poster" }
                            th class="px-4 py-2" {}
                        }
                    }
                    tbody {
                        @for (film, cat) in rows {
                            tr class="border-b" {
                                td class="px-4 py-2" {
                                    input type="hidden" name="id" value=(film.id);
                                    a class="text-blue-600 hover:underline" href=(format!("/admin/films/{}", film.id)) { (film.title) }
                                }
                                td class="px-4 py-2 text-gray-600" { (cat.as_ref().map(|c| c.name.as_str()).unwrap_or("—")) }
                                td class="px-4 py-2 text-gray-600" { (film.slug) }
                                td class="px-4 py-2" {
                                    input type="checkbox" name=(format!("draft_{}", film.id)) checked[film.draft];
                                }
                                td class="px-4 py-2" { (thumbnail(&film.poster, 50, 60)) }
                                td class="px-4 py-2" {
                                    button class="text-red-600 hover:underline" type="submit"
                                        formaction=(format!("/admin/films/{}/delete", film.id)) { "Delete" }
                                }
                            }
                        }
                    }
                }
                button class="mt-4 rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save drafts" }
            }
        },
    )
}

pub fn film_form_page(
    id: Option<i32>,
    form: &FilmForm,
    errors: &FieldErrors,
    categories: &[category::Model],
    shots: &[movie_shot::Model],
    reviews: &[review::Model],
) -> String {
    let (title, action) = match id {
        Some(id) => ("Edit film", format!("/admin/films/{id}")),
        None => ("Add film", "/admin/films".to_string()),
    };
    admin_layout(
        title,
        html! {
            form method="post" action=(action) class="space-y-4 bg-white shadow rounded-lg p-6" {
                (input_row("Title", "title", &form.title, errors))
                (input_row("Tagline", "tagline", &form.tagline, errors))
                (textarea_row("Description", "description", &form.description, errors))
                (input_row("Poster path", "poster", &form.poster, errors))
                @if !form.poster.trim().is_empty() {
                    div { (thumbnail(form.poster.trim(), 50, 60)) }
                }
                (input_row("Year", "year", &form.year, errors))
                (input_row("Country", "country", &form.country, errors))
                (input_row("World premiere (YYYY-MM-DD)", "world_premiere", &form.world_premiere, errors))
                (input_row("Budget", "budget", &form.budget, errors))
                (input_row("Fees in USA", "fees_in_usa", &form.fees_in_usa, errors))
                (input_row("Fees in world", "fees_in_world", &form.fees_in_world, errors))

                div {
                    label class="block text-sm font-medium text-gray-700" for="category" { "Category" }
                    select class="mt-1 rounded-md border border-gray-300 px-3 py-2" name="category" id="category" {
                        option value="" selected[form.category.trim().is_empty()] { "—" }
                        @for cat in categories {
                            option value=(cat.id) selected[form.category.trim() == cat.id.to_string()] { (cat.name) }
                        }
                    }
                    (field_error(errors, "category"))
                }

                (input_row("Slug", "slug", &form.slug, errors))
                (input_row("Trailer URL", "trailer", &form.trailer, errors))
                (input_row("Actor ids (comma-separated)", "actors", &form.actors, errors))
                (input_row("Director ids (comma-separated)", "directors", &form.directors, errors))
                (input_row("Genre ids (comma-separated)", "genres", &form.genres, errors))

                label class="flex items-center gap-2 text-sm text-gray-700" {
                    input type="checkbox" name="draft" checked[form.draft.is_some()];
                    "Draft"
                }

                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save" }
            }

            @if id.is_some() {
                h2 class="mt-8 text-lg font-semibold text-gray-900" { "Stills" }
                table class="mt-2 w-full bg-white shadow rounded-lg text-left text-sm" {
                    tbody {
                        @for shot in shots {
                            tr class="border-b" {
                                td class="px-4 py-2" { (thumbnail(&shot.image, 90, 120)) }
                                td class="px-4 py-2" {
                                    a class="text-blue-600 hover:underline" href=(format!("/admin/shots/{}", shot.id)) { (shot.title) }
                                }
                                td class="px-4 py-2" { (delete_button(&format!("/admin/shots/{}/delete", shot.id))) }
                            }
                        }
                    }
                }

                h2 class="mt-8 text-lg font-semibold text-gray-900" { "Top-level reviews" }
                table class="mt-2 w-full bg-white shadow rounded-lg text-left text-sm" {
                    tbody {
                        @for rev in reviews {
                            tr class="border-b" {
                                // Reviewer identity is not editable, only moderatable.
                                td class="px-4 py-2 text-gray-600" { (rev.name) }
                                td class="px-4 py-2 text-gray-600" { (rev.email) }
                                td class="px-4 py-2" {
                                    a class="text-blue-600 hover:underline" href=(format!("/admin/reviews/{}", rev.id)) { "Edit text" }
                                }
                                td class="px-4 py-2" { (delete_button(&format!("/admin/reviews/{}/delete", rev.id))) }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn category_list_page(categories: &[category::Model]) -> String {
    admin_layout(
        "Categories",
        html! {
            a class="rounded-md bg-blue-600 px-3 py-1 font-semibold text-white" href="/admin/categories/new" { "Add category" }
            (slug_table(categories.iter().map(|c| (c.id, c.name.as_str(), c.slug.as_str())), "/admin/categories"))
        },
    )
}

pub fn category_form_page(id: Option<i32>, form: &CategoryForm, errors: &FieldErrors) -> String {
    let action = match id {
        Some(id) => format!("/admin/categories/{id}"),
        None => "/admin/categories".to_string(),
    };
    admin_layout(
        "Category",
        html! {
            form method="post" action=(action) class="space-y-4 bg-white shadow rounded-lg p-6" {
                (input_row("Name", "name", &form.name, errors))
                (textarea_row("Description", "description", &form.description, errors))
                (input_row("Slug", "slug", &form.slug, errors))
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save" }
            }
        },
    )
}

pub fn genre_list_page(genres: &[genre::Model]) -> String {
    admin_layout(
        "Genres",
        html! {
            a class="rounded-md bg-blue-600 px-3 py-1 font-semibold text-white" href="/admin/genres/new" { "Add genre" }
            (slug_table(genres.iter().map(|g| (g.id, g.name.as_str(), g.slug.as_str())), "/admin/genres"))
        },
    )
}

pub fn genre_form_page(id: Option<i32>, form: &GenreForm, errors: &FieldErrors) -> String {
    let action = match id {
        Some(id) => format!("/admin/genres/{id}"),
        None => "/admin/genres".to_string(),
    };
    admin_layout(
        "Genre",
        html! {
            form method="post" action=(action) class="space-y-4 bg-white shadow rounded-lg p-6" {
                (input_row("Name", "name", &form.name, errors))
                (textarea_row("Description", "description", &form.description, errors))
                (input_row("Slug", "slug", &form.slug, errors))
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save" }
            }
        },
    )
}

pub fn actor_list_page(actors: &[actor::Model]) -> String {
    admin_layout(
        "Actors and directors",
        html! {
            a class="rounded-md bg-blue-600 px-3 py-1 font-semibold text-white" href="/admin/actors/new" { "Add actor" }
            table class="mt-4 w-full bg-white shadow rounded-lg text-left text-sm" {
                thead {
                    tr class="border-b text-gray-500" {
                        th class="px-4 py-2" { "Name" }
                        th class="px-4 py-2" { "Age" }
                        th class="px-4 py-2" { "Image" }
                        th class="px-4 py-2" {}
                    }
                }
                tbody {
                    @for actor in actors {
                        tr class="border-b" {
                            td class="px-4 py-2" {
                                a class="text-blue-600 hover:underline" href=(format!("/admin/actors/{}", actor.id)) { (actor.name) }
                            }
                            td class="px-4 py-2 text-gray-600" { (actor.age) }
                            td class="px-4 py-2" { (thumbnail(&actor.image, 50, 60)) }
                            td class="px-4 py-2" {
                                form method="post" action=(format!("/admin/actors/{}/delete", actor.id)) {
                                    button class="text-red-600 hover:underline" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn actor_form_page(id: Option<i32>, form: &ActorForm, errors: &FieldErrors) -> String {
    let action = match id {
        Some(id) => format!("/admin/actors/{id}"),
        None => "/admin/actors".to_string(),
    };
    admin_layout(
        "Actor",
        html! {
            form method="post" action=(action) class="space-y-4 bg-white shadow rounded-lg p-6" {
                (input_row("Name", "name", &form.name, errors))
                (input_row("Age", "age", &form.age, errors))
                (textarea_row("Description", "description", &form.description, errors))
                (input_row("Image path", "image", &form.image, errors))
                @if !form.image.trim().is_empty() {
                    div { (thumbnail(form.image.trim(), 50, 60)) }
                }
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save" }
            }
        },
    )
}

pub fn shot_list_page(rows: &[(movie_shot::Model, Option<film::Model>)]) -> String {
    admin_layout(
        "Movie stills",
        html! {
            a class="rounded-md bg-blue-600 px-3 py-1 font-semibold text-white" href="/admin/shots/new" { "Add still" }
            table class="mt-4 w-full bg-white shadow rounded-lg text-left text-sm" {
                thead {
                    tr class="border-b text-gray-500" {
                        th class="px-4 py-2" { "Title" }
                        th class="px-4 py-2" { "Film" }
                        th class="px-4 py-2" {}
                    }
                }
                tbody {
                    @for (shot, film) in rows {
                        tr class="border-b" {
                            td class="px-4 py-2" {
                                a class="text-blue-600 hover:underline" href=(format!("/admin/shots/{}", shot.id)) { (shot.title) }
                            }
                            td class="px-4 py-2 text-gray-600" { (film.as_ref().map(|f| f.title.as_str()).unwrap_or("—")) }
                            td class="px-4 py-2" {
                                form method="post" action=(format!("/admin/shots/{}/delete", shot.id)) {
                                    button class="text-red-600 hover:underline" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn shot_form_page(
    id: Option<i32>,
    form: &MovieShotForm,
    errors: &FieldErrors,
    films: &[film::Model],
) -> String {
    let action = match id {
        Some(id) => format!("/admin/shots/{id}"),
        None => "/admin/shots".to_string(),
    };
    admin_layout(
        "Movie still",
        html! {
            form method="post" action=(action) class="space-y-4 bg-white shadow rounded-lg p-6" {
                (input_row("Title", "title", &form.title, errors))
                (textarea_row("Description", "description", &form.description, errors))
                (input_row("Image path", "image", &form.image, errors))
                @if !form.image.trim().is_empty() {
                    div { (thumbnail(form.image.trim(), 90, 120)) }
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="film" { "Film" }
                    select class="mt-1 rounded-md border border-gray-300 px-3 py-2" name="film" id="film" {
                        @for film in films {
                            option value=(film.id) selected[form.film.trim() == film.id.to_string()] { (film.title) }
                        }
                    }
                    (field_error(errors, "film"))
                }
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save" }
            }
        },
    )
}

pub fn star_list_page(stars: &[rating_star::Model], errors: &FieldErrors) -> String {
    admin_layout(
        "Rating stars",
        html! {
            form method="post" action="/admin/stars" class="flex items-end gap-2" {
                div {
                    label class="block text-sm font-medium text-gray-700" for="value" { "Value" }
                    input class="mt-1 rounded-md border border-gray-300 px-3 py-1" type="text" name="value" id="value";
                }
                button class="rounded-md bg-blue-600 px-3 py-1 font-semibold text-white" type="submit" { "Add" }
            }
            (field_error(errors, "value"))
            table class="mt-4 w-full bg-white shadow rounded-lg text-left text-sm" {
                tbody {
                    @for star in stars {
                        tr class="border-b" {
                            td class="px-4 py-2" { (star.value) "★" }
                            td class="px-4 py-2" {
                                form method="post" action=(format!("/admin/stars/{}/delete", star.id)) {
                                    button class="text-red-600 hover:underline" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn rating_list_page(
    rows: &[(rating::Model, Option<film::Model>)],
    stars: &[rating_star::Model],
) -> String {
    admin_layout(
        "Ratings",
        html! {
            table class="w-full bg-white shadow rounded-lg text-left text-sm" {
                thead {
                    tr class="border-b text-gray-500" {
                        th class="px-4 py-2" { "Ip" }
                        th class="px-4 py-2" { "Film" }
                        th class="px-4 py-2" { "Star" }
                        th class="px-4 py-2" {}
                    }
                }
                tbody {
                    @for (rating, film) in rows {
                        tr class="border-b" {
                            td class="px-4 py-2 text-gray-600" { (rating.ip) }
                            td class="px-4 py-2" { (film.as_ref().map(|f| f.title.as_str()).unwrap_or("—")) }
                            td class="px-4 py-2 text-gray-600" {
                                @if let Some(star) = stars.iter().find(|s| s.id == rating.star_id) {
                                    (star.value) "★"
                                } @else {
                                    (rating.star_id)
                                }
                            }
                            td class="px-4 py-2" { (delete_button(&format!("/admin/ratings/{}/delete", rating.id))) }
                        }
                    }
                }
            }
        },
    )
}

pub fn review_list_page(rows: &[review::Model]) -> String {
    admin_layout(
        "Reviews",
        html! {
            table class="w-full bg-white shadow rounded-lg text-left text-sm" {
                thead {
                    tr class="border-b text-gray-500" {
                        th class="px-4 py-2" { "Name" }
                        th class="px-4 py-2" { "Email" }
                        th class="px-4 py-2" { "Parent" }
                        th class="px-4 py-2" { "Id" }
                        th class="px-4 py-2" {}
                    }
                }
                tbody {
                    @for rev in rows {
                        tr class="border-b" {
                            td class="px-4 py-2" {
                                a class="text-blue-600 hover:underline" href=(format!("/admin/reviews/{}", rev.id)) { (rev.name) }
                            }
                            td class="px-4 py-2 text-gray-600" { (rev.email) }
                            td class="px-4 py-2 text-gray-600" {
                                @if let Some(id) = rev.parent_id { (id) } @else { "—" }
                            }
                            td class="px-4 py-2 text-gray-600" { (rev.id) }
                            td class="px-4 py-2" {
                                form method="post" action=(format!("/admin/reviews/{}/delete", rev.id)) {
                                    button class="text-red-600 hover:underline" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn review_edit_page(rev: &review::Model, text: &str, errors: &FieldErrors) -> String {
    admin_layout(
        "Review",
        html! {
            form method="post" action=(format!("/admin/reviews/{}", rev.id)) class="space-y-4 bg-white shadow rounded-lg p-6" {
                div {
                    label class="block text-sm font-medium text-gray-700" { "Name" }
                    input class="mt-1 w-full rounded-md border border-gray-200 bg-gray-100 px-3 py-2" value=(rev.name) disabled;
                }
                div {
                    label class="block text-sm font-medium text-gray-700" { "Email" }
                    input class="mt-1 w-full rounded-md border border-gray-200 bg-gray-100 px-3 py-2" value=(rev.email) disabled;
                }
                div {
                    label class="block text-sm font-medium text-gray-700" for="text" { "Comment" }
                    textarea class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name="text" id="text" rows="4" { (text) }
                    (field_error(errors, "text"))
                }
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white" type="submit" { "Save" }
            }
        },
    )
}

fn slug_table<'a>(
    rows: impl Iterator<Item = (i32, &'a str, &'a str)>,
    base: &str,
) -> Markup {
    html! {
        table class="mt-4 w-full bg-white shadow rounded-lg text-left text-sm" {
            thead {
                tr class="border-b text-gray-500" {
                    th class="px-4 py-2" { "Id" }
                    th class="px-4 py-2" { "Name" }
                    th class="px-4 py-2" { "Slug" }
                    th class="px-4 py-2" {}
                }
            }
            tbody {
                @for (id, name, slug) in rows {
                    tr class="border-b" {
                        td class="px-4 py-2 text-gray-600" { (id) }
                        td class="px-4 py-2" {
                            a class="text-blue-600 hover:underline" href=(format!("{base}/{id}")) { (name) }
                        }
                        td class="px-4 py-2 text-gray-600" { (slug) }
                        td class="px-4 py-2" {
                            form method="post" action=(format!("{base}/{id}/delete")) {
                                button class="text-red-600 hover:underline" type="submit" { "Delete" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn input_row(label: &str, name: &str, value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            input class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" type="text" name=(name) id=(name) value=(value);
            (field_error(errors, name))
        }
    }
}

fn textarea_row(label: &str, name: &str, value: &str, errors: &FieldErrors) -> Markup {
    html! {
        div {
            label class="block text-sm font-medium text-gray-700" for=(name) { (label) }
            textarea class="mt-1 w-full rounded-md border border-gray-300 px-3 py-2" name=(name) id=(name) rows="4" { (value) }
            (field_error(errors, name))
        }
    }
}

fn thumbnail(path: &str, width: u32, height: u32) -> Markup {
    html! {
        img class="object-cover rounded" src=(media_url(path)) width=(width) height=(height);
    }
}

fn delete_button(action: &str) -> Markup {
    html! {
        form method="post" action=(action) {
            button class="text-red-600 hover:underline" type="submit" { "Delete" }
        }
    }
}

fn filter_class(active: bool) -> &'static str {
    if active { "font-semibold text-gray-900" } else { "text-blue-600 hover:underline" }
}

fn filter_url(query: &FilmQuery, category: Option<i32>, year: Option<i32>) -> String {
    let mut parts = Vec::new();
    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        parts.push(format!("q={}", urlencoding::encode(q)));
    }
    if let Some(id) = category {
        parts.push(format!("category={id}"));
    }
    if let Some(year) = year {
        parts.push(format!("year={year}"));
    }
    if parts.is_empty() {
        "/admin/films".to_string()
    } else {
        format!("/admin/films?{}", parts.join("&"))
    }
}

fn admin_layout(title: &str, body: Markup) -> String {
    templates::page(
        title,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-5xl mx-auto px-6 py-10" {
                    nav class="flex flex-wrap gap-4 text-sm" {
                        a class="text-blue-600 hover:underline" href="/admin" { "Admin" }
                        a class="text-blue-600 hover:underline" href="/admin/films" { "Films" }
                        a class="text-blue-600 hover:underline" href="/admin/categories" { "Categories" }
                        a class="text-blue-600 hover:underline" href="/admin/genres" { "Genres" }
                        a class="text-blue-600 hover:underline" href="/admin/actors" { "Actors" }
                        a class="text-blue-600 hover:underline" href="/admin/shots" { "Stills" }
                        a class="text-blue-600 hover:underline" href="/admin/stars" { "Stars" }
                        a class="text-blue-600 hover:underline" href="/admin/ratings" { "Ratings" }
                        a class="text-blue-600 hover:underline" href="/admin/reviews" { "Reviews" }
                    }
                    h1 class="mt-6 text-2xl font-bold text-gray-900" { (title) }
                    div class="mt-6" { (body) }
                }
            }
        },
    )
}
