/// Movie detail page
///
/// Fetched per navigation from `/movie/:id`. Loading, not-found, and
/// failure states all render as inline text; the page never crashes on a
/// bad fetch.

use crate::poster::PosterStore;
use crate::state::data::Movie;
use crate::state::session::Session;
use crate::ui;
use crate::Message;
use chrono::NaiveDate;
use iced::widget::{button, column, row, text};
use iced::{Color, Element};

/// Inline error text color
pub const ERROR_COLOR: Color = Color::from_rgb(0.91, 0.36, 0.36);

#[derive(Debug, Default)]
pub struct DetailState {
    pub loading: bool,
    pub error: Option<String>,
    pub movie: Option<Movie>,
}

impl DetailState {
    pub fn loading() -> Self {
        DetailState {
            loading: true,
            ..DetailState::default()
        }
    }
}

pub fn view<'a>(
    state: &'a DetailState,
    session: &'a Session,
    posters: &'a PosterStore,
) -> Element<'a, Message> {
    if state.loading {
        return text("Loading movie details...").size(18).into();
    }
    if let Some(error) = &state.error {
        return text(error).size(18).color(ERROR_COLOR).into();
    }
    let Some(movie) = &state.movie else {
        return text("Movie not found.").size(18).into();
    };

    let movie_id = movie.id_str();
    let is_favorite = session.is_favorite(&movie_id);

    let mut info = column![
        text(meta_line(movie)).size(14),
        text(&movie.title).size(36),
    ]
    .spacing(12);

    if let Some(plot) = &movie.plot {
        info = info.push(text(plot).size(16));
    }

    info = info.push(
        row![
            button(text("Trailer").size(16)).on_press(Message::OpenTrailer {
                title: movie.title.clone(),
                trailer_url: movie.trailer_url.clone(),
            }),
            button(text(if is_favorite { "♥" } else { "♡" }).size(16))
                .on_press(Message::ToggleFavorite {
                    movie_id,
                    currently_favorite: is_favorite,
                })
                .style(button::secondary),
        ]
        .spacing(12),
    );

    let header = row![info, ui::poster_tile(movie, posters)].spacing(32);

    let mut about = column![text("About the movie").size(24)].spacing(8);
    for (label, value) in about_rows(movie) {
        about = about.push(
            row![text(label).size(14).width(180.0), text(value).size(14)].spacing(12),
        );
    }

    column![header, about]
        .spacing(32)
        .padding(24)
        .into()
}

/// Rating, year, genres, and runtime on one line, skipping absent fields.
pub fn meta_line(movie: &Movie) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(rating) = movie.tmdb_rating {
        parts.push(format!("★ {:.1}", rating));
    }
    if let Some(year) = movie.release_year {
        parts.push(year.to_string());
    }
    if !movie.genres.is_empty() {
        parts.push(movie.genres.join(", "));
    }
    if let Some(runtime) = movie.runtime {
        parts.push(format_runtime(runtime));
    }
    parts.join("  ·  ")
}

/// 139 -> "2 h 19 min"
pub fn format_runtime(minutes: i32) -> String {
    format!("{} h {} min", minutes / 60, minutes % 60)
}

/// "1999-10-15" -> "15 October 1999"; unparseable dates pass through as-is.
pub fn format_release_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%d %B %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

fn about_rows(movie: &Movie) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    if !movie.languages.is_empty() {
        rows.push(("Original language", movie.languages.join(", ")));
    }
    if let Some(date) = &movie.release_date {
        rows.push(("Release date", format_release_date(date)));
    }
    if let Some(budget) = &movie.budget {
        rows.push(("Budget", budget.clone()));
    }
    if let Some(revenue) = &movie.revenue {
        rows.push(("Revenue", revenue.clone()));
    }
    if let Some(director) = &movie.director {
        rows.push(("Director", director.clone()));
    }
    if let Some(production) = &movie.production {
        rows.push(("Production", production.clone()));
    }
    if let Some(awards) = &movie.awards_summary {
        rows.push(("Awards", awards.clone()));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(139), "2 h 19 min");
        assert_eq!(format_runtime(45), "0 h 45 min");
        assert_eq!(format_runtime(120), "2 h 0 min");
    }

    #[test]
    fn test_format_release_date() {
        assert_eq!(format_release_date("1999-10-15"), "15 October 1999");
        assert_eq!(format_release_date("next tuesday"), "next tuesday");
    }

    #[test]
    fn test_meta_line_skips_absent_fields() {
        let movie = Movie {
            id: 1,
            title: "Pi".to_string(),
            tmdb_rating: Some(7.3),
            runtime: Some(84),
            ..Movie::default()
        };
        assert_eq!(meta_line(&movie), "★ 7.3  ·  1 h 24 min");
    }
}
