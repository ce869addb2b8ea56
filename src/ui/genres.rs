/// Genres page and the per-genre movie listing
///
/// The genre listing fetches everything for the genre in one call and
/// reveals it ten movies at a time with a "show more" button, as the
/// original catalog did.

use crate::poster::PosterStore;
use crate::state::data::Movie;
use crate::ui::{self, detail};
use crate::{Message, Route};
use iced::widget::{button, column, text};
use iced::Element;
use iced_aw::Wrap;

/// How many more movies each "show more" press reveals
pub const PAGE_STEP: usize = 10;

#[derive(Debug, Default)]
pub struct GenresState {
    pub loading: bool,
    pub error: Option<String>,
    pub genres: Vec<String>,
}

impl GenresState {
    pub fn loading() -> Self {
        GenresState {
            loading: true,
            ..GenresState::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct GenreMoviesState {
    pub genre: String,
    pub loading: bool,
    pub error: Option<String>,
    pub movies: Vec<Movie>,
    /// How many movies are currently revealed
    pub shown: usize,
}

impl GenreMoviesState {
    pub fn loading(genre: String) -> Self {
        GenreMoviesState {
            genre,
            loading: true,
            error: None,
            movies: Vec::new(),
            shown: PAGE_STEP,
        }
    }

    pub fn show_more(&mut self) {
        self.shown += PAGE_STEP;
    }

    pub fn has_more(&self) -> bool {
        self.shown < self.movies.len()
    }

    /// The slice of movies the view currently renders.
    pub fn visible(&self) -> &[Movie] {
        &self.movies[..self.shown.min(self.movies.len())]
    }
}

pub fn genres_view(state: &GenresState) -> Element<'_, Message> {
    if state.loading {
        return text("Loading genres...").size(18).into();
    }
    if let Some(error) = &state.error {
        return text(error).size(18).color(detail::ERROR_COLOR).into();
    }

    let tiles: Vec<Element<Message>> = state
        .genres
        .iter()
        .map(|genre| {
            button(text(genre.clone()).size(18))
                .on_press(Message::Navigate(Route::Genre(genre.clone())))
                .style(button::secondary)
                .padding(24)
                .into()
        })
        .collect();

    column![
        text("Movie genres").size(28),
        Wrap::with_elements(tiles).spacing(16.0).line_spacing(16.0),
    ]
    .spacing(24)
    .padding(24)
    .into()
}

pub fn genre_movies_view<'a>(
    state: &'a GenreMoviesState,
    posters: &'a PosterStore,
) -> Element<'a, Message> {
    if state.loading {
        return text("Loading movies...").size(18).into();
    }
    if let Some(error) = &state.error {
        return text(error).size(18).color(detail::ERROR_COLOR).into();
    }

    let cards: Vec<Element<Message>> = state
        .visible()
        .iter()
        .map(|movie| ui::movie_card(movie, posters))
        .collect();

    let mut page = column![
        button(text(format!("← {}", state.genre)).size(28))
            .on_press(Message::Navigate(Route::Genres))
            .style(button::text),
        Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0),
    ]
    .spacing(24)
    .padding(24);

    if state.has_more() {
        page = page.push(button(text("Show more").size(16)).on_press(Message::ShowMoreGenreMovies));
    }

    page.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_movies(count: usize) -> GenreMoviesState {
        let mut state = GenreMoviesState::loading("drama".to_string());
        state.loading = false;
        state.movies = (0..count)
            .map(|id| Movie {
                id: id as i64,
                title: format!("Movie {}", id),
                ..Movie::default()
            })
            .collect();
        state
    }

    #[test]
    fn test_shows_first_page_then_grows() {
        let mut state = with_movies(25);
        assert_eq!(state.visible().len(), 10);
        assert!(state.has_more());

        state.show_more();
        assert_eq!(state.visible().len(), 20);

        state.show_more();
        assert_eq!(state.visible().len(), 25);
        assert!(!state.has_more());
    }

    #[test]
    fn test_short_lists_need_no_show_more() {
        let state = with_movies(4);
        assert_eq!(state.visible().len(), 4);
        assert!(!state.has_more());
    }
}
