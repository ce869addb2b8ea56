/// Home page: hero movie plus the top-10 grid
///
/// The hero comes from `/movie/random` and can be reshuffled in place;
/// the grid comes from `/movie/top10`. A failed hero fetch degrades to
/// inline error text while the grid still renders, and vice versa.

use crate::poster::PosterStore;
use crate::state::data::Movie;
use crate::state::session::Session;
use crate::ui::{self, detail};
use crate::{Message, Route};
use iced::widget::{button, column, row, text};
use iced::{Alignment, Element};
use iced_aw::Wrap;

#[derive(Debug, Default)]
pub struct HomeState {
    pub loading: bool,
    pub error: Option<String>,
    pub hero: Option<Movie>,
    pub top_movies: Vec<Movie>,
}

impl HomeState {
    pub fn loading() -> Self {
        HomeState {
            loading: true,
            ..HomeState::default()
        }
    }
}

pub fn view<'a>(
    state: &'a HomeState,
    session: &'a Session,
    posters: &'a PosterStore,
) -> Element<'a, Message> {
    if state.loading {
        return text("Loading movies...").size(18).into();
    }

    let mut page = column![].spacing(32).padding(24);

    if let Some(error) = &state.error {
        page = page.push(text(error).size(16).color(ui::detail::ERROR_COLOR));
    }

    if let Some(movie) = &state.hero {
        page = page.push(hero_section(movie, session));
    }

    if !state.top_movies.is_empty() {
        let cards: Vec<Element<Message>> = state
            .top_movies
            .iter()
            .map(|movie| ui::movie_card(movie, posters))
            .collect();

        page = page.push(text("Top 10 this week").size(24));
        page = page.push(Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0));
    }

    page.into()
}

fn hero_section<'a>(movie: &'a Movie, session: &'a Session) -> Element<'a, Message> {
    let movie_id = movie.id_str();
    let is_favorite = session.is_favorite(&movie_id);

    let mut section = column![
        text(detail::meta_line(movie)).size(14),
        text(&movie.title).size(40),
    ]
    .spacing(12);

    if let Some(plot) = &movie.plot {
        section = section.push(text(plot).size(16));
    }

    let buttons = row![
        button(text("Trailer").size(16)).on_press(Message::OpenTrailer {
            title: movie.title.clone(),
            trailer_url: movie.trailer_url.clone(),
        }),
        button(text("About the movie").size(16))
            .on_press(Message::Navigate(Route::Movie(movie.id)))
            .style(button::secondary),
        button(text(if is_favorite { "♥" } else { "♡" }).size(16))
            .on_press(Message::ToggleFavorite {
                movie_id,
                currently_favorite: is_favorite,
            })
            .style(button::secondary),
        button(text("↻").size(16))
            .on_press(Message::ShuffleHero)
            .style(button::secondary),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    section.push(buttons).into()
}
