/// View modules
///
/// Each page owns its view state struct and a view function. Views only
/// read state; every mutation goes through a `Message` handled by the
/// application root.

pub mod account;
pub mod auth;
pub mod detail;
pub mod genres;
pub mod header;
pub mod home;
pub mod trailer;

use crate::poster::PosterStore;
use crate::state::data::Movie;
use crate::{Message, Route};
use iced::widget::{button, center, column, container, mouse_area, opaque, stack, text};
use iced::{Alignment, Element, Length};

/// Width of a poster tile in the movie grids
pub const CARD_WIDTH: f32 = 150.0;
/// Height of a poster tile (2:3 poster ratio)
pub const CARD_HEIGHT: f32 = 225.0;

/// Lay a modal over the page. Clicking the dimmed area around the content
/// emits `on_blur`.
pub fn modal<'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(mouse_area(center(opaque(content))).on_press(on_blur))
    ]
    .into()
}

/// The cached poster for a movie, or a placeholder tile while it is still
/// downloading (or failed to).
pub fn poster_tile<'a>(movie: &'a Movie, posters: &'a PosterStore) -> Element<'a, Message> {
    match posters.get(&movie.id) {
        Some(path) => iced::widget::image(iced::widget::image::Handle::from_path(path))
            .width(CARD_WIDTH)
            .height(CARD_HEIGHT)
            .into(),
        None => container(text("🎬").size(40))
            .width(CARD_WIDTH)
            .height(CARD_HEIGHT)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(container::rounded_box)
            .into(),
    }
}

/// A clickable poster-plus-title card that opens the movie page.
pub fn movie_card<'a>(movie: &'a Movie, posters: &'a PosterStore) -> Element<'a, Message> {
    let content = column![
        poster_tile(movie, posters),
        text(&movie.title).size(14),
    ]
    .spacing(8)
    .width(CARD_WIDTH)
    .align_x(Alignment::Center);

    button(content)
        .on_press(Message::Navigate(Route::Movie(movie.id)))
        .style(button::text)
        .padding(0)
        .into()
}
