/// Navigation header with the incremental search field
///
/// The suggestion dropdown renders server results first, then the local
/// prefix-fallback candidates, exactly as the search engine hands them
/// over. Clicking a suggestion opens the movie page, which also dismisses
/// the search.

use crate::state::search::SearchEngine;
use crate::state::session::Session;
use crate::{Message, Route};
use iced::widget::{button, column, horizontal_space, row, text, text_input};
use iced::{Element, Length};

pub fn view<'a>(session: &'a Session, search: &'a SearchEngine) -> Element<'a, Message> {
    let mut search_bar = row![
        text_input("Search", search.query())
            .on_input(Message::SearchInput)
            .width(Length::Fixed(320.0))
            .padding(8),
    ]
    .spacing(4);

    if !search.query().is_empty() {
        search_bar = search_bar.push(
            button(text("✕").size(14))
                .on_press(Message::SearchClear)
                .style(button::text),
        );
    }

    let account: Element<Message> = match session.user() {
        Some(user) => button(text(user.display_name().to_string()).size(16))
            .on_press(Message::Navigate(Route::Account))
            .style(button::text)
            .into(),
        None => button(text("Sign in").size(16))
            .on_press(Message::OpenAuthModal)
            .into(),
    };

    let bar = row![
        button(text("CINEMA GUIDE").size(20))
            .on_press(Message::Navigate(Route::Home))
            .style(button::text),
        button(text("Home").size(16))
            .on_press(Message::Navigate(Route::Home))
            .style(button::text),
        button(text("Genres").size(16))
            .on_press(Message::Navigate(Route::Genres))
            .style(button::text),
        search_bar,
        horizontal_space(),
        account,
    ]
    .spacing(16)
    .padding(12);

    let mut header = column![bar];

    if search.has_suggestions() {
        let mut results = column![].spacing(2).padding([0.0, 12.0]);
        for movie in search.suggestions() {
            results = results.push(suggestion(movie));
        }
        header = header.push(results);
    }

    header.into()
}

fn suggestion(movie: &crate::state::data::Movie) -> Element<'_, Message> {
    let mut line = movie.title.clone();
    if let Some(year) = movie.release_year {
        line.push_str(&format!(" ({})", year));
    }
    if let Some(rating) = movie.tmdb_rating {
        line.push_str(&format!("  ★ {:.1}", rating));
    }

    button(text(line).size(14))
        .on_press(Message::Navigate(Route::Movie(movie.id)))
        .style(button::text)
        .width(Length::Fixed(420.0))
        .into()
}
