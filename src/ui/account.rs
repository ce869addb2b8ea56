/// Account page: favorites tab and settings tab
///
/// The favorites tab re-reads `/favorites` every time it is entered, so
/// it always reflects the authoritative server list rather than whatever
/// local state accumulated while browsing.

use crate::poster::PosterStore;
use crate::state::data::Movie;
use crate::state::session::Session;
use crate::ui;
use crate::Message;
use iced::widget::{button, column, row, text};
use iced::{Alignment, Element};
use iced_aw::Wrap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTab {
    Favorites,
    Settings,
}

#[derive(Debug)]
pub struct AccountState {
    pub tab: AccountTab,
    pub loading: bool,
    /// Favorite movies as last read from the server
    pub favorites: Vec<Movie>,
}

impl AccountState {
    pub fn loading() -> Self {
        AccountState {
            tab: AccountTab::Favorites,
            loading: true,
            favorites: Vec::new(),
        }
    }
}

pub fn view<'a>(
    state: &'a AccountState,
    session: &'a Session,
    posters: &'a PosterStore,
) -> Element<'a, Message> {
    let tabs = row![
        tab_button("Favorites", AccountTab::Favorites, state.tab),
        tab_button("Settings", AccountTab::Settings, state.tab),
    ]
    .spacing(12);

    let body: Element<Message> = match state.tab {
        AccountTab::Favorites => favorites_tab(state, posters),
        AccountTab::Settings => settings_tab(session),
    };

    column![text("My account").size(28), tabs, body]
        .spacing(24)
        .padding(24)
        .into()
}

fn tab_button(label: &str, tab: AccountTab, active: AccountTab) -> Element<'_, Message> {
    let styled = if tab == active {
        button(text(label).size(16))
    } else {
        button(text(label).size(16)).style(button::secondary)
    };
    styled.on_press(Message::AccountTabSelected(tab)).into()
}

fn favorites_tab<'a>(state: &'a AccountState, posters: &'a PosterStore) -> Element<'a, Message> {
    if state.loading {
        return text("Loading favorites...").size(16).into();
    }
    if state.favorites.is_empty() {
        return text("No favorite movies yet.").size(16).into();
    }

    let cards: Vec<Element<Message>> = state
        .favorites
        .iter()
        .map(|movie| favorite_card(movie, posters))
        .collect();

    Wrap::with_elements(cards).spacing(16.0).line_spacing(16.0).into()
}

fn favorite_card<'a>(movie: &'a Movie, posters: &'a PosterStore) -> Element<'a, Message> {
    column![
        ui::movie_card(movie, posters),
        button(text("Remove").size(13))
            .on_press(Message::RemoveFavorite(movie.id_str()))
            .style(button::danger),
    ]
    .spacing(6)
    .align_x(Alignment::Center)
    .into()
}

fn settings_tab(session: &Session) -> Element<'_, Message> {
    let Some(user) = session.user() else {
        return text("Not signed in.").size(16).into();
    };

    let full_name = match (user.name.as_deref(), user.surname.as_deref()) {
        (Some(name), Some(surname)) => format!("{} {}", name, surname),
        _ => user.display_name().to_string(),
    };

    column![
        row![text("Name").size(14).width(120.0), text(full_name).size(16)].spacing(12),
        row![
            text("Email").size(14).width(120.0),
            text(user.email.clone()).size(16)
        ]
        .spacing(12),
        button(text("Log out").size(16))
            .on_press(Message::LogoutPressed)
            .style(button::secondary),
    ]
    .spacing(16)
    .into()
}
