use iced::widget::{column, scrollable};
use iced::{Element, Length, Task, Theme};
use std::collections::HashSet;
use std::path::PathBuf;

mod api;
mod poster;
mod state;
mod ui;

use api::client::GENRE_PAGE_LIMIT;
use api::{ApiClient, ApiError, AuthOutcome};
use poster::PosterStore;
use state::data::{Movie, RemoveFavoriteResponse, User};
use state::search::{SearchEngine, DEBOUNCE, SERVER_SEARCH_LIMIT};
use state::session::{FavoriteAction, Session};
use ui::account::{AccountState, AccountTab};
use ui::auth::{AuthModal, AuthRequest};
use ui::detail::DetailState;
use ui::genres::{GenreMoviesState, GenresState};
use ui::home::HomeState;
use ui::trailer::TrailerModal;

/// How many movies the startup snapshot fetch asks for. The snapshot only
/// powers the local search fallback, so stale is fine but partial is not.
const SNAPSHOT_LIMIT: u32 = 20000;

/// The current page. Navigation replaces this wholesale; per-page state
/// lives in the matching state struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Genres,
    Genre(String),
    Movie(i64),
    Account,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    // Session lifecycle
    ProfileLoaded(Result<User, ApiError>),
    FavoritesLoaded(Result<Vec<Movie>, ApiError>),
    LogoutPressed,
    LoggedOut(Result<(), ApiError>),

    // Navigation
    Navigate(Route),

    // Search
    SearchInput(String),
    SearchClear,
    /// The debounce timer for this generation expired
    SearchDebounce(u64),
    SearchResults {
        query: String,
        result: Result<Vec<Movie>, ApiError>,
    },
    SnapshotLoaded(Result<Vec<Movie>, ApiError>),

    // Home page
    HeroLoaded(Result<Movie, ApiError>),
    TopMoviesLoaded(Result<Vec<Movie>, ApiError>),
    ShuffleHero,

    // Genres
    GenresLoaded(Result<Vec<String>, ApiError>),
    GenreMoviesLoaded {
        genre: String,
        result: Result<Vec<Movie>, ApiError>,
    },
    ShowMoreGenreMovies,

    // Movie detail
    MovieLoaded(Result<Movie, ApiError>),

    // Favorites
    ToggleFavorite {
        movie_id: String,
        currently_favorite: bool,
    },
    RemoveFavorite(String),
    FavoriteAdded {
        movie_id: String,
        result: Result<(), ApiError>,
    },
    FavoriteRemoved {
        movie_id: String,
        result: Result<RemoveFavoriteResponse, ApiError>,
    },
    AccountFavoritesLoaded(Result<Vec<Movie>, ApiError>),
    AccountTabSelected(AccountTab),

    // Auth modal
    OpenAuthModal,
    CloseAuthModal,
    Auth(ui::auth::AuthEvent),
    LoginFinished(AuthOutcome),
    RegisterFinished(AuthOutcome),

    // Trailer modal
    OpenTrailer {
        title: String,
        trailer_url: Option<String>,
    },
    CloseTrailer,

    // Poster cache
    PosterFetched {
        movie_id: i64,
        path: Option<PathBuf>,
    },
}

/// Main application state. This is the session controller: it owns the
/// `Session` and the Favorite Set, and views only ever see them read-only.
struct CinemaGuide {
    api: ApiClient,
    session: Session,
    search: SearchEngine,
    route: Route,
    home: HomeState,
    genres: GenresState,
    genre_movies: GenreMoviesState,
    detail: DetailState,
    account: AccountState,
    auth: Option<AuthModal>,
    trailer: Option<TrailerModal>,
    posters: PosterStore,
    /// Movie ids with a poster download already in flight
    poster_requests: HashSet<i64>,
}

impl CinemaGuide {
    fn new() -> (Self, Task<Message>) {
        let api = ApiClient::from_env();

        let app = CinemaGuide {
            api: api.clone(),
            session: Session::new(),
            search: SearchEngine::new(),
            route: Route::Home,
            home: HomeState::loading(),
            genres: GenresState::default(),
            genre_movies: GenreMoviesState::default(),
            detail: DetailState::default(),
            account: AccountState::loading(),
            auth: None,
            trailer: None,
            posters: PosterStore::new(),
            poster_requests: HashSet::new(),
        };

        let profile_api = api.clone();
        let snapshot_api = api.clone();
        let startup = Task::batch(vec![
            Task::perform(
                async move { profile_api.fetch_profile().await },
                Message::ProfileLoaded,
            ),
            Task::perform(
                async move {
                    snapshot_api
                        .get_movies(1, SNAPSHOT_LIMIT, None, None)
                        .await
                },
                Message::SnapshotLoaded,
            ),
        ]);

        (app, Task::batch(vec![startup, load_home(api)]))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // ---- Session lifecycle -------------------------------------
            Message::ProfileLoaded(Ok(user)) => {
                println!("👤 Signed in as {}", user.email);
                self.session.sign_in(user);
                self.load_favorites()
            }
            Message::ProfileLoaded(Err(err)) => {
                // No session cookie: browsing stays anonymous
                println!("👤 No active session ({})", err);
                self.session.sign_out();
                Task::none()
            }
            Message::FavoritesLoaded(Ok(movies)) => {
                let ids = movies.iter().map(Movie::id_str).collect();
                self.session.set_favorites(ids);
                Task::none()
            }
            Message::FavoritesLoaded(Err(err)) => {
                // Favorites fail open to "none" rather than erroring the UI
                eprintln!("⚠️  Could not load favorites: {}", err);
                self.session.set_favorites(Vec::new());
                Task::none()
            }
            Message::LogoutPressed => {
                let api = self.api.clone();
                Task::perform(async move { api.logout().await }, Message::LoggedOut)
            }
            Message::LoggedOut(Ok(())) => {
                println!("👋 Signed out");
                self.session.sign_out();
                if self.route == Route::Account {
                    return self.update(Message::Navigate(Route::Home));
                }
                Task::none()
            }
            Message::LoggedOut(Err(err)) => {
                eprintln!("❌ Logout failed: {}", err);
                Task::none()
            }

            // ---- Navigation --------------------------------------------
            Message::Navigate(route) => {
                self.search.clear();
                match route {
                    Route::Home => {
                        self.route = Route::Home;
                        self.home = HomeState::loading();
                        load_home(self.api.clone())
                    }
                    Route::Genres => {
                        self.route = Route::Genres;
                        self.genres = GenresState::loading();
                        let api = self.api.clone();
                        Task::perform(async move { api.get_genres().await }, Message::GenresLoaded)
                    }
                    Route::Genre(genre) => {
                        self.route = Route::Genre(genre.clone());
                        self.genre_movies = GenreMoviesState::loading(genre.clone());
                        let api = self.api.clone();
                        Task::perform(
                            async move {
                                let result = api
                                    .get_movies(1, GENRE_PAGE_LIMIT, Some(&genre), None)
                                    .await;
                                (genre, result)
                            },
                            |(genre, result)| Message::GenreMoviesLoaded { genre, result },
                        )
                    }
                    Route::Movie(id) => {
                        self.route = Route::Movie(id);
                        self.detail = DetailState::loading();
                        let api = self.api.clone();
                        Task::perform(
                            async move { api.get_movie_by_id(id).await },
                            Message::MovieLoaded,
                        )
                    }
                    Route::Account => {
                        if !self.session.is_authenticated() {
                            // Anonymous users land back on the home page
                            return self.update(Message::Navigate(Route::Home));
                        }
                        self.route = Route::Account;
                        self.account = AccountState::loading();
                        self.load_account_favorites()
                    }
                }
            }

            // ---- Search ------------------------------------------------
            Message::SearchInput(query) => match self.search.input(query) {
                Some(generation) => Task::perform(
                    async move {
                        tokio::time::sleep(DEBOUNCE).await;
                        generation
                    },
                    Message::SearchDebounce,
                ),
                None => Task::none(),
            },
            Message::SearchClear => {
                self.search.clear();
                Task::none()
            }
            Message::SearchDebounce(generation) => {
                match self.search.debounce_fired(generation) {
                    Some(query) => {
                        let api = self.api.clone();
                        Task::perform(
                            async move {
                                let result = api
                                    .get_movies(1, SERVER_SEARCH_LIMIT, None, Some(&query))
                                    .await;
                                (query, result)
                            },
                            |(query, result)| Message::SearchResults { query, result },
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::SearchResults { query, result } => {
                match result {
                    Ok(movies) => self.search.apply_server_results(&query, movies),
                    Err(err) => {
                        eprintln!("⚠️  Search for {:?} failed: {}", query, err);
                        self.search.apply_server_results(&query, Vec::new());
                    }
                }
                Task::none()
            }
            Message::SnapshotLoaded(Ok(movies)) => {
                println!("🎞️  Movie snapshot loaded: {} titles", movies.len());
                self.search.set_snapshot(movies);
                Task::none()
            }
            Message::SnapshotLoaded(Err(err)) => {
                // Local suggestions stay empty; server search still works
                eprintln!("⚠️  Could not load the movie snapshot: {}", err);
                Task::none()
            }

            // ---- Home page ---------------------------------------------
            Message::HeroLoaded(Ok(movie)) => {
                self.home.loading = false;
                let task = self.fetch_posters(std::slice::from_ref(&movie));
                self.home.hero = Some(movie);
                task
            }
            Message::HeroLoaded(Err(err)) => {
                eprintln!("❌ Could not load the featured movie: {}", err);
                self.home.loading = false;
                self.home.error = Some("The featured movie could not be loaded.".to_string());
                Task::none()
            }
            Message::TopMoviesLoaded(Ok(movies)) => {
                self.home.loading = false;
                let task = self.fetch_posters(&movies);
                self.home.top_movies = movies;
                task
            }
            Message::TopMoviesLoaded(Err(err)) => {
                eprintln!("❌ Could not load the top-10 list: {}", err);
                self.home.loading = false;
                self.home.error = Some("No movies available.".to_string());
                Task::none()
            }
            Message::ShuffleHero => {
                let api = self.api.clone();
                Task::perform(
                    async move { api.get_random_movie().await },
                    Message::HeroLoaded,
                )
            }

            // ---- Genres ------------------------------------------------
            Message::GenresLoaded(result) => {
                self.genres.loading = false;
                match result {
                    Ok(genres) => self.genres.genres = genres,
                    Err(err) => {
                        eprintln!("❌ Could not load genres: {}", err);
                        self.genres.error = Some("Genres could not be loaded.".to_string());
                    }
                }
                Task::none()
            }
            Message::GenreMoviesLoaded { genre, result } => {
                if self.genre_movies.genre != genre {
                    // Response for a genre page the user already left
                    return Task::none();
                }
                self.genre_movies.loading = false;
                match result {
                    Ok(movies) => {
                        self.genre_movies.movies = movies;
                        let visible = self.genre_movies.visible().to_vec();
                        self.fetch_posters(&visible)
                    }
                    Err(err) => {
                        eprintln!("❌ Could not load {:?} movies: {}", genre, err);
                        self.genre_movies.error =
                            Some("Movies for this genre could not be loaded.".to_string());
                        Task::none()
                    }
                }
            }
            Message::ShowMoreGenreMovies => {
                self.genre_movies.show_more();
                let visible = self.genre_movies.visible().to_vec();
                self.fetch_posters(&visible)
            }

            // ---- Movie detail ------------------------------------------
            Message::MovieLoaded(Ok(movie)) => {
                self.detail.loading = false;
                let task = self.fetch_posters(std::slice::from_ref(&movie));
                self.detail.movie = Some(movie);
                task
            }
            Message::MovieLoaded(Err(err)) => {
                eprintln!("❌ Could not load the movie: {}", err);
                self.detail.loading = false;
                self.detail.error = Some(match err {
                    ApiError::Status(404) => "Movie not found.".to_string(),
                    _ => "The movie could not be loaded.".to_string(),
                });
                Task::none()
            }

            // ---- Favorites ---------------------------------------------
            Message::ToggleFavorite {
                movie_id,
                currently_favorite,
            } => {
                let action = self.session.request_toggle(&movie_id, currently_favorite);
                self.dispatch_favorite_action(action)
            }
            Message::RemoveFavorite(movie_id) => {
                let action = self.session.request_remove(&movie_id);
                self.dispatch_favorite_action(action)
            }
            Message::FavoriteAdded { movie_id, result } => {
                match result {
                    Ok(()) => self.session.confirm_add(&movie_id),
                    Err(err) => {
                        // No rollback needed: nothing was inserted yet
                        eprintln!("❌ Could not add favorite {}: {}", movie_id, err)
                    }
                }
                Task::none()
            }
            Message::FavoriteRemoved { movie_id, result } => {
                match result {
                    Ok(response) => {
                        if self.session.confirm_remove(&movie_id, &response) {
                            self.account
                                .favorites
                                .retain(|movie| movie.id_str() != movie_id);
                        }
                    }
                    Err(err) => eprintln!("❌ Could not remove favorite {}: {}", movie_id, err),
                }
                Task::none()
            }
            Message::AccountFavoritesLoaded(result) => {
                self.account.loading = false;
                match result {
                    Ok(movies) => {
                        // This read is authoritative for the Favorite Set too
                        let ids = movies.iter().map(Movie::id_str).collect();
                        self.session.set_favorites(ids);
                        let task = self.fetch_posters(&movies);
                        self.account.favorites = movies;
                        task
                    }
                    Err(err) => {
                        eprintln!("⚠️  Could not load favorites: {}", err);
                        self.session.set_favorites(Vec::new());
                        self.account.favorites.clear();
                        Task::none()
                    }
                }
            }
            Message::AccountTabSelected(tab) => {
                self.account.tab = tab;
                if tab == AccountTab::Favorites {
                    self.account.loading = true;
                    return self.load_account_favorites();
                }
                Task::none()
            }

            // ---- Auth modal --------------------------------------------
            Message::OpenAuthModal => {
                self.auth = Some(AuthModal::new());
                Task::none()
            }
            Message::CloseAuthModal => {
                self.auth = None;
                Task::none()
            }
            Message::Auth(event) => {
                let Some(modal) = &mut self.auth else {
                    return Task::none();
                };
                match modal.update(event) {
                    Some(AuthRequest::Login { email, password }) => {
                        modal.busy = true;
                        let api = self.api.clone();
                        Task::perform(
                            async move { api.login(&email, &password).await },
                            Message::LoginFinished,
                        )
                    }
                    Some(AuthRequest::Register(payload)) => {
                        modal.busy = true;
                        let api = self.api.clone();
                        Task::perform(
                            async move { api.register(payload).await },
                            Message::RegisterFinished,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::LoginFinished(outcome) => {
                let Some(modal) = &mut self.auth else {
                    return Task::none();
                };
                modal.busy = false;
                match outcome.user {
                    Some(user) => {
                        println!("👤 Signed in as {}", user.email);
                        self.session.sign_in(user);
                        self.auth = None;
                        self.load_favorites()
                    }
                    None => {
                        modal.error = outcome.message;
                        Task::none()
                    }
                }
            }
            Message::RegisterFinished(outcome) => {
                let Some(modal) = &mut self.auth else {
                    return Task::none();
                };
                modal.busy = false;
                match outcome.user {
                    Some(_) => {
                        // The success interstitial leads back to the login
                        // form; the session starts when the user signs in.
                        modal.registration_complete = true;
                    }
                    None => modal.error = outcome.message,
                }
                Task::none()
            }

            // ---- Trailer modal -----------------------------------------
            Message::OpenTrailer { title, trailer_url } => {
                self.trailer = Some(TrailerModal::new(title, trailer_url.as_deref()));
                Task::none()
            }
            Message::CloseTrailer => {
                self.trailer = None;
                Task::none()
            }

            // ---- Poster cache ------------------------------------------
            Message::PosterFetched { movie_id, path } => {
                self.poster_requests.remove(&movie_id);
                if let Some(path) = path {
                    self.posters.insert(movie_id, path);
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let page: Element<Message> = match &self.route {
            Route::Home => ui::home::view(&self.home, &self.session, &self.posters),
            Route::Genres => ui::genres::genres_view(&self.genres),
            Route::Genre(_) => ui::genres::genre_movies_view(&self.genre_movies, &self.posters),
            Route::Movie(_) => ui::detail::view(&self.detail, &self.session, &self.posters),
            Route::Account => ui::account::view(&self.account, &self.session, &self.posters),
        };

        let mut content: Element<Message> = column![
            ui::header::view(&self.session, &self.search),
            scrollable(page).height(Length::Fill),
        ]
        .into();

        if let Some(modal) = &self.auth {
            content = ui::modal(content, ui::auth::view(modal), Message::CloseAuthModal);
        }
        if let Some(trailer) = &self.trailer {
            content = ui::modal(content, trailer.view(), Message::CloseTrailer);
        }

        content
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Re-read the authoritative favorites list for the session.
    fn load_favorites(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.get_favorites().await },
            Message::FavoritesLoaded,
        )
    }

    /// Same read, but routed to the account page (it keeps the movies,
    /// not just the ids).
    fn load_account_favorites(&self) -> Task<Message> {
        let api = self.api.clone();
        Task::perform(
            async move { api.get_favorites().await },
            Message::AccountFavoritesLoaded,
        )
    }

    /// Dispatch the synchronous favorites decision as a network task.
    fn dispatch_favorite_action(&mut self, action: FavoriteAction) -> Task<Message> {
        match action {
            FavoriteAction::PromptAuth => {
                self.auth = Some(AuthModal::new());
                Task::none()
            }
            FavoriteAction::Add(movie_id) => {
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = api.add_favorite(&movie_id).await;
                        (movie_id, result)
                    },
                    |(movie_id, result)| Message::FavoriteAdded { movie_id, result },
                )
            }
            FavoriteAction::Remove(movie_id) => {
                let api = self.api.clone();
                Task::perform(
                    async move {
                        let result = api.remove_favorite(&movie_id).await;
                        (movie_id, result)
                    },
                    |(movie_id, result)| Message::FavoriteRemoved { movie_id, result },
                )
            }
            FavoriteAction::Nothing => Task::none(),
        }
    }

    /// Kick off poster downloads for any of these movies that are neither
    /// cached nor already in flight.
    fn fetch_posters(&mut self, movies: &[Movie]) -> Task<Message> {
        let mut tasks = Vec::new();
        for movie in movies {
            if self.posters.contains_key(&movie.id) || self.poster_requests.contains(&movie.id) {
                continue;
            }
            let Some(url) = movie.poster_url.clone() else {
                continue;
            };
            self.poster_requests.insert(movie.id);
            let http = self.api.http();
            let movie_id = movie.id;
            tasks.push(Task::perform(
                poster::fetch_poster(http, movie_id, url),
                move |path| Message::PosterFetched { movie_id, path },
            ));
        }
        Task::batch(tasks)
    }
}

/// Hero + top-10 fetches for the home page.
fn load_home(api: ApiClient) -> Task<Message> {
    let hero_api = api.clone();
    Task::batch(vec![
        Task::perform(
            async move { hero_api.get_random_movie().await },
            Message::HeroLoaded,
        ),
        Task::perform(async move { api.get_top10().await }, Message::TopMoviesLoaded),
    ])
}

fn main() -> iced::Result {
    iced::application("Cinema Guide", CinemaGuide::update, CinemaGuide::view)
        .theme(CinemaGuide::theme)
        .centered()
        .run_with(CinemaGuide::new)
}
