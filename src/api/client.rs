/// HTTP client for the CinemaGuide API
///
/// All endpoints share one `reqwest::Client` with a cookie store: the API
/// session lives in a cookie, so credentials ride along on every call.
/// Errors carry strings rather than the underlying `reqwest::Error` so
/// they can flow through iced messages, which must be `Clone`.

use crate::state::data::{Movie, RemoveFavoriteResponse, User};
use thiserror::Error;

/// Production API base. Override with the `CINEMA_GUIDE_API` environment
/// variable (useful against a local stub).
pub const DEFAULT_BASE_URL: &str = "https://cinemaguide.skillbox.cc";

/// The genre pages want "everything in this genre" in one response.
pub const GENRE_PAGE_LIMIT: u32 = 20000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::Status(status.as_u16()),
            None => ApiError::Network(err.to_string()),
        }
    }
}

/// Result of a login or registration attempt. `user` is present exactly
/// when the attempt succeeded; otherwise `message` says why, in a form
/// fit for inline display.
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: Option<User>,
    pub message: Option<String>,
}

impl AuthOutcome {
    fn success(user: User) -> Self {
        Self {
            user: Some(user),
            message: None,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            user: None,
            message: Some(message.into()),
        }
    }
}

/// Body of `POST /user`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegisterPayload {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a client against the given base URL.
    /// If this fails, we panic because the app cannot function without
    /// its HTTP client.
    pub fn new(base: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to construct the HTTP client");

        let base = base.into().trim_end_matches('/').to_string();
        ApiClient { http, base }
    }

    /// Create a client from `CINEMA_GUIDE_API`, falling back to production.
    pub fn from_env() -> Self {
        let base =
            std::env::var("CINEMA_GUIDE_API").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        println!("🌐 API base: {}", base);
        Self::new(base)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// The underlying HTTP client, for fetches outside the API base
    /// (poster images live on a CDN).
    pub fn http(&self) -> reqwest::Client {
        self.http.clone()
    }

    /// GET a JSON payload, mapping non-2xx statuses to `ApiError::Status`.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// `GET /profile` - the current user, or an error when the session
    /// cookie is absent or expired.
    pub async fn fetch_profile(&self) -> Result<User, ApiError> {
        self.get_json("/profile").await
    }

    /// `POST /auth/login`, followed by a profile fetch on success, as the
    /// login response itself carries no user.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let body = serde_json::json!({ "email": email, "password": password });

        match self.http.post(self.url("/auth/login")).json(&body).send().await {
            Ok(response) if response.status().is_success() => match self.fetch_profile().await {
                Ok(user) => AuthOutcome::success(user),
                Err(err) => {
                    eprintln!("❌ Profile fetch after login failed: {}", err);
                    AuthOutcome::failure("Signed in, but the profile could not be loaded.")
                }
            },
            Ok(_) => AuthOutcome::failure("Invalid email or password."),
            Err(err) => {
                eprintln!("❌ Login request failed: {}", err);
                AuthOutcome::failure("Login failed. Please try again later.")
            }
        }
    }

    /// `POST /user`, followed by an automatic login with the same
    /// credentials.
    pub async fn register(&self, payload: RegisterPayload) -> AuthOutcome {
        match self.http.post(self.url("/user")).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                self.login(&payload.email, &payload.password).await
            }
            Ok(response) => {
                eprintln!("❌ Registration rejected: HTTP {}", response.status());
                AuthOutcome::failure("Registration failed. The email may already be taken.")
            }
            Err(err) => {
                eprintln!("❌ Registration request failed: {}", err);
                AuthOutcome::failure("Registration failed. Please try again later.")
            }
        }
    }

    /// `GET /auth/logout` - ends the cookie session.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.http.get(self.url("/auth/logout")).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    /// `GET /movie` with pagination and optional genre/title filters.
    pub async fn get_movies(
        &self,
        page: u32,
        limit: u32,
        genre: Option<&str>,
        title: Option<&str>,
    ) -> Result<Vec<Movie>, ApiError> {
        let mut query: Vec<(&str, String)> = vec![
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(genre) = genre {
            query.push(("genre", genre.to_string()));
        }
        if let Some(title) = title {
            query.push(("title", title.to_string()));
        }

        let response = self
            .http
            .get(self.url("/movie"))
            .query(&query)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// `GET /movie/top10`.
    pub async fn get_top10(&self) -> Result<Vec<Movie>, ApiError> {
        self.get_json("/movie/top10").await
    }

    /// `GET /movie/genres`.
    pub async fn get_genres(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/movie/genres").await
    }

    /// `GET /movie/:id`.
    pub async fn get_movie_by_id(&self, id: i64) -> Result<Movie, ApiError> {
        self.get_json(&format!("/movie/{}", id)).await
    }

    /// `GET /movie/random` - the hero movie on the home page.
    pub async fn get_random_movie(&self) -> Result<Movie, ApiError> {
        self.get_json("/movie/random").await
    }

    /// `GET /favorites` - the favorite movies of the current session.
    pub async fn get_favorites(&self) -> Result<Vec<Movie>, ApiError> {
        self.get_json("/favorites").await
    }

    /// `POST /favorites {id}`.
    pub async fn add_favorite(&self, movie_id: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({ "id": movie_id });
        let response = self
            .http
            .post(self.url("/favorites"))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }

    /// `DELETE /favorites/:id`. The body carries an explicit result flag;
    /// the caller only mutates local state when it is true.
    pub async fn remove_favorite(
        &self,
        movie_id: &str,
    ) -> Result<RemoveFavoriteResponse, ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("/favorites/{}", movie_id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let client = ApiClient::new("https://example.com/");
        assert_eq!(client.url("/movie/top10"), "https://example.com/movie/top10");
    }

    #[test]
    fn test_auth_outcome_constructors() {
        let failure = AuthOutcome::failure("nope");
        assert!(failure.user.is_none());
        assert_eq!(failure.message.as_deref(), Some("nope"));
    }
}
