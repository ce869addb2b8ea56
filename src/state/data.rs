/// Shared data structures for the application state
///
/// These structs mirror the CinemaGuide API wire format and flow between
/// the API layer and the UI layer. A movie is immutable once fetched; a
/// fresh fetch replaces the prior copy wholesale, no merging.

use serde::{Deserialize, Serialize};

/// A single movie as returned by the API.
///
/// Field names follow the wire format (camelCase), including the API's
/// actual `relaseYear` spelling. Most fields are optional because the
/// list endpoints return partial records.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Unique movie ID
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    /// URL of the poster image (None for movies without artwork)
    #[serde(default)]
    pub poster_url: Option<String>,
    /// TMDB rating, 0.0 - 10.0
    #[serde(default)]
    pub tmdb_rating: Option<f32>,
    /// Release year ("relaseYear" on the wire - the API misspells it)
    #[serde(default, rename = "relaseYear")]
    pub release_year: Option<i32>,
    /// ISO date string, e.g. "1999-10-15"
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<i32>,
    /// Ordered genre list, possibly empty
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub plot: Option<String>,
    /// YouTube watch URL for the trailer
    #[serde(default)]
    pub trailer_url: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub production: Option<String>,
    #[serde(default)]
    pub awards_summary: Option<String>,
}

impl Movie {
    /// The string form of the movie ID, as used by the favorites endpoints.
    pub fn id_str(&self) -> String {
        self.id.to_string()
    }
}

/// The logged-in user as returned by `GET /profile`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
}

impl User {
    /// Display name for the header: first name, falling back to the email.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Response body of `DELETE /favorites/:id`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RemoveFavoriteResponse {
    pub result: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_wire_format() {
        // Partial record the way /movie list endpoints return them,
        // including the misspelled year field.
        let json = r#"{
            "id": 310,
            "title": "Fight Club",
            "posterUrl": "https://example.com/p.jpg",
            "tmdbRating": 8.4,
            "relaseYear": 1999,
            "runtime": 139,
            "genres": ["drama", "thriller"]
        }"#;

        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 310);
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.release_year, Some(1999));
        assert_eq!(movie.genres, vec!["drama", "thriller"]);
        assert_eq!(movie.trailer_url, None);
        assert_eq!(movie.id_str(), "310");
    }

    #[test]
    fn test_movie_tolerates_minimal_record() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Pi"}"#).unwrap();
        assert_eq!(movie.poster_url, None);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_remove_response_without_message() {
        let resp: RemoveFavoriteResponse = serde_json::from_str(r#"{"result": true}"#).unwrap();
        assert!(resp.result);
        assert_eq!(resp.message, None);
    }

    #[test]
    fn test_user_display_name_falls_back_to_email() {
        let user: User = serde_json::from_str(
            r#"{"id": "u1", "email": "ada@example.com", "name": ""}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "ada@example.com");
    }
}
