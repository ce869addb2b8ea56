/// Session and favorites state
///
/// The session is owned exclusively by the application root. Views receive
/// a read-only reference plus messages to request mutation; nothing else is
/// allowed to touch the Favorite Set. Favorite membership is only ever
/// derived from the last successful server read or a confirmed mutation.

use crate::state::data::{RemoveFavoriteResponse, User};

/// What the session controller should do in response to a favorites
/// request. The decision is made synchronously here; the network call (if
/// any) is dispatched by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    /// Anonymous session: open the auth modal, issue no call
    PromptAuth,
    /// Issue `POST /favorites` for this id
    Add(String),
    /// Issue `DELETE /favorites/:id` for this id
    Remove(String),
    /// Nothing to do (duplicate add, or anonymous remove)
    Nothing,
}

#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
    /// Movie ids (as strings) the user has marked as favorite
    favorite_ids: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn favorite_ids(&self) -> &[String] {
        &self.favorite_ids
    }

    pub fn is_favorite(&self, movie_id: &str) -> bool {
        self.favorite_ids.iter().any(|id| id == movie_id)
    }

    /// A login or profile fetch succeeded. The Favorite Set stays empty
    /// until `set_favorites` delivers the server read.
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Logout, or a failed profile fetch: drop the user and the whole
    /// Favorite Set.
    pub fn sign_out(&mut self) {
        self.user = None;
        self.favorite_ids.clear();
    }

    /// Replace the Favorite Set with the authoritative server read. A
    /// failed read passes an empty list: favorites fail open rather than
    /// erroring the UI.
    pub fn set_favorites(&mut self, ids: Vec<String>) {
        self.favorite_ids = ids;
    }

    /// Decide how to handle an add request. Anonymous sessions get the
    /// auth prompt; an id that is already a favorite is skipped so the
    /// server never sees a duplicate add.
    pub fn request_add(&self, movie_id: &str) -> FavoriteAction {
        if !self.is_authenticated() {
            return FavoriteAction::PromptAuth;
        }
        if self.is_favorite(movie_id) {
            return FavoriteAction::Nothing;
        }
        FavoriteAction::Add(movie_id.to_string())
    }

    /// Decide how to handle a remove request. Anonymous sessions are a
    /// warned no-op without an auth prompt - asymmetric with add, kept
    /// that way on purpose.
    pub fn request_remove(&self, movie_id: &str) -> FavoriteAction {
        if !self.is_authenticated() {
            eprintln!("⚠️  Not signed in, cannot remove favorite {}", movie_id);
            return FavoriteAction::Nothing;
        }
        FavoriteAction::Remove(movie_id.to_string())
    }

    /// Dispatch a toggle based on the caller-supplied current state. The
    /// caller's view of membership is trusted at call time.
    pub fn request_toggle(&self, movie_id: &str, currently_favorite: bool) -> FavoriteAction {
        if currently_favorite {
            self.request_remove(movie_id)
        } else {
            self.request_add(movie_id)
        }
    }

    /// `POST /favorites` succeeded: insert the id locally.
    pub fn confirm_add(&mut self, movie_id: &str) {
        if !self.is_favorite(movie_id) {
            self.favorite_ids.push(movie_id.to_string());
        }
    }

    /// `DELETE /favorites/:id` responded. The id is only removed locally
    /// on an explicit `result: true`; anything else leaves the set
    /// untouched and surfaces the server message in the log. Returns
    /// whether local state changed.
    pub fn confirm_remove(&mut self, movie_id: &str, response: &RemoveFavoriteResponse) -> bool {
        if response.result {
            self.favorite_ids.retain(|id| id != movie_id);
            true
        } else {
            eprintln!(
                "❌ Could not remove favorite {}: {}",
                movie_id,
                response.message.as_deref().unwrap_or("unknown error")
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            surname: None,
        }
    }

    fn signed_in_with(favorites: &[&str]) -> Session {
        let mut session = Session::new();
        session.sign_in(user());
        session.set_favorites(favorites.iter().map(|s| s.to_string()).collect());
        session
    }

    #[test]
    fn test_anonymous_add_prompts_auth_without_network_call() {
        let session = Session::new();
        assert_eq!(session.request_add("42"), FavoriteAction::PromptAuth);
    }

    #[test]
    fn test_anonymous_remove_is_a_silent_no_op() {
        // No auth prompt here - only add triggers the modal
        let session = Session::new();
        assert_eq!(session.request_remove("42"), FavoriteAction::Nothing);
    }

    #[test]
    fn test_duplicate_add_is_skipped() {
        let session = signed_in_with(&["5"]);
        assert_eq!(session.request_add("5"), FavoriteAction::Nothing);
        assert_eq!(session.request_add("7"), FavoriteAction::Add("7".into()));
    }

    #[test]
    fn test_toggle_dispatches_on_caller_state() {
        let session = signed_in_with(&["5", "9"]);
        assert_eq!(
            session.request_toggle("5", true),
            FavoriteAction::Remove("5".into())
        );
        assert_eq!(
            session.request_toggle("11", false),
            FavoriteAction::Add("11".into())
        );
    }

    #[test]
    fn test_confirmed_remove_updates_the_set() {
        let mut session = signed_in_with(&["5", "9"]);
        let response = RemoveFavoriteResponse {
            result: true,
            message: None,
        };

        assert!(session.confirm_remove("5", &response));
        assert_eq!(session.favorite_ids(), &["9".to_string()]);
    }

    #[test]
    fn test_falsy_remove_result_leaves_the_set_unchanged() {
        let mut session = signed_in_with(&["5", "9"]);
        let response = RemoveFavoriteResponse {
            result: false,
            message: Some("not found".to_string()),
        };

        assert!(!session.confirm_remove("5", &response));
        assert_eq!(session.favorite_ids().len(), 2);
        assert!(session.is_favorite("5"));
    }

    #[test]
    fn test_confirm_add_inserts_once() {
        let mut session = signed_in_with(&[]);
        session.confirm_add("42");
        session.confirm_add("42");
        assert_eq!(session.favorite_ids(), &["42".to_string()]);
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let mut session = signed_in_with(&["5"]);
        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.favorite_ids().is_empty());
    }
}
