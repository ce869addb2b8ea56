/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures mirroring the API wire format (data.rs)
/// - Session and Favorite Set ownership (session.rs)
/// - The incremental search engine (search.rs)

pub mod data;
pub mod search;
pub mod session;
