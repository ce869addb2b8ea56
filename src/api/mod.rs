/// CinemaGuide REST API module
///
/// This module handles:
/// - The shared HTTP client with its cookie session (client.rs)
/// - Typed wrappers for every endpoint the application consumes
/// - Mapping transport failures into a cloneable error type

pub mod client;

pub use client::{ApiClient, ApiError, AuthOutcome, RegisterPayload};
