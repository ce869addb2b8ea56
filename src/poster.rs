/// Poster cache
///
/// Posters are fetched once per movie, downscaled, and stored as JPEGs in
/// the user cache directory. Views render straight from the cached file,
/// so scrolling back to a page never re-downloads artwork. Returns
/// ~/.cache/cinema-guide/posters on Linux.

use image::imageops::FilterType;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Cached poster paths by movie id, held by the application root
pub type PosterStore = HashMap<i64, PathBuf>;

/// Longest edge of cached posters
const POSTER_SIZE: u32 = 512;

/// Get the poster cache directory, creating it on first use.
pub fn get_poster_cache_dir() -> PathBuf {
    let mut path = dirs_next::cache_dir()
        .or_else(dirs_next::home_dir)
        .expect("Could not determine cache directory");

    path.push("cinema-guide");
    path.push("posters");

    fs::create_dir_all(&path).expect("Failed to create poster cache directory");

    path
}

/// The cache path for a movie's poster (doesn't fetch, just returns the
/// expected location).
pub fn poster_cache_path(movie_id: i64) -> PathBuf {
    get_poster_cache_dir().join(format!("{}.jpg", movie_id))
}

/// Download, downscale, and cache a poster. Returns the cached path, or
/// None if anything failed - the view falls back to a placeholder tile.
pub async fn fetch_poster(http: reqwest::Client, movie_id: i64, url: String) -> Option<PathBuf> {
    let path = poster_cache_path(movie_id);
    if path.exists() {
        return Some(path);
    }

    let response = match http.get(&url).send().await {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            eprintln!("⚠️  Poster fetch for {} got HTTP {}", movie_id, response.status());
            return None;
        }
        Err(err) => {
            eprintln!("⚠️  Poster fetch for {} failed: {}", movie_id, err);
            return None;
        }
    };

    let data = response.bytes().await.ok()?.to_vec();

    // Decode + resize is CPU work, keep it off the UI runtime
    tokio::task::spawn_blocking(move || save_poster(&data, movie_id))
        .await
        .ok()?
}

/// Decode image data, downscale it, and write the cache file.
fn save_poster(data: &[u8], movie_id: i64) -> Option<PathBuf> {
    let img = image::load_from_memory(data).ok()?;
    let resized = img.resize(POSTER_SIZE, POSTER_SIZE, FilterType::Lanczos3);

    // JPEG output cannot carry an alpha channel
    let rgb = image::DynamicImage::ImageRgb8(resized.to_rgb8());

    let path = poster_cache_path(movie_id);
    rgb.save(&path).ok()?;

    println!("🖼️  Cached poster: {}", path.display());
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_path_is_keyed_by_movie_id() {
        let path = poster_cache_path(42);
        assert!(path.ends_with("posters/42.jpg"));
    }

    #[test]
    fn test_save_poster_rejects_garbage_data() {
        assert_eq!(save_poster(b"definitely not an image", -1), None);
    }
}
