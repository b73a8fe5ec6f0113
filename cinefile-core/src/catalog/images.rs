//! Image URL composition
//!
//! The provider hands out path fragments like `/qJ2tW6WMUDux911r6m7haRef0WH.jpg`.
//! A renderable URL is `{base}/{size}{path}`.

use std::fmt;

use super::models::{CastMember, MovieDetails, MovieSummary};

/// Size token understood by the image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Cast portraits
    W185,
    /// Posters and cards
    W500,
    /// Backdrops
    W1280,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W500 => "w500",
            ImageSize::W1280 => "w1280",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compose a CDN URL, `None` when there is no image
pub fn image_url(base: &str, size: ImageSize, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{base}/{size}{path}"))
    } else {
        Some(format!("{base}/{size}/{path}"))
    }
}

/// Builds image URLs against one CDN root
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base: String,
}

impl ImageUrls {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn poster(&self, movie: &MovieSummary) -> Option<String> {
        image_url(&self.base, ImageSize::W500, movie.poster_path.as_deref())
    }

    pub fn detail_poster(&self, movie: &MovieDetails) -> Option<String> {
        image_url(&self.base, ImageSize::W500, movie.poster_path.as_deref())
    }

    /// Backdrop, falling back to the poster when the movie has none
    pub fn backdrop(&self, movie: &MovieDetails) -> Option<String> {
        let path = movie
            .backdrop_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or(movie.poster_path.as_deref());
        image_url(&self.base, ImageSize::W1280, path)
    }

    pub fn profile(&self, member: &CastMember) -> Option<String> {
        image_url(&self.base, ImageSize::W185, member.profile_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IMAGE_BASE_URL;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_url_composition() {
        assert_eq!(
            image_url(DEFAULT_IMAGE_BASE_URL, ImageSize::W500, Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(
            image_url("https://cdn.example/t/p/", ImageSize::W185, Some("/x.png")).as_deref(),
            Some("https://cdn.example/t/p/w185/x.png")
        );
        assert_eq!(image_url(DEFAULT_IMAGE_BASE_URL, ImageSize::W500, None), None);
        assert_eq!(image_url(DEFAULT_IMAGE_BASE_URL, ImageSize::W500, Some("")), None);
    }

    #[test]
    fn test_backdrop_falls_back_to_poster() {
        let urls = ImageUrls::new(DEFAULT_IMAGE_BASE_URL);
        let mut movie: MovieDetails = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "x",
            "poster_path": "/poster.jpg",
        }))
        .unwrap();

        assert_eq!(
            urls.backdrop(&movie).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/poster.jpg")
        );

        movie.backdrop_path = Some("/backdrop.jpg".to_string());
        assert_eq!(
            urls.backdrop(&movie).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/backdrop.jpg")
        );
        assert_eq!(
            urls.detail_poster(&movie).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }
}
