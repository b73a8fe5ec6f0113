//! Provider payloads
//!
//! Shapes follow the TMDB v3 responses. Optional fields are defaulted since the
//! provider omits or nulls them freely.

use serde::{Deserialize, Serialize};

use crate::favorites::MovieId;

/// Movie as it appears in listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,

    pub title: String,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub backdrop_path: Option<String>,

    /// `YYYY-MM-DD`, sometimes empty
    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl MovieSummary {
    /// Year part of the release date
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|date| date.len() >= 4)
            .and_then(|date| date.get(..4))
    }

    /// Rating out of ten with one decimal
    pub fn rating_display(&self) -> String {
        format!("{:.1} / 10", self.vote_average)
    }

    /// Listings only show cards that have a poster
    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(default = "first_page")]
    pub page: u32,

    #[serde(default)]
    pub results: Vec<MovieSummary>,

    #[serde(default = "first_page")]
    pub total_pages: u32,

    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl Default for MoviePage {
    fn default() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 1,
            total_results: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

impl Video {
    pub fn is_youtube(&self) -> bool {
        self.site == "YouTube"
    }

    pub fn is_trailer(&self) -> bool {
        self.kind == "Trailer"
    }

    /// Embeddable player URL, for YouTube videos only
    pub fn embed_url(&self) -> Option<String> {
        self.is_youtube()
            .then(|| format!("https://www.youtube.com/embed/{}", self.key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Number of cast members shown on a detail page
pub const TOP_CAST_LIMIT: usize = 15;

/// Full detail record, with credits, videos and similar titles appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,

    pub title: String,

    #[serde(default)]
    pub tagline: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub backdrop_path: Option<String>,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub credits: Credits,

    #[serde(default)]
    pub videos: VideoList,

    #[serde(default)]
    pub similar: Option<MoviePage>,
}

impl MovieDetails {
    /// Official YouTube trailer, else any YouTube video
    pub fn trailer(&self) -> Option<&Video> {
        let videos = &self.videos.results;
        videos
            .iter()
            .find(|v| v.is_trailer() && v.is_youtube())
            .or_else(|| videos.iter().find(|v| v.is_youtube()))
    }

    /// Leading cast members that have a profile picture
    pub fn top_cast(&self, limit: usize) -> Vec<&CastMember> {
        self.credits
            .cast
            .iter()
            .take(limit)
            .filter(|member| member.profile_path.as_deref().is_some_and(|p| !p.is_empty()))
            .collect()
    }

    pub fn similar_movies(&self) -> &[MovieSummary] {
        self.similar
            .as_ref()
            .map(|page| page.results.as_slice())
            .unwrap_or(&[])
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// Listing view of this movie
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            overview: self.overview.clone(),
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }
}
