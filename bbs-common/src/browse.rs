//! Catalog search and genre filtering
//!
//! Mirrors the store grid: a free-text search over title and tags combined
//! with an exact genre filter. The sentinel genre `"all"` disables the genre
//! filter.

use crate::catalog::{Beat, Catalog};
use serde::Deserialize;

/// Genre value that matches every beat
pub const ALL_GENRES: &str = "all";

/// Search and filter criteria for the store grid
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BeatQuery {
    /// Case-insensitive substring matched against title and tags
    #[serde(default)]
    pub search: Option<String>,
    /// Exact genre, or `"all"`
    #[serde(default)]
    pub genre: Option<String>,
}

impl BeatQuery {
    pub fn new(search: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            search: search.map(str::to_string),
            genre: genre.map(str::to_string),
        }
    }

    /// Test a single beat against the query
    pub fn matches(&self, beat: &Beat) -> bool {
        self.matches_search(beat) && self.matches_genre(beat)
    }

    /// Beats matching the query, in catalog order
    pub fn filter<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Beat> {
        catalog.all_beats().iter().filter(|beat| self.matches(beat)).collect()
    }

    fn matches_search(&self, beat: &Beat) -> bool {
        let term = match self.search.as_deref() {
            Some(term) if !term.is_empty() => term.to_lowercase(),
            _ => return true,
        };
        beat.title.to_lowercase().contains(&term)
            || beat.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }

    fn matches_genre(&self, beat: &Beat) -> bool {
        match self.genre.as_deref() {
            None | Some(ALL_GENRES) | Some("") => true,
            Some(genre) => beat.genre == genre,
        }
    }
}

/// Genre options for the filter dropdown: `"all"` followed by the catalog's
/// distinct genres
pub fn genre_options(catalog: &Catalog) -> Vec<String> {
    std::iter::once(ALL_GENRES)
        .chain(catalog.genres())
        .map(str::to_string)
        .collect()
}
