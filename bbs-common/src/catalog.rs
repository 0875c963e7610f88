//! Catalog store
//!
//! The catalog is an immutable, ordered list of beats fixed at process start.
//! It is built once and shared read-only (`Arc<Catalog>`) by the cart and
//! favorites engines, which resolve their weak beat references through it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// A beat offered in the store
///
/// Field names serialize in camelCase so catalog files written for the web
/// front-end load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
    /// Opaque identifier, unique across the catalog
    pub id: String,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub bpm: u32,
    /// Musical key, e.g. "C Minor"
    pub key: String,
    /// Base (basic-license) price in dollars
    pub price: f64,
    pub image: String,
    pub audio_url: String,
    /// Length in whole seconds
    pub duration: u32,
    pub tags: Vec<String>,
    /// Display badge only
    pub is_exclusive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// Read-only beat catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    beats: Vec<Beat>,
}

impl Catalog {
    /// Build a catalog from beats in display order
    ///
    /// Rejects duplicate ids, zero bpm and negative or non-finite prices.
    pub fn new(beats: Vec<Beat>) -> Result<Self> {
        let mut seen = HashSet::new();
        for beat in &beats {
            if !seen.insert(beat.id.as_str()) {
                return Err(Error::Config(format!("Duplicate beat id in catalog: {}", beat.id)));
            }
            if beat.bpm == 0 {
                return Err(Error::Config(format!("Beat {} has zero bpm", beat.id)));
            }
            if !beat.price.is_finite() || beat.price < 0.0 {
                return Err(Error::Config(format!(
                    "Beat {} has invalid price {}",
                    beat.id, beat.price
                )));
            }
        }
        Ok(Self { beats })
    }

    /// The built-in catalog shipped with the store
    pub fn sample() -> Self {
        Self { beats: sample_beats() }
    }

    /// Load a catalog from a JSON array of beats
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let beats: Vec<Beat> = serde_json::from_str(&text)?;
        if beats.is_empty() {
            return Err(Error::Config(format!("Catalog file is empty: {}", path.display())));
        }
        let catalog = Self::new(beats)?;
        info!("Loaded {} beats from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// All beats, in source order
    pub fn all_beats(&self) -> &[Beat] {
        &self.beats
    }

    /// Exact-match lookup by id
    pub fn beat_by_id(&self, id: &str) -> Option<&Beat> {
        self.beats.iter().find(|beat| beat.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.beat_by_id(id).is_some()
    }

    /// Distinct genres in first-seen order
    pub fn genres(&self) -> Vec<&str> {
        let mut genres: Vec<&str> = Vec::new();
        for beat in &self.beats {
            if !genres.contains(&beat.genre.as_str()) {
                genres.push(&beat.genre);
            }
        }
        genres
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::sample()
    }
}

#[allow(clippy::too_many_arguments)]
fn beat(
    id: &str,
    title: &str,
    artist: &str,
    genre: &str,
    bpm: u32,
    key: &str,
    price: f64,
    image: &str,
    duration: u32,
    tags: &[&str],
    is_exclusive: bool,
    description: &str,
    release_date: &str,
) -> Beat {
    Beat {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        genre: genre.to_string(),
        bpm,
        key: key.to_string(),
        price,
        image: image.to_string(),
        audio_url: "/placeholder-audio.mp3".to_string(),
        duration,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        is_exclusive,
        description: Some(description.to_string()),
        release_date: Some(release_date.to_string()),
    }
}

fn sample_beats() -> Vec<Beat> {
    vec![
        beat(
            "1", "Midnight Vibes", "BlingsBeats", "Hip Hop", 140, "C Minor", 29.99,
            "/Cover-images/image-4.jpeg", 180, &["Dark", "Trap", "Melodic"], false,
            "A dark and atmospheric trap beat with melodic elements perfect for late-night sessions. \
             This track features haunting melodies layered over hard-hitting 808s and crisp hi-hats. \
             The composition builds tension throughout, making it ideal for introspective rap verses \
             or moody vocal performances.",
            "2024-01-15",
        ),
        beat(
            "2", "Neon Dreams", "BilingsBeats", "Electronic", 128, "F Major", 39.99,
            "/Cover-images/image-5.jpeg", 210, &["Synth", "Ambient", "Chill"], true,
            "Ethereal electronic soundscape with lush synths and ambient textures. Perfect for \
             creating dreamy, atmospheric tracks with a modern electronic edge.",
            "2024-01-20",
        ),
        beat(
            "3", "Street Symphony", "BlingsBeats", "Hip Hop", 85, "G Minor", 24.99,
            "/Cover-images/image-6.jpeg", 195, &["Boom Bap", "Classic", "Vinyl"], false,
            "Classic boom bap beat with vinyl crackle and old-school hip hop vibes. Features \
             authentic drum breaks and nostalgic samples that transport you back to the golden era \
             of hip hop.",
            "2024-01-10",
        ),
        beat(
            "4", "Future Bass Drop", "BlingsBeats", "EDM", 150, "D Major", 34.99,
            "/Cover-images/image-7.jpeg", 220, &["Future Bass", "Drop", "Energy"], false,
            "High-energy future bass track with massive drops and euphoric melodies. Built for \
             festival crowds and dance floors with soaring synths and crushing bass.",
            "2024-01-25",
        ),
        beat(
            "5", "Lo-Fi Study", "BlingsBeats", "Lo-Fi", 70, "A Minor", 19.99,
            "/Cover-images/image-8.jpeg", 240, &["Chill", "Study", "Relaxing"], false,
            "Relaxing lo-fi beat perfect for studying, working, or chilling out. Features warm \
             analog textures, gentle percussion, and soothing melodies that create the perfect \
             ambient backdrop.",
            "2024-01-05",
        ),
        beat(
            "6", "Trap Anthem", "BlingsBeats", "Trap", 145, "B Minor", 44.99,
            "/Cover-images/image-9.jpeg", 200, &["Hard", "808", "Anthem"], true,
            "Hard-hitting trap anthem with thunderous 808s and aggressive energy. Designed for \
             high-impact performances with crushing low-end and razor-sharp hi-hats.",
            "2024-01-30",
        ),
        beat(
            "7", "Cosmic Journey", "BlingsBeats", "Ambient", 90, "E Minor", 27.99,
            "/Cover-images/image-4.jpeg", 300, &["Space", "Atmospheric", "Cinematic"], false,
            "Expansive ambient track that takes listeners on a cosmic journey through space. \
             Features ethereal pads, distant textures, and evolving soundscapes perfect for \
             meditation or film scoring.",
            "2024-02-01",
        ),
        beat(
            "8", "Urban Pulse", "BlingsBeats", "Hip Hop", 95, "F# Minor", 32.99,
            "/Cover-images/image-5.jpeg", 185, &["Urban", "Modern", "Groove"], true,
            "Modern hip hop beat with urban influences and infectious groove. Combines \
             contemporary production techniques with classic hip hop elements for a fresh, \
             street-ready sound.",
            "2024-02-05",
        ),
    ]
}
