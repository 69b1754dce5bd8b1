use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::catalog::{Genre, GenreId, Rating, RatingId};
use crate::domain::Entity;

pub type FilmId = u64;

/// A film known to the system
///
/// Likes are not stored here; the like index owns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    /// Store-assigned identifier (0 until added)
    pub id: FilmId,

    pub name: String,

    /// At most 200 characters
    pub description: String,

    pub release_date: NaiveDate,

    /// Duration in minutes
    pub duration: u32,

    /// Genre references, by catalog id
    pub genres: BTreeSet<GenreId>,

    /// MPA rating reference, by catalog id
    pub mpa: RatingId,
}

impl Film {
    pub fn new(
        name: String,
        description: String,
        release_date: NaiveDate,
        duration: u32,
        mpa: RatingId,
    ) -> Self {
        Self {
            id: 0,
            name,
            description,
            release_date,
            duration,
            genres: BTreeSet::new(),
            mpa,
        }
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = GenreId>) -> Self {
        self.genres = genres.into_iter().collect();
        self
    }

    /// Resolved genre records; unknown ids are skipped
    pub fn genre_records(&self) -> Vec<Genre> {
        self.genres.iter().filter_map(|id| Genre::by_id(*id)).collect()
    }

    pub fn rating_record(&self) -> Option<Rating> {
        Rating::by_id(self.mpa)
    }
}

impl Entity for Film {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
