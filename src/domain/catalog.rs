//! Fixed enumerations referenced by films.
//!
//! Both tables are keyed by explicit id. Lookups match on the id column,
//! never on the position of a record in the table.

use serde::Serialize;

pub type GenreId = u32;
pub type RatingId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: &'static str,
}

/// MPA film rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub id: RatingId,
    pub name: &'static str,
}

const GENRES: [Genre; 6] = [
    Genre { id: 1, name: "Comedy" },
    Genre { id: 2, name: "Drama" },
    Genre { id: 3, name: "Animation" },
    Genre { id: 4, name: "Thriller" },
    Genre { id: 5, name: "Documentary" },
    Genre { id: 6, name: "Action" },
];

const RATINGS: [Rating; 5] = [
    Rating { id: 1, name: "G" },
    Rating { id: 2, name: "PG" },
    Rating { id: 3, name: "PG-13" },
    Rating { id: 4, name: "R" },
    Rating { id: 5, name: "NC-17" },
];

impl Genre {
    pub fn all() -> &'static [Genre] {
        &GENRES
    }

    pub fn by_id(id: GenreId) -> Option<Genre> {
        GENRES.iter().find(|genre| genre.id == id).copied()
    }
}

impl Rating {
    pub fn all() -> &'static [Rating] {
        &RATINGS
    }

    pub fn by_id(id: RatingId) -> Option<Rating> {
        RATINGS.iter().find(|rating| rating.id == id).copied()
    }
}
