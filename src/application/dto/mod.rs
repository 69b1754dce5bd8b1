// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - Serializable views handed to the command line
// - Catalog references are resolved to `{id, name}` records
// - Conversion FROM domain entities only

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Film, FilmId, Genre, Rating};

// ============================================================================
// FILM DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilmDto {
    pub id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    /// Ascending genre id
    pub genres: Vec<Genre>,
    pub mpa: Option<Rating>,
}

impl From<Film> for FilmDto {
    fn from(film: Film) -> Self {
        let genres = film.genre_records();
        let mpa = film.rating_record();

        Self {
            id: film.id,
            name: film.name,
            description: film.description,
            release_date: film.release_date,
            duration: film.duration,
            genres,
            mpa,
        }
    }
}

pub fn film_dtos(films: Vec<Film>) -> Vec<FilmDto> {
    films.into_iter().map(FilmDto::from).collect()
}
