use chrono::NaiveDate;

use super::entity::Film;
use crate::domain::catalog::{Genre, Rating};
use crate::domain::{DomainError, DomainResult};

/// First public film screening; nothing can be released before it
pub const EARLIEST_RELEASE_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid earliest release date"),
};

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Validates field-level Film invariants
pub fn validate_film(film: &Film) -> DomainResult<()> {
    validate_name(&film.name)?;
    validate_description(&film.description)?;
    validate_release_date(film.release_date)?;
    validate_duration(film.duration)?;
    Ok(())
}

/// Every genre and the rating must exist in the catalog
pub fn validate_film_references(film: &Film) -> DomainResult<()> {
    if Rating::by_id(film.mpa).is_none() {
        return Err(DomainError::NotFound(format!("rating {}", film.mpa)));
    }
    if let Some(missing) = film.genres.iter().find(|id| Genre::by_id(**id).is_none()) {
        return Err(DomainError::NotFound(format!("genre {}", missing)));
    }
    Ok(())
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Film name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> DomainResult<()> {
    let length = description.chars().count();
    if length > MAX_DESCRIPTION_CHARS {
        return Err(DomainError::InvariantViolation(format!(
            "Description is {} characters, maximum is {}",
            length, MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(())
}

fn validate_release_date(release_date: NaiveDate) -> DomainResult<()> {
    if release_date < EARLIEST_RELEASE_DATE {
        return Err(DomainError::InvariantViolation(format!(
            "Release date {} is before {}",
            release_date, EARLIEST_RELEASE_DATE
        )));
    }
    Ok(())
}

fn validate_duration(duration: u32) -> DomainResult<()> {
    if duration == 0 {
        return Err(DomainError::InvariantViolation(
            "Duration must be positive".to_string(),
        ));
    }
    Ok(())
}
