// src/services/film_service.rs
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{
    validate_film, validate_film_references, Film, FilmId, Genre, GenreId, Rating, RatingId,
    UserId,
};
use crate::error::{AppError, AppResult};
use crate::repositories::{FilmRepository, UserRepository};
use crate::services::StoreLock;

/// Number of films returned by `top_films` when the caller gives no count
pub const DEFAULT_TOP_COUNT: usize = 10;

#[derive(Debug, Clone)]
pub struct CreateFilmRequest {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub genres: Vec<GenreId>,
    pub mpa: RatingId,
}

/// Full replacement of an existing film's fields
#[derive(Debug, Clone)]
pub struct UpdateFilmRequest {
    pub film_id: FilmId,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub duration: u32,
    pub genres: Vec<GenreId>,
    pub mpa: RatingId,
}

pub struct FilmService {
    film_repo: Arc<dyn FilmRepository>,
    user_repo: Arc<dyn UserRepository>,
    lock: StoreLock,
}

impl FilmService {
    pub fn new(
        film_repo: Arc<dyn FilmRepository>,
        user_repo: Arc<dyn UserRepository>,
        lock: StoreLock,
    ) -> Self {
        Self {
            film_repo,
            user_repo,
            lock,
        }
    }

    pub fn create_film(&self, request: CreateFilmRequest) -> AppResult<Film> {
        let film = Film::new(
            request.name,
            request.description,
            request.release_date,
            request.duration,
            request.mpa,
        )
        .with_genres(request.genres);

        Self::check_film(&film)?;

        let _guard = self.lock.write();
        let film = self.film_repo.add(&film)?;

        log::info!("Created film {} '{}'", film.id, film.name);
        Ok(film)
    }

    pub fn update_film(&self, request: UpdateFilmRequest) -> AppResult<Film> {
        let mut film = Film::new(
            request.name,
            request.description,
            request.release_date,
            request.duration,
            request.mpa,
        )
        .with_genres(request.genres);
        film.id = request.film_id;

        Self::check_film(&film)?;

        let _guard = self.lock.write();
        let film = self.film_repo.update(&film).inspect_err(|e| {
            log::warn!("Update of film {} rejected: {}", request.film_id, e);
        })?;

        log::info!("Updated film {}", film.id);
        Ok(film)
    }

    pub fn get_film(&self, film_id: FilmId) -> AppResult<Film> {
        let _guard = self.lock.read();
        self.require_film(film_id)
    }

    pub fn list_films(&self) -> AppResult<Vec<Film>> {
        let _guard = self.lock.read();
        self.film_repo.list_all()
    }

    /// Removes the film and every like on it
    pub fn delete_film(&self, film_id: FilmId) -> AppResult<()> {
        let _guard = self.lock.write();
        self.require_film(film_id)?;
        self.film_repo.delete(film_id)?;

        log::info!("Deleted film {}", film_id);
        Ok(())
    }

    pub fn delete_all_films(&self) -> AppResult<()> {
        let _guard = self.lock.write();
        self.film_repo.delete_all()?;

        log::info!("Deleted all films");
        Ok(())
    }

    /// Idempotent: liking twice leaves a single like
    pub fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let _guard = self.lock.write();
        self.require_film(film_id)?;
        self.require_user(user_id)?;
        self.film_repo.add_like(film_id, user_id)?;

        log::info!("User {} liked film {}", user_id, film_id);
        Ok(())
    }

    /// Idempotent: removing a missing like is a no-op
    pub fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let _guard = self.lock.write();
        self.require_film(film_id)?;
        self.require_user(user_id)?;
        self.film_repo.remove_like(film_id, user_id)?;

        log::info!("User {} unliked film {}", user_id, film_id);
        Ok(())
    }

    pub fn like_count(&self, film_id: FilmId) -> AppResult<usize> {
        let _guard = self.lock.read();
        self.require_film(film_id)?;
        self.film_repo.like_count(film_id)
    }

    /// Most-liked films first, ties by ascending id. Films without likes are
    /// never included. `None` means `DEFAULT_TOP_COUNT`; a negative count is
    /// rejected.
    pub fn top_films(&self, count: Option<i64>) -> AppResult<Vec<Film>> {
        let count = match count {
            None => DEFAULT_TOP_COUNT,
            Some(count) => usize::try_from(count).map_err(|_| {
                log::warn!("Rejected top films request with count {}", count);
                AppError::InvalidArgument(format!("count must be >= 0, got {}", count))
            })?,
        };

        let _guard = self.lock.read();
        let films = self.film_repo.top_films(count)?;

        log::debug!("Top {} films: {} returned", count, films.len());
        Ok(films)
    }

    pub fn genres(&self) -> &'static [Genre] {
        Genre::all()
    }

    pub fn genre(&self, genre_id: GenreId) -> AppResult<Genre> {
        Genre::by_id(genre_id).ok_or_else(|| AppError::NotFound(format!("genre {}", genre_id)))
    }

    pub fn ratings(&self) -> &'static [Rating] {
        Rating::all()
    }

    pub fn rating(&self, rating_id: RatingId) -> AppResult<Rating> {
        Rating::by_id(rating_id).ok_or_else(|| AppError::NotFound(format!("rating {}", rating_id)))
    }

    fn check_film(film: &Film) -> AppResult<()> {
        validate_film(film)
            .and_then(|_| validate_film_references(film))
            .map_err(|e| {
                log::warn!("Film '{}' rejected: {}", film.name, e);
                AppError::from_domain(e)
            })
    }

    fn require_film(&self, film_id: FilmId) -> AppResult<Film> {
        self.film_repo.get_by_id(film_id)?.ok_or_else(|| {
            log::warn!("Film {} not found", film_id);
            AppError::film_not_found(film_id)
        })
    }

    fn require_user(&self, user_id: UserId) -> AppResult<()> {
        match self.user_repo.get_by_id(user_id)? {
            Some(_) => Ok(()),
            None => {
                log::warn!("User {} not found", user_id);
                Err(AppError::user_not_found(user_id))
            }
        }
    }
}
