// src/repositories/film_repository.rs
//
// Film persistence and the like relation

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{Film, FilmId, GenreId, UserId};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait FilmRepository: Send + Sync {
    /// Stores a new film and returns it with its assigned id
    fn add(&self, film: &Film) -> AppResult<Film>;
    /// Replaces the film with the same id; NotFound if absent
    fn update(&self, film: &Film) -> AppResult<Film>;
    fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>>;
    fn list_all(&self) -> AppResult<Vec<Film>>;
    /// Removes the film and every like on it; NotFound if absent
    fn delete(&self, id: FilmId) -> AppResult<()>;
    fn delete_all(&self) -> AppResult<()>;
    fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()>;
    fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()>;
    fn like_count(&self, film_id: FilmId) -> AppResult<usize>;
    /// Liked films only, most likes first, ties by ascending id
    fn top_films(&self, count: usize) -> AppResult<Vec<Film>>;
}

/// Bound parameters per `IN (...)` genre lookup, well under SQLite's limit
const GENRE_LOOKUP_CHUNK: usize = 500;

const FILM_COLUMNS: &str = "f.id, f.name, f.description, f.release_date, f.duration, f.rating_id";

pub struct SqliteFilmRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFilmRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Film (genres are attached separately)
    fn row_to_film(row: &Row) -> Result<Film, rusqlite::Error> {
        let id: i64 = row.get("id")?;
        let release_date_str: String = row.get("release_date")?;
        let release_date = NaiveDate::parse_from_str(&release_date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let duration: i64 = row.get("duration")?;
        let rating_id: i64 = row.get("rating_id")?;

        Ok(Film {
            id: id as FilmId,
            name: row.get("name")?,
            description: row.get("description")?,
            release_date,
            duration: duration as u32,
            genres: BTreeSet::new(),
            mpa: rating_id as u32,
        })
    }

    fn query_films(
        conn: &Connection,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> AppResult<Vec<Film>> {
        let mut stmt = conn.prepare(sql)?;
        let mut films: Vec<Film> = stmt
            .query_map(params, Self::row_to_film)?
            .collect::<Result<Vec<_>, _>>()?;

        if !films.is_empty() {
            let ids: Vec<FilmId> = films.iter().map(|film| film.id).collect();
            let mut genres = Self::load_genres(conn, &ids)?;
            for film in &mut films {
                film.genres = genres.remove(&film.id).unwrap_or_default();
            }
        }

        Ok(films)
    }

    /// Genre ids of the given films only
    fn load_genres(
        conn: &Connection,
        film_ids: &[FilmId],
    ) -> AppResult<HashMap<FilmId, BTreeSet<GenreId>>> {
        let mut genres: HashMap<FilmId, BTreeSet<GenreId>> = HashMap::new();

        for chunk in film_ids.chunks(GENRE_LOOKUP_CHUNK) {
            let placeholders = vec!["?"; chunk.len()].join(", ");
            let sql = format!(
                "SELECT film_id, genre_id FROM film_genres WHERE film_id IN ({})",
                placeholders
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter().map(|id| *id as i64)), |row| {
                Ok((row.get::<_, i64>(0)? as FilmId, row.get::<_, i64>(1)? as GenreId))
            })?;

            for row in rows {
                let (film_id, genre_id) = row?;
                genres.entry(film_id).or_default().insert(genre_id);
            }
        }
        Ok(genres)
    }

    fn replace_genres(conn: &Connection, film: &Film) -> AppResult<()> {
        conn.execute(
            "DELETE FROM film_genres WHERE film_id = ?1",
            params![film.id as i64],
        )?;
        let mut stmt =
            conn.prepare("INSERT INTO film_genres (film_id, genre_id) VALUES (?1, ?2)")?;
        for genre_id in &film.genres {
            stmt.execute(params![film.id as i64, *genre_id as i64])?;
        }
        Ok(())
    }
}

impl FilmRepository for SqliteFilmRepository {
    fn add(&self, film: &Film) -> AppResult<Film> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO films (name, description, release_date, duration, rating_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                film.name,
                film.description,
                film.release_date.to_string(),
                film.duration as i64,
                film.mpa as i64,
            ],
        )?;

        let mut stored = film.clone();
        stored.id = tx.last_insert_rowid() as FilmId;
        Self::replace_genres(&tx, &stored)?;
        tx.commit()?;

        Ok(stored)
    }

    fn update(&self, film: &Film) -> AppResult<Film> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let rows_affected = tx.execute(
            "UPDATE films SET name = ?1, description = ?2, release_date = ?3, duration = ?4, rating_id = ?5
             WHERE id = ?6",
            params![
                film.name,
                film.description,
                film.release_date.to_string(),
                film.duration as i64,
                film.mpa as i64,
                film.id as i64,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::film_not_found(film.id));
        }

        Self::replace_genres(&tx, film)?;
        tx.commit()?;

        Ok(film.clone())
    }

    fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT {} FROM films f WHERE f.id = ?1", FILM_COLUMNS);
        let film = Self::query_films(&conn, &sql, params![id as i64])?;
        Ok(film.into_iter().next())
    }

    fn list_all(&self) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;
        let sql = format!("SELECT {} FROM films f ORDER BY f.id", FILM_COLUMNS);
        Self::query_films(&conn, &sql, params![])
    }

    fn delete(&self, id: FilmId) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM likes WHERE film_id = ?1", params![id as i64])?;
        tx.execute("DELETE FROM film_genres WHERE film_id = ?1", params![id as i64])?;
        let rows_affected = tx.execute("DELETE FROM films WHERE id = ?1", params![id as i64])?;

        if rows_affected == 0 {
            return Err(AppError::film_not_found(id));
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_all(&self) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM likes", [])?;
        tx.execute("DELETE FROM film_genres", [])?;
        tx.execute("DELETE FROM films", [])?;

        tx.commit()?;
        Ok(())
    }

    fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT OR IGNORE INTO likes (film_id, user_id) VALUES (?1, ?2)",
            params![film_id as i64, user_id as i64],
        )?;
        Ok(())
    }

    fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "DELETE FROM likes WHERE film_id = ?1 AND user_id = ?2",
            params![film_id as i64, user_id as i64],
        )?;
        Ok(())
    }

    fn like_count(&self, film_id: FilmId) -> AppResult<usize> {
        let conn = self.pool.get()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM likes WHERE film_id = ?1",
            params![film_id as i64],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn top_films(&self, count: usize) -> AppResult<Vec<Film>> {
        let conn = self.pool.get()?;
        let sql = format!(
            "SELECT {}, COUNT(l.user_id) AS likes_count
             FROM films f
             JOIN likes l ON l.film_id = f.id
             GROUP BY f.id
             ORDER BY likes_count DESC, f.id ASC
             LIMIT ?1",
            FILM_COLUMNS
        );
        Self::query_films(&conn, &sql, params![count as i64])
    }
}
