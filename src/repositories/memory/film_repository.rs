// src/repositories/memory/film_repository.rs

use super::MemoryStore;
use crate::domain::{Film, FilmId, UserId};
use crate::error::AppResult;
use crate::repositories::FilmRepository;

pub struct InMemoryFilmRepository {
    store: MemoryStore,
}

impl InMemoryFilmRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl FilmRepository for InMemoryFilmRepository {
    fn add(&self, film: &Film) -> AppResult<Film> {
        Ok(self.store.lock().films.add(film.clone()))
    }

    fn update(&self, film: &Film) -> AppResult<Film> {
        self.store.lock().films.update(film.clone())
    }

    fn get_by_id(&self, id: FilmId) -> AppResult<Option<Film>> {
        Ok(self.store.lock().films.get(id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<Film>> {
        Ok(self.store.lock().films.list())
    }

    fn delete(&self, id: FilmId) -> AppResult<()> {
        let mut state = self.store.lock();
        state.films.delete(id)?;
        state.likes.remove_film(id);
        Ok(())
    }

    fn delete_all(&self) -> AppResult<()> {
        let mut state = self.store.lock();
        state.films.delete_all();
        state.likes.clear();
        Ok(())
    }

    fn add_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        let mut state = self.store.lock();
        // Same referential guarantee the SQLite foreign keys give
        if !state.films.contains(film_id) {
            return Err(state.films.not_found(film_id));
        }
        if !state.users.contains(user_id) {
            return Err(state.users.not_found(user_id));
        }
        state.likes.add(film_id, user_id);
        Ok(())
    }

    fn remove_like(&self, film_id: FilmId, user_id: UserId) -> AppResult<()> {
        self.store.lock().likes.remove(film_id, user_id);
        Ok(())
    }

    fn like_count(&self, film_id: FilmId) -> AppResult<usize> {
        Ok(self.store.lock().likes.like_count(film_id))
    }

    fn top_films(&self, count: usize) -> AppResult<Vec<Film>> {
        let state = self.store.lock();
        let films = state
            .likes
            .top(count)
            .into_iter()
            .filter_map(|entry| state.films.get(entry.film_id).cloned())
            .collect();
        Ok(films)
    }
}
