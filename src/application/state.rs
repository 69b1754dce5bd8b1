// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::repositories::{
    FilmRepository, InMemoryFilmRepository, InMemoryUserRepository, MemoryStore,
    SqliteFilmRepository, SqliteUserRepository, UserRepository,
};
use crate::services::{FilmService, StoreLock, UserService};

/// Composition root: both services over one store and one lock.
/// All fields are Arc-wrapped for sharing across request handlers.
pub struct AppState {
    pub film_service: Arc<FilmService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self::from_repositories(
            Arc::new(InMemoryFilmRepository::new(store.clone())),
            Arc::new(InMemoryUserRepository::new(store)),
        )
    }

    /// Expects a pool whose schema is already initialized
    pub fn sqlite(pool: Arc<ConnectionPool>) -> Self {
        Self::from_repositories(
            Arc::new(SqliteFilmRepository::new(pool.clone())),
            Arc::new(SqliteUserRepository::new(pool)),
        )
    }

    pub fn from_repositories(
        film_repo: Arc<dyn FilmRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        let lock = StoreLock::new();

        Self {
            film_service: Arc::new(FilmService::new(film_repo, user_repo.clone(), lock.clone())),
            user_service: Arc::new(UserService::new(user_repo, lock)),
        }
    }
}
