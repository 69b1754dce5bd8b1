// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are data mappers for one aggregate each
// - NO validation of entity fields
// - Multi-statement writes (cascade delete, symmetric friendship) are atomic
// - Explicit SQL only in the SQLite implementations

pub mod film_repository;
pub mod memory;
pub mod user_repository;

pub use film_repository::{FilmRepository, SqliteFilmRepository};
pub use memory::{EntityStore, InMemoryFilmRepository, InMemoryUserRepository, MemoryStore};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use film_repository::MockFilmRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
