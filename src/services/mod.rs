// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Every operation resolves referenced ids before touching relations.

pub mod film_service;
pub mod store_lock;
pub mod user_service;

#[cfg(test)]
mod service_tests;

pub use film_service::{CreateFilmRequest, FilmService, UpdateFilmRequest, DEFAULT_TOP_COUNT};
pub use store_lock::StoreLock;
pub use user_service::{CreateUserRequest, UpdateUserRequest, UserService};
