// src/lib.rs
// Filmorate - films, likes and friendships
//
// Architecture:
// - Domain-centric: entities, invariants and relations live in `domain`
// - Pluggable persistence: repository traits with SQLite and in-memory stores
// - Services check that every referenced id exists before mutating relations
// - One lock per store serializes all mutations

// ============================================================================
// CORE
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod cli;
pub mod config;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_film,
    validate_film_references,
    validate_user,
    // Film
    Film,
    FilmId,
    FilmLikes,
    // Relations
    FriendshipGraph,
    // Catalog
    Genre,
    GenreId,
    LikeIndex,
    Rating,
    RatingId,
    // User
    User,
    UserId,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, ErrorKind};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    EntityStore, FilmRepository, InMemoryFilmRepository, InMemoryUserRepository, MemoryStore,
    SqliteFilmRepository, SqliteUserRepository, UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CreateFilmRequest, CreateUserRequest, FilmService, StoreLock, UpdateFilmRequest,
    UpdateUserRequest, UserService, DEFAULT_TOP_COUNT,
};

pub use application::{AppState, FilmDto};
