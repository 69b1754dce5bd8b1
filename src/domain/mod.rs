// src/domain/mod.rs
//
// Domain Root - single source of truth for the domain API
//
// All other layers import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod film;
pub mod friendship;
pub mod likes;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Catalog (fixed enumerations)
pub use catalog::{Genre, GenreId, Rating, RatingId};

// Film Domain
pub use film::{validate_film, validate_film_references, Film, FilmId, EARLIEST_RELEASE_DATE};

// User Domain
pub use user::{validate_user, User, UserId};

// Relations (derived from ids only, never from entity records)
pub use friendship::FriendshipGraph;
pub use likes::{FilmLikes, LikeIndex};

// ============================================================================
// ENTITY IDENTITY
// ============================================================================

/// Records that carry a store-assigned numeric identity.
///
/// An id of `0` means "not yet assigned".
pub trait Entity: Clone {
    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("User {0} cannot befriend themselves")]
    SelfFriendship(UserId),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
