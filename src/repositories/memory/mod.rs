// src/repositories/memory/mod.rs
//
// In-memory persistence
//
// Films, users, friendships and likes share one mutex, so every repository
// call (including cascade deletes that touch all four) is atomic.

pub mod entity_store;
pub mod film_repository;
pub mod user_repository;

pub use entity_store::EntityStore;
pub use film_repository::InMemoryFilmRepository;
pub use user_repository::InMemoryUserRepository;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{Film, FriendshipGraph, LikeIndex, User};

#[derive(Debug)]
pub struct MemoryState {
    pub films: EntityStore<Film>,
    pub users: EntityStore<User>,
    pub friendships: FriendshipGraph,
    pub likes: LikeIndex,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            films: EntityStore::new("film"),
            users: EntityStore::new("user"),
            friendships: FriendshipGraph::new(),
            likes: LikeIndex::new(),
        }
    }
}

/// Shared handle to the in-memory state
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recovers the state from a poisoned lock
    pub fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
