// src/repositories/memory/user_repository.rs

use super::{MemoryState, MemoryStore};
use crate::domain::{User, UserId};
use crate::error::AppResult;
use crate::repositories::UserRepository;

pub struct InMemoryUserRepository {
    store: MemoryStore,
}

impl InMemoryUserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    fn resolve(state: &MemoryState, ids: Vec<UserId>) -> Vec<User> {
        ids.into_iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn add(&self, user: &User) -> AppResult<User> {
        Ok(self.store.lock().users.add(user.clone()))
    }

    fn update(&self, user: &User) -> AppResult<User> {
        self.store.lock().users.update(user.clone())
    }

    fn get_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.store.lock().users.get(id).cloned())
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.store.lock().users.list())
    }

    fn delete(&self, id: UserId) -> AppResult<()> {
        let mut state = self.store.lock();
        state.users.delete(id)?;
        state.friendships.remove_user(id);
        state.likes.remove_user(id);
        Ok(())
    }

    fn delete_all(&self) -> AppResult<()> {
        let mut state = self.store.lock();
        state.users.delete_all();
        state.friendships.clear();
        state.likes.clear();
        Ok(())
    }

    fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut state = self.store.lock();
        for id in [user_id, friend_id] {
            if !state.users.contains(id) {
                return Err(state.users.not_found(id));
            }
        }
        state.friendships.add(user_id, friend_id)?;
        Ok(())
    }

    fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        self.store.lock().friendships.remove(user_id, friend_id);
        Ok(())
    }

    fn list_friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        let state = self.store.lock();
        let ids = state.friendships.friends_of(user_id);
        Ok(Self::resolve(&state, ids))
    }

    fn common_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        let state = self.store.lock();
        let ids = state.friendships.common_friends(user_id, other_id);
        Ok(Self::resolve(&state, ids))
    }
}
