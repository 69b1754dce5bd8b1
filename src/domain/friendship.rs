//! Symmetric friendship relation between users.
//!
//! Every edge is stored as two directed entries so `friends_of` is a single
//! lookup. Both entries are inserted and removed together; a user never
//! appears in their own friend set.

use std::collections::{BTreeSet, HashMap};

use super::user::UserId;
use super::{DomainError, DomainResult};

#[derive(Debug, Clone, Default)]
pub struct FriendshipGraph {
    adjacency: HashMap<UserId, BTreeSet<UserId>>,
}

impl FriendshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links two users. Returns `false` if they were already friends.
    pub fn add(&mut self, user_id: UserId, friend_id: UserId) -> DomainResult<bool> {
        if user_id == friend_id {
            return Err(DomainError::SelfFriendship(user_id));
        }

        let inserted = self.adjacency.entry(user_id).or_default().insert(friend_id);
        self.adjacency.entry(friend_id).or_default().insert(user_id);
        Ok(inserted)
    }

    /// Unlinks two users. Returns `false` if there was no edge.
    pub fn remove(&mut self, user_id: UserId, friend_id: UserId) -> bool {
        let removed = self.unlink(user_id, friend_id);
        self.unlink(friend_id, user_id);
        removed
    }

    /// Friend ids in ascending order
    pub fn friends_of(&self, user_id: UserId) -> Vec<UserId> {
        self.adjacency
            .get(&user_id)
            .map(|friends| friends.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Ids befriended by both users, ascending
    pub fn common_friends(&self, user_id: UserId, other_id: UserId) -> Vec<UserId> {
        match (self.adjacency.get(&user_id), self.adjacency.get(&other_id)) {
            (Some(left), Some(right)) => left
                .intersection(right)
                .copied()
                .filter(|id| *id != user_id && *id != other_id)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Drops every edge touching `user_id`. Returns the number of edges removed.
    pub fn remove_user(&mut self, user_id: UserId) -> usize {
        let Some(friends) = self.adjacency.remove(&user_id) else {
            return 0;
        };
        for friend_id in &friends {
            self.unlink(*friend_id, user_id);
        }
        friends.len()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }

    fn unlink(&mut self, from: UserId, to: UserId) -> bool {
        let Some(friends) = self.adjacency.get_mut(&from) else {
            return false;
        };
        let removed = friends.remove(&to);
        if friends.is_empty() {
            self.adjacency.remove(&from);
        }
        removed
    }
}
