//! Film likes and the top-N ranking.
//!
//! The index is sparse: a film with no likes has no entry, so it can never
//! show up in a ranking.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::film::FilmId;
use super::user::UserId;

/// A film id together with its like count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilmLikes {
    pub film_id: FilmId,
    pub likes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LikeIndex {
    likes: HashMap<FilmId, BTreeSet<UserId>>,
}

impl LikeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the user already liked the film
    pub fn add(&mut self, film_id: FilmId, user_id: UserId) -> bool {
        self.likes.entry(film_id).or_default().insert(user_id)
    }

    /// Returns `false` if there was no such like
    pub fn remove(&mut self, film_id: FilmId, user_id: UserId) -> bool {
        let Some(users) = self.likes.get_mut(&film_id) else {
            return false;
        };
        let removed = users.remove(&user_id);
        if users.is_empty() {
            self.likes.remove(&film_id);
        }
        removed
    }

    pub fn like_count(&self, film_id: FilmId) -> usize {
        self.likes.get(&film_id).map_or(0, BTreeSet::len)
    }

    /// Drops every like on a film. Returns how many were removed.
    pub fn remove_film(&mut self, film_id: FilmId) -> usize {
        self.likes.remove(&film_id).map_or(0, |users| users.len())
    }

    /// Drops every like a user has given. Returns how many were removed.
    pub fn remove_user(&mut self, user_id: UserId) -> usize {
        let mut removed = 0;
        self.likes.retain(|_, users| {
            if users.remove(&user_id) {
                removed += 1;
            }
            !users.is_empty()
        });
        removed
    }

    /// Most-liked films first; equal counts are ordered by ascending film id.
    pub fn top(&self, count: usize) -> Vec<FilmLikes> {
        let mut ranked: Vec<FilmLikes> = self
            .likes
            .iter()
            .map(|(film_id, users)| FilmLikes {
                film_id: *film_id,
                likes: users.len(),
            })
            .collect();

        ranked.sort_unstable_by(|a, b| b.likes.cmp(&a.likes).then(a.film_id.cmp(&b.film_id)));
        ranked.truncate(count);
        ranked
    }

    pub fn clear(&mut self) {
        self.likes.clear();
    }
}
