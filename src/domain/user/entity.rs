use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Entity;

pub type UserId = u64;

/// A registered user
///
/// Friendships live in the friendship graph, never on the record itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier (0 until added)
    pub id: UserId,

    pub email: String,

    pub login: String,

    /// Display name; falls back to the login when left empty
    pub name: String,

    pub birthday: NaiveDate,
}

impl User {
    pub fn new(email: String, login: String, name: Option<String>, birthday: NaiveDate) -> Self {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => login.clone(),
        };

        Self {
            id: 0,
            email,
            login,
            name,
            birthday,
        }
    }
}

impl Entity for User {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
