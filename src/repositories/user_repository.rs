// src/repositories/user_repository.rs
//
// User persistence and the friendship relation

use chrono::NaiveDate;
use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::{User, UserId};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Stores a new user and returns it with its assigned id
    fn add(&self, user: &User) -> AppResult<User>;
    /// Replaces the user with the same id; NotFound if absent
    fn update(&self, user: &User) -> AppResult<User>;
    fn get_by_id(&self, id: UserId) -> AppResult<Option<User>>;
    fn list_all(&self) -> AppResult<Vec<User>>;
    /// Removes the user with all friendships and likes; NotFound if absent
    fn delete(&self, id: UserId) -> AppResult<()>;
    fn delete_all(&self) -> AppResult<()>;
    /// Inserts both directions of the friendship
    fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()>;
    /// Removes both directions of the friendship
    fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()>;
    fn list_friends(&self, user_id: UserId) -> AppResult<Vec<User>>;
    fn common_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let id: i64 = row.get("id")?;
        let birthday_str: String = row.get("birthday")?;
        let birthday = NaiveDate::parse_from_str(&birthday_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(User {
            id: id as UserId,
            email: row.get("email")?,
            login: row.get("login")?,
            name: row.get("name")?,
            birthday,
        })
    }

    fn query_users(&self, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(sql)?;
        let users = stmt
            .query_map(params, Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}

impl UserRepository for SqliteUserRepository {
    fn add(&self, user: &User) -> AppResult<User> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO users (email, login, name, birthday) VALUES (?1, ?2, ?3, ?4)",
            params![user.email, user.login, user.name, user.birthday.to_string()],
        )?;

        let mut stored = user.clone();
        stored.id = conn.last_insert_rowid() as UserId;
        Ok(stored)
    }

    fn update(&self, user: &User) -> AppResult<User> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute(
            "UPDATE users SET email = ?1, login = ?2, name = ?3, birthday = ?4 WHERE id = ?5",
            params![
                user.email,
                user.login,
                user.name,
                user.birthday.to_string(),
                user.id as i64,
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::user_not_found(user.id));
        }
        Ok(user.clone())
    }

    fn get_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT * FROM users WHERE id = ?1")?;

        match stmt.query_row(params![id as i64], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<User>> {
        self.query_users("SELECT * FROM users ORDER BY id", params![])
    }

    fn delete(&self, id: UserId) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM friends WHERE user_id = ?1 OR friend_id = ?1",
            params![id as i64],
        )?;
        tx.execute("DELETE FROM likes WHERE user_id = ?1", params![id as i64])?;
        let rows_affected = tx.execute("DELETE FROM users WHERE id = ?1", params![id as i64])?;

        if rows_affected == 0 {
            return Err(AppError::user_not_found(id));
        }

        tx.commit()?;
        Ok(())
    }

    fn delete_all(&self) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM friends", [])?;
        tx.execute("DELETE FROM likes", [])?;
        tx.execute("DELETE FROM users", [])?;

        tx.commit()?;
        Ok(())
    }

    fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO friends (user_id, friend_id) VALUES (?1, ?2)")?;
            stmt.execute(params![user_id as i64, friend_id as i64])?;
            stmt.execute(params![friend_id as i64, user_id as i64])?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let conn = self.pool.get()?;
        conn.execute(
            "DELETE FROM friends
             WHERE (user_id = ?1 AND friend_id = ?2) OR (user_id = ?2 AND friend_id = ?1)",
            params![user_id as i64, friend_id as i64],
        )?;
        Ok(())
    }

    fn list_friends(&self, user_id: UserId) -> AppResult<Vec<User>> {
        self.query_users(
            "SELECT u.* FROM users u
             JOIN friends f ON u.id = f.friend_id
             WHERE f.user_id = ?1
             ORDER BY u.id",
            params![user_id as i64],
        )
    }

    fn common_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        self.query_users(
            "SELECT u.* FROM users u
             JOIN friends f1 ON f1.friend_id = u.id AND f1.user_id = ?1
             JOIN friends f2 ON f2.friend_id = u.id AND f2.user_id = ?2
             ORDER BY u.id",
            params![user_id as i64, other_id as i64],
        )
    }
}
