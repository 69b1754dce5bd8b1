// src/services/user_service.rs
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::domain::{validate_user, User, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;
use crate::services::StoreLock;

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub email: String,
    pub login: String,
    /// Falls back to the login when absent or blank
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Full replacement of an existing user's fields
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub user_id: UserId,
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    lock: StoreLock,
}

impl UserService {
    pub fn new(user_repo: Arc<dyn UserRepository>, lock: StoreLock) -> Self {
        Self { user_repo, lock }
    }

    pub fn create_user(&self, request: CreateUserRequest) -> AppResult<User> {
        let user = User::new(request.email, request.login, request.name, request.birthday);
        Self::check_user(&user)?;

        let _guard = self.lock.write();
        let user = self.user_repo.add(&user)?;

        log::info!("Created user {} '{}'", user.id, user.login);
        Ok(user)
    }

    pub fn update_user(&self, request: UpdateUserRequest) -> AppResult<User> {
        let mut user = User::new(request.email, request.login, request.name, request.birthday);
        user.id = request.user_id;
        Self::check_user(&user)?;

        let _guard = self.lock.write();
        let user = self.user_repo.update(&user).inspect_err(|e| {
            log::warn!("Update of user {} rejected: {}", request.user_id, e);
        })?;

        log::info!("Updated user {}", user.id);
        Ok(user)
    }

    pub fn get_user(&self, user_id: UserId) -> AppResult<User> {
        let _guard = self.lock.read();
        self.require_user(user_id)
    }

    pub fn list_users(&self) -> AppResult<Vec<User>> {
        let _guard = self.lock.read();
        self.user_repo.list_all()
    }

    /// Removes the user together with all friendships and likes
    pub fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        let _guard = self.lock.write();
        self.require_user(user_id)?;
        self.user_repo.delete(user_id)?;

        log::info!("Deleted user {}", user_id);
        Ok(())
    }

    pub fn delete_all_users(&self) -> AppResult<()> {
        let _guard = self.lock.write();
        self.user_repo.delete_all()?;

        log::info!("Deleted all users");
        Ok(())
    }

    /// Idempotent; a user cannot befriend themselves
    pub fn add_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        if user_id == friend_id {
            log::warn!("User {} tried to befriend themselves", user_id);
            return Err(AppError::InvalidArgument(format!(
                "user {} cannot befriend themselves",
                user_id
            )));
        }

        let _guard = self.lock.write();
        self.require_user(user_id)?;
        self.require_user(friend_id)?;
        self.user_repo.add_friend(user_id, friend_id)?;

        log::info!("Users {} and {} are now friends", user_id, friend_id);
        Ok(())
    }

    /// Only the users are checked; a missing friendship is a no-op
    pub fn remove_friend(&self, user_id: UserId, friend_id: UserId) -> AppResult<()> {
        let _guard = self.lock.write();
        self.require_user(user_id)?;
        self.require_user(friend_id)?;
        self.user_repo.remove_friend(user_id, friend_id)?;

        log::info!("Users {} and {} are no longer friends", user_id, friend_id);
        Ok(())
    }

    pub fn friends_of(&self, user_id: UserId) -> AppResult<Vec<User>> {
        let _guard = self.lock.read();
        self.require_user(user_id)?;
        self.user_repo.list_friends(user_id)
    }

    pub fn common_friends(&self, user_id: UserId, other_id: UserId) -> AppResult<Vec<User>> {
        let _guard = self.lock.read();
        self.require_user(user_id)?;
        self.require_user(other_id)?;

        let friends = self.user_repo.common_friends(user_id, other_id)?;
        log::debug!(
            "Users {} and {} share {} friends",
            user_id,
            other_id,
            friends.len()
        );
        Ok(friends)
    }

    fn check_user(user: &User) -> AppResult<()> {
        validate_user(user, Utc::now().date_naive()).map_err(|e| {
            log::warn!("User '{}' rejected: {}", user.login, e);
            AppError::from_domain(e)
        })
    }

    fn require_user(&self, user_id: UserId) -> AppResult<User> {
        self.user_repo.get_by_id(user_id)?.ok_or_else(|| {
            log::warn!("User {} not found", user_id);
            AppError::user_not_found(user_id)
        })
    }
}
