// src/cli.rs
//
// Runs one parsed command against the services and renders the result as JSON.

use serde_json::{json, Value};

use crate::application::{film_dtos, AppState, FilmDto};
use crate::config::Command;
use crate::error::AppResult;
use crate::services::{CreateFilmRequest, CreateUserRequest};

pub fn execute(state: &AppState, command: Command) -> AppResult<Value> {
    let films = &state.film_service;
    let users = &state.user_service;

    let output = match command {
        Command::AddUser {
            email,
            login,
            name,
            birthday,
        } => serde_json::to_value(users.create_user(CreateUserRequest {
            email,
            login,
            name,
            birthday,
        })?)?,
        Command::AddFilm {
            name,
            description,
            release_date,
            duration,
            genres,
            mpa,
        } => serde_json::to_value(FilmDto::from(films.create_film(CreateFilmRequest {
            name,
            description,
            release_date,
            duration,
            genres,
            mpa,
        })?))?,
        Command::Users => serde_json::to_value(users.list_users()?)?,
        Command::Films => serde_json::to_value(film_dtos(films.list_films()?))?,
        Command::DeleteUser { user_id } => {
            users.delete_user(user_id)?;
            json!({ "deleted": user_id })
        }
        Command::DeleteFilm { film_id } => {
            films.delete_film(film_id)?;
            json!({ "deleted": film_id })
        }
        Command::Like { film_id, user_id } => {
            films.add_like(film_id, user_id)?;
            json!({ "film_id": film_id, "likes": films.like_count(film_id)? })
        }
        Command::Unlike { film_id, user_id } => {
            films.remove_like(film_id, user_id)?;
            json!({ "film_id": film_id, "likes": films.like_count(film_id)? })
        }
        Command::Befriend { user_id, friend_id } => {
            users.add_friend(user_id, friend_id)?;
            json!({ "user_id": user_id, "friend_id": friend_id })
        }
        Command::Unfriend { user_id, friend_id } => {
            users.remove_friend(user_id, friend_id)?;
            json!({ "user_id": user_id, "friend_id": friend_id })
        }
        Command::Friends { user_id } => serde_json::to_value(users.friends_of(user_id)?)?,
        Command::CommonFriends { user_id, other_id } => {
            serde_json::to_value(users.common_friends(user_id, other_id)?)?
        }
        Command::Top { count } => serde_json::to_value(film_dtos(films.top_films(count)?))?,
        Command::Genres => serde_json::to_value(films.genres())?,
        Command::Ratings => serde_json::to_value(films.ratings())?,
    };

    Ok(output)
}
