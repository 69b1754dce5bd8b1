// src/application/mod.rs
//
// Application layer: wires repositories and services together

pub mod dto;
pub mod state;

pub use dto::{film_dtos, FilmDto};
pub use state::AppState;
