pub mod entity;
pub mod invariants;

pub use entity::{Film, FilmId};
pub use invariants::{validate_film, validate_film_references, EARLIEST_RELEASE_DATE};
