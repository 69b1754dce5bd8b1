/// Configuration for the filmorate command-line tool.
/// Handles command-line argument parsing and the config structure.
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::db::get_database_path;
use crate::domain::{FilmId, GenreId, RatingId, UserId};
use crate::error::AppResult;

#[derive(Parser, Debug)]
#[command(name = "filmorate")]
#[command(about = "Films, likes and friendships", long_about = None)]
pub struct Config {
    /// SQLite database file (default: {data_dir}/filmorate/filmorate.db)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Single-command smoke mode: run against an empty in-memory store that
    /// is discarded when the command exits
    #[arg(long, conflicts_with = "database")]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Register a user
    AddUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        login: String,
        /// Display name (defaults to the login)
        #[arg(long)]
        name: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        birthday: NaiveDate,
    },
    /// Register a film
    AddFilm {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// YYYY-MM-DD
        #[arg(long)]
        release_date: NaiveDate,
        /// Minutes
        #[arg(long)]
        duration: u32,
        /// Genre id, repeatable
        #[arg(long = "genre")]
        genres: Vec<GenreId>,
        /// MPA rating id
        #[arg(long)]
        mpa: RatingId,
    },
    Users,
    Films,
    DeleteUser { user_id: UserId },
    DeleteFilm { film_id: FilmId },
    Like { film_id: FilmId, user_id: UserId },
    Unlike { film_id: FilmId, user_id: UserId },
    Befriend { user_id: UserId, friend_id: UserId },
    Unfriend { user_id: UserId, friend_id: UserId },
    Friends { user_id: UserId },
    CommonFriends { user_id: UserId, other_id: UserId },
    /// Most-liked films
    Top {
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
    },
    Genres,
    Ratings,
}

impl Config {
    /// Parse command-line arguments into Config
    pub fn from_args() -> Self {
        Config::parse()
    }

    /// Explicit `--database` path, or the per-user default
    pub fn database_path(&self) -> AppResult<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_custom_database() {
        let config =
            Config::try_parse_from(["filmorate", "--database", "/tmp/custom.db", "films"]).unwrap();
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/custom.db"));
        assert!(!config.memory);
        assert_eq!(config.command, Command::Films);
    }

    #[test]
    fn test_memory_conflicts_with_database() {
        let result =
            Config::try_parse_from(["filmorate", "--memory", "--database", "x.db", "films"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_help_says_data_is_discarded() {
        let command = Config::command();
        let memory = command
            .get_arguments()
            .find(|arg| arg.get_id() == "memory")
            .unwrap();
        let help = memory.get_help().unwrap().to_string();

        assert!(help.contains("Single-command"), "{}", help);
        assert!(help.contains("discarded"), "{}", help);
    }

    #[test]
    fn test_add_film_with_repeated_genres() {
        let config = Config::try_parse_from([
            "filmorate",
            "--memory",
            "add-film",
            "--name",
            "Arrival",
            "--release-date",
            "2016-11-11",
            "--duration",
            "116",
            "--genre",
            "2",
            "--genre",
            "4",
            "--mpa",
            "3",
        ])
        .unwrap();

        match config.command {
            Command::AddFilm {
                genres,
                release_date,
                description,
                ..
            } => {
                assert_eq!(genres, vec![2, 4]);
                assert_eq!(release_date, NaiveDate::from_ymd_opt(2016, 11, 11).unwrap());
                assert!(description.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_top_accepts_negative_count() {
        let config = Config::try_parse_from(["filmorate", "top", "--count", "-3"]).unwrap();
        assert_eq!(config.command, Command::Top { count: Some(-3) });
    }
}
