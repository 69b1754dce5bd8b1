// src/services/service_tests.rs
//
// Behavior of the film and user services, run against both stores.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::application::AppState;
    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::domain::{Film, FilmId, User, UserId};
    use crate::error::{AppError, ErrorKind};
    use crate::repositories::{MockFilmRepository, MockUserRepository};
    use crate::services::{
        CreateFilmRequest, CreateUserRequest, FilmService, StoreLock, UpdateFilmRequest,
        UpdateUserRequest, UserService,
    };

    // ========================================================================
    // TEST HELPERS
    // ========================================================================

    fn sqlite_state() -> AppState {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        AppState::sqlite(Arc::new(pool))
    }

    /// Every scenario runs once per store implementation
    fn backends() -> Vec<(&'static str, AppState)> {
        vec![("memory", AppState::in_memory()), ("sqlite", sqlite_state())]
    }

    fn film_request(name: &str) -> CreateFilmRequest {
        CreateFilmRequest {
            name: name.to_string(),
            description: format!("About {}", name),
            release_date: NaiveDate::from_ymd_opt(1999, 3, 31).unwrap(),
            duration: 136,
            genres: vec![4, 6],
            mpa: 4,
        }
    }

    fn user_request(login: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: format!("{}@example.org", login),
            login: login.to_string(),
            name: None,
            birthday: NaiveDate::from_ymd_opt(1964, 9, 2).unwrap(),
        }
    }

    fn add_users(state: &AppState, logins: &[&str]) -> Vec<UserId> {
        logins
            .iter()
            .map(|login| state.user_service.create_user(user_request(login)).unwrap().id)
            .collect()
    }

    fn add_films(state: &AppState, names: &[&str]) -> Vec<FilmId> {
        names
            .iter()
            .map(|name| state.film_service.create_film(film_request(name)).unwrap().id)
            .collect()
    }

    fn user_ids(users: Vec<User>) -> Vec<UserId> {
        users.into_iter().map(|u| u.id).collect()
    }

    fn film_ids(films: Vec<Film>) -> Vec<FilmId> {
        films.into_iter().map(|f| f.id).collect()
    }

    // ========================================================================
    // ENTITY LIFECYCLE
    // ========================================================================

    #[test]
    fn test_create_assigns_ids_and_defaults_name() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["neo", "trinity"]);
            assert_eq!(ids, vec![1, 2], "{}", backend);

            let neo = state.user_service.get_user(1).unwrap();
            assert_eq!(neo.name, "neo", "{}", backend);
        }
    }

    #[test]
    fn test_update_and_get_film() {
        for (backend, state) in backends() {
            let id = add_films(&state, &["The Matrix"])[0];

            let updated = state
                .film_service
                .update_film(UpdateFilmRequest {
                    film_id: id,
                    name: "The Matrix Reloaded".to_string(),
                    description: String::new(),
                    release_date: NaiveDate::from_ymd_opt(2003, 5, 15).unwrap(),
                    duration: 138,
                    genres: vec![6],
                    mpa: 4,
                })
                .unwrap();

            assert_eq!(state.film_service.get_film(id).unwrap(), updated, "{}", backend);
        }
    }

    #[test]
    fn test_update_missing_entities_is_not_found() {
        for (backend, state) in backends() {
            let err = state
                .user_service
                .update_user(UpdateUserRequest {
                    user_id: 77,
                    email: "x@y".to_string(),
                    login: "x".to_string(),
                    name: None,
                    birthday: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                })
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{}", backend);

            let request = film_request("Nope");
            let err = state
                .film_service
                .update_film(UpdateFilmRequest {
                    film_id: 77,
                    name: request.name,
                    description: request.description,
                    release_date: request.release_date,
                    duration: request.duration,
                    genres: request.genres,
                    mpa: request.mpa,
                })
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound, "{}", backend);
        }
    }

    #[test]
    fn test_invalid_payloads_are_rejected() {
        let state = AppState::in_memory();

        let mut request = film_request("Too early");
        request.release_date = NaiveDate::from_ymd_opt(1895, 12, 27).unwrap();
        let err = state.film_service.create_film(request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut request = user_request("bad login");
        request.email = "no-at-sign".to_string();
        let err = state.user_service.create_user(request).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert!(state.film_service.list_films().unwrap().is_empty());
        assert!(state.user_service.list_users().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_catalog_references_are_not_found() {
        let state = AppState::in_memory();

        let mut request = film_request("Unrated");
        request.mpa = 6;
        assert!(matches!(
            state.film_service.create_film(request),
            Err(AppError::NotFound(_))
        ));

        let mut request = film_request("Genreless");
        request.genres = vec![0];
        assert!(matches!(
            state.film_service.create_film(request),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_catalog_lookups() {
        let state = AppState::in_memory();
        assert_eq!(state.film_service.ratings().len(), 5);
        assert_eq!(state.film_service.rating(2).unwrap().name, "PG");
        assert_eq!(state.film_service.genre(1).unwrap().name, "Comedy");
        assert_eq!(state.film_service.genre(99).unwrap_err().kind(), ErrorKind::NotFound);
        assert!(state.film_service.rating(0).is_err());
    }

    #[test]
    fn test_delete_missing_entities_is_not_found() {
        for (backend, state) in backends() {
            assert!(
                matches!(state.film_service.delete_film(5), Err(AppError::NotFound(_))),
                "{}",
                backend
            );
            assert!(
                matches!(state.user_service.delete_user(5), Err(AppError::NotFound(_))),
                "{}",
                backend
            );
        }
    }

    // ========================================================================
    // FRIENDSHIP
    // ========================================================================

    #[test]
    fn test_friendship_is_symmetric() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["a", "b"]);
            state.user_service.add_friend(ids[0], ids[1]).unwrap();

            let of_a = user_ids(state.user_service.friends_of(ids[0]).unwrap());
            let of_b = user_ids(state.user_service.friends_of(ids[1]).unwrap());
            assert_eq!(of_a, vec![ids[1]], "{}", backend);
            assert_eq!(of_b, vec![ids[0]], "{}", backend);
        }
    }

    #[test]
    fn test_add_friend_twice_is_a_no_op() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["a", "b"]);
            state.user_service.add_friend(ids[0], ids[1]).unwrap();
            state.user_service.add_friend(ids[0], ids[1]).unwrap();
            state.user_service.add_friend(ids[1], ids[0]).unwrap();

            let of_a = user_ids(state.user_service.friends_of(ids[0]).unwrap());
            assert_eq!(of_a, vec![ids[1]], "{}", backend);
        }
    }

    #[test]
    fn test_remove_friend_is_idempotent() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["a", "b"]);
            state.user_service.add_friend(ids[0], ids[1]).unwrap();

            state.user_service.remove_friend(ids[1], ids[0]).unwrap();
            state.user_service.remove_friend(ids[1], ids[0]).unwrap();

            assert!(state.user_service.friends_of(ids[0]).unwrap().is_empty(), "{}", backend);
            assert!(state.user_service.friends_of(ids[1]).unwrap().is_empty(), "{}", backend);
        }
    }

    #[test]
    fn test_self_friendship_is_invalid() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["narcissus"]);
            let err = state.user_service.add_friend(ids[0], ids[0]).unwrap_err();

            assert!(matches!(err, AppError::InvalidArgument(_)), "{}", backend);
            assert!(state.user_service.friends_of(ids[0]).unwrap().is_empty(), "{}", backend);
        }
    }

    #[test]
    fn test_friend_operations_check_existence() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["a"]);

            for result in [
                state.user_service.add_friend(ids[0], 404),
                state.user_service.add_friend(404, ids[0]),
                state.user_service.remove_friend(ids[0], 404),
            ] {
                assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound, "{}", backend);
            }
            assert!(state.user_service.friends_of(404).is_err(), "{}", backend);
            assert!(state.user_service.common_friends(ids[0], 404).is_err(), "{}", backend);
            assert!(state.user_service.friends_of(ids[0]).unwrap().is_empty(), "{}", backend);
        }
    }

    #[test]
    fn test_common_friends_excludes_both_users() {
        for (backend, state) in backends() {
            let ids = add_users(&state, &["a", "b", "c", "d"]);
            let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
            state.user_service.add_friend(a, c).unwrap();
            state.user_service.add_friend(b, c).unwrap();
            state.user_service.add_friend(a, b).unwrap();
            state.user_service.add_friend(a, d).unwrap();

            let common = user_ids(state.user_service.common_friends(a, b).unwrap());
            assert_eq!(common, vec![c], "{}", backend);
        }
    }

    // ========================================================================
    // LIKES AND RANKING
    // ========================================================================

    #[test]
    fn test_like_toggle_is_idempotent() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["u"]);
            let films = add_films(&state, &["f"]);

            state.film_service.add_like(films[0], users[0]).unwrap();
            state.film_service.add_like(films[0], users[0]).unwrap();
            assert_eq!(state.film_service.like_count(films[0]).unwrap(), 1, "{}", backend);

            state.film_service.remove_like(films[0], users[0]).unwrap();
            state.film_service.remove_like(films[0], users[0]).unwrap();
            assert_eq!(state.film_service.like_count(films[0]).unwrap(), 0, "{}", backend);
            assert!(state.film_service.top_films(Some(10)).unwrap().is_empty(), "{}", backend);
        }
    }

    #[test]
    fn test_like_on_missing_film_changes_nothing() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["u"]);
            add_films(&state, &["f"]);

            let err = state.film_service.add_like(999, users[0]).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "{}", backend);
            assert!(state.film_service.top_films(None).unwrap().is_empty(), "{}", backend);
        }
    }

    #[test]
    fn test_like_and_unlike_with_missing_ids_are_not_found() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["u"]);
            let films = add_films(&state, &["f"]);
            state.film_service.add_like(films[0], users[0]).unwrap();

            let attempts = [
                state.film_service.remove_like(999, users[0]),
                state.film_service.remove_like(films[0], 999),
                state.film_service.add_like(films[0], 999),
            ];
            for result in attempts {
                let err = result.unwrap_err();
                assert_eq!(err.kind(), ErrorKind::NotFound, "{}: {}", backend, err);
            }

            assert_eq!(state.film_service.like_count(films[0]).unwrap(), 1, "{}", backend);
            let top = film_ids(state.film_service.top_films(None).unwrap());
            assert_eq!(top, vec![films[0]], "{}", backend);
        }
    }

    #[test]
    fn test_top_films_ranking() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["u1", "u2", "u3"]);
            let films = add_films(&state, &["F1", "F2", "F3"]);
            let (f2, f3) = (films[1], films[2]);

            for user in &users[..2] {
                state.film_service.add_like(f2, *user).unwrap();
            }
            for user in &users {
                state.film_service.add_like(f3, *user).unwrap();
            }

            let top = film_ids(state.film_service.top_films(Some(2)).unwrap());
            assert_eq!(top, vec![f3, f2], "{}", backend);

            assert!(state.film_service.top_films(Some(0)).unwrap().is_empty(), "{}", backend);

            let top = film_ids(state.film_service.top_films(Some(10)).unwrap());
            assert_eq!(top, vec![f3, f2], "{}", backend);
        }
    }

    #[test]
    fn test_top_films_tie_breaks_by_ascending_id() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["u1", "u2"]);
            let films = add_films(&state, &["A", "B", "C"]);

            state.film_service.add_like(films[2], users[0]).unwrap();
            state.film_service.add_like(films[0], users[1]).unwrap();
            state.film_service.add_like(films[1], users[0]).unwrap();

            let top = film_ids(state.film_service.top_films(None).unwrap());
            assert_eq!(top, films, "{}", backend);
        }
    }

    #[test]
    fn test_negative_count_is_invalid() {
        let state = AppState::in_memory();
        let err = state.film_service.top_films(Some(-1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    // ========================================================================
    // CASCADE DELETE
    // ========================================================================

    #[test]
    fn test_delete_user_cascades() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["a", "b", "c"]);
            let films = add_films(&state, &["f"]);
            let (a, b, c) = (users[0], users[1], users[2]);

            state.user_service.add_friend(a, b).unwrap();
            state.user_service.add_friend(a, c).unwrap();
            state.film_service.add_like(films[0], a).unwrap();
            state.film_service.add_like(films[0], b).unwrap();

            state.user_service.delete_user(a).unwrap();

            for other in [b, c] {
                let friends = user_ids(state.user_service.friends_of(other).unwrap());
                assert!(!friends.contains(&a), "{}", backend);
            }
            assert_eq!(state.film_service.like_count(films[0]).unwrap(), 1, "{}", backend);
            assert!(state.user_service.get_user(a).is_err(), "{}", backend);
        }
    }

    #[test]
    fn test_delete_film_cascades_likes() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["a"]);
            let films = add_films(&state, &["doomed", "kept"]);
            state.film_service.add_like(films[0], users[0]).unwrap();
            state.film_service.add_like(films[1], users[0]).unwrap();

            state.film_service.delete_film(films[0]).unwrap();

            let top = film_ids(state.film_service.top_films(None).unwrap());
            assert_eq!(top, vec![films[1]], "{}", backend);
        }
    }

    #[test]
    fn test_delete_all_clears_relations() {
        for (backend, state) in backends() {
            let users = add_users(&state, &["a", "b"]);
            let films = add_films(&state, &["f"]);
            state.user_service.add_friend(users[0], users[1]).unwrap();
            state.film_service.add_like(films[0], users[0]).unwrap();

            state.film_service.delete_all_films().unwrap();
            state.user_service.delete_all_users().unwrap();

            assert!(state.film_service.list_films().unwrap().is_empty(), "{}", backend);
            assert!(state.user_service.list_users().unwrap().is_empty(), "{}", backend);

            let users = add_users(&state, &["again"]);
            assert!(state.user_service.friends_of(users[0]).unwrap().is_empty(), "{}", backend);
        }
    }

    // ========================================================================
    // PRECONDITION ORDERING (mocked repositories)
    // ========================================================================

    #[test]
    fn test_missing_film_short_circuits_before_any_write() {
        let mut film_repo = MockFilmRepository::new();
        film_repo.expect_get_by_id().returning(|_| Ok(None));
        film_repo.expect_add_like().times(0);

        // Any call on the user repository would panic: the film check comes first
        let user_repo = MockUserRepository::new();

        let service = FilmService::new(Arc::new(film_repo), Arc::new(user_repo), StoreLock::new());
        let err = service.add_like(999, 1).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref what) if what == "film 999"));
    }

    #[test]
    fn test_missing_friend_short_circuits_before_any_write() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_get_by_id().returning(|id| {
            if id == 1 {
                Ok(Some(User::new(
                    "one@x.y".to_string(),
                    "one".to_string(),
                    None,
                    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                )))
            } else {
                Ok(None)
            }
        });
        user_repo.expect_add_friend().times(0);

        let service = UserService::new(Arc::new(user_repo), StoreLock::new());
        let err = service.add_friend(1, 2).unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref what) if what == "user 2"));
    }

    #[test]
    fn test_self_friendship_is_rejected_before_lookup() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_get_by_id().times(0);

        let service = UserService::new(Arc::new(user_repo), StoreLock::new());
        assert!(matches!(service.add_friend(3, 3), Err(AppError::InvalidArgument(_))));
    }
}
