mod common;

use ozinshe_api::{
    dto::auth::{PasswordRecoverRequest, ResetPasswordRequest, SignupRequest},
    entity::{PasswordResetTokens, favorites, password_reset_tokens, users::Role},
    error::AppError,
    services::{auth_service, favorite_service},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tokio::task::JoinSet;
use uuid::Uuid;

use common::{
    create_movie, create_user, movie_request, remove_db_file, seed_lookups, setup_file_state,
    setup_state,
};

const CALLERS: usize = 6;

/// Every result is either a success or `is_expected`; returns the success count.
fn tally<T>(
    results: Vec<Result<T, AppError>>,
    is_expected: impl Fn(&AppError) -> bool,
) -> usize {
    let mut ok = 0;
    for result in results {
        match result {
            Ok(_) => ok += 1,
            Err(err) => assert!(is_expected(&err), "unexpected error: {err:?}"),
        }
    }
    ok
}

#[tokio::test]
async fn duplicate_insert_is_reported_as_conflict() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let lookups = seed_lookups(&state, &admin).await?;
    let movie = create_movie(
        &state,
        &admin,
        movie_request("Night", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await?
    .movie;

    let favorite = || favorites::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        movie_id: Set(movie.id),
        created_at: Set(chrono::Utc::now().into()),
    };
    favorite().insert(&state.orm).await?;
    let err = favorite()
        .insert(&state.orm)
        .await
        .expect_err("unique index rejects the second row");
    assert!(matches!(AppError::from(err), AppError::Conflict(_)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_favorites_and_signups_conflict_cleanly() -> anyhow::Result<()> {
    let (state, path) = setup_file_state(8).await?;
    let admin = create_user(&state, Role::Admin, "admin@x.com", "admin1").await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    let lookups = seed_lookups(&state, &admin).await?;
    let movie = create_movie(
        &state,
        &admin,
        movie_request("Night", lookups.movie.id, lookups.adult.id, vec![]),
    )
    .await?
    .movie;

    let movie_id = movie.id;
    let mut tasks = JoinSet::new();
    for _ in 0..CALLERS {
        let state = state.clone();
        let user = user.clone();
        tasks.spawn(async move { favorite_service::add_favorite(&state, &user, movie_id).await });
    }
    let favorites = tasks.join_all().await;
    let added = tally(favorites, |err| matches!(err, AppError::Conflict(_)));
    assert_eq!(added, 1);

    let mut tasks = JoinSet::new();
    for _ in 0..CALLERS {
        let state = state.clone();
        tasks.spawn(async move {
            auth_service::signup(
                &state,
                SignupRequest {
                    email: "same@x.com".into(),
                    password: "pass1".into(),
                    password_repeat: "pass1".into(),
                },
            )
            .await
        });
    }
    let signups = tasks.join_all().await;
    let created = tally(signups, |err| matches!(err, AppError::Conflict(_)));
    assert_eq!(created, 1);

    state.orm.close().await?;
    remove_db_file(&path);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_resets_use_the_token_once() -> anyhow::Result<()> {
    let (state, path) = setup_file_state(8).await?;
    let user = create_user(&state, Role::User, "user@x.com", "user1").await?;
    auth_service::password_recover(
        &state,
        PasswordRecoverRequest {
            email: "user@x.com".into(),
        },
    )
    .await?;
    let token = PasswordResetTokens::find()
        .filter(password_reset_tokens::Column::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .expect("reset token")
        .token;

    let mut tasks = JoinSet::new();
    for n in 0..4 {
        let state = state.clone();
        let token = token.clone();
        tasks.spawn(async move {
            let password = format!("newpass{n}");
            auth_service::reset_password(
                &state,
                ResetPasswordRequest {
                    token,
                    password: password.clone(),
                    password_repeat: password,
                },
            )
            .await
        });
    }
    let resets = tasks.join_all().await;
    let applied = tally(resets, |err| matches!(err, AppError::BadRequest(_)));
    assert_eq!(applied, 1);

    let stored = PasswordResetTokens::find()
        .filter(password_reset_tokens::Column::Token.eq(token.as_str()))
        .one(&state.orm)
        .await?
        .expect("reset token");
    assert!(stored.used);

    state.orm.close().await?;
    remove_db_file(&path);
    Ok(())
}
