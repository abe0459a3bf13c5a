use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    audit,
    config::AppConfig,
    dto::auth::{
        Claims, LoginRequest, LoginResponse, PasswordRecoverRequest, ResetPasswordRequest,
        SignupRequest,
    },
    entity::{
        PasswordResetTokens, Users, password_reset_tokens,
        users::{self, Role},
    },
    error::{AppError, AppResult},
    models::{User, user_from_entity},
    response::{ApiResponse, Empty, Meta},
    state::AppState,
    validation::{check_email, check_password, value_exists},
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AppError::internal)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|_| AppError::internal("invalid password hash"))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Signs an HS256 token for `user`, valid for `config.jwt_ttl_hours`.
pub fn issue_token(config: &AppConfig, user: &users::Model) -> AppResult<(String, DateTime<Utc>)> {
    let now = Utc::now();
    let expiration = Duration::try_hours(config.jwt_ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::internal("failed to set expiration"))?;

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(AppError::internal)?;

    Ok((token, expiration))
}

pub async fn signup(state: &AppState, payload: SignupRequest) -> AppResult<ApiResponse<User>> {
    let email = payload.email.trim().to_string();
    check_email(&email)?;
    check_password(&payload.password, &payload.password_repeat)?;

    if value_exists::<Users>(&state.orm, users::Column::Email, email.clone()).await? {
        return Err(AppError::Conflict("email is already taken".into()));
    }

    let now = Utc::now();
    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(hash_password(&payload.password)?),
        role: Set(Role::User),
        username: Set(None),
        mobile_phone: Set(None),
        birth_date: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_signup",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        user_from_entity(user),
        Some(Meta::empty()),
    ))
}

pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let invalid = || AppError::BadRequest("Invalid email or password".into());

    let user = Users::find()
        .filter(users::Column::Email.eq(payload.email.trim()))
        .one(&state.orm)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(invalid());
    }

    let (token, expires_at) = issue_token(&state.config, &user)?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_login",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at,
        },
        Some(Meta::empty()),
    ))
}

pub async fn password_recover(
    state: &AppState,
    payload: PasswordRecoverRequest,
) -> AppResult<ApiResponse<Empty>> {
    let user = Users::find()
        .filter(users::Column::Email.eq(payload.email.trim()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let now = Utc::now();
    let expires_at = Duration::try_minutes(state.config.reset_token_ttl_minutes)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| AppError::internal("failed to set expiration"))?;
    let token = Uuid::new_v4().simple().to_string();

    password_reset_tokens::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        token: Set(token.clone()),
        expires_at: Set(expires_at.into()),
        used: Set(false),
        created_at: Set(now.into()),
    }
    .insert(&state.orm)
    .await?;

    // Delivery is handled outside this service; the link is only logged.
    let link = format!("{}?token={}", state.config.reset_link_base, token);
    tracing::info!(user_id = %user.id, %link, "password reset requested");

    audit::record(
        &state.orm,
        Some(user.id),
        "password_recover",
        "password_reset_tokens",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Password reset email sent",
        Empty::default(),
        Some(Meta::empty()),
    ))
}

pub async fn reset_password(
    state: &AppState,
    payload: ResetPasswordRequest,
) -> AppResult<ApiResponse<Empty>> {
    let invalid = || AppError::BadRequest("Invalid reset token".into());
    check_password(&payload.password, &payload.password_repeat)?;
    let token = payload.token.trim();
    let password_hash = hash_password(&payload.password)?;

    let txn = state.orm.begin().await?;
    // Claiming is the first write, so of two concurrent resets only one
    // sees `used = false`.
    let claimed = PasswordResetTokens::update_many()
        .col_expr(password_reset_tokens::Column::Used, Expr::value(true))
        .filter(password_reset_tokens::Column::Token.eq(token))
        .filter(password_reset_tokens::Column::Used.eq(false))
        .exec(&txn)
        .await?;
    if claimed.rows_affected != 1 {
        return Err(invalid());
    }

    let reset = PasswordResetTokens::find()
        .filter(password_reset_tokens::Column::Token.eq(token))
        .one(&txn)
        .await?
        .ok_or_else(invalid)?;
    if reset.expires_at.with_timezone(&Utc) <= Utc::now() {
        return Err(invalid());
    }

    let user = Users::find_by_id(reset.user_id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    store_password_hash(&txn, user, password_hash).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(reset.user_id),
        "password_reset",
        "users",
        serde_json::json!({ "user_id": reset.user_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Password successfully changed",
        Empty::default(),
        Some(Meta::empty()),
    ))
}

pub async fn set_password(
    db: &impl ConnectionTrait,
    user: users::Model,
    password: &str,
) -> AppResult<users::Model> {
    let password_hash = hash_password(password)?;
    store_password_hash(db, user, password_hash).await
}

async fn store_password_hash(
    db: &impl ConnectionTrait,
    user: users::Model,
    password_hash: String,
) -> AppResult<users::Model> {
    let mut active: users::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(Utc::now().into());
    Ok(active.update(db).await?)
}

/// Creates the admin account, or promotes and re-keys an existing user with
/// that email.
pub async fn bootstrap_admin(
    db: &impl ConnectionTrait,
    email: &str,
    password: &str,
) -> AppResult<Uuid> {
    let existing = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await?;

    let now = Utc::now();
    let admin = match existing {
        Some(user) => {
            let mut active: users::ActiveModel = user.into();
            active.role = Set(Role::Admin);
            active.password_hash = Set(hash_password(password)?);
            active.updated_at = Set(now.into());
            active.update(db).await?
        }
        None => {
            users::ActiveModel {
                id: Set(Uuid::new_v4()),
                email: Set(email.to_string()),
                password_hash: Set(hash_password(password)?),
                role: Set(Role::Admin),
                username: Set(None),
                mobile_phone: Set(None),
                birth_date: Set(None),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(db)
            .await?
        }
    };

    tracing::info!(email, "admin account ensured");
    Ok(admin.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_claims;

    fn user(role: Role) -> users::Model {
        let now = Utc::now();
        users::Model {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: String::new(),
            role,
            username: None,
            mobile_phone: None,
            birth_date: None,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn hashes_verify_only_the_hashed_password() {
        let hash = hash_password("pass1").unwrap();
        assert!(verify_password("pass1", &hash).unwrap());
        assert!(!verify_password("pass2", &hash).unwrap());
    }

    #[test]
    fn issued_tokens_decode_with_the_same_secret_only() {
        let config = AppConfig::new("sqlite::memory:", "secret");
        let admin = user(Role::Admin);
        let (token, expires_at) = issue_token(&config, &admin).unwrap();
        assert!(expires_at > Utc::now());

        let claims = decode_claims(&token, "secret").unwrap();
        assert_eq!(claims.sub, admin.id.to_string());
        assert_eq!(claims.role, Role::Admin);

        assert!(decode_claims(&token, "other-secret").is_err());
    }

    #[test]
    fn out_of_range_lifetime_is_an_error_not_a_panic() {
        let mut config = AppConfig::new("sqlite::memory:", "secret");
        config.jwt_ttl_hours = i64::MAX;
        let err = issue_token(&config, &user(Role::User)).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
