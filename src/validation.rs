//! Input checks and `COUNT`-based existence checks shared by the services.
//!
//! Existence checks propagate store failures; a failed query is never read
//! as "no such row".

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Value,
};

use crate::error::{AppError, AppResult};

pub const PASSWORD_MIN_LEN: usize = 4;
pub const PASSWORD_MAX_LEN: usize = 50;
pub const NAME_MIN_LEN: usize = 2;

async fn exists_where<E>(db: &impl ConnectionTrait, condition: Condition) -> AppResult<bool>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    let count = E::find().filter(condition).count(db).await?;
    Ok(count > 0)
}

/// True when at least one row of `E` has `column = value`.
pub async fn value_exists<E>(
    db: &impl ConnectionTrait,
    column: E::Column,
    value: impl Into<Value>,
) -> AppResult<bool>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    exists_where::<E>(db, Condition::all().add(column.eq(value))).await
}

/// Like [`value_exists`] but ignores the row whose `id_column` is `id`,
/// so an update may keep its own value.
pub async fn value_exists_except<E>(
    db: &impl ConnectionTrait,
    column: E::Column,
    value: impl Into<Value>,
    id_column: E::Column,
    id: impl Into<Value>,
) -> AppResult<bool>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    exists_where::<E>(
        db,
        Condition::all().add(column.eq(value)).add(id_column.ne(id)),
    )
    .await
}

/// True when a row of `E` matches both `col_a = a` and `col_b = b`.
pub async fn pair_exists<E>(
    db: &impl ConnectionTrait,
    col_a: E::Column,
    a: impl Into<Value>,
    col_b: E::Column,
    b: impl Into<Value>,
) -> AppResult<bool>
where
    E: EntityTrait,
    E::Model: Sync + 'static,
{
    exists_where::<E>(db, Condition::all().add(col_a.eq(a)).add(col_b.eq(b))).await
}

pub fn check_password(password: &str, repeat: &str) -> AppResult<()> {
    let len = password.chars().count();
    if password.is_empty() || len < PASSWORD_MIN_LEN || len > PASSWORD_MAX_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"
        )));
    }
    if password != repeat {
        return Err(AppError::BadRequest("passwords should be the same".into()));
    }
    Ok(())
}

pub fn check_email(email: &str) -> AppResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    };
    if !valid || email.chars().any(char::is_whitespace) {
        return Err(AppError::BadRequest("invalid email".into()));
    }
    Ok(())
}

/// Trims `value` and requires at least [`NAME_MIN_LEN`] characters.
pub fn check_name(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < NAME_MIN_LEN {
        return Err(AppError::BadRequest(format!(
            "{field} must be at least {NAME_MIN_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Rejects blank required text fields.
pub fn require_text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims every link and rejects blank entries; order is preserved.
pub fn require_links(field: &str, links: Vec<String>) -> AppResult<Vec<String>> {
    links
        .into_iter()
        .map(|link| require_text(field, &link))
        .collect()
}

/// Drops repeated ids, keeping first occurrences in order.
pub fn dedup_ids<T: PartialEq + Copy>(ids: &[T]) -> Vec<T> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}
