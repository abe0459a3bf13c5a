//! Admin CRUD for the lookup tables: categories, project types and age
//! categories.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::catalog::{LookupList, LookupRequest},
    entity::{
        AgeCategories, Categories, MovieCategories, MovieTypes, Movies, age_categories,
        categories, movie_categories, movie_types, movies,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Lookup, age_category_from_entity, category_from_entity, movie_type_from_entity},
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{check_name, value_exists, value_exists_except},
};

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<LookupList>> {
    let items: Vec<Lookup> = Categories::find()
        .order_by_asc(categories::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(category_from_entity)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Categories", LookupList { items }, Some(meta)))
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: LookupRequest,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let name = check_name("name", &payload.name)?;
    if value_exists::<Categories>(&state.orm, categories::Column::Name, name.clone()).await? {
        return Err(AppError::Conflict("category name already exists".into()));
    }

    let created = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "category_create",
        "categories",
        serde_json::json!({ "id": created.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category created",
        category_from_entity(created),
        Some(Meta::empty()),
    ))
}

pub async fn get_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let found = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Category"))?;
    Ok(ApiResponse::success("Category", category_from_entity(found), Some(Meta::empty())))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: LookupRequest,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let name = check_name("name", &payload.name)?;
    let existing = Categories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    if value_exists_except::<Categories>(
        &state.orm,
        categories::Column::Name,
        name.clone(),
        categories::Column::Id,
        id,
    )
    .await?
    {
        return Err(AppError::Conflict("category name already exists".into()));
    }

    let mut active: categories::ActiveModel = existing.into();
    active.name = Set(name);
    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "category_update",
        "categories",
        serde_json::json!({ "id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Category updated",
        category_from_entity(updated),
        Some(Meta::empty()),
    ))
}

/// Deleting a category drops its movie links with it.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let txn = state.orm.begin().await?;
    let existing = Categories::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    MovieCategories::delete_many()
        .filter(movie_categories::Column::CategoryId.eq(id))
        .exec(&txn)
        .await?;
    Categories::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "category_delete",
        "categories",
        serde_json::json!({ "id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "The category has been deleted successfully",
        category_from_entity(existing),
        Some(Meta::empty()),
    ))
}

pub async fn list_movie_types(state: &AppState) -> AppResult<ApiResponse<LookupList>> {
    let items: Vec<Lookup> = MovieTypes::find()
        .order_by_asc(movie_types::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(movie_type_from_entity)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Types", LookupList { items }, Some(meta)))
}

pub async fn create_movie_type(
    state: &AppState,
    user: &AuthUser,
    payload: LookupRequest,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let name = check_name("name", &payload.name)?;
    if value_exists::<MovieTypes>(&state.orm, movie_types::Column::Name, name.clone()).await? {
        return Err(AppError::Conflict("type name already exists".into()));
    }

    let created = movie_types::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "movie_type_create",
        "movie_types",
        serde_json::json!({ "id": created.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Type created",
        movie_type_from_entity(created),
        Some(Meta::empty()),
    ))
}

pub async fn get_movie_type(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let found = MovieTypes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Type"))?;
    Ok(ApiResponse::success("Type", movie_type_from_entity(found), Some(Meta::empty())))
}

pub async fn update_movie_type(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: LookupRequest,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let name = check_name("name", &payload.name)?;
    let existing = MovieTypes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Type"))?;

    if value_exists_except::<MovieTypes>(
        &state.orm,
        movie_types::Column::Name,
        name.clone(),
        movie_types::Column::Id,
        id,
    )
    .await?
    {
        return Err(AppError::Conflict("type name already exists".into()));
    }

    let mut active: movie_types::ActiveModel = existing.into();
    active.name = Set(name);
    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "movie_type_update",
        "movie_types",
        serde_json::json!({ "id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Type updated",
        movie_type_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_movie_type(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let existing = MovieTypes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Type"))?;

    if value_exists::<Movies>(&state.orm, movies::Column::TypeId, id).await? {
        return Err(AppError::Conflict("type is still used by movies".into()));
    }
    MovieTypes::delete_by_id(id).exec(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "movie_type_delete",
        "movie_types",
        serde_json::json!({ "id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Type deleted successfully",
        movie_type_from_entity(existing),
        Some(Meta::empty()),
    ))
}

pub async fn list_age_categories(state: &AppState) -> AppResult<ApiResponse<LookupList>> {
    let items: Vec<Lookup> = AgeCategories::find()
        .order_by_asc(age_categories::Column::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(age_category_from_entity)
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Age categories", LookupList { items }, Some(meta)))
}

pub async fn create_age_category(
    state: &AppState,
    user: &AuthUser,
    payload: LookupRequest,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let name = check_name("name", &payload.name)?;
    if value_exists::<AgeCategories>(&state.orm, age_categories::Column::Name, name.clone()).await? {
        return Err(AppError::Conflict("age category name already exists".into()));
    }

    let created = age_categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "age_category_create",
        "age_categories",
        serde_json::json!({ "id": created.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Age category created",
        age_category_from_entity(created),
        Some(Meta::empty()),
    ))
}

pub async fn get_age_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let found = AgeCategories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Age category"))?;
    Ok(ApiResponse::success("Age category", age_category_from_entity(found), Some(Meta::empty())))
}

pub async fn update_age_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: LookupRequest,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let name = check_name("name", &payload.name)?;
    let existing = AgeCategories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Age category"))?;

    if value_exists_except::<AgeCategories>(
        &state.orm,
        age_categories::Column::Name,
        name.clone(),
        age_categories::Column::Id,
        id,
    )
    .await?
    {
        return Err(AppError::Conflict("age category name already exists".into()));
    }

    let mut active: age_categories::ActiveModel = existing.into();
    active.name = Set(name);
    let updated = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "age_category_update",
        "age_categories",
        serde_json::json!({ "id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Age category updated",
        age_category_from_entity(updated),
        Some(Meta::empty()),
    ))
}

pub async fn delete_age_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Lookup>> {
    ensure_admin(user)?;
    let existing = AgeCategories::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound("Age category"))?;

    if value_exists::<Movies>(&state.orm, movies::Column::AgeCategoryId, id).await? {
        return Err(AppError::Conflict(
            "age category is still used by movies".into(),
        ));
    }
    AgeCategories::delete_by_id(id).exec(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(user.user_id),
        "age_category_delete",
        "age_categories",
        serde_json::json!({ "id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Age category deleted successfully",
        age_category_from_entity(existing),
        Some(Meta::empty()),
    ))
}
