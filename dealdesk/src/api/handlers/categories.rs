use crate::api::models::categories::CategoryResponse;
use crate::db::handlers::{Categories, Repository};
use crate::errors::{Error, Result};
use crate::{AppState, types::CategoryId};
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    summary = "List categories",
    description = "All categories, sorted by name ascending.",
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<CategoryResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let categories = repo.list(&()).await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    summary = "Get category",
    params(
        ("id" = uuid::Uuid, Path, description = "Category ID"),
    ),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 400, description = "Malformed category ID"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(category_id = %id))]
pub async fn get_category(State(state): State<AppState>, Path(id): Path<CategoryId>) -> Result<Json<CategoryResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    match repo.get_by_id(id).await? {
        Some(category) => Ok(Json(CategoryResponse::from(category))),
        None => Err(Error::NotFound {
            resource: "Category".to_string(),
            id: id.to_string(),
        }),
    }
}
