use crate::api::models::merchants::MerchantResponse;
use crate::db::handlers::{Merchants, Repository, merchants::MerchantFilter};
use crate::errors::{Error, Result};
use crate::{AppState, types::MerchantId};
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/merchants",
    tag = "merchants",
    summary = "List merchants",
    description = "All merchants, sorted by name ascending.",
    responses(
        (status = 200, description = "List of merchants", body = Vec<MerchantResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_merchants(State(state): State<AppState>) -> Result<Json<Vec<MerchantResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Merchants::new(&mut conn);

    let merchants = repo.list(&MerchantFilter::new()).await?;

    Ok(Json(merchants.into_iter().map(MerchantResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/merchants/{id}",
    tag = "merchants",
    summary = "Get merchant",
    params(
        ("id" = uuid::Uuid, Path, description = "Merchant ID"),
    ),
    responses(
        (status = 200, description = "Merchant details", body = MerchantResponse),
        (status = 400, description = "Malformed merchant ID"),
        (status = 404, description = "Merchant not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(merchant_id = %id))]
pub async fn get_merchant(State(state): State<AppState>, Path(id): Path<MerchantId>) -> Result<Json<MerchantResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Merchants::new(&mut conn);

    let merchant = repo.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Merchant".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(MerchantResponse::from(merchant)))
}
