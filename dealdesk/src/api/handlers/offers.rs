use crate::api::models::{merchants::MerchantResponse, offers::OfferResponse};
use crate::db::handlers::{Merchants, Offers, Repository};
use crate::errors::{Error, Result};
use crate::{AppState, types::OfferId};
use axum::{
    Json,
    extract::{Path, State},
};

#[utoipa::path(
    get,
    path = "/offers",
    tag = "offers",
    summary = "List active offers",
    description = "Active offers only, newest first. Each offer embeds its merchant.",
    responses(
        (status = 200, description = "List of active offers", body = Vec<OfferResponse>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_offers(State(state): State<AppState>) -> Result<Json<Vec<OfferResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Offers::new(&mut conn);

    let offers = repo.list_active_with_merchants().await?;

    Ok(Json(offers.into_iter().map(OfferResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/offers/{id}",
    tag = "offers",
    summary = "Get offer",
    description = "A single offer with its merchant. Inactive offers are still returned by ID.",
    params(
        ("id" = uuid::Uuid, Path, description = "Offer ID"),
    ),
    responses(
        (status = 200, description = "Offer details", body = OfferResponse),
        (status = 400, description = "Malformed offer ID"),
        (status = 404, description = "Offer not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(offer_id = %id))]
pub async fn get_offer(State(state): State<AppState>, Path(id): Path<OfferId>) -> Result<Json<OfferResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let offer = Offers::new(&mut conn).get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Offer".to_string(),
        id: id.to_string(),
    })?;

    // merchant_id is a non-null foreign key, so the merchant row exists unless deleted concurrently
    let merchant = Merchants::new(&mut conn).get_by_id(offer.merchant_id).await?.ok_or_else(|| Error::NotFound {
        resource: "Merchant".to_string(),
        id: offer.merchant_id.to_string(),
    })?;

    Ok(Json(OfferResponse::from(offer).with_merchant(MerchantResponse::from(merchant))))
}

#[cfg(test)]
mod tests {
    use crate::api::models::offers::OfferResponse;
    use crate::test_utils::{create_test_app, create_test_merchant, create_test_offer};
    use chrono::{Duration, Utc};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_offers_never_includes_inactive(pool: PgPool) {
        let (server, _) = create_test_app(pool.clone()).await;
        let acme = create_test_merchant(&pool, "Acme").await;
        let mango = create_test_merchant(&pool, "Mango").await;

        let now = Utc::now();
        create_test_offer(&pool, acme.id, "Week old", true, now - Duration::days(7)).await;
        create_test_offer(&pool, mango.id, "Withdrawn", false, now).await;
        create_test_offer(&pool, mango.id, "Brand new", true, now - Duration::minutes(5)).await;
        create_test_offer(&pool, acme.id, "Yesterday", true, now - Duration::days(1)).await;

        let response = server.get("/api/offers").await;
        response.assert_status_ok();

        let offers: Vec<OfferResponse> = response.json();
        let titles: Vec<_> = offers.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Brand new", "Yesterday", "Week old"]);
        assert!(offers.iter().all(|o| o.is_active));

        for offer in &offers {
            let merchant = offer.merchant.as_ref().expect("listed offers embed their merchant");
            assert_eq!(merchant.id, offer.merchant_id);
        }
        assert_eq!(offers[0].merchant.as_ref().unwrap().name, "Mango");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_offers_empty(pool: PgPool) {
        let (server, _) = create_test_app(pool).await;

        let response = server.get("/api/offers").await;
        response.assert_status_ok();
        response.assert_json(&serde_json::json!([]));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_get_offer_embeds_merchant(pool: PgPool) {
        let (server, _) = create_test_app(pool.clone()).await;
        let acme = create_test_merchant(&pool, "Acme").await;
        let offer = create_test_offer(&pool, acme.id, "Withdrawn", false, Utc::now()).await;

        let response = server.get(&format!("/api/offers/{}", offer.id)).await;
        response.assert_status_ok();

        let json: serde_json::Value = response.json();
        assert_eq!(json["title"], "Withdrawn");
        assert_eq!(json["isActive"], false);
        assert_eq!(json["merchant"]["name"], "Acme");

        server
            .get(&format!("/api/offers/{}", uuid::Uuid::new_v4()))
            .await
            .assert_status_not_found();
    }
}
