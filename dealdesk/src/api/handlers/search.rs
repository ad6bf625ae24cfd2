use crate::{
    AppState,
    api::models::{
        merchants::MerchantResponse,
        offers::OfferResponse,
        search::{SearchQuery, SearchResponse},
    },
    db::handlers::{
        Merchants, Offers, Repository,
        merchants::MerchantFilter,
        offers::{OfferFilter, OfferOrder},
    },
    errors::{Error, Result},
};
use axum::{
    Json,
    extract::{Query, State},
};

#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    summary = "Search merchants and offers",
    description = "Case-insensitive substring search over merchant names and offer titles. \
                   Each list is capped separately and sorted by name/title. A blank query returns empty lists.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching merchants and offers", body = SearchResponse),
        (status = 400, description = "Query contains a NUL character"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all, fields(q = query.q.as_deref().unwrap_or_default()))]
pub async fn search(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Result<Json<SearchResponse>> {
    let Some(term) = query.term() else {
        return Ok(Json(SearchResponse::default()));
    };
    // Postgres text cannot hold NUL
    if term.contains('\0') {
        return Err(Error::BadRequest {
            message: "Search query must not contain NUL characters".to_string(),
        });
    }
    let limit = state.config.search.max_results;

    // Each lookup takes its own pooled connection so both queries are in flight at once
    let merchants = async {
        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let filter = MerchantFilter::new().with_search(term.to_string()).with_limit(limit);
        Ok::<_, Error>(Merchants::new(&mut conn).list(&filter).await?)
    };
    let offers = async {
        let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
        let filter = OfferFilter::new()
            .with_search(term.to_string())
            .with_limit(limit)
            .ordered_by(OfferOrder::Title);
        Ok::<_, Error>(Offers::new(&mut conn).list(&filter).await?)
    };

    let (merchants, offers) = tokio::try_join!(merchants, offers)?;

    tracing::debug!(merchants = merchants.len(), offers = offers.len(), "Search complete");

    Ok(Json(SearchResponse {
        merchants: merchants.into_iter().map(MerchantResponse::from).collect(),
        offers: offers.into_iter().map(OfferResponse::from).collect(),
    }))
}
