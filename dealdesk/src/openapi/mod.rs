//! OpenAPI documentation for the catalogue API at `/api/*`.
//!
//! Served as JSON at `/api/openapi.json` and rendered with Scalar at `/api/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DealDesk API",
        description = "Read-only catalogue of merchants, categories and offers, with substring search."
    ),
    servers(
        (url = "/api", description = "Catalogue API")
    ),
    paths(
        api::handlers::categories::list_categories,
        api::handlers::categories::get_category,
        api::handlers::merchants::list_merchants,
        api::handlers::merchants::get_merchant,
        api::handlers::offers::list_offers,
        api::handlers::offers::get_offer,
        api::handlers::search::search,
    ),
    components(
        schemas(
            api::models::categories::CategoryResponse,
            api::models::merchants::MerchantResponse,
            api::models::offers::OfferResponse,
            api::models::search::SearchResponse,
        )
    ),
    tags(
        (name = "categories", description = "Offer categories"),
        (name = "merchants", description = "Merchants publishing offers"),
        (name = "offers", description = "Active offers"),
        (name = "search", description = "Merchant and offer search"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/categories",
            "/categories/{id}",
            "/merchants",
            "/merchants/{id}",
            "/offers",
            "/offers/{id}",
            "/search",
        ] {
            assert!(paths.contains(&expected), "missing {expected} in {paths:?}");
        }
    }
}
