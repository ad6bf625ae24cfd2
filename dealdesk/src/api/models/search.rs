//! API models for catalogue search.

use super::{merchants::MerchantResponse, offers::OfferResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for search
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in merchant names and offer titles (case-insensitive).
    /// Blank or missing returns no results.
    pub q: Option<String>,
}

impl SearchQuery {
    /// The trimmed search term, or `None` when there is nothing to search for
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Matching merchants and offers, each list capped independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub merchants: Vec<MerchantResponse>,
    pub offers: Vec<OfferResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_terms() {
        for q in [None, Some(""), Some("   "), Some("\t\n")] {
            let query = SearchQuery { q: q.map(str::to_string) };
            assert!(query.term().is_none(), "{q:?} should be blank");
        }
    }

    #[test]
    fn test_term_is_trimmed() {
        let query = SearchQuery {
            q: Some("  shoes ".to_string()),
        };
        assert_eq!(query.term(), Some("shoes"));
    }

    #[test]
    fn test_empty_response_shape() {
        let json = serde_json::to_value(SearchResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({"merchants": [], "offers": []}));
    }
}
