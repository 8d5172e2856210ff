use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::ProductResponseData;
use crate::domain::product::models::ProductFilter;
use crate::domain::product::models::SortOrder;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    category: Option<String>,
    sort: Option<String>,
}

impl ListProductsQuery {
    fn try_into_filter(self) -> Result<ProductFilter, ApiError> {
        let sort = self
            .sort
            .map(|sort| sort.parse::<SortOrder>())
            .transpose()
            .map_err(ApiError::BadRequest)?;

        Ok(ProductFilter {
            category: self.category.filter(|category| !category.is_empty()),
            sort,
        })
    }
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, ApiError> {
    let filter = query.try_into_filter()?;

    state
        .product_service
        .list_products(filter)
        .await
        .map_err(ApiError::from)
        .map(|products| {
            let product_data: Vec<ProductResponseData> =
                products.iter().map(|p| p.into()).collect();
            ApiSuccess::new(StatusCode::OK, product_data)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_into_filter() {
        let query = ListProductsQuery {
            category: Some("home".to_string()),
            sort: Some("desc".to_string()),
        };

        assert_eq!(
            query.try_into_filter().unwrap(),
            ProductFilter {
                category: Some("home".to_string()),
                sort: Some(SortOrder::Desc),
            }
        );
    }

    #[test]
    fn test_query_rejects_unknown_sort() {
        let query = ListProductsQuery {
            category: None,
            sort: Some("random".to_string()),
        };

        assert!(matches!(
            query.try_into_filter(),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_empty_category_means_no_filter() {
        let query = ListProductsQuery {
            category: Some(String::new()),
            sort: None,
        };

        assert_eq!(query.try_into_filter().unwrap(), ProductFilter::default());
    }
}
