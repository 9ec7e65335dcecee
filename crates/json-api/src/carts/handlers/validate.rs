//! Validate Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::validation::{CartValidation, PriceChange};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Validation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartValidationResponse {
    /// Whether every line can currently be purchased
    pub is_valid: bool,

    /// Human-readable description of each failed line check
    pub errors: Vec<String>,

    /// Products that are missing, inactive, or out of stock
    pub unavailable_product_uuids: Vec<Uuid>,

    /// Informational price drift since the lines were added
    pub price_changes: Vec<PriceChangeResponse>,
}

/// Price Change Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceChangeResponse {
    /// The product whose price changed
    pub product_uuid: Uuid,

    /// Price captured in the cart, in minor units
    pub old_price: u64,

    /// Live product price, in minor units
    pub new_price: u64,
}

impl From<PriceChange> for PriceChangeResponse {
    fn from(change: PriceChange) -> Self {
        Self {
            product_uuid: change.product.into_uuid(),
            old_price: change.old_price,
            new_price: change.new_price,
        }
    }
}

impl From<CartValidation> for CartValidationResponse {
    fn from(report: CartValidation) -> Self {
        Self {
            is_valid: report.is_valid,
            errors: report.issues.iter().map(|issue| issue.message()).collect(),
            unavailable_product_uuids: report
                .unavailable_products
                .into_iter()
                .map(Into::into)
                .collect(),
            price_changes: report
                .price_changes
                .into_iter()
                .map(PriceChangeResponse::from)
                .collect(),
        }
    }
}

/// Validate Cart Handler
///
/// Checks every cart line against live product state without mutating
/// anything.
#[endpoint(
    tags("cart"),
    summary = "Validate Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CartValidationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let report = state
        .app
        .carts
        .validate_cart(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        carts::{MockCartsService, validation::CartIssue},
        products::models::ProductUuid,
    };

    use crate::test_helpers::{TEST_CUSTOMER, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("cart/validation").get(handler),
        )
    }

    #[tokio::test]
    async fn test_validation_report_is_mapped() -> TestResult {
        let product = ProductUuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_validate_cart()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER.customer)
            .return_once(move |_| {
                Ok(CartValidation {
                    is_valid: false,
                    issues: vec![CartIssue::OutOfStock { product }],
                    unavailable_products: vec![product],
                    price_changes: vec![PriceChange {
                        product,
                        old_price: 10_00,
                        new_price: 12_00,
                    }],
                })
            });

        let mut res = TestClient::get("http://example.com/cart/validation")
            .send(&make_service(carts))
            .await;

        let body: CartValidationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(!body.is_valid);
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.unavailable_product_uuids, vec![product.into_uuid()]);
        assert_eq!(body.price_changes[0].new_price, 12_00);

        Ok(())
    }
}
