//! Cart validation against live product state.
//!
//! Used in two places: the standalone validation endpoint, and checkout,
//! which re-runs the same checks under row locks before any write.

use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::{
    carts::models::CartItem,
    products::models::{Product, ProductUuid},
};

/// One failed line check. `InsufficientStock` is an error but does not mark
/// the product wholly unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartIssue {
    ProductMissing {
        product: ProductUuid,
    },
    ProductInactive {
        product: ProductUuid,
    },
    OutOfStock {
        product: ProductUuid,
    },
    InsufficientStock {
        product: ProductUuid,
        requested: u32,
        available: u32,
    },
}

impl CartIssue {
    #[must_use]
    pub const fn product(&self) -> ProductUuid {
        match self {
            Self::ProductMissing { product }
            | Self::ProductInactive { product }
            | Self::OutOfStock { product }
            | Self::InsufficientStock { product, .. } => *product,
        }
    }

    #[must_use]
    pub const fn marks_unavailable(&self) -> bool {
        !matches!(self, Self::InsufficientStock { .. })
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::ProductMissing { product } => format!("product {product} no longer exists"),
            Self::ProductInactive { product } => format!("product {product} is no longer active"),
            Self::OutOfStock { product } => format!("product {product} is out of stock"),
            Self::InsufficientStock {
                product,
                requested,
                available,
            } => format!(
                "product {product} has {available} in stock but {requested} were requested"
            ),
        }
    }
}

/// Informational price drift between a captured line price and the product's
/// live price. Never affects validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceChange {
    pub product: ProductUuid,
    pub old_price: u64,
    pub new_price: u64,
}

/// Cart validation report.
#[derive(Debug, Clone, Default)]
pub struct CartValidation {
    pub is_valid: bool,
    pub issues: Vec<CartIssue>,
    pub unavailable_products: Vec<ProductUuid>,
    pub price_changes: Vec<PriceChange>,
}

/// Check every cart line against current product state.
#[must_use]
pub(crate) fn validate_items(
    items: &[CartItem],
    products: &HashMap<Uuid, Product>,
) -> CartValidation {
    let mut issues = Vec::new();
    let mut price_changes = Vec::new();

    for item in items {
        let Some(product) = products.get(&item.product_uuid.into_uuid()) else {
            issues.push(CartIssue::ProductMissing {
                product: item.product_uuid,
            });

            continue;
        };

        if item.price != product.price {
            price_changes.push(PriceChange {
                product: item.product_uuid,
                old_price: item.price,
                new_price: product.price,
            });
        }

        if !product.is_active {
            issues.push(CartIssue::ProductInactive {
                product: item.product_uuid,
            });
        } else if !product.in_stock || product.stock_quantity == 0 {
            issues.push(CartIssue::OutOfStock {
                product: item.product_uuid,
            });
        } else if item.quantity > product.stock_quantity {
            issues.push(CartIssue::InsufficientStock {
                product: item.product_uuid,
                requested: item.quantity,
                available: product.stock_quantity,
            });
        }
    }

    let unavailable_products = issues
        .iter()
        .filter(|issue| issue.marks_unavailable())
        .map(CartIssue::product)
        .collect();

    CartValidation {
        is_valid: issues.is_empty(),
        issues,
        unavailable_products,
        price_changes,
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::carts::models::CartItemUuid;

    use super::*;

    fn product(uuid: ProductUuid, price: u64, stock: u32, is_active: bool) -> Product {
        Product {
            uuid,
            title: "Widget".to_string(),
            sku: format!("SKU-{uuid}"),
            description: String::new(),
            price,
            images: Vec::new(),
            specifications: serde_json::json!({}),
            is_active,
            in_stock: stock > 0,
            stock_quantity: stock,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }

    fn item(product: ProductUuid, quantity: u32, price: u64) -> CartItem {
        CartItem {
            uuid: CartItemUuid::now_v7(),
            product_uuid: product,
            quantity,
            price,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn products(entries: Vec<Product>) -> HashMap<uuid::Uuid, Product> {
        entries
            .into_iter()
            .map(|p| (p.uuid.into_uuid(), p))
            .collect()
    }

    #[test]
    fn valid_cart_has_no_issues() {
        let p = ProductUuid::now_v7();
        let report = validate_items(&[item(p, 2, 10_00)], &products(vec![product(p, 10_00, 5, true)]));

        assert!(report.is_valid);
        assert!(report.issues.is_empty());
        assert!(report.unavailable_products.is_empty());
        assert!(report.price_changes.is_empty());
    }

    #[test]
    fn every_offending_line_is_reported() {
        let missing = ProductUuid::now_v7();
        let inactive = ProductUuid::now_v7();
        let empty = ProductUuid::now_v7();

        let report = validate_items(
            &[
                item(missing, 1, 10_00),
                item(inactive, 1, 10_00),
                item(empty, 1, 10_00),
            ],
            &products(vec![
                product(inactive, 10_00, 5, false),
                product(empty, 10_00, 0, true),
            ]),
        );

        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 3);
        assert_eq!(report.unavailable_products.len(), 3);
    }

    #[test]
    fn insufficient_stock_does_not_mark_product_unavailable() {
        let p = ProductUuid::now_v7();

        let report = validate_items(&[item(p, 7, 10_00)], &products(vec![product(p, 10_00, 3, true)]));

        assert!(!report.is_valid);
        assert_eq!(
            report.issues,
            vec![CartIssue::InsufficientStock {
                product: p,
                requested: 7,
                available: 3,
            }]
        );
        assert!(report.unavailable_products.is_empty());
    }

    #[test]
    fn price_drift_is_informational() {
        let p = ProductUuid::now_v7();

        let report = validate_items(&[item(p, 1, 9_00)], &products(vec![product(p, 11_00, 5, true)]));

        assert!(report.is_valid);
        assert_eq!(
            report.price_changes,
            vec![PriceChange {
                product: p,
                old_price: 9_00,
                new_price: 11_00,
            }]
        );
    }

    #[test]
    fn price_drift_is_still_reported_for_invalid_lines() {
        let p = ProductUuid::now_v7();

        let report = validate_items(&[item(p, 9, 9_00)], &products(vec![product(p, 11_00, 3, true)]));

        assert!(!report.is_valid);
        assert_eq!(report.price_changes.len(), 1);
    }
}
