//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem, CartItemUuid, NewCartItem},
            repositories::{PgCartItemsRepository, PgCartsRepository},
            validation::{CartValidation, validate_items},
        },
        customers::models::CustomerUuid,
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, customer: CustomerUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, customer)
            .await?;

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        cart.items = items;

        Ok(cart)
    }

    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .get_or_create_cart(&mut tx, customer)
            .await?;

        // The upsert inserts nothing when the product is unknown, inactive,
        // or soft-deleted.
        let item = self
            .items_repository
            .upsert_cart_item(&mut tx, cart.uuid, item)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(item)
    }

    async fn update_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let item = self
            .items_repository
            .update_cart_item_quantity(&mut tx, cart.uuid, item, quantity)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, cart.uuid, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn validate_cart(
        &self,
        customer: CustomerUuid,
    ) -> Result<CartValidation, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(cart) = self.carts_repository.find_cart(&mut tx, customer).await? else {
            return Ok(CartValidation {
                is_valid: true,
                ..CartValidation::default()
            });
        };

        let items = self
            .items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        let product_uuids: Vec<Uuid> = items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        let products = self
            .products_repository
            .get_products_by_uuids(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid.into_uuid(), product))
            .collect();

        tx.commit().await?;

        Ok(validate_items(&items, &products))
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the customer's cart, creating it on first access.
    async fn get_cart(&self, customer: CustomerUuid) -> Result<Cart, CartsServiceError>;

    /// Add a product to the cart, capturing its current price.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
    ) -> Result<CartItem, CartsServiceError>;

    /// Replace a cart line's quantity.
    async fn update_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<CartItem, CartsServiceError>;

    /// Remove a line from the cart.
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Check every cart line against live product state.
    async fn validate_cart(
        &self,
        customer: CustomerUuid,
    ) -> Result<CartValidation, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{carts::validation::CartIssue, products::models::ProductUuid},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_creates_lazily_and_is_stable() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("cart@example.com").await;

        let first = ctx.carts.get_cart(customer).await?;
        let second = ctx.carts.get_cart(customer).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(first.customer_uuid, customer);
        assert!(first.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_item_captures_current_price() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("price@example.com").await;
        let product = ctx.create_product("P-1", 29_99, 10).await;

        let item = ctx
            .carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(item.price, 29_99);
        assert_eq!(item.quantity, 2);
        assert_eq!(item.product_uuid, product.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn adding_same_product_accumulates_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("accumulate@example.com").await;
        let product = ctx.create_product("P-2", 10_00, 10).await;

        let new_item = NewCartItem {
            product: product.uuid,
            quantity: 2,
        };

        let first = ctx.carts.add_item(customer, new_item).await?;
        let second = ctx.carts.add_item(customer, new_item).await?;

        assert_eq!(first.uuid, second.uuid);
        assert_eq!(second.quantity, 4);

        Ok(())
    }

    #[tokio::test]
    async fn adding_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("unknown@example.com").await;

        let result = ctx
            .carts
            .add_item(
                customer,
                NewCartItem {
                    product: ProductUuid::now_v7(),
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound for unknown product, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_item_replaces_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("update@example.com").await;
        let product = ctx.create_product("P-3", 10_00, 10).await;

        let item = ctx
            .carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        let updated = ctx.carts.update_item(customer, item.uuid, 5).await?;

        assert_eq!(updated.quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn update_item_rejects_zero_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("zero@example.com").await;
        let product = ctx.create_product("P-4", 10_00, 10).await;

        let item = ctx
            .carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        let result = ctx.carts.update_item(customer, item.uuid, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData for zero quantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("remove@example.com").await;
        let product = ctx.create_product("P-5", 10_00, 10).await;

        let item = ctx
            .carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        ctx.carts.remove_item(customer, item.uuid).await?;

        let cart = ctx.carts.get_cart(customer).await?;

        assert!(cart.items.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn items_are_scoped_to_their_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let owner = ctx.create_customer("owner@example.com").await;
        let other = ctx.create_customer("other@example.com").await;
        let product = ctx.create_product("P-6", 10_00, 10).await;

        let item = ctx
            .carts
            .add_item(
                owner,
                NewCartItem {
                    product: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        let result = ctx.carts.remove_item(other, item.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound for another customer's item, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_cart_reports_insufficient_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("validate@example.com").await;
        let product = ctx.create_product("P-7", 10_00, 3).await;

        ctx.carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 3,
                },
            )
            .await?;

        ctx.carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        let report = ctx.carts.validate_cart(customer).await?;

        assert!(!report.is_valid);
        assert_eq!(
            report.issues,
            vec![CartIssue::InsufficientStock {
                product: product.uuid,
                requested: 5,
                available: 3,
            }]
        );
        assert!(report.unavailable_products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn validate_cart_reports_price_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("drift@example.com").await;
        let product = ctx.create_product("P-8", 10_00, 10).await;

        ctx.carts
            .add_item(
                customer,
                NewCartItem {
                    product: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        ctx.set_product_price(product.uuid, 12_00).await;

        let report = ctx.carts.validate_cart(customer).await?;

        assert!(report.is_valid);
        assert_eq!(report.price_changes.len(), 1);
        assert_eq!(report.price_changes[0].old_price, 10_00);
        assert_eq!(report.price_changes[0].new_price, 12_00);

        Ok(())
    }

    #[tokio::test]
    async fn validate_cart_without_cart_is_valid() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("empty@example.com").await;

        let report = ctx.carts.validate_cart(customer).await?;

        assert!(report.is_valid);
        assert!(report.issues.is_empty());

        Ok(())
    }
}
