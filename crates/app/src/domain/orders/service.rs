//! Orders service: checkout orchestration and the status state machine.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        addresses::{
            PgAddressesRepository,
            models::AddressUse,
            resolver::resolve_order_address,
        },
        carts::{
            PgCartItemsRepository, PgCartsRepository,
            validation::{CartIssue, validate_items},
        },
        customers::{PgCustomersRepository, models::CustomerUuid},
        orders::{
            errors::OrdersServiceError,
            models::{
                CheckoutRequest, NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid,
                OrderUuid, StatusUpdate,
            },
            number::{MAX_ORDER_NUMBER_ATTEMPTS, generate_order_number},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
            status::{FulfillmentStatus, OrderStatus},
            totals::order_totals,
        },
        products::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    carts_repository: PgCartsRepository,
    cart_items_repository: PgCartItemsRepository,
    products_repository: PgProductsRepository,
    addresses_repository: PgAddressesRepository,
    customers_repository: PgCustomersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
            products_repository: PgProductsRepository::new(),
            addresses_repository: PgAddressesRepository::new(),
            customers_repository: PgCustomersRepository::new(),
        }
    }

    /// Return every unit of stock an order reserved and mark its lines
    /// cancelled. Runs inside the caller's transaction.
    async fn restore_order_stock(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        order: OrderUuid,
    ) -> Result<(), OrdersServiceError> {
        let items = self.items_repository.get_order_items(tx, order).await?;

        for item in &items {
            self.products_repository
                .restore_stock(tx, item.product_uuid, item.quantity)
                .await?;
        }

        self.items_repository.cancel_order_items(tx, order).await?;

        Ok(())
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn checkout(
        &self,
        customer: CustomerUuid,
        request: CheckoutRequest,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.customers_repository
            .get_active_customer(&mut tx, customer)
            .await?
            .ok_or(OrdersServiceError::CustomerNotFound)?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, customer)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let items = self
            .cart_items_repository
            .get_cart_items(&mut tx, cart.uuid)
            .await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        // Lock the affected product rows before re-validating so the stock
        // seen here cannot change until the transaction commits.
        let product_uuids: Vec<Uuid> = items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();

        let products: HashMap<Uuid, _> = self
            .products_repository
            .lock_products_by_uuids(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid.into_uuid(), product))
            .collect();

        let report = validate_items(&items, &products);

        if !report.is_valid {
            return Err(OrdersServiceError::InvalidCart {
                issues: report.issues,
            });
        }

        let shipping_address = resolve_order_address(
            &mut tx,
            &self.addresses_repository,
            customer,
            &request.shipping,
            AddressUse::Shipping,
        )
        .await?;

        let billing_address = match &request.billing {
            Some(selector) => {
                resolve_order_address(
                    &mut tx,
                    &self.addresses_repository,
                    customer,
                    selector,
                    AddressUse::Billing,
                )
                .await?
            }
            None => shipping_address.clone(),
        };

        let totals = order_totals(items.iter().map(|item| (item.price, item.quantity)));

        let new_order = NewOrder {
            customer,
            totals,
            shipping_address,
            billing_address,
            payment_method: request.payment_method,
            customer_notes: request.customer_notes,
        };

        let mut created = None;

        for _attempt in 0..MAX_ORDER_NUMBER_ATTEMPTS {
            let number = generate_order_number();

            if let Some(order) = self
                .orders_repository
                .insert_order(&mut tx, OrderUuid::now_v7(), &number, &new_order)
                .await?
            {
                created = Some(order);

                break;
            }
        }

        let mut order = created.ok_or(OrdersServiceError::OrderNumberExhausted)?;

        for item in &items {
            let product = products.get(&item.product_uuid.into_uuid()).ok_or_else(|| {
                OrdersServiceError::InvalidCart {
                    issues: vec![CartIssue::ProductMissing {
                        product: item.product_uuid,
                    }],
                }
            })?;

            let order_item = self
                .items_repository
                .create_order_item(
                    &mut tx,
                    OrderItemUuid::now_v7(),
                    order.uuid,
                    &NewOrderItem::snapshot(product, item),
                )
                .await?;

            order.items.push(order_item);

            // The rows are locked, so a zero affected-row count here would
            // mean the validation above was wrong, not a lost race.
            let reserved = self
                .products_repository
                .decrement_stock(&mut tx, item.product_uuid, item.quantity)
                .await?;

            if reserved == 0 {
                return Err(OrdersServiceError::InvalidCart {
                    issues: vec![CartIssue::InsufficientStock {
                        product: item.product_uuid,
                        requested: item.quantity,
                        available: 0,
                    }],
                });
            }
        }

        self.cart_items_repository
            .clear_cart_items(&mut tx, cart.uuid)
            .await?;

        tx.commit().await?;

        info!(
            order = %order.uuid,
            number = %order.number,
            total = order.total,
            "order placed"
        );

        Ok(order)
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self
            .orders_repository
            .get_customer_order(&mut tx, customer, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        order.items = self
            .items_repository
            .get_order_items(&mut tx, order.uuid)
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_customer_orders(&mut tx, customer)
            .await?;

        for order in &mut orders {
            order.items = self
                .items_repository
                .get_order_items(&mut tx, order.uuid)
                .await?;
        }

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_status(
        &self,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_order(&mut tx, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !current.status.can_transition_to(update.status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.status,
                to: update.status,
            });
        }

        // Cancellation through the privileged path releases reserved stock
        // exactly like a customer cancellation; forward transitions never
        // touch inventory.
        if update.status == OrderStatus::Cancelled {
            self.restore_order_stock(&mut tx, order).await?;
        }

        let mut updated = self
            .orders_repository
            .apply_transition(
                &mut tx,
                order,
                update.status,
                update.tracking_number.as_deref(),
                update.carrier.as_deref(),
                update.notes.as_deref(),
            )
            .await?;

        updated.items = self
            .items_repository
            .get_order_items(&mut tx, order)
            .await?;

        tx.commit().await?;

        info!(order = %updated.uuid, from = %current.status, to = %updated.status, "order status updated");

        Ok(updated)
    }

    async fn cancel_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        reason: Option<String>,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .orders_repository
            .lock_customer_order(&mut tx, customer, order)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if !current.status.is_cancellable() {
            return Err(OrdersServiceError::NotCancellable {
                status: current.status,
            });
        }

        self.restore_order_stock(&mut tx, order).await?;

        let mut cancelled = self
            .orders_repository
            .apply_transition(
                &mut tx,
                order,
                OrderStatus::Cancelled,
                None,
                None,
                reason.as_deref(),
            )
            .await?;

        cancelled.items = self
            .items_repository
            .get_order_items(&mut tx, order)
            .await?;

        tx.commit().await?;

        info!(order = %cancelled.uuid, "order cancelled");

        Ok(cancelled)
    }

    async fn update_item_fulfillment(
        &self,
        order: OrderUuid,
        item: OrderItemUuid,
        fulfilled_quantity: u32,
    ) -> Result<OrderItem, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .items_repository
            .get_order_item(&mut tx, order, item)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        if fulfilled_quantity > current.quantity {
            return Err(OrdersServiceError::InvalidFulfillmentQuantity {
                requested: fulfilled_quantity,
                ordered: current.quantity,
            });
        }

        let status = FulfillmentStatus::for_progress(fulfilled_quantity, current.quantity);

        let updated = self
            .items_repository
            .update_item_fulfillment(&mut tx, order, item, fulfilled_quantity, status)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert the customer's cart into an order: re-validate every line
    /// against live stock, resolve addresses, compute totals, snapshot the
    /// lines, reserve inventory, and empty the cart, all in one transaction.
    async fn checkout(
        &self,
        customer: CustomerUuid,
        request: CheckoutRequest,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one of the customer's orders with its lines.
    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve the customer's orders, newest first.
    async fn list_orders(&self, customer: CustomerUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Apply a privileged status transition. Fails unless the transition
    /// table allows it from the order's current status.
    async fn update_status(
        &self,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel one of the customer's orders, restoring reserved stock. Only
    /// pending and confirmed orders can be cancelled.
    async fn cancel_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        reason: Option<String>,
    ) -> Result<Order, OrdersServiceError>;

    /// Record fulfillment progress on a single line. The fulfilled quantity
    /// can never exceed the ordered quantity.
    async fn update_item_fulfillment(
        &self,
        order: OrderUuid,
        item: OrderItemUuid,
        fulfilled_quantity: u32,
    ) -> Result<OrderItem, OrdersServiceError>;
}
