//! Test context for service-level integration tests.

use sqlx::query;

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        addresses::{PgAddressesService, models::NewAddress},
        carts::PgCartsService,
        customers::{
            CustomersService, PgCustomersService,
            models::{CustomerRole, CustomerUuid, NewCustomer},
        },
        orders::PgOrdersService,
        products::{
            PgProductsService, ProductsService,
            models::{NewProduct, Product, ProductUuid},
        },
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub(crate) db: TestDb,
    pub(crate) customers: PgCustomersService,
    pub(crate) auth: PgAuthService,
    pub(crate) products: PgProductsService,
    pub(crate) carts: PgCartsService,
    pub(crate) addresses: PgAddressesService,
    pub(crate) orders: PgOrdersService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            customers: PgCustomersService::new(db.clone()),
            auth: PgAuthService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            addresses: PgAddressesService::new(db.clone()),
            orders: PgOrdersService::new(db),
            db: test_db,
        }
    }

    /// Create an active customer and return its uuid.
    pub(crate) async fn create_customer(&self, email: &str) -> CustomerUuid {
        self.customers
            .create_customer(NewCustomer {
                email: email.to_string(),
                name: "Test Customer".to_string(),
                role: CustomerRole::Customer,
            })
            .await
            .expect("Failed to create test customer")
            .uuid
    }

    /// Create an active, stocked product.
    pub(crate) async fn create_product(&self, sku: &str, price: u64, stock: u32) -> Product {
        self.products
            .create_product(NewProduct {
                title: format!("Product {sku}"),
                sku: sku.to_string(),
                description: "A test product".to_string(),
                price,
                images: vec![format!("https://cdn.example.com/{sku}.png")],
                specifications: serde_json::json!({ "sku": sku }),
                stock_quantity: stock,
            })
            .await
            .expect("Failed to create test product")
    }

    /// A complete saved-address payload with the given eligibility flags.
    pub(crate) fn new_address(can_ship: bool, can_bill: bool) -> NewAddress {
        NewAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            line1: "1 Analytical Way".to_string(),
            line2: None,
            city: "London".to_string(),
            state: "LDN".to_string(),
            postal_code: "E1 6AN".to_string(),
            country: "GB".to_string(),
            phone: None,
            can_ship,
            can_bill,
        }
    }

    pub(crate) async fn set_product_price(&self, product: ProductUuid, price: u64) {
        query("UPDATE products SET price = $2, updated_at = now() WHERE uuid = $1")
            .bind(product.into_uuid())
            .bind(i64::try_from(price).expect("price fits in i64"))
            .execute(self.db.pool())
            .await
            .expect("Failed to update product price");
    }

    pub(crate) async fn set_product_active(&self, product: ProductUuid, is_active: bool) {
        query("UPDATE products SET is_active = $2, updated_at = now() WHERE uuid = $1")
            .bind(product.into_uuid())
            .bind(is_active)
            .execute(self.db.pool())
            .await
            .expect("Failed to update product active flag");
    }

    pub(crate) async fn set_customer_active(&self, customer: CustomerUuid, is_active: bool) {
        query("UPDATE customers SET is_active = $2, updated_at = now() WHERE uuid = $1")
            .bind(customer.into_uuid())
            .bind(is_active)
            .execute(self.db.pool())
            .await
            .expect("Failed to update customer active flag");
    }
}
