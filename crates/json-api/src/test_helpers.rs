//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    auth::{AuthenticatedCustomer, MockAuthService},
    context::AppContext,
    domain::{
        addresses::{MockAddressesService, models::{Address, AddressUuid, OrderAddress}},
        carts::{
            MockCartsService,
            models::{Cart, CartItem, CartItemUuid, CartUuid},
        },
        customers::{
            MockCustomersService,
            models::{CustomerRole, CustomerUuid},
        },
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderItemUuid, OrderUuid},
            status::{FulfillmentStatus, OrderStatus, PaymentStatus},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER: AuthenticatedCustomer = AuthenticatedCustomer {
    customer: CustomerUuid::from_uuid(Uuid::nil()),
    role: CustomerRole::Customer,
};

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_authenticated_customer(TEST_CUSTOMER);
    ctrl.call_next(req, depot, res).await;
}

fn strict_customers_mock() -> MockCustomersService {
    let mut customers = MockCustomersService::new();

    customers.expect_get_active_customer().never();
    customers.expect_create_customer().never();

    customers
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();
    auth.expect_issue_api_token().never();
    auth.expect_revoke_api_token().never();

    auth
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_update_item().never();
    carts.expect_remove_item().never();
    carts.expect_validate_cart().never();

    carts
}

fn strict_addresses_mock() -> MockAddressesService {
    let mut addresses = MockAddressesService::new();

    addresses.expect_list_addresses().never();
    addresses.expect_get_address().never();
    addresses.expect_create_address().never();
    addresses.expect_delete_address().never();

    addresses
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_update_status().never();
    orders.expect_cancel_order().never();
    orders.expect_update_item_fulfillment().never();

    orders
}

struct MockServices {
    customers: MockCustomersService,
    auth: MockAuthService,
    products: MockProductsService,
    carts: MockCartsService,
    addresses: MockAddressesService,
    orders: MockOrdersService,
}

impl Default for MockServices {
    fn default() -> Self {
        Self {
            customers: strict_customers_mock(),
            auth: strict_auth_mock(),
            products: strict_products_mock(),
            carts: strict_carts_mock(),
            addresses: strict_addresses_mock(),
            orders: strict_orders_mock(),
        }
    }
}

fn make_state(services: MockServices) -> Arc<State> {
    Arc::new(State::new(AppContext {
        customers: Arc::new(services.customers),
        auth: Arc::new(services.auth),
        products: Arc::new(services.products),
        carts: Arc::new(services.carts),
        addresses: Arc::new(services.addresses),
        orders: Arc::new(services.orders),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(MockServices {
        auth,
        ..MockServices::default()
    })
}

fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authed_service(
        make_state(MockServices {
            carts,
            ..MockServices::default()
        }),
        route,
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    authed_service(
        make_state(MockServices {
            products,
            ..MockServices::default()
        }),
        route,
    )
}

pub(crate) fn addresses_service(addresses: MockAddressesService, route: Router) -> Service {
    authed_service(
        make_state(MockServices {
            addresses,
            ..MockServices::default()
        }),
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    authed_service(
        make_state(MockServices {
            orders,
            ..MockServices::default()
        }),
        route,
    )
}

pub(crate) fn make_cart() -> Cart {
    Cart {
        uuid: CartUuid::now_v7(),
        customer_uuid: TEST_CUSTOMER.customer,
        items: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_cart_item(product: ProductUuid, quantity: u32, price: u64) -> CartItem {
    CartItem {
        uuid: CartItemUuid::now_v7(),
        product_uuid: product,
        quantity,
        price,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(sku: &str, price: u64, stock: u32) -> Product {
    Product {
        uuid: ProductUuid::now_v7(),
        title: format!("Product {sku}"),
        sku: sku.to_string(),
        description: String::new(),
        price,
        images: Vec::new(),
        specifications: serde_json::json!({}),
        is_active: true,
        in_stock: stock > 0,
        stock_quantity: stock,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_address(can_ship: bool, can_bill: bool) -> Address {
    Address {
        uuid: AddressUuid::now_v7(),
        customer_uuid: TEST_CUSTOMER.customer,
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
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

fn make_order_address() -> OrderAddress {
    OrderAddress {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        line1: "1 Analytical Way".to_string(),
        line2: None,
        city: "London".to_string(),
        state: "LDN".to_string(),
        postal_code: "E1 6AN".to_string(),
        country: "GB".to_string(),
        phone: None,
    }
}

pub(crate) fn make_order_item(quantity: u32, unit_price: u64) -> OrderItem {
    OrderItem {
        uuid: OrderItemUuid::now_v7(),
        product_uuid: ProductUuid::now_v7(),
        title: "Product".to_string(),
        sku: "SKU".to_string(),
        description: String::new(),
        images: Vec::new(),
        specifications: serde_json::json!({}),
        quantity,
        unit_price,
        fulfilled_quantity: 0,
        fulfillment_status: FulfillmentStatus::Pending,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order() -> Order {
    Order {
        uuid: OrderUuid::now_v7(),
        number: "ORD-17000000000000042".to_string(),
        customer_uuid: TEST_CUSTOMER.customer,
        status: OrderStatus::Pending,
        payment_status: PaymentStatus::Pending,
        payment_method: Some("card".to_string()),
        subtotal: 59_98,
        tax: 4_80,
        shipping: 9_99,
        discount: 0,
        total: 74_77,
        currency: "USD".to_string(),
        shipping_address: make_order_address(),
        billing_address: make_order_address(),
        customer_notes: None,
        admin_notes: None,
        tracking_number: None,
        carrier: None,
        confirmed_at: None,
        shipped_at: None,
        delivered_at: None,
        cancelled_at: None,
        items: vec![make_order_item(2, 29_99)],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
