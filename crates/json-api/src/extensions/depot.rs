//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::{auth::AuthenticatedCustomer, domain::customers::models::CustomerUuid};

const AUTHENTICATED_CUSTOMER_KEY: &str = "authenticated_customer";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_authenticated_customer(&mut self, customer: AuthenticatedCustomer);

    fn authenticated_customer_or_401(&self) -> Result<AuthenticatedCustomer, StatusError>;

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_authenticated_customer(&mut self, customer: AuthenticatedCustomer) {
        self.insert(AUTHENTICATED_CUSTOMER_KEY, customer);
    }

    fn authenticated_customer_or_401(&self) -> Result<AuthenticatedCustomer, StatusError> {
        self.get::<AuthenticatedCustomer>(AUTHENTICATED_CUSTOMER_KEY)
            .ok()
            .copied()
            .ok_or_else(StatusError::unauthorized)
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        Ok(self.authenticated_customer_or_401()?.customer)
    }
}
