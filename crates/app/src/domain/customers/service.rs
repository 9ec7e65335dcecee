//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError,
        models::{Customer, CustomerUuid, NewCustomer},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn get_active_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self
            .repository
            .get_active_customer(&mut tx, customer)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_customer(&mut tx, CustomerUuid::now_v7(), &customer)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve a customer that is active and not soft-deleted.
    async fn get_active_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<Customer, CustomersServiceError>;

    /// Provision a new customer.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::customers::models::CustomerRole, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn create_customer_defaults_to_active() -> TestResult {
        let ctx = TestContext::new().await;

        let customer = ctx
            .customers
            .create_customer(NewCustomer {
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
                role: CustomerRole::Customer,
            })
            .await?;

        assert!(customer.is_active);
        assert_eq!(customer.role, CustomerRole::Customer);
        assert!(customer.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let new = NewCustomer {
            email: "dup@example.com".to_string(),
            name: "First".to_string(),
            role: CustomerRole::Customer,
        };

        ctx.customers.create_customer(new.clone()).await?;

        let result = ctx.customers.create_customer(new).await;

        assert!(
            matches!(result, Err(CustomersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_customer_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .customers
            .get_active_customer(CustomerUuid::now_v7())
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
