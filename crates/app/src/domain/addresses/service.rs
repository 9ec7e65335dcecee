//! Addresses service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        addresses::{
            errors::AddressesServiceError,
            models::{Address, AddressUuid, NewAddress},
            repository::PgAddressesRepository,
        },
        customers::models::CustomerUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    async fn list_addresses(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<Address>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn get_address(
        &self,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<Address, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let address = self
            .repository
            .get_address(&mut tx, customer, address)
            .await?
            .ok_or(AddressesServiceError::NotFound)?;

        tx.commit().await?;

        Ok(address)
    }

    async fn create_address(
        &self,
        customer: CustomerUuid,
        address: NewAddress,
    ) -> Result<Address, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_address(&mut tx, customer, AddressUuid::now_v7(), &address)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_address(
        &self,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_address(&mut tx, customer, address)
            .await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Retrieve the customer's saved addresses.
    async fn list_addresses(
        &self,
        customer: CustomerUuid,
    ) -> Result<Vec<Address>, AddressesServiceError>;

    /// Retrieve a single saved address.
    async fn get_address(
        &self,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<Address, AddressesServiceError>;

    /// Save a new address-book entry.
    async fn create_address(
        &self,
        customer: CustomerUuid,
        address: NewAddress,
    ) -> Result<Address, AddressesServiceError>;

    /// Soft-delete a saved address.
    async fn delete_address(
        &self,
        customer: CustomerUuid,
        address: AddressUuid,
    ) -> Result<(), AddressesServiceError>;
}
