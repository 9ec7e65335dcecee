//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{ApiTokenUuid, AuthenticatedCustomer, IssuedApiToken},
        repository::PgAuthRepository,
        token::{format_api_token, generate_api_token_secret, hash_token, parse_api_token},
    },
    database::Db,
    domain::customers::models::CustomerUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(
        &self,
        token: &str,
    ) -> Result<AuthenticatedCustomer, AuthServiceError> {
        parse_api_token(token)?;

        let token_hash = hash_token(token);

        let mut tx = self.db.begin().await?;

        let customer = self
            .repository
            .find_customer_by_token_hash(&mut tx, &token_hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(customer)
    }

    async fn issue_api_token(
        &self,
        customer: CustomerUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::now_v7();
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid.into_uuid(), &secret);

        let mut tx = self.db.begin().await?;

        let metadata = self
            .repository
            .create_api_token(&mut tx, token_uuid, customer, &hash_token(&token), expires_at)
            .await?;

        tx.commit().await?;

        Ok(IssuedApiToken { metadata, token })
    }

    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.revoke_api_token(&mut tx, token).await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the customer that owns it.
    async fn authenticate_bearer(
        &self,
        token: &str,
    ) -> Result<AuthenticatedCustomer, AuthServiceError>;

    /// Issue a new API token; the raw token is returned exactly once.
    async fn issue_api_token(
        &self,
        customer: CustomerUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError>;

    /// Revoke an API token.
    async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("issued@example.com").await;

        let issued = ctx.auth.issue_api_token(customer, None).await?;

        let authenticated = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated.customer, customer);

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("revoked@example.com").await;

        let issued = ctx.auth.issue_api_token(customer, None).await?;

        ctx.auth.revoke_api_token(issued.metadata.uuid).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound after revocation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.create_customer("expired@example.com").await;

        let expires_at = Timestamp::now() - jiff::Span::new().hours(1);
        let issued = ctx.auth.issue_api_token(customer, Some(expires_at)).await?;

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound for expired token, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_token_is_rejected_without_lookup() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidToken(_))),
            "expected InvalidToken, got {result:?}"
        );
    }

    #[tokio::test]
    async fn token_for_unknown_customer_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx
            .auth
            .issue_api_token(CustomerUuid::now_v7(), None)
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::CustomerNotFound)),
            "expected CustomerNotFound, got {result:?}"
        );
    }
}
