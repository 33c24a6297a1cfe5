use std::sync::Arc;

use reqwest::Method;
use shared::{
    domain::UserId,
    protocol::{BalanceResponse, CreateAccountRequest, DepositRequest},
};
use url::Url;

use crate::{
    error::ClientResult,
    transport::{decode, endpoint, Transport},
};

/// Typed calls against the Account Service.
#[derive(Clone)]
pub struct AccountClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl AccountClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// Whether a duplicate create succeeds is up to the service.
    pub async fn create_account(&self, user_id: &UserId) -> ClientResult<()> {
        let url = endpoint(&self.base_url, &["accounts"])?;
        let body = serde_json::to_value(CreateAccountRequest {
            user_id: user_id.clone(),
        })?;
        self.transport.execute(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    /// The response body is ignored; the balance has to be fetched again.
    pub async fn deposit(&self, user_id: &UserId, amount: f64) -> ClientResult<()> {
        let url = endpoint(
            &self.base_url,
            &["accounts", user_id.as_str(), "deposit"],
        )?;
        let body = serde_json::to_value(DepositRequest { amount })?;
        self.transport.execute(Method::POST, url, Some(body)).await?;
        Ok(())
    }

    pub async fn get_balance(&self, user_id: &UserId) -> ClientResult<BalanceResponse> {
        let url = endpoint(
            &self.base_url,
            &["accounts", user_id.as_str(), "balance"],
        )?;
        let value = self.transport.execute(Method::GET, url, None).await?;
        decode(value)
    }
}
