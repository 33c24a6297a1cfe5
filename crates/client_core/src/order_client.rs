use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use shared::{
    domain::{Order, OrderId, UserId},
    protocol::{CreateOrderRequest, OrderStatusResponse},
};
use url::Url;

use crate::{
    error::ClientResult,
    transport::{decode, endpoint, Transport},
};

/// Typed calls against the Order Service.
#[derive(Clone)]
pub struct OrderClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl OrderClient {
    pub fn new(transport: Arc<dyn Transport>, base_url: Url) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    pub async fn create_order(
        &self,
        user_id: &UserId,
        amount: f64,
        description: &str,
    ) -> ClientResult<Order> {
        let url = endpoint(&self.base_url, &["orders"])?;
        let body = serde_json::to_value(CreateOrderRequest {
            user_id: user_id.clone(),
            amount,
            description: description.to_string(),
        })?;
        let value = self.transport.execute(Method::POST, url, Some(body)).await?;
        decode(value)
    }

    /// Lists every order the service holds. The endpoint takes no user id, so
    /// the result is not scoped to the caller.
    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let url = endpoint(&self.base_url, &["orders"])?;
        match self.transport.execute(Method::GET, url, None).await? {
            // An empty store is encoded as `null` by the service.
            Value::Null => Ok(Vec::new()),
            value => decode(value),
        }
    }

    pub async fn get_order(&self, order_id: &OrderId) -> ClientResult<Order> {
        let url = endpoint(&self.base_url, &["orders", order_id.as_str()])?;
        let value = self.transport.execute(Method::GET, url, None).await?;
        decode(value)
    }

    pub async fn order_status(&self, order_id: &OrderId) -> ClientResult<OrderStatusResponse> {
        let url = endpoint(
            &self.base_url,
            &["orders", order_id.as_str(), "status"],
        )?;
        let value = self.transport.execute(Method::GET, url, None).await?;
        decode(value)
    }
}
