//! Intent handlers and the single-owner session state they reconcile.

use std::sync::Arc;

use shared::domain::{Order, OrderId, UserId};
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

use crate::{
    account_client::AccountClient,
    error::{ClientError, ClientResult},
    notifier::{Notifier, NotifyKind},
    order_client::OrderClient,
    transport::Transport,
};

const DEFAULT_USER_ID: &str = "user1";
const DEFAULT_DEPOSIT_AMOUNT: f64 = 50.0;
const DEFAULT_ORDER_AMOUNT: f64 = 100.0;
const DEFAULT_ORDER_DESCRIPTION: &str = "Test order";

/// User-edited values that have not been submitted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInputs {
    pub deposit_amount: f64,
    pub order_amount: f64,
    pub order_description: String,
}

impl Default for PendingInputs {
    fn default() -> Self {
        Self {
            deposit_amount: DEFAULT_DEPOSIT_AMOUNT,
            order_amount: DEFAULT_ORDER_AMOUNT,
            order_description: DEFAULT_ORDER_DESCRIPTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user_id: UserId,
    /// Last balance the Account Service reported. Never adjusted locally.
    pub balance: f64,
    pub orders: Vec<Order>,
    pub pending: PendingInputs,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user_id: UserId::from(DEFAULT_USER_ID),
            balance: 0.0,
            orders: Vec::new(),
            pending: PendingInputs::default(),
        }
    }
}

/// Owns the session state and is the only thing that writes to it.
///
/// Handlers do their network round trips without holding the state lock and
/// apply the result afterwards, so overlapping intents resolve as
/// last-writer-wins. Every handler notifies exactly once.
pub struct Orchestrator {
    accounts: AccountClient,
    orders: OrderClient,
    notifier: Arc<dyn Notifier>,
    state: RwLock<SessionState>,
}

impl Orchestrator {
    pub fn new(accounts: AccountClient, orders: OrderClient, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_state(accounts, orders, notifier, SessionState::default())
    }

    pub fn with_state(
        accounts: AccountClient,
        orders: OrderClient,
        notifier: Arc<dyn Notifier>,
        state: SessionState,
    ) -> Self {
        Self {
            accounts,
            orders,
            notifier,
            state: RwLock::new(state),
        }
    }

    pub fn from_transport(
        transport: Arc<dyn Transport>,
        account_service_url: Url,
        order_service_url: Url,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::new(
            AccountClient::new(transport.clone(), account_service_url),
            OrderClient::new(transport, order_service_url),
            notifier,
        )
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn set_user_id(&self, user_id: impl Into<UserId>) {
        self.state.write().await.user_id = user_id.into();
    }

    pub async fn update_pending(&self, edit: impl FnOnce(&mut PendingInputs)) {
        edit(&mut self.state.write().await.pending);
    }

    /// Loads the balance of the current user and the order list. The two touch
    /// disjoint state and run concurrently.
    pub async fn initialize(&self) {
        let (balance, orders) = tokio::join!(self.load_current_balance(), self.refresh_orders());
        info!(
            balance,
            orders_loaded = orders.is_ok(),
            "session initialized"
        );
    }

    pub async fn create_account(&self, user_id: &UserId) -> ClientResult<()> {
        match self.accounts.create_account(user_id).await {
            Ok(()) => {
                info!(%user_id, "account created");
                self.notify_success("Account created successfully!");
                Ok(())
            }
            Err(error) => Err(self.report_failure("create_account", error)),
        }
    }

    /// Deposits and then re-fetches the authoritative balance. A failed
    /// deposit skips the re-fetch; a failed re-fetch keeps the previous
    /// balance.
    pub async fn deposit(&self, user_id: &UserId, amount: f64) -> ClientResult<f64> {
        if let Err(error) = self.accounts.deposit(user_id, amount).await {
            return Err(self.report_failure("deposit", error));
        }

        match self.accounts.get_balance(user_id).await {
            Ok(response) => {
                self.state.write().await.balance = response.balance;
                info!(%user_id, amount, balance = response.balance, "deposit applied");
                self.notify_success("Deposit successful!");
                Ok(response.balance)
            }
            Err(error) => Err(self.report_failure("deposit", error)),
        }
    }

    /// Appends the created order without re-listing.
    pub async fn create_order(
        &self,
        user_id: &UserId,
        amount: f64,
        description: &str,
    ) -> ClientResult<Order> {
        match self.orders.create_order(user_id, amount, description).await {
            Ok(order) => {
                self.state.write().await.orders.push(order.clone());
                info!(%user_id, order_id = %order.id, status = %order.status, "order created");
                self.notify_success(&format!("Order {} created!", order.id));
                Ok(order)
            }
            Err(error) => Err(self.report_failure("create_order", error)),
        }
    }

    /// Replaces the local order list with the server's.
    pub async fn refresh_orders(&self) -> ClientResult<Vec<Order>> {
        match self.orders.list_orders().await {
            Ok(orders) => {
                self.state.write().await.orders = orders.clone();
                info!(count = orders.len(), "orders refreshed");
                self.notify_success(&format!("Loaded {} orders", orders.len()));
                Ok(orders)
            }
            Err(error) => Err(self.report_failure("refresh_orders", error)),
        }
    }

    /// Fetches the balance, falling back to 0 when the service has none for
    /// this user. The failure is logged but not reported as an error.
    pub async fn load_balance(&self, user_id: &UserId) -> f64 {
        match self.accounts.get_balance(user_id).await {
            Ok(response) => {
                self.state.write().await.balance = response.balance;
                self.notify_success(&format!("Balance: {:.2}", response.balance));
                response.balance
            }
            Err(error) => {
                warn!(%user_id, %error, "balance unavailable; resetting to zero");
                self.state.write().await.balance = 0.0;
                self.notify_success(&format!("No balance available for {user_id}; showing 0.00"));
                0.0
            }
        }
    }

    /// Reconciles one order: replaced in place when known, appended otherwise.
    pub async fn refresh_order(&self, order_id: &OrderId) -> ClientResult<Order> {
        match self.orders.get_order(order_id).await {
            Ok(order) => {
                {
                    let mut state = self.state.write().await;
                    match state.orders.iter_mut().find(|known| known.id == order.id) {
                        Some(slot) => *slot = order.clone(),
                        None => state.orders.push(order.clone()),
                    }
                }
                info!(order_id = %order.id, status = %order.status, "order refreshed");
                let progress = if order.is_settled() {
                    "settled"
                } else {
                    "awaiting payment"
                };
                self.notify_success(&format!(
                    "Order {} is {} ({progress})",
                    order.id, order.status
                ));
                Ok(order)
            }
            Err(error) => Err(self.report_failure("refresh_order", error)),
        }
    }

    pub async fn create_account_for_current_user(&self) -> ClientResult<()> {
        let user_id = self.current_user().await;
        self.create_account(&user_id).await
    }

    pub async fn load_current_balance(&self) -> f64 {
        let user_id = self.current_user().await;
        self.load_balance(&user_id).await
    }

    pub async fn submit_deposit(&self) -> ClientResult<f64> {
        let (user_id, amount) = {
            let state = self.state.read().await;
            (state.user_id.clone(), state.pending.deposit_amount)
        };
        self.deposit(&user_id, amount).await
    }

    pub async fn submit_order(&self) -> ClientResult<Order> {
        let (user_id, amount, description) = {
            let state = self.state.read().await;
            (
                state.user_id.clone(),
                state.pending.order_amount,
                state.pending.order_description.clone(),
            )
        };
        self.create_order(&user_id, amount, &description).await
    }

    async fn current_user(&self) -> UserId {
        self.state.read().await.user_id.clone()
    }

    fn notify_success(&self, message: &str) {
        self.notifier.notify(NotifyKind::Success, message);
    }

    fn report_failure(&self, intent: &'static str, error: ClientError) -> ClientError {
        warn!(intent, %error, "intent failed");
        self.notifier.notify(NotifyKind::Error, &error.to_string());
        error
    }
}
