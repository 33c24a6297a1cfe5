//! Client-side orchestration for the shop: typed clients for the Account and
//! Order services plus the orchestrator that folds their answers into one
//! session view.

pub mod account_client;
pub mod error;
pub mod notifier;
pub mod orchestrator;
pub mod order_client;
pub mod transport;

pub use account_client::AccountClient;
pub use error::{ClientError, ClientResult};
pub use notifier::{BroadcastNotifier, Notification, Notifier, NotifyKind};
pub use orchestrator::{Orchestrator, PendingInputs, SessionState};
pub use order_client::OrderClient;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
#[path = "tests/mock_services.rs"]
mod mock_services;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod client_tests;

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod orchestrator_tests;
