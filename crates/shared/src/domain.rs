use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

// Never validated locally; an empty id is passed through to the services.
string_id_newtype!(UserId);
string_id_newtype!(OrderId);

/// Status strings the Order Service is known to emit. `Order::status` stays a
/// free string so unknown values survive a round trip.
pub mod order_status {
    pub const CREATED: &str = "CREATED";
    pub const NEW: &str = "NEW";
    pub const PAID: &str = "PAID";
    pub const FAILED: &str = "FAILED";
    pub const FINISHED: &str = "FINISHED";
    pub const CANCELLED: &str = "CANCELLED";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub amount: f64,
    pub status: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Order {
    pub fn is_settled(&self) -> bool {
        matches!(
            self.status.as_str(),
            order_status::PAID
                | order_status::FAILED
                | order_status::FINISHED
                | order_status::CANCELLED
        )
    }
}
