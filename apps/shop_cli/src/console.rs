//! Terminal rendering of notifications and session snapshots.

use std::fmt::Write as _;

use client_core::{Notifier, NotifyKind, SessionState};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Success => println!("{}", format_notification(kind, message)),
            NotifyKind::Error => eprintln!("{}", format_notification(kind, message)),
        }
    }
}

pub fn format_notification(kind: NotifyKind, message: &str) -> String {
    let label = match kind {
        NotifyKind::Success => "ok",
        NotifyKind::Error => "error",
    };
    format!("[{label}] {}", message.trim_end())
}

pub fn render_session(state: &SessionState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "User:    {}", state.user_id);
    let _ = writeln!(out, "Balance: {:.2}", state.balance);
    if state.orders.is_empty() {
        let _ = writeln!(out, "No orders yet");
        return out;
    }
    let _ = writeln!(out, "Orders:");
    for order in &state.orders {
        let _ = writeln!(
            out,
            "  {}  {:>10.2}  {:<10}  {}",
            order.id, order.amount, order.status, order.description
        );
    }
    out
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
