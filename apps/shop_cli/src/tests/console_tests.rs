use super::{format_notification, render_session};

use client_core::{NotifyKind, SessionState};
use shared::domain::{Order, OrderId, UserId};

#[test]
fn notifications_are_labelled_and_trimmed() {
    assert_eq!(
        format_notification(NotifyKind::Error, "Account already exists\n"),
        "[error] Account already exists"
    );
    assert_eq!(
        format_notification(NotifyKind::Success, "Deposit successful!"),
        "[ok] Deposit successful!"
    );
}

#[test]
fn empty_session_renders_placeholder() {
    let rendered = render_session(&SessionState::default());
    assert_eq!(rendered, "User:    user1\nBalance: 0.00\nNo orders yet\n");
}

#[test]
fn orders_render_in_session_order() {
    let state = SessionState {
        user_id: UserId::from("u1"),
        balance: 150.0,
        orders: vec![
            Order {
                id: OrderId::from("ord_2"),
                amount: 20.0,
                status: "PAID".to_string(),
                description: "book".to_string(),
                user_id: None,
            },
            Order {
                id: OrderId::from("ord_1"),
                amount: 5.5,
                status: "CREATED".to_string(),
                description: "pen".to_string(),
                user_id: None,
            },
        ],
        ..SessionState::default()
    };

    let rendered = render_session(&state);
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[1], "Balance: 150.00");
    assert_eq!(lines[2], "Orders:");
    assert!(lines[3].starts_with("  ord_2") && lines[3].ends_with("book"));
    assert!(lines[4].starts_with("  ord_1") && lines[4].ends_with("pen"));
}
