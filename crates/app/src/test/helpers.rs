//! Test Helpers

use orders::{products::ProductId, status::OrderStatus};
use rust_decimal::Decimal;

use crate::domain::orders::models::{NewOrder, OrderItem, OrderUuid};

/// Build a `PENDING` order from `(product_id, quantity, price)` lines.
///
/// Totals are computed from the lines so the row stays consistent.
pub(crate) fn new_order(lines: &[(ProductId, i32, Decimal)]) -> NewOrder {
    let items: Vec<OrderItem> = lines
        .iter()
        .map(|&(product_id, quantity, price)| OrderItem {
            product_id,
            quantity,
            price,
        })
        .collect();

    NewOrder {
        uuid: OrderUuid::new(),
        total_amount: items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum(),
        total_items: items.iter().map(|item| item.quantity).sum(),
        status: OrderStatus::from("PENDING"),
        items,
    }
}
