use serde::Serialize;
use shared::{
    domain::{Order, OrderStatus},
    status::priority,
};

/// Stable sort by status priority; orders with the same status keep their
/// incoming order.
pub fn sort_orders_by_status(orders: &mut [Order]) {
    orders.sort_by_key(|order| priority(&order.status));
}

/// Header counters shown above the order list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub total: usize,
    pub delivered: usize,
    pub pending: usize,
}

impl OrderSummary {
    pub fn from_orders(orders: &[Order]) -> Self {
        let delivered = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Delivered)
            .count();
        let pending = orders
            .iter()
            .filter(|o| !matches!(o.status, OrderStatus::Delivered | OrderStatus::Cancelled))
            .count();
        Self {
            total: orders.len(),
            delivered,
            pending,
        }
    }
}
