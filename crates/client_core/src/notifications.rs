use rand::Rng;
use shared::domain::{Notification, NotificationCategory, Order, OrderStatus};

pub const MAX_NOTIFICATIONS: usize = 3;

/// Derives the activity feed from an already sorted order set. Only orders
/// that are moving or have arrived produce an entry; the feed keeps the first
/// [`MAX_NOTIFICATIONS`] in scan order.
pub fn derive_notifications<R: Rng + ?Sized>(orders: &[Order], rng: &mut R) -> Vec<Notification> {
    orders
        .iter()
        .filter_map(|order| notification_for(order, rng))
        .take(MAX_NOTIFICATIONS)
        .collect()
}

fn notification_for<R: Rng + ?Sized>(order: &Order, rng: &mut R) -> Option<Notification> {
    let (message, max_minutes, category) = match order.status {
        OrderStatus::InRoute => (
            format!("{} is in route from warehouse", order.item_name),
            30,
            NotificationCategory::Delivery,
        ),
        OrderStatus::Delivered => (
            format!("{} has been delivered", order.item_name),
            120,
            NotificationCategory::Success,
        ),
        OrderStatus::OutForDelivery => (
            format!("{} is out for delivery", order.item_name),
            15,
            NotificationCategory::Delivery,
        ),
        _ => return None,
    };

    let minutes: u32 = rng.gen_range(1..=max_minutes);
    Some(Notification {
        message,
        relative_time: format!("{minutes} min ago"),
        category,
    })
}
