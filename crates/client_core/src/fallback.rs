//! Sample orders shown when the backend cannot be reached.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use shared::domain::{Order, OrderStatus};

pub const FALLBACK_ORDER_COUNT: usize = 6;

const FALLBACK_ITEMS: [&str; 8] = [
    "Round Table 30\" high",
    "White Side Chair",
    "Black Side Chair",
    "Skirted Table 2' x 4' 30\" High",
    "White Stool with back",
    "2 Meter Curved Counter",
    "Round Table 42\" high",
    "Arm Light",
];

const FALLBACK_STATUSES: [OrderStatus; 4] = [
    OrderStatus::Delivered,
    OrderStatus::InRoute,
    OrderStatus::InProcess,
    OrderStatus::OutForDelivery,
];

const FALLBACK_COLORS: [&str; 3] = ["White", "Black", "Natural Wood"];

const FALLBACK_DESCRIPTION: &str = "Professional exhibition furniture and equipment";
const FALLBACK_COMMENTS: &str = "Coordinated by Expo Convention Contractors";
const FALLBACK_SOURCE: &str = "Expo CCI Database";
const MAX_ORDER_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// `ECC-<name>-<n>` with every whitespace run in the name replaced by `-`.
pub fn fallback_order_id(exhibitor_name: &str, index: usize) -> String {
    let mut slug = String::with_capacity(exhibitor_name.len());
    let mut in_whitespace = false;
    for ch in exhibitor_name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(ch);
            in_whitespace = false;
        }
    }
    format!("ECC-{slug}-{}", index + 1)
}

/// Builds the fixed-size fallback order set. Item, status and color cycle
/// deterministically by position; quantity, booth, date and section come from
/// `rng`.
pub fn fallback_orders<R: Rng + ?Sized>(
    exhibitor_name: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Order> {
    (0..FALLBACK_ORDER_COUNT)
        .map(|i| {
            let age = Duration::seconds(rng.gen_range(0..MAX_ORDER_AGE_SECS));
            Order {
                id: fallback_order_id(exhibitor_name, i),
                item_name: FALLBACK_ITEMS[i % FALLBACK_ITEMS.len()].to_string(),
                description: FALLBACK_DESCRIPTION.to_string(),
                booth_number: rng.gen_range(1000..=9999u32).to_string(),
                color: FALLBACK_COLORS[i % FALLBACK_COLORS.len()].to_string(),
                quantity: rng.gen_range(1..=5),
                status: FALLBACK_STATUSES[i % FALLBACK_STATUSES.len()].clone(),
                order_date: (now - age).format("%-m/%-d/%Y").to_string(),
                comments: FALLBACK_COMMENTS.to_string(),
                section: format!("Section {}", rng.gen_range(1..=3)),
                exhibitor_name: Some(exhibitor_name.to_string()),
                source_tag: Some(FALLBACK_SOURCE.to_string()),
                processed: true,
            }
        })
        .collect()
}
