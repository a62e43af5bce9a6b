//! Display and ordering policy for each order status.

use serde::Serialize;

use crate::domain::OrderStatus;

/// Sort rank given to statuses missing from the policy table.
pub const UNMAPPED_PRIORITY: u32 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusPolicy {
    pub label: &'static str,
    pub progress_percent: u8,
    /// Lower ranks are listed first. Delivered and cancelled orders rank
    /// behind every order that still needs attention.
    pub priority: u32,
}

static IN_PROCESS: StatusPolicy = StatusPolicy {
    label: "In Process",
    progress_percent: 25,
    priority: 1,
};

static IN_ROUTE: StatusPolicy = StatusPolicy {
    label: "In Route from Warehouse",
    progress_percent: 50,
    priority: 2,
};

static OUT_FOR_DELIVERY: StatusPolicy = StatusPolicy {
    label: "Out for Delivery",
    progress_percent: 75,
    priority: 3,
};

static CANCELLED: StatusPolicy = StatusPolicy {
    label: "Cancelled",
    progress_percent: 0,
    priority: 4,
};

static DELIVERED: StatusPolicy = StatusPolicy {
    label: "Delivered",
    progress_percent: 100,
    priority: 5,
};

pub fn policy(status: &OrderStatus) -> Option<&'static StatusPolicy> {
    match status {
        OrderStatus::InProcess => Some(&IN_PROCESS),
        OrderStatus::InRoute => Some(&IN_ROUTE),
        OrderStatus::OutForDelivery => Some(&OUT_FOR_DELIVERY),
        OrderStatus::Cancelled => Some(&CANCELLED),
        OrderStatus::Delivered => Some(&DELIVERED),
        OrderStatus::Unknown(_) => None,
    }
}

/// Policy used for rendering. Unmapped statuses render as in-process.
pub fn display_policy(status: &OrderStatus) -> &'static StatusPolicy {
    policy(status).unwrap_or(&IN_PROCESS)
}

/// Sort rank for a status; unmapped statuses get [`UNMAPPED_PRIORITY`].
pub fn priority(status: &OrderStatus) -> u32 {
    policy(status)
        .map(|policy| policy.priority)
        .unwrap_or(UNMAPPED_PRIORITY)
}

/// Every known status with its policy, most urgent first.
pub fn legend() -> Vec<(OrderStatus, &'static StatusPolicy)> {
    let mut entries: Vec<_> = OrderStatus::KNOWN
        .iter()
        .filter_map(|status| policy(status).map(|policy| (status.clone(), policy)))
        .collect();
    entries.sort_by_key(|(_, policy)| policy.priority);
    entries
}
