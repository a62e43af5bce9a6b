//! Plain-text rendering of the dashboard for terminal output.

use std::fmt;

use client_core::DashboardSnapshot;
use shared::{
    catalog::list_exhibitors,
    domain::{NotificationCategory, OrderStatus},
    status::{display_policy, legend},
};

const BAR_WIDTH: usize = 20;

pub fn progress_bar(status: &OrderStatus) -> String {
    let percent = usize::from(display_policy(status).progress_percent);
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

/// One line per exhibitor in the catalog.
pub struct ExhibitorList;

impl fmt::Display for ExhibitorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for exhibitor in list_exhibitors() {
            writeln!(
                f,
                "{:<12} {:<32} booth {:<6} {}",
                exhibitor.id, exhibitor.display_name, exhibitor.booth_number, exhibitor.company_category
            )?;
        }
        Ok(())
    }
}

pub struct DashboardView<'a>(pub &'a DashboardSnapshot);

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.0;
        let Some(exhibitor) = snapshot.authenticated_exhibitor else {
            return writeln!(f, "Not signed in.");
        };

        writeln!(
            f,
            "{} (booth {}) - {}",
            exhibitor.display_name, exhibitor.booth_number, exhibitor.company_category
        )?;
        if let Some(last_sync) = snapshot.last_sync {
            writeln!(f, "Updated: {}", last_sync.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        if snapshot
            .system_status
            .as_ref()
            .and_then(|status| status.field("status"))
            .is_some()
        {
            writeln!(f, "System Online")?;
        }

        let summary = snapshot.summary;
        writeln!(
            f,
            "Orders: {}  Delivered: {}  Pending: {}",
            summary.total, summary.delivered, summary.pending
        )?;

        if !snapshot.notifications.is_empty() {
            writeln!(f, "\nRecent activity:")?;
            for notification in &snapshot.notifications {
                let marker = match notification.category {
                    NotificationCategory::Success => "+",
                    NotificationCategory::Delivery => ">",
                };
                writeln!(
                    f,
                    "  {marker} {} ({})",
                    notification.message, notification.relative_time
                )?;
            }
        }

        writeln!(f, "\nOrders:")?;
        for order in &snapshot.orders {
            let policy = display_policy(&order.status);
            writeln!(
                f,
                "  {:<24} {:<32} x{:<3} {:<24} {}",
                order.id,
                order.item_name,
                order.quantity,
                policy.label,
                progress_bar(&order.status)
            )?;
        }

        writeln!(f, "\nLegend:")?;
        for (status, policy) in legend() {
            writeln!(f, "  {:<18} {}", status.as_str(), policy.label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use client_core::OrderSummary;
    use shared::{catalog::find_exhibitor, domain::Order};

    use super::*;

    fn order(id: &str, status: &str) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "item": "White Side Chair",
            "quantity": 2,
            "status": status,
        }))
        .expect("order")
    }

    #[test]
    fn progress_bar_tracks_policy() {
        assert_eq!(
            progress_bar(&OrderStatus::Delivered),
            format!("[{}] 100%", "#".repeat(20))
        );
        assert_eq!(
            progress_bar(&OrderStatus::Cancelled),
            format!("[{}]   0%", "-".repeat(20))
        );
        assert_eq!(
            progress_bar(&OrderStatus::from("unheard-of")),
            progress_bar(&OrderStatus::InProcess)
        );
    }

    #[test]
    fn signed_out_dashboard_says_so() {
        assert_eq!(
            DashboardView(&DashboardSnapshot::default()).to_string(),
            "Not signed in.\n"
        );
    }

    #[test]
    fn dashboard_lists_orders_and_counters() {
        let orders = vec![order("ORD-1", "in-route"), order("ORD-2", "delivered")];
        let snapshot = DashboardSnapshot {
            selected_exhibitor: find_exhibitor("costa-rica"),
            authenticated_exhibitor: find_exhibitor("costa-rica"),
            summary: OrderSummary::from_orders(&orders),
            orders,
            ..DashboardSnapshot::default()
        };

        let text = DashboardView(&snapshot).to_string();
        assert!(text.starts_with("Costa Rica (booth C-089) - Tourism Board\n"));
        assert!(text.contains("Orders: 2  Delivered: 1  Pending: 1"));
        assert!(text.contains("ORD-1"));
        assert!(text.contains("In Route from Warehouse"));
        assert!(!text.contains("System Online"));
    }

    #[test]
    fn exhibitor_listing_has_every_entry() {
        assert_eq!(ExhibitorList.to_string().lines().count(), list_exhibitors().len());
    }
}
