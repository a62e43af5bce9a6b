use serde::{Deserialize, Serialize};

use crate::domain::Order;

/// Body of `GET /orders/exhibitor/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitorOrdersResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibitor: Option<String>,
    #[serde(default)]
    pub orders: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_orders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_orders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Body of `GET /abacus-status`. The dashboard only displays it, so any JSON
/// value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemStatus(pub serde_json::Value);

impl SystemStatus {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Order, OrderStatus};

    #[test]
    fn decodes_backend_payload_with_sparse_orders() {
        let response: ExhibitorOrdersResponse = serde_json::from_value(json!({
            "exhibitor": "nevetal",
            "orders": [
                { "id": "ORD-1", "item": "Arm Light", "status": "delivered", "quantity": 2 },
                { "id": "ORD-2", "status": "Received" }
            ],
            "total_orders": 2,
            "delivered_orders": 1,
            "last_updated": "2025-06-14T10:30:00"
        }))
        .expect("payload");

        let orders = response.orders.expect("orders");
        assert_eq!(orders[0].item_name, "Arm Light");
        assert_eq!(orders[0].status, OrderStatus::Delivered);
        assert_eq!(orders[1].item_name, "");
        assert_eq!(orders[1].quantity, 0);
        assert_eq!(orders[1].status, OrderStatus::Unknown("Received".to_string()));
        assert!(!orders[1].processed);
    }

    #[test]
    fn irregular_orders_still_decode() {
        let response: ExhibitorOrdersResponse = serde_json::from_value(json!({
            "orders": [
                { "id": "ORD-1", "item": "Arm Light", "status": "in-route", "comments": null, "color": null },
                { "id": "ORD-2", "item": "White Side Chair", "quantity": 3 },
                { "id": "ORD-3", "status": null, "quantity": "2" },
                { "id": "ORD-4", "status": "delivered", "quantity": " 7 ", "expo_processed": null },
                { "id": "ORD-5", "status": "delivered", "quantity": 4.0, "section": null },
                { "id": "ORD-6", "status": "delivered", "quantity": "" }
            ],
            "last_updated": "2025-06-14T10:30:00"
        }))
        .expect("payload");

        let orders = response.orders.expect("orders");
        assert_eq!(orders.len(), 6);

        assert_eq!(orders[0].comments, "");
        assert_eq!(orders[0].color, "");
        assert_eq!(orders[0].status, OrderStatus::InRoute);

        assert_eq!(orders[1].status, OrderStatus::Unknown(String::new()));
        assert_eq!(crate::status::priority(&orders[1].status), 99);
        assert_eq!(orders[1].quantity, 3);

        assert_eq!(orders[2].status, OrderStatus::default());
        assert_eq!(orders[2].quantity, 2);

        assert_eq!(orders[3].quantity, 7);
        assert!(!orders[3].processed);
        assert_eq!(orders[4].quantity, 4);
        assert_eq!(orders[4].section, "");
        assert_eq!(orders[5].quantity, 0);
    }

    #[test]
    fn nonsense_quantity_is_still_rejected() {
        let result = serde_json::from_value::<Order>(json!({
            "id": "ORD-1", "status": "delivered", "quantity": "lots"
        }));
        assert!(result.is_err());

        let result = serde_json::from_value::<Order>(json!({
            "id": "ORD-1", "status": "delivered", "quantity": -2
        }));
        assert!(result.is_err());
    }

    #[test]
    fn status_round_trips_unknown_values_verbatim() {
        let encoded = serde_json::to_value(OrderStatus::from("on-hold")).expect("encode");
        assert_eq!(encoded, json!("on-hold"));
        let encoded = serde_json::to_value(OrderStatus::OutForDelivery).expect("encode");
        assert_eq!(encoded, json!("out-for-delivery"));
    }

    #[test]
    fn orders_field_may_be_absent() {
        let response: ExhibitorOrdersResponse =
            serde_json::from_value(json!({ "exhibitor": "nevetal" })).expect("payload");
        assert!(response.orders.is_none());
        assert!(response.last_updated.is_none());
    }

    #[test]
    fn system_status_exposes_string_fields() {
        let status: SystemStatus =
            serde_json::from_value(json!({ "status": "connected", "version": 2 })).expect("status");
        assert_eq!(status.field("status"), Some("connected"));
        assert_eq!(status.field("version"), None);
    }
}
