use serde::{de, Deserialize, Deserializer, Serialize};

/// A company registered for the show. Entries live in the static catalog and
/// are never constructed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Exhibitor {
    pub id: &'static str,
    pub display_name: &'static str,
    pub booth_number: &'static str,
    pub company_category: &'static str,
}

/// Delivery status of an order as reported by the backend.
///
/// Statuses the dashboard does not know about are kept verbatim in
/// [`OrderStatus::Unknown`] so they can still be shown and sorted last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    InProcess,
    InRoute,
    OutForDelivery,
    Delivered,
    Cancelled,
    Unknown(String),
}

impl OrderStatus {
    pub const KNOWN: [OrderStatus; 5] = [
        OrderStatus::InProcess,
        OrderStatus::InRoute,
        OrderStatus::OutForDelivery,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::InProcess => "in-process",
            OrderStatus::InRoute => "in-route",
            OrderStatus::OutForDelivery => "out-for-delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown(raw) => raw,
        }
    }
}

/// A missing status is carried as an empty unknown status and sorts last.
impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Unknown(String::new())
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "in-process" => OrderStatus::InProcess,
            "in-route" => OrderStatus::InRoute,
            "out-for-delivery" => OrderStatus::OutForDelivery,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Unknown(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        OrderStatus::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One equipment order line. Orders are replaced wholesale on every sync and
/// never edited in place.
///
/// Decoding is lenient: apart from `id`, absent or `null` fields take their
/// default and `quantity` may arrive as a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(rename = "item", default, deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booth_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibitor_name: Option<String>,
    #[serde(rename = "data_source", default, skip_serializing_if = "Option::is_none")]
    pub source_tag: Option<String>,
    #[serde(rename = "expo_processed", default, deserialize_with = "null_as_default")]
    pub processed: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
    Whole(u32),
    Fractional(f64),
    Text(String),
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawQuantity>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawQuantity::Whole(n)) => Ok(n),
        Some(RawQuantity::Fractional(n)) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 => {
            u32::try_from(n as u64).map_err(de::Error::custom)
        }
        Some(RawQuantity::Fractional(n)) => Err(de::Error::custom(format!(
            "quantity {n} is not a whole number"
        ))),
        Some(RawQuantity::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(0);
            }
            trimmed
                .parse()
                .map_err(|_| de::Error::custom(format!("quantity '{raw}' is not a number")))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Delivery,
    Success,
}

/// Short-lived activity entry derived from the current order set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub relative_time: String,
    pub category: NotificationCategory,
}
