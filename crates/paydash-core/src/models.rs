//! Core data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{PaymentMethod, TransactionStatus};

/// A single payment transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier (`txn_<integer>`)
    pub id: String,
    /// Amount in paise, always positive
    pub amount_in_paise: u64,
    /// ISO currency code
    pub currency: String,
    /// Customer display name
    pub customer_name: String,
    /// Payment method
    pub method: PaymentMethod,
    /// Creation time, serialized as ISO-8601 with milliseconds
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    /// Payment status
    pub status: TransactionStatus,
}

impl Transaction {
    /// Formatted amount, e.g. `₹1,234.5`
    pub fn amount_display(&self) -> String {
        paydash_utils::format_rupees(self.amount_in_paise)
    }
}

mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
