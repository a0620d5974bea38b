//! Transaction sources
//!
//! The dashboard has no backing store. `MockTransactionSource` generates a
//! fresh random collection on every call; `FixedTransactionSource` serves one
//! collection that stays stable across requests.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use paydash_config::DataConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Transaction;
use crate::types::{PaymentMethod, TransactionStatus};

/// Numeric part of the first generated id
pub const FIRST_ID: u64 = 100_000;
/// Smallest generated amount (₹10)
pub const MIN_AMOUNT_PAISE: u64 = 1_000;
/// Largest generated amount (just under ₹5,010)
pub const MAX_AMOUNT_PAISE: u64 = 500_999;
/// How far back generated timestamps reach
pub const CREATED_WINDOW_DAYS: i64 = 30;

const CUSTOMERS: [&str; 10] = [
    "Aarav Sharma",
    "Diya Patel",
    "Vivaan Singh",
    "Anaya Gupta",
    "Arjun Kumar",
    "Isha Reddy",
    "Kabir Mehta",
    "Sara Khan",
    "Rohan Verma",
    "Meera Nair",
];

/// Anything that can hand out the base collection for a query
pub trait TransactionSource: Send + Sync {
    /// The full, unfiltered collection
    fn transactions(&self) -> Vec<Transaction>;

    /// Short description for startup logs
    fn describe(&self) -> String;
}

/// Shared source handle
pub type SourceRef = Arc<dyn TransactionSource>;

/// Current time truncated to whole milliseconds
pub fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Generate `count` schema-valid transactions
pub fn generate_transactions<R: Rng>(
    count: usize,
    currency: &str,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Vec<Transaction> {
    let window_ms = CREATED_WINDOW_DAYS * 24 * 60 * 60 * 1000;

    (0..count)
        .map(|i| {
            let customer = CUSTOMERS[rng.gen_range(0..CUSTOMERS.len())];
            let method = PaymentMethod::ALL[rng.gen_range(0..PaymentMethod::ALL.len())];
            let status = TransactionStatus::ALL[rng.gen_range(0..TransactionStatus::ALL.len())];
            let amount_in_paise = rng.gen_range(MIN_AMOUNT_PAISE..=MAX_AMOUNT_PAISE);
            let age = Duration::milliseconds(rng.gen_range(0..window_ms));

            Transaction {
                id: format!("txn_{}", FIRST_ID + i as u64),
                amount_in_paise,
                currency: currency.to_string(),
                customer_name: customer.to_string(),
                method,
                created_at: now - age,
                status,
            }
        })
        .collect()
}

/// Random collection, regenerated on every call unless seeded
#[derive(Debug, Clone)]
pub struct MockTransactionSource {
    count: usize,
    currency: String,
    seed: Option<u64>,
    /// Clock reading that seeded timestamps are measured back from
    anchor: Option<DateTime<Utc>>,
}

impl MockTransactionSource {
    pub fn new(count: usize, currency: impl Into<String>) -> Self {
        Self {
            count,
            currency: currency.into(),
            seed: None,
            anchor: None,
        }
    }

    /// Draw values from a seeded RNG instead of the thread RNG
    ///
    /// Every call returns the same collection. Timestamps are measured
    /// back from the clock reading taken here.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.anchor = Some(now_millis());
        self
    }

    pub fn from_config(config: &DataConfig) -> Self {
        let source = Self::new(config.count, config.currency.clone());
        match config.seed {
            Some(seed) => source.with_seed(seed),
            None => source,
        }
    }
}

impl TransactionSource for MockTransactionSource {
    fn transactions(&self) -> Vec<Transaction> {
        let now = self.anchor.unwrap_or_else(now_millis);
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                generate_transactions(self.count, &self.currency, &mut rng, now)
            }
            None => generate_transactions(self.count, &self.currency, &mut rand::thread_rng(), now),
        }
    }

    fn describe(&self) -> String {
        match self.seed {
            Some(seed) => format!("mock ({} transactions, seed {})", self.count, seed),
            None => format!("mock ({} transactions, regenerated per request)", self.count),
        }
    }
}

/// A collection captured once and served unchanged
#[derive(Debug, Clone)]
pub struct FixedTransactionSource {
    items: Vec<Transaction>,
}

impl FixedTransactionSource {
    pub fn new(items: Vec<Transaction>) -> Self {
        Self { items }
    }
}

impl TransactionSource for FixedTransactionSource {
    fn transactions(&self) -> Vec<Transaction> {
        self.items.clone()
    }

    fn describe(&self) -> String {
        format!("fixed ({} transactions)", self.items.len())
    }
}

/// Build the source described by the data config
///
/// A configured seed yields one stable collection for the process lifetime.
pub fn build_source(config: &DataConfig) -> SourceRef {
    let mock = MockTransactionSource::from_config(config);
    if config.seed.is_some() {
        Arc::new(FixedTransactionSource::new(mock.transactions()))
    } else {
        Arc::new(mock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_records_are_schema_valid() {
        let now = now_millis();
        let items = generate_transactions(200, "INR", &mut rand::thread_rng(), now);
        assert_eq!(items.len(), 200);

        let ids: HashSet<&str> = items.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
        assert_eq!(items[0].id, "txn_100000");
        assert_eq!(items[199].id, "txn_100199");

        for tx in &items {
            assert!(tx.amount_in_paise >= MIN_AMOUNT_PAISE && tx.amount_in_paise <= MAX_AMOUNT_PAISE);
            assert_eq!(tx.currency, "INR");
            assert!(CUSTOMERS.contains(&tx.customer_name.as_str()));
            assert!(tx.created_at <= now);
            assert!(tx.created_at > now - Duration::days(CREATED_WINDOW_DAYS));
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let now = now_millis();
        let a = generate_transactions(50, "INR", &mut StdRng::seed_from_u64(9), now);
        let b = generate_transactions(50, "INR", &mut StdRng::seed_from_u64(9), now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_mock_source_uses_config() {
        let config = DataConfig {
            count: 12,
            currency: "USD".to_string(),
            seed: None,
        };
        let source = MockTransactionSource::from_config(&config);
        let items = source.transactions();
        assert_eq!(items.len(), 12);
        assert!(items.iter().all(|t| t.currency == "USD"));
        assert!(source.describe().contains("regenerated"));
    }

    #[test]
    fn test_seeded_mock_source_is_stable() {
        let source = MockTransactionSource::new(20, "INR").with_seed(42);
        let first = source.transactions();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(first, source.transactions());
        assert!(source.describe().contains("seed 42"));
    }

    #[test]
    fn test_seeded_config_builds_stable_source() {
        let config = DataConfig {
            count: 25,
            currency: "INR".to_string(),
            seed: Some(42),
        };
        let source = build_source(&config);
        assert_eq!(source.transactions(), source.transactions());
        assert!(source.describe().starts_with("fixed"));
    }

    #[test]
    fn test_unseeded_config_builds_mock_source() {
        let source = build_source(&DataConfig::default());
        assert_eq!(source.transactions().len(), 100);
        assert!(source.describe().starts_with("mock"));
    }
}
