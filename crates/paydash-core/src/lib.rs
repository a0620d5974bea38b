//! Core transaction model and query pipeline
//!
//! - models / types: the `Transaction` record and its enumerations
//! - source: where the base collection comes from
//! - query: filter and sort a collection
//! - summary: totals for a result set

pub mod error;
pub mod models;
pub mod query;
pub mod source;
pub mod summary;
pub mod types;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::Transaction;
pub use query::{SortDirection, SortField, SortSpec, TransactionQuery};
pub use source::{
    build_source, FixedTransactionSource, MockTransactionSource, SourceRef, TransactionSource,
};
pub use summary::{StatusBreakdown, TransactionSummary};
pub use types::{PaymentMethod, TransactionStatus};

use serde::{Deserialize, Serialize};

/// Body of `GET /api/transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub items: Vec<Transaction>,
}

/// Pull the base collection from `source` and run `query` over it
pub fn query_transactions(source: &dyn TransactionSource, query: &TransactionQuery) -> Vec<Transaction> {
    query.apply(source.transactions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_query_transactions_end_to_end() {
        let source = MockTransactionSource::new(100, "INR").with_seed(1);
        let params: HashMap<String, String> = [("status", "pending"), ("sort", "amountInPaise")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let query = TransactionQuery::from_params(&params).unwrap();

        let items = query_transactions(&source, &query);
        assert!(items.len() <= 100);
        assert!(items.iter().all(|t| t.status == TransactionStatus::Pending));
        assert!(items.windows(2).all(|w| w[0].amount_in_paise <= w[1].amount_in_paise));
    }

    #[test]
    fn test_response_shape() {
        let response = TransactionsResponse { items: vec![] };
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"items":[]}"#);
    }
}
