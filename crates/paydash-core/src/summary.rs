//! Aggregate figures for a result set

use serde::{Deserialize, Serialize};

use crate::models::Transaction;
use crate::types::TransactionStatus;

/// Transaction counts per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub success: usize,
    pub failed: usize,
    pub pending: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: TransactionStatus) -> usize {
        match status {
            TransactionStatus::Success => self.success,
            TransactionStatus::Failed => self.failed,
            TransactionStatus::Pending => self.pending,
        }
    }

    fn record(&mut self, status: TransactionStatus) {
        match status {
            TransactionStatus::Success => self.success += 1,
            TransactionStatus::Failed => self.failed += 1,
            TransactionStatus::Pending => self.pending += 1,
        }
    }
}

/// Summary cards shown above the transaction table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_count: usize,
    pub total_amount_in_paise: u64,
    /// Total in rupees with Indian digit grouping, e.g. `₹12,34,567.5`
    pub total_amount_display: String,
    pub by_status: StatusBreakdown,
}

impl TransactionSummary {
    pub fn from_transactions(items: &[Transaction]) -> Self {
        let mut by_status = StatusBreakdown::default();
        let mut total_amount_in_paise: u64 = 0;

        for tx in items {
            total_amount_in_paise = total_amount_in_paise.saturating_add(tx.amount_in_paise);
            by_status.record(tx.status);
        }

        Self {
            total_count: items.len(),
            total_amount_in_paise,
            total_amount_display: paydash_utils::format_rupees(total_amount_in_paise),
            by_status,
        }
    }
}
