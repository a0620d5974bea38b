//! Transaction query pipeline
//!
//! A `TransactionQuery` is parsed from request parameters, then applied to a
//! collection in two steps: filter (search, status, method), then sort.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::types::{PaymentMethod, TransactionStatus};

/// Prefix marking a descending sort descriptor
pub const DESCENDING_MARKER: char = '-';

// ==================== Sorting ====================

/// Fields a collection can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    CustomerName,
    AmountInPaise,
    CreatedAt,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Id,
        SortField::CustomerName,
        SortField::AmountInPaise,
        SortField::CreatedAt,
    ];

    /// Wire name, identical to the JSON field name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::CustomerName => "customerName",
            SortField::AmountInPaise => "amountInPaise",
            SortField::CreatedAt => "createdAt",
        }
    }

    /// Ascending comparison of two transactions on this field
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
            SortField::AmountInPaise => a.amount_in_paise.cmp(&b.amount_in_paise),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

impl FromStr for SortField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Invalid sort field: {}", s))
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A parsed sort descriptor such as `-createdAt` or `amountInPaise`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::descending(SortField::CreatedAt)
    }
}

impl SortSpec {
    pub fn ascending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    pub fn is_descending(&self) -> bool {
        self.direction == SortDirection::Descending
    }

    /// Compare two transactions in the requested direction
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Sort a collection in place. The sort is stable: ties keep their input order.
    pub fn sort(&self, items: &mut [Transaction]) {
        items.sort_by(|a, b| self.compare(a, b));
    }

    /// Next sort after clicking a column header
    ///
    /// Clicking the field that is currently sorted descending flips it to
    /// ascending; any other click sorts that field descending.
    pub fn toggled(&self, field: SortField) -> SortSpec {
        if self.field == field && self.is_descending() {
            SortSpec::ascending(field)
        } else {
            SortSpec::descending(field)
        }
    }
}

impl FromStr for SortSpec {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, direction) = match s.strip_prefix(DESCENDING_MARKER) {
            Some(rest) => (rest, SortDirection::Descending),
            None => (s, SortDirection::Ascending),
        };

        let field = name.parse::<SortField>().map_err(|_| {
            CoreError::invalid_parameter(
                "sort",
                s,
                SortField::ALL.iter().map(|f| f.as_str()),
            )
        })?;

        Ok(SortSpec { field, direction })
    }
}

impl std::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_descending() {
            write!(f, "{}{}", DESCENDING_MARKER, self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

// ==================== Query descriptor ====================

/// Parsed filter and sort parameters for one pipeline run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionQuery {
    /// Case-insensitive substring matched against id and customer name
    pub search: Option<String>,
    pub status: Option<TransactionStatus>,
    pub method: Option<PaymentMethod>,
    pub sort: SortSpec,
}

/// Non-empty parameter value
fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
}

fn parse_search(params: &HashMap<String, String>) -> Option<String> {
    param(params, "q").map(str::to_string)
}

fn parse_status(params: &HashMap<String, String>) -> CoreResult<Option<TransactionStatus>> {
    param(params, "status")
        .map(|s| {
            s.parse::<TransactionStatus>().map_err(|_| {
                CoreError::invalid_parameter(
                    "status",
                    s,
                    TransactionStatus::ALL.iter().map(|v| v.as_str()),
                )
            })
        })
        .transpose()
}

fn parse_method(params: &HashMap<String, String>) -> CoreResult<Option<PaymentMethod>> {
    param(params, "method")
        .map(|s| {
            s.parse::<PaymentMethod>().map_err(|_| {
                CoreError::invalid_parameter(
                    "method",
                    s,
                    PaymentMethod::ALL.iter().map(|v| v.as_str()),
                )
            })
        })
        .transpose()
}

fn parse_sort(params: &HashMap<String, String>) -> CoreResult<Option<SortSpec>> {
    param(params, "sort").map(|s| s.parse::<SortSpec>()).transpose()
}

impl TransactionQuery {
    /// Parse `q`, `status`, `method` and `sort` using the default sort
    pub fn from_params(params: &HashMap<String, String>) -> CoreResult<Self> {
        Self::from_params_with_default(params, SortSpec::default())
    }

    /// Parse request parameters, falling back to `default_sort` when `sort` is absent
    ///
    /// Empty values are treated as absent. Values outside a parameter's
    /// domain are rejected. The search text is kept verbatim, spaces included.
    pub fn from_params_with_default(
        params: &HashMap<String, String>,
        default_sort: SortSpec,
    ) -> CoreResult<Self> {
        Ok(TransactionQuery {
            search: parse_search(params),
            status: parse_status(params)?,
            method: parse_method(params)?,
            sort: parse_sort(params)?.unwrap_or(default_sort),
        })
    }

    /// Like `from_params_with_default`, but drops invalid values instead of failing
    ///
    /// Used to redisplay what the user entered next to a rejection message.
    pub fn from_params_lenient(params: &HashMap<String, String>, default_sort: SortSpec) -> Self {
        TransactionQuery {
            search: parse_search(params),
            status: parse_status(params).ok().flatten(),
            method: parse_method(params).ok().flatten(),
            sort: parse_sort(params).ok().flatten().unwrap_or(default_sort),
        }
    }

    /// Same filters with a different sort
    pub fn with_sort(&self, sort: SortSpec) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Whether any filter is set
    pub fn is_filtered(&self) -> bool {
        self.search.is_some() || self.status.is_some() || self.method.is_some()
    }

    /// Check a single record against every supplied filter
    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.search.as_ref().map(|s| s.to_lowercase());
        self.matches_with(tx, needle.as_deref())
    }

    fn matches_with(&self, tx: &Transaction, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = [tx.id.as_str(), tx.customer_name.as_str()]
                .iter()
                .any(|v| v.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }
        if let Some(status) = self.status {
            if tx.status != status {
                return false;
            }
        }
        if let Some(method) = self.method {
            if tx.method != method {
                return false;
            }
        }
        true
    }

    /// Filter, then sort
    pub fn apply(&self, mut items: Vec<Transaction>) -> Vec<Transaction> {
        let total = items.len();
        let needle = self.search.as_ref().map(|s| s.to_lowercase());
        items.retain(|tx| self.matches_with(tx, needle.as_deref()));
        self.sort.sort(&mut items);

        log::debug!(
            "query search={:?} status={:?} method={:?} sort={} matched {}/{}",
            self.search,
            self.status,
            self.method,
            self.sort,
            items.len(),
            total
        );
        items
    }
}

// ==================== Tests ====================
