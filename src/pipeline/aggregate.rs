//! Aggregation stage: summary figures derived from a filtered transaction
//! sequence.
//!
//! Every function here is a pure fold over its input. Grouped results come
//! back in first-occurrence order, meaning the order in which each group's
//! key first appears while scanning the input, so two runs over the same
//! sequence always produce the same rows in the same order.

use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;
use time::Month;

use crate::transaction::Transaction;

/// The number of contributors reported by [top_contributors].
pub const TOP_CONTRIBUTOR_LIMIT: usize = 5;

/// The contributor label used for transactions with no contributor.
const UNKNOWN_CONTRIBUTOR: &str = "Unknown";

/// The headline money figures for a transaction sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of amounts whose category is anything other than "expense"
    /// (compared ignoring case).
    pub income: f64,
    /// The sum of amounts whose category is "expense" (compared ignoring
    /// case).
    pub expenses: f64,
    /// Income minus expenses. May be negative.
    pub balance: f64,
    /// The balance clamped to zero from below.
    pub savings: f64,
}

/// Compute the income, expense, balance, and savings figures.
///
/// A transaction counts as an expense when its category is "expense" ignoring
/// case; every other category counts as income. The sign of the amount is
/// not consulted.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expenses = 0.0;

    for transaction in transactions {
        if is_expense(&transaction.category) {
            expenses += transaction.amount;
        } else {
            income += transaction.amount;
        }
    }

    let balance = income - expenses;

    Totals {
        income,
        expenses,
        balance,
        savings: balance.max(0.0),
    }
}

fn is_expense(category: &str) -> bool {
    category.eq_ignore_ascii_case("expense")
}

/// The per-month figures for one month-name bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// The abbreviated month name, e.g. "Jan".
    pub month: String,
    /// The summed amount of "Revenue" transactions in this bucket.
    pub revenue: f64,
    /// The summed amount of "Expense" transactions in this bucket.
    pub expense: f64,
    /// The summed amount of "Paid" transactions in this bucket.
    pub paid: f64,
    /// The summed amount of non-"Paid" transactions in this bucket.
    pub pending: f64,
}

/// Group transactions into buckets keyed by abbreviated month name, in
/// first-occurrence order.
///
/// The key is the month name alone, so January 2023 and January 2024 land in
/// the same "Jan" bucket. Within a bucket, revenue and expense sums use the
/// exact category labels "Revenue" and "Expense", and the paid/pending split
/// treats everything that is not exactly "Paid" as pending.
pub fn monthly_buckets(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<MonthlyBucket> = Vec::new();

    for transaction in transactions {
        let month = short_month_name(transaction.date.month());

        let index = match buckets.iter().position(|bucket| bucket.month == month) {
            Some(index) => index,
            None => {
                buckets.push(MonthlyBucket {
                    month: month.to_string(),
                    revenue: 0.0,
                    expense: 0.0,
                    paid: 0.0,
                    pending: 0.0,
                });
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];

        match transaction.category.as_str() {
            "Revenue" => bucket.revenue += transaction.amount,
            "Expense" => bucket.expense += transaction.amount,
            _ => {}
        }

        if transaction.status == "Paid" {
            bucket.paid += transaction.amount;
        } else {
            bucket.pending += transaction.amount;
        }
    }

    buckets
}

fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// A summed amount attributed to a display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledTotal {
    /// The label the amounts were grouped under.
    pub label: String,
    /// The summed amount for the label.
    pub total: f64,
}

/// Sum amounts grouped by the label `key` derives from each transaction,
/// preserving first-occurrence order.
fn sum_by(
    transactions: &[Transaction],
    key: impl Fn(&Transaction) -> String,
) -> Vec<LabelledTotal> {
    let mut totals: Vec<LabelledTotal> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for transaction in transactions {
        let label = key(transaction);

        match index_by_label.get(&label) {
            Some(&index) => totals[index].total += transaction.amount,
            None => {
                index_by_label.insert(label.clone(), totals.len());
                totals.push(LabelledTotal {
                    label,
                    total: transaction.amount,
                });
            }
        }
    }

    totals
}

/// Sum amounts per category, in first-occurrence order.
pub fn category_totals(transactions: &[Transaction]) -> Vec<LabelledTotal> {
    sum_by(transactions, |transaction| transaction.category.clone())
}

/// Sum amounts per "{category} - {status}" pair, in first-occurrence order.
pub fn label_totals(transactions: &[Transaction]) -> Vec<LabelledTotal> {
    sum_by(transactions, |transaction| {
        format!("{} - {}", transaction.category, transaction.status)
    })
}

/// The amounts split by payment status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTotals {
    /// The summed amount of transactions whose status is exactly "Paid".
    pub paid: f64,
    /// The summed amount of every other transaction.
    pub pending: f64,
}

/// Split the summed amount into paid and pending portions.
pub fn status_totals(transactions: &[Transaction]) -> StatusTotals {
    let mut paid = 0.0;
    let mut pending = 0.0;

    for transaction in transactions {
        if transaction.status == "Paid" {
            paid += transaction.amount;
        } else {
            pending += transaction.amount;
        }
    }

    StatusTotals { paid, pending }
}

/// The contributors with the largest summed amounts, largest first.
///
/// Transactions without a contributor are attributed to "Unknown". Ties keep
/// first-occurrence order because the descending sort is stable. At most
/// `limit` contributors are returned.
pub fn top_contributors(transactions: &[Transaction], limit: usize) -> Vec<LabelledTotal> {
    let mut totals = sum_by(transactions, |transaction| {
        transaction
            .contributor
            .clone()
            .unwrap_or_else(|| UNKNOWN_CONTRIBUTOR.to_string())
    });

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(Ordering::Equal)
    });
    totals.truncate(limit);

    totals
}
