//! Filter stage: reduce a transaction snapshot to the records matching the
//! caller's criteria.

use time::Date;

use crate::transaction::{Transaction, parse_date};

use super::params::{MATCH_ALL, ViewParams};

/// Return the subsequence of `transactions` matching `params`.
///
/// A record passes only if it satisfies the category, status, and date-range
/// constraints, and, when search text is present, a case-insensitive
/// substring match against its category, status, or ISO-formatted date. The
/// input is never mutated and the output preserves the input's relative
/// order.
pub fn filter(transactions: &[Transaction], params: &ViewParams) -> Vec<Transaction> {
    let date_from = parse_date_bound(params.date_from.as_deref());
    let date_to = parse_date_bound(params.date_to.as_deref());
    let search = params.search.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| matches_label(&transaction.category, &params.category))
        .filter(|transaction| matches_label(&transaction.status, &params.status))
        .filter(|transaction| matches_date_range(transaction.date, date_from, date_to))
        .filter(|transaction| search.is_empty() || matches_search(transaction, &search))
        .cloned()
        .collect()
}

/// Parse an inclusive date bound. Malformed or empty values mean "no bound".
fn parse_date_bound(raw_bound: Option<&str>) -> Option<Date> {
    raw_bound
        .filter(|text| !text.is_empty())
        .and_then(parse_date)
}

fn matches_label(value: &str, wanted: &str) -> bool {
    wanted == MATCH_ALL || value == wanted
}

fn matches_date_range(date: Date, date_from: Option<Date>, date_to: Option<Date>) -> bool {
    date_from.is_none_or(|from| date >= from) && date_to.is_none_or(|to| date <= to)
}

fn matches_search(transaction: &Transaction, needle_lowercase: &str) -> bool {
    transaction
        .category
        .to_lowercase()
        .contains(needle_lowercase)
        || transaction.status.to_lowercase().contains(needle_lowercase)
        || transaction.date.to_string().contains(needle_lowercase)
}
