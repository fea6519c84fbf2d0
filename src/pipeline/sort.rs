//! Sort stage: stable ordering over one field and one direction.

use std::cmp::Ordering;

use crate::transaction::Transaction;

use super::params::{SortField, SortOrder};

/// Sort `transactions` by `field` in `order`.
///
/// The sort is stable in both directions: records with equal keys keep their
/// relative order from the input, because flipping the direction only
/// reverses the comparator and an equal comparison stays equal. Amounts
/// compare numerically, with a fallback to comparing their displayed form
/// when the values are not comparable (NaN); the remaining fields compare as
/// case-sensitive strings. A date's ISO display form orders the same way as
/// the calendar, so dates are compared directly.
pub fn sort(
    mut transactions: Vec<Transaction>,
    field: SortField,
    order: SortOrder,
) -> Vec<Transaction> {
    transactions.sort_by(|a, b| {
        let ordering = compare_field(a, b, field);

        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    transactions
}

fn compare_field(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => compare_amounts(a.amount, b.amount),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Status => a.status.cmp(&b.status),
    }
}

fn compare_amounts(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.to_string().cmp(&b.to_string()))
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        pipeline::params::{SortField, SortOrder},
        transaction::Transaction,
        user::UserID,
    };

    use super::sort;

    fn transaction(id: i64, date: Date, amount: f64, category: &str, status: &str) -> Transaction {
        Transaction {
            id,
            date,
            amount,
            category: category.to_string(),
            status: status.to_string(),
            contributor: None,
            user_id: UserID::new(1),
        }
    }

    fn ids(transactions: &[Transaction]) -> Vec<i64> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn sorts_by_amount_ascending() {
        let transactions = vec![
            transaction(1, date!(2024 - 01 - 05), 100.0, "Revenue", "Paid"),
            transaction(2, date!(2024 - 01 - 20), 40.0, "Expense", "Pending"),
        ];

        let got = sort(transactions, SortField::Amount, SortOrder::Asc);

        let amounts: Vec<f64> = got.iter().map(|transaction| transaction.amount).collect();
        assert_eq!(amounts, vec![40.0, 100.0]);
    }

    #[test]
    fn sorts_by_date_descending() {
        let transactions = vec![
            transaction(1, date!(2024 - 01 - 05), 100.0, "Revenue", "Paid"),
            transaction(2, date!(2024 - 03 - 01), 20.0, "Expense", "Paid"),
            transaction(3, date!(2024 - 02 - 10), 75.0, "Revenue", "Pending"),
        ];

        let got = sort(transactions, SortField::Date, SortOrder::Desc);

        assert_eq!(ids(&got), vec![2, 3, 1]);
    }

    #[test]
    fn equal_keys_keep_input_order_in_both_directions() {
        let transactions = vec![
            transaction(1, date!(2024 - 01 - 05), 50.0, "Revenue", "Paid"),
            transaction(2, date!(2024 - 01 - 05), 50.0, "Expense", "Paid"),
            transaction(3, date!(2024 - 01 - 05), 50.0, "Revenue", "Pending"),
        ];

        let ascending = sort(transactions.clone(), SortField::Amount, SortOrder::Asc);
        let descending = sort(transactions, SortField::Amount, SortOrder::Desc);

        assert_eq!(ids(&ascending), vec![1, 2, 3]);
        assert_eq!(ids(&descending), vec![1, 2, 3]);
    }

    #[test]
    fn string_fields_compare_case_sensitively() {
        // Uppercase letters order before lowercase ones.
        let transactions = vec![
            transaction(1, date!(2024 - 01 - 05), 1.0, "groceries", "Paid"),
            transaction(2, date!(2024 - 01 - 05), 2.0, "Rent", "Paid"),
        ];

        let got = sort(transactions, SortField::Category, SortOrder::Asc);

        assert_eq!(ids(&got), vec![2, 1]);
    }

    #[test]
    fn sorts_by_status() {
        let transactions = vec![
            transaction(1, date!(2024 - 01 - 05), 1.0, "Revenue", "Pending"),
            transaction(2, date!(2024 - 01 - 05), 2.0, "Revenue", "Paid"),
        ];

        let got = sort(transactions, SortField::Status, SortOrder::Asc);

        assert_eq!(ids(&got), vec![2, 1]);
    }

    #[test]
    fn non_comparable_amounts_fall_back_to_string_comparison() {
        let transactions = vec![
            transaction(1, date!(2024 - 01 - 05), f64::NAN, "Revenue", "Paid"),
            transaction(2, date!(2024 - 01 - 05), 2.0, "Revenue", "Paid"),
        ];

        // "2" < "NaN" as strings, so the numeric record sorts first.
        let got = sort(transactions, SortField::Amount, SortOrder::Asc);

        assert_eq!(ids(&got), vec![2, 1]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let got = sort(Vec::new(), SortField::Date, SortOrder::Desc);

        assert!(got.is_empty());
    }
}
