//! Export stage: render a transaction sequence as CSV.

use time::macros::format_description;

use crate::{Error, transaction::Transaction};

/// Render `transactions` as CSV with a `Date,Amount,Category,Status` header.
///
/// Rows appear in input order, so exports reflect the caller's sort. Dates
/// are formatted as `MM/DD/YYYY` and amounts in their shortest decimal form.
///
/// # Errors
/// Returns an [Error::ExportError] if a row could not be written or the
/// output was not valid UTF-8.
pub fn to_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let date_format = format_description!("[month]/[day]/[year]");
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(["Date", "Amount", "Category", "Status"])
        .map_err(|error| Error::ExportError(error.to_string()))?;

    for transaction in transactions {
        let date = transaction
            .date
            .format(&date_format)
            .map_err(|error| Error::ExportError(error.to_string()))?;

        writer
            .write_record([
                &date,
                &transaction.amount.to_string(),
                &transaction.category,
                &transaction.status,
            ])
            .map_err(|error| Error::ExportError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::ExportError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::ExportError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{transaction::Transaction, user::UserID};

    use super::to_csv;

    fn transaction(date: Date, amount: f64, category: &str, status: &str) -> Transaction {
        Transaction {
            id: 0,
            date,
            amount,
            category: category.to_string(),
            status: status.to_string(),
            contributor: None,
            user_id: UserID::new(1),
        }
    }

    #[test]
    fn writes_header_and_rows_in_input_order() {
        let transactions = vec![
            transaction(date!(2024 - 01 - 05), 100.0, "Revenue", "Paid"),
            transaction(date!(2024 - 12 - 20), 40.5, "Expense", "Pending"),
        ];

        let got = to_csv(&transactions).unwrap();

        assert_eq!(
            got,
            "Date,Amount,Category,Status\n\
            01/05/2024,100,Revenue,Paid\n\
            12/20/2024,40.5,Expense,Pending\n"
        );
    }

    #[test]
    fn quotes_fields_containing_commas() {
        let transactions = vec![transaction(
            date!(2024 - 01 - 05),
            10.0,
            "Food, drink",
            "Paid",
        )];

        let got = to_csv(&transactions).unwrap();

        let mut reader = csv::Reader::from_reader(got.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[2], "Food, drink");
    }

    #[test]
    fn empty_input_yields_header_only() {
        let got = to_csv(&[]).unwrap();

        assert_eq!(got, "Date,Amount,Category,Status\n");
    }
}
