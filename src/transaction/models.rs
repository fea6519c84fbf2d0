//! The transaction record model and its serialized forms.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::user::UserID;

/// An alias for transaction row IDs.
pub type TransactionId = i64;

/// A financial transaction belonging to a user.
///
/// `category` and `status` are open string sets: the pipeline recognizes
/// "Revenue"/"Expense" and "Paid" but otherwise treats them as opaque labels.
/// The sign of `amount` carries no meaning on its own; income and expense
/// classification is derived from `category`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction in the application database.
    pub id: TransactionId,
    /// The calendar date the transaction happened on.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The amount of money involved in the transaction.
    pub amount: f64,
    /// The transaction's category label, e.g. "Revenue" or "Expense".
    pub category: String,
    /// The transaction's payment status, e.g. "Paid" or "Pending".
    pub status: String,
    /// An optional label for who the transaction is attributed to.
    pub contributor: Option<String>,
    /// The ID of the user that owns this transaction.
    pub user_id: UserID,
}

/// One record in a bulk transaction upload.
///
/// This is the wire format clients send to the upload endpoint. The field
/// names match the upload files existing dashboards produce, so
/// `user_profile` rather than `contributor`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionUpload {
    /// The calendar date of the record, given as an ISO 8601 date or
    /// date-time string.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The amount of money involved in the transaction.
    pub amount: f64,
    /// The record's category label.
    pub category: String,
    /// The record's payment status.
    pub status: String,
    /// An optional label for who the record is attributed to.
    #[serde(default)]
    pub user_profile: Option<String>,
}

/// Parse a calendar date from an ISO 8601 date or date-time string.
///
/// Only the leading `YYYY-MM-DD` component is read; any time-of-day suffix is
/// ignored, which makes the aggregation timezone-naive. Returns [None] when
/// the text does not start with a valid date.
pub fn parse_date(text: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    let date_component = text.get(..10).unwrap_or(text);

    Date::parse(date_component, &format).ok()
}

pub(crate) mod iso_date {
    //! Serde support for dates in their ISO 8601 `YYYY-MM-DD` display form.

    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::Date;

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(date)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;

        super::parse_date(&text)
            .ok_or_else(|| de::Error::custom(format!("could not parse date from \"{text}\"")))
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{TransactionUpload, parse_date};

    #[test]
    fn parses_plain_date() {
        let got = parse_date("2024-01-05");

        assert_eq!(got, Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn parses_date_time_by_ignoring_time_component() {
        let got = parse_date("2024-01-05T10:30:00.000Z");

        assert_eq!(got, Some(date!(2024 - 01 - 05)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn upload_record_deserializes_from_dashboard_wire_format() {
        let json = r#"{
            "date": "2024-01-15T00:00:00.000Z",
            "amount": 1500.0,
            "category": "Revenue",
            "status": "Paid",
            "user_profile": "user_001"
        }"#;

        let got: TransactionUpload = serde_json::from_str(json).unwrap();

        assert_eq!(got.date, date!(2024 - 01 - 15));
        assert_eq!(got.amount, 1500.0);
        assert_eq!(got.category, "Revenue");
        assert_eq!(got.status, "Paid");
        assert_eq!(got.user_profile, Some("user_001".to_string()));
    }

    #[test]
    fn upload_record_allows_missing_user_profile() {
        let json = r#"{"date": "2024-02-01", "amount": 40, "category": "Expense", "status": "Pending"}"#;

        let got: TransactionUpload = serde_json::from_str(json).unwrap();

        assert_eq!(got.user_profile, None);
    }

    #[test]
    fn upload_record_rejects_unparseable_date() {
        let json = r#"{"date": "05/01/2024", "amount": 40, "category": "Expense", "status": "Pending"}"#;

        let got = serde_json::from_str::<TransactionUpload>(json);

        assert!(got.is_err());
    }
}
