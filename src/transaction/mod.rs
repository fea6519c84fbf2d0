//! Transaction records: the data model, SQLite queries, and the endpoints
//! for uploading, viewing, and exporting them.

mod list_endpoint;
mod models;
mod store;
mod upload_endpoint;

pub use list_endpoint::TransactionsResponse;
pub(crate) use list_endpoint::{export_transactions, get_transactions};
pub use models::{Transaction, TransactionId, TransactionUpload, parse_date};
pub(crate) use store::create_transaction_table;
pub use store::{create_transactions, get_transactions_for_user};
pub(crate) use upload_endpoint::upload_transactions;
