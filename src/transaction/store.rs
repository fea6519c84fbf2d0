//! SQLite queries for transaction records.

use rusqlite::Connection;

use crate::{Error, user::UserID};

use super::models::{Transaction, TransactionUpload};

/// Create the transaction table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub(crate) fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                date TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                status TEXT NOT NULL,
                contributor TEXT,
                user_id INTEGER NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Insert a batch of uploaded records owned by `user_id`.
///
/// The batch is written inside a single SQL transaction, so either every
/// record is stored or none are.
///
/// # Errors
/// Returns an [Error::SqlError] if the insert failed, e.g. because `user_id`
/// does not refer to a valid user.
pub fn create_transactions(
    records: &[TransactionUpload],
    user_id: UserID,
    connection: &mut Connection,
) -> Result<usize, Error> {
    let sql_transaction = connection.transaction()?;

    {
        let mut statement = sql_transaction.prepare(
            "INSERT INTO \"transaction\" (date, amount, category, status, contributor, user_id) \
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for record in records {
            statement.execute((
                record.date,
                record.amount,
                &record.category,
                &record.status,
                &record.user_profile,
                user_id.as_i64(),
            ))?;
        }
    }

    sql_transaction.commit()?;

    Ok(records.len())
}

/// Get every transaction owned by `user_id`, in insertion order.
///
/// Insertion order is what gives the pipeline its deterministic tie-breaks,
/// so the query orders by row ID explicitly.
///
/// # Errors
/// Returns an [Error::SqlError] if the query or row mapping failed.
pub fn get_transactions_for_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, amount, category, status, contributor, user_id \
            FROM \"transaction\" WHERE user_id = :user_id ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            Ok(Transaction {
                id: row.get(0)?,
                date: row.get(1)?,
                amount: row.get(2)?,
                category: row.get(3)?,
                status: row.get(4)?,
                contributor: row.get(5)?,
                user_id: UserID::new(row.get(6)?),
            })
        })?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}
