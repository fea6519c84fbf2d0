//! The user of the application and the queries for managing them.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, password::PasswordHash};

/// The ID of a [User].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying database row ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The ID of the user in the application database.
    pub id: UserID,
    /// The user's email address, used to log in.
    pub email: String,
    /// The hash of the user's password.
    pub password_hash: PasswordHash,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub(crate) fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create a new user with `email` and `password_hash`.
///
/// # Errors
/// Returns an [Error::DuplicateEmail] if a user with `email` already exists,
/// or an [Error::SqlError] if the insert failed for any other reason.
pub fn create_user(
    email: &str,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (email, password) VALUES (?1, ?2)",
        (email, password_hash.as_ref()),
    )?;

    let id = connection.last_insert_rowid();

    Ok(User {
        id: UserID::new(id),
        email: email.to_string(),
        password_hash,
    })
}

/// Get the user with `email`.
///
/// # Errors
/// Returns an [Error::NotFound] if no user has `email`, or an
/// [Error::SqlError] if the query failed.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    let user = connection.query_row(
        "SELECT id, email, password FROM user WHERE email = :email",
        &[(":email", email)],
        map_user_row,
    )?;

    Ok(user)
}

/// Get the user with `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if no user has `id`, or an [Error::SqlError]
/// if the query failed.
pub fn get_user_by_id(id: UserID, connection: &Connection) -> Result<User, Error> {
    let user = connection.query_row(
        "SELECT id, email, password FROM user WHERE id = :id",
        &[(":id", &id.as_i64())],
        map_user_row,
    )?;

    Ok(user)
}

fn map_user_row(row: &rusqlite::Row) -> Result<User, rusqlite::Error> {
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id: UserID::new(row.get(0)?),
        email: row.get(1)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{Error, db::initialize, password::PasswordHash};

    use super::{UserID, create_user, get_user_by_email, get_user_by_id};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        connection
    }

    #[test]
    fn create_user_assigns_an_id() {
        let connection = get_test_connection();

        let user = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("dummy hash"),
            &connection,
        )
        .unwrap();

        assert_eq!(user.id, UserID::new(1));
        assert_eq!(user.email, "foo@bar.baz");
    }

    #[test]
    fn create_user_with_duplicate_email_fails() {
        let connection = get_test_connection();
        let email = "foo@bar.baz";
        create_user(email, PasswordHash::new_unchecked("dummy hash"), &connection).unwrap();

        let got = create_user(email, PasswordHash::new_unchecked("other hash"), &connection);

        assert_eq!(got, Err(Error::DuplicateEmail));
    }

    #[test]
    fn get_user_by_email_round_trips() {
        let connection = get_test_connection();
        let created = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("dummy hash"),
            &connection,
        )
        .unwrap();

        let got = get_user_by_email("foo@bar.baz", &connection).unwrap();

        assert_eq!(got, created);
    }

    #[test]
    fn get_user_by_email_for_unknown_email_fails() {
        let connection = get_test_connection();

        let got = get_user_by_email("nobody@bar.baz", &connection);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn get_user_by_id_round_trips() {
        let connection = get_test_connection();
        let created = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("dummy hash"),
            &connection,
        )
        .unwrap();

        let got = get_user_by_id(created.id, &connection).unwrap();

        assert_eq!(got, created);
    }

    #[test]
    fn get_user_by_id_for_unknown_id_fails() {
        let connection = get_test_connection();

        let got = get_user_by_id(UserID::new(42), &connection);

        assert_eq!(got, Err(Error::NotFound));
    }
}
